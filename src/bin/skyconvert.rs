//! Sky coordinate conversion tool
//!
//! Converts positions between celestial frames, prints sidereal time and
//! evaluates planetary positions from VSOP87 series. Also names the
//! constellation a position lies in.
//!
//! Usage:
//!   cargo run --bin skyconvert -- convert 13h10m46.37s -11.1614 --to galactic
//!   cargo run --bin skyconvert -- sidereal --jd 2446895.5 --longitude 0
//!   cargo run --bin skyconvert -- planet mars --jd 2451545.0 --data-dir ~/vsop87
//!   cargo run --bin skyconvert -- constellation 5h55m10s +7.407 --data-dir ~/sky

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use starframe::coordinates::angle::{parse_sexagesimal, Angle};
use starframe::coordinates::SphericalCoordinates;
use starframe::earthlib::SiderealTime;
use starframe::{
    CoordinateSystem, Coordinates, GeographicalLocation, Loader, Origin, Planet, PositionType,
    Time,
};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sky coordinate conversion tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Converts celestial coordinates between reference frames",
    long_about = None
)]
struct Args {
    /// Print results as JSON
    #[arg(short, long, action = ArgAction::SetTrue, global = true)]
    json: bool,

    /// Directory holding VSOP87 series and constellation files
    #[arg(long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a position from one frame to another
    Convert {
        /// Longitude (right ascension as `13h10m46s`, or degrees)
        longitude: String,
        /// Latitude in degrees (`+28°01'34.3"`, `-11 09 40.8` or decimal)
        #[arg(allow_hyphen_values = true)]
        latitude: String,
        #[command(flatten)]
        from: FrameArgs,
        /// Target frame
        #[arg(long, value_enum)]
        to: Frame,
        /// Equinox of the target frame
        #[arg(long, default_value = "J2000")]
        to_equinox: String,
        /// Origin of the target frame
        #[arg(long, value_enum, default_value = "barycentric")]
        to_origin: OriginArg,
        /// Position type of the result
        #[arg(long = "type", value_enum, default_value = "mean")]
        position_type: TypeArg,
    },
    /// Print mean and apparent sidereal time
    Sidereal {
        /// Instant as Julian date, `J2000`-style epoch or RFC 3339 time
        #[arg(long, default_value = "J2000")]
        jd: String,
        /// Longitude in degrees, positive west
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        longitude: f64,
    },
    /// Print the position of a planet
    Planet {
        /// Planet name
        name: String,
        /// Instant as Julian date, `J2000`-style epoch or RFC 3339 time
        #[arg(long, default_value = "J2000")]
        jd: String,
        /// Origin of the result
        #[arg(long, value_enum, default_value = "geocentric")]
        origin: OriginArg,
    },
    /// Name the constellation holding a position
    Constellation {
        /// Longitude (right ascension as `13h10m46s`, or degrees)
        longitude: String,
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        latitude: String,
        #[command(flatten)]
        from: FrameArgs,
    },
}

/// Source frame options
#[derive(clap::Args, Debug)]
struct FrameArgs {
    /// Source frame
    #[arg(long, value_enum, default_value = "equatorial")]
    from: Frame,
    /// Equinox of the source frame
    #[arg(long, default_value = "J2000")]
    equinox: String,
    /// Observation epoch (horizontal frames)
    #[arg(long)]
    epoch: Option<String>,
    /// Observer longitude in degrees, positive west
    #[arg(long, allow_hyphen_values = true)]
    site_longitude: Option<f64>,
    /// Observer latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    site_latitude: Option<f64>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Frame {
    Icrs,
    Equatorial,
    Ecliptical,
    Galactic,
    Horizontal,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OriginArg {
    Barycentric,
    Heliocentric,
    Geocentric,
}

impl From<OriginArg> for Origin {
    fn from(origin: OriginArg) -> Self {
        match origin {
            OriginArg::Barycentric => Origin::Barycentric,
            OriginArg::Heliocentric => Origin::Heliocentric,
            OriginArg::Geocentric => Origin::Geocentric,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TypeArg {
    Mean,
    True,
    Apparent,
}

impl From<TypeArg> for PositionType {
    fn from(t: TypeArg) -> Self {
        match t {
            TypeArg::Mean => PositionType::Mean,
            TypeArg::True => PositionType::True,
            TypeArg::Apparent => PositionType::Apparent,
        }
    }
}

/// Result record for JSON output
#[derive(Serialize)]
struct Output {
    system: CoordinateSystem,
    position_type: PositionType,
    coordinates: SphericalCoordinates,
}

impl Output {
    fn new(c: &Coordinates) -> Self {
        Output {
            system: c.system().clone(),
            position_type: c.position_type(),
            coordinates: c.spherical(),
        }
    }
}

fn build_system(
    frame: Frame,
    equinox: &Time,
    origin: Origin,
    epoch: Option<Time>,
    site: Option<GeographicalLocation>,
) -> Result<CoordinateSystem> {
    let system = match frame {
        Frame::Icrs => CoordinateSystem::icrs(),
        Frame::Equatorial => CoordinateSystem::equatorial(*equinox, origin),
        Frame::Ecliptical => CoordinateSystem::ecliptical(Some(*equinox), Some(*equinox), origin),
        Frame::Galactic => CoordinateSystem::galactic(),
        Frame::Horizontal => {
            let epoch = epoch.ok_or("horizontal frames need --epoch")?;
            let site = site.ok_or("horizontal frames need --site-longitude and --site-latitude")?;
            return Ok(CoordinateSystem::horizontal(epoch, site));
        }
    };
    Ok(match epoch {
        Some(epoch) => system.with_epoch(epoch),
        None => system,
    })
}

fn parse_angle(text: &str) -> Result<Angle> {
    parse_sexagesimal(text, false).ok_or_else(|| format!("cannot read angle {:?}", text).into())
}

fn print_coordinates(c: &Coordinates, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&Output::new(c))?);
    } else {
        println!("{}", c);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_convert(
    args: &Args,
    longitude: &str,
    latitude: &str,
    from: &FrameArgs,
    to: Frame,
    to_equinox: &str,
    to_origin: OriginArg,
    position_type: TypeArg,
) -> Result<()> {
    let epoch = from.epoch.as_deref().map(Time::parse).transpose()?;
    let site = match (from.site_longitude, from.site_latitude) {
        (Some(lon), Some(lat)) => Some(GeographicalLocation::new(lon, lat)),
        _ => None,
    };
    let source = build_system(from.from, &Time::parse(&from.equinox)?, Origin::Barycentric, epoch, site.clone())?;
    let target = build_system(to, &Time::parse(to_equinox)?, to_origin.into(), epoch, site)?;

    let coordinates = Coordinates::from_spherical(
        parse_angle(longitude)?,
        parse_angle(latitude)?,
        None,
        source,
        PositionType::Mean,
    );
    let vsop = load(args)?;
    let converted = coordinates.convert_with(&target, position_type.into(), &vsop)?;
    print_coordinates(&converted, args.json)
}

fn run_sidereal(args: &Args, jd: &str, longitude: f64) -> Result<()> {
    let time = Time::parse(jd)?;
    let site = GeographicalLocation::new(longitude, 0.0);
    let mean = SiderealTime::new(&time, &site, PositionType::Mean)?;
    let apparent = SiderealTime::new(&time, &site, PositionType::Apparent)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&[mean, apparent])?);
    } else {
        println!("{}", mean);
        println!("{}", apparent);
    }
    Ok(())
}

fn run_planet(args: &Args, name: &str, jd: &str, origin: OriginArg) -> Result<()> {
    let planet: Planet = name.parse()?;
    let time = Time::parse(jd)?;
    let vsop = load(args)?;
    let position = planet.equatorial_coordinates(&vsop, &time, origin.into())?;
    print_coordinates(&position, args.json)
}

fn run_constellation(args: &Args, longitude: &str, latitude: &str, from: &FrameArgs) -> Result<()> {
    let epoch = from.epoch.as_deref().map(Time::parse).transpose()?;
    let site = match (from.site_longitude, from.site_latitude) {
        (Some(lon), Some(lat)) => Some(GeographicalLocation::new(lon, lat)),
        _ => None,
    };
    let source = build_system(from.from, &Time::parse(&from.equinox)?, Origin::Barycentric, epoch, site)?;
    let coordinates = Coordinates::from_spherical(
        parse_angle(longitude)?,
        parse_angle(latitude)?,
        None,
        source,
        PositionType::Mean,
    );
    let tables = loader(args).load_constellations()?;
    let found = tables.containing_with(&coordinates, &load(args)?)?;
    match (found, args.json) {
        (Some(constellation), true) => println!("{}", serde_json::to_string_pretty(constellation)?),
        (Some(constellation), false) => println!("{} ({})", constellation.name, constellation),
        (None, _) => return Err("position is in no known constellation".into()),
    }
    Ok(())
}

fn loader(args: &Args) -> Loader {
    match &args.data_dir {
        Some(dir) => Loader::new().with_data_dir(dir),
        None => Loader::new(),
    }
}

fn load(args: &Args) -> Result<starframe::Vsop87> {
    Ok(loader(args).load_vsop87()?)
}

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.command {
        Command::Convert {
            longitude,
            latitude,
            from,
            to,
            to_equinox,
            to_origin,
            position_type,
        } => run_convert(
            &args,
            longitude,
            latitude,
            from,
            *to,
            to_equinox,
            *to_origin,
            *position_type,
        ),
        Command::Sidereal { jd, longitude } => run_sidereal(&args, jd, *longitude),
        Command::Planet { name, jd, origin } => run_planet(&args, name, jd, *origin),
        Command::Constellation {
            longitude,
            latitude,
            from,
        } => run_constellation(&args, longitude, latitude, from),
    }
}
