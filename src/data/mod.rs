//! Data module for locating and reading VSOP87 series and constellation tables
//!
//! Nothing is ever downloaded. Files are looked up in a data directory,
//! resolved from an explicit path, the `STARFRAME_DATA_DIR` environment
//! variable, or the user cache directory, in that order.

use flate2::read::GzDecoder;
use log::debug;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::vsop87::errors::{io_err, Result};
use crate::vsop87::names::{Body, Version};
use crate::vsop87::Series;

/// Environment variable naming the VSOP87 data directory
pub const DATA_DIR_ENV: &str = "STARFRAME_DATA_DIR";

/// Get the cache directory path
pub fn get_cache_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".cache").join("starframe")
}

/// Ensure that the cache directory exists
pub fn ensure_cache_dir() -> io::Result<PathBuf> {
    let cache_dir = get_cache_dir();
    fs::create_dir_all(&cache_dir)?;
    Ok(cache_dir)
}

fn resolve_dir(explicit: Option<&Path>, cache_subdir: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env::var(DATA_DIR_ENV) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_cache_dir().join(cache_subdir),
    }
}

/// Directory holding VSOP87 files
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    resolve_dir(explicit, "vsop87")
}

/// Directory holding the constellation name and boundary tables
pub fn resolve_constellation_dir(explicit: Option<&Path>) -> PathBuf {
    resolve_dir(explicit, "constellations")
}

/// `dir/name`, or `dir/name.gz` when only the compressed file is present
pub fn find_data_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let plain = dir.join(name);
    if file_exists_and_not_empty(&plain) {
        return Some(plain);
    }
    let compressed = dir.join(format!("{}.gz", name));
    file_exists_and_not_empty(&compressed).then_some(compressed)
}

/// Read a whole text file, transparently decompressing `.gz` files
pub fn read_text_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut text = String::new();
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        GzDecoder::new(file).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }
    debug!("Read {} ({} bytes)", path.display(), text.len());
    Ok(text)
}

/// Check if a file exists and is not empty
fn file_exists_and_not_empty<P: AsRef<Path>>(path: P) -> bool {
    match fs::metadata(path) {
        Ok(metadata) => metadata.is_file() && metadata.len() > 0,
        Err(_) => false,
    }
}

/// Recognise `VSOP87X.ext` and `VSOP87X.ext.gz` file names
pub fn parse_series_file_name(name: &str) -> Option<(Version, Body)> {
    let name = name.strip_suffix(".gz").unwrap_or(name);
    let rest = name.strip_prefix("VSOP87")?;
    let (letter, ext) = rest.split_once('.')?;
    let mut chars = letter.chars();
    let version = Version::from_letter(chars.next()?)?;
    if chars.next().is_some() {
        return None;
    }
    Some((version, Body::from_extension(ext)?))
}

/// Series files present in `dir`, sorted by name
pub fn list_series_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_err(dir, e))?.path();
        let recognised = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_series_file_name)
            .is_some();
        if recognised && file_exists_and_not_empty(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read one series file, transparently decompressing `.gz` files
pub fn read_series_file<P: AsRef<Path>>(path: P) -> Result<Series> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    let series = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Series::from_reader(BufReader::new(GzDecoder::new(file)))?
    } else {
        Series::from_reader(BufReader::new(file))?
    };
    debug!(
        "Loaded {} {} from {} ({} terms)",
        series.version(),
        series.body(),
        path.display(),
        series.term_count()
    );
    Ok(series)
}
