use std::fmt::Write as _;
use std::io;
use std::path::Path;

use thiserror::Error;

/// The host scheduler runs 20 ticks to the second.
pub const TICKS_PER_SECOND: u64 = 20;

/// The six sweep options, loaded from a flat `key=value` file and replaced
/// wholesale on reload. Latest successful load fully overwrites the previous
/// values; a failed load leaves them untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Chebyshev occupancy radius, in chunks.
    pub chunk_range: i32,
    pub cleanup_interval_secs: u64,
    pub unload_chunks: bool,
    pub remove_monsters: bool,
    pub remove_animals: bool,
    pub remove_items: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chunk_range: 5,
            cleanup_interval_secs: 5,
            unload_chunks: true,
            remove_monsters: true,
            remove_animals: true,
            remove_items: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot access settings file: {0}")]
    Io(#[from] io::Error),
    #[error("line {0}: expected `key=value`")]
    Malformed(usize),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: &'static str, value: String },
}

impl Settings {
    /// Scheduler period for the configured interval. Clamped to one tick:
    /// an interval of zero is a valid file, not a reason to refuse to run.
    pub fn interval_ticks(&self) -> u64 {
        (self.cleanup_interval_secs * TICKS_PER_SECOND).max(1)
    }

    /// Read settings from `path`, writing a file with the defaults first if
    /// none exists. Errors leave no partial state behind: the returned value
    /// is only ever a fully parsed file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.try_exists()? {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(path, Self::default().to_file())?;
            log::info!("created default settings at {}", path.display());
        }
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Parse the flat key-value format: one `key=value` per line, `#` for
    /// comments. Unknown keys are ignored and missing keys keep their
    /// defaults, so old files survive upgrades. Numeric values are strict;
    /// booleans are anything-but-`true` false, like the host's own parser.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::default();
        for (n, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or(SettingsError::Malformed(n + 1))?;
            let (key, value) = (key.trim(), value.trim());
            match key {
                "chunk-range" => settings.chunk_range = parse_int("chunk-range", value)?,
                "cleanup-interval-seconds" => {
                    settings.cleanup_interval_secs = parse_int("cleanup-interval-seconds", value)?
                }
                "unload-chunks" => settings.unload_chunks = parse_bool(value),
                "remove-monsters" => settings.remove_monsters = parse_bool(value),
                "remove-animals" => settings.remove_animals = parse_bool(value),
                "remove-items" => settings.remove_items = parse_bool(value),
                _ => log::debug!("ignoring unknown settings key `{key}`"),
            }
        }
        Ok(settings)
    }

    fn to_file(&self) -> String {
        let mut out = String::from("# hibernation settings\n");
        let _ = write!(
            out,
            "chunk-range={}\n\
             cleanup-interval-seconds={}\n\
             unload-chunks={}\n\
             remove-monsters={}\n\
             remove-animals={}\n\
             remove-items={}\n",
            self.chunk_range,
            self.cleanup_interval_secs,
            self.unload_chunks,
            self.remove_monsters,
            self.remove_animals,
            self.remove_items,
        );
        out
    }
}

fn parse_int<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, SettingsError> {
    value.parse().map_err(|_| SettingsError::InvalidValue {
        key,
        value: value.to_owned(),
    })
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
