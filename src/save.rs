use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::settings::{ConfigError, WorldSettings};

const MAGIC_HEADER: &[u8; 4] = b"WSTS";
const VERSION: u32 = 1;
// Magic, version and payload length
const HEADER_LEN: u64 = 16;

pub const SETTINGS_FILE_EXTENSION: &str = "wss";
pub const DEFAULT_SETTINGS_FILE: &str = "settings.wss";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("not a settings file")]
    BadMagic,
    #[error("unsupported settings version {0}")]
    Version(u32),
    #[error("settings payload claims {claimed} bytes but only {available} follow")]
    Truncated { claimed: u64, available: u64 },
    #[error("settings payload is corrupt: {0}")]
    Decode(#[from] bincode::Error),
    #[error("settings rejected: {0}")]
    Invalid(#[from] ConfigError),
}

/// Per-user settings location, e.g. `~/.config/worldstream/settings.wss`.
pub fn default_settings_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "worldstream")
        .map(|dirs| dirs.config_dir().join(DEFAULT_SETTINGS_FILE))
}

pub fn save_settings<P: AsRef<Path>>(path: P, settings: &WorldSettings) -> Result<(), SettingsError> {
    settings.validate()?;
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let data = bincode::serialize(settings)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(MAGIC_HEADER)?;
    writer.write_all(&VERSION.to_le_bytes())?;
    writer.write_all(&(data.len() as u64).to_le_bytes())?;
    writer.write_all(&data)?;
    writer.flush()?;

    Ok(())
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<WorldSettings, SettingsError> {
    let file = File::open(path)?;
    let file_len = file.metadata()?.len();
    let mut reader = BufReader::new(file);

    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC_HEADER {
        return Err(SettingsError::BadMagic);
    }

    let mut version_bytes = [0u8; 4];
    reader.read_exact(&mut version_bytes)?;
    let version = u32::from_le_bytes(version_bytes);
    if version != VERSION {
        return Err(SettingsError::Version(version));
    }

    let mut size_bytes = [0u8; 8];
    reader.read_exact(&mut size_bytes)?;
    let claimed = u64::from_le_bytes(size_bytes);
    let available = file_len.saturating_sub(HEADER_LEN);
    if claimed > available {
        return Err(SettingsError::Truncated { claimed, available });
    }

    let mut data = vec![0u8; claimed as usize];
    reader.read_exact(&mut data)?;

    let settings: WorldSettings = bincode::deserialize(&data)?;
    settings.validate()?;
    Ok(settings)
}

/// Loads settings, falling back to defaults when the file does not exist yet.
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> Result<WorldSettings, SettingsError> {
    match load_settings(&path) {
        Ok(settings) => Ok(settings),
        Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(
                "No settings at {}, using defaults",
                path.as_ref().display()
            );
            Ok(WorldSettings::default())
        }
        Err(e) => Err(e),
    }
}
