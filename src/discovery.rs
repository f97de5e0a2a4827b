//! Per-platform lookup of the application settings file.
//!
//! The desktop application stores its settings under the user configuration directory,
//! whose location depends on the operating system. Each platform is a small strategy that
//! yields candidate configuration directories in priority order; the first one holding a
//! settings file wins.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{RelinkError, Result};

/// Application folder inside the user configuration directory.
pub const SETTINGS_APP_DIR: &str = "hex-kit";

/// Settings file name inside [`SETTINGS_APP_DIR`].
pub const SETTINGS_FILE_NAME: &str = "Settings";

/// Operating system families with distinct configuration layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `~/Library/Application Support`.
    MacOs,
    /// `$XDG_CONFIG_HOME`, falling back to `~/.config`.
    Linux,
    /// `%APPDATA%`.
    Windows,
}

impl Platform {
    /// Platform the binary was compiled for. Unknown Unix flavours use the Linux layout.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Linux
        }
    }
}

/// Environment inputs consulted by the platform strategies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEnv {
    /// User home directory.
    pub home: Option<PathBuf>,
    /// Value of `XDG_CONFIG_HOME`.
    pub xdg_config_home: Option<PathBuf>,
    /// Value of `APPDATA`.
    pub app_data: Option<PathBuf>,
}

impl ConfigEnv {
    /// Capture the current process environment. Empty variables count as unset.
    pub fn from_process() -> Self {
        Self {
            home: dirs::home_dir(),
            xdg_config_home: non_empty(std::env::var_os("XDG_CONFIG_HOME")),
            app_data: non_empty(std::env::var_os("APPDATA")),
        }
    }
}

fn non_empty(value: Option<OsString>) -> Option<PathBuf> {
    value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

/// Strategy producing the configuration directories to search, most preferred first.
pub trait SettingsLocator {
    /// Candidate user configuration directories.
    fn config_dirs(&self) -> Result<Vec<PathBuf>>;

    /// Candidate settings files derived from [`SettingsLocator::config_dirs`].
    fn settings_candidates(&self) -> Result<Vec<PathBuf>> {
        Ok(self
            .config_dirs()?
            .into_iter()
            .map(|dir| dir.join(SETTINGS_APP_DIR).join(SETTINGS_FILE_NAME))
            .collect())
    }
}

/// Locator following the conventions of a given platform.
#[derive(Debug, Clone)]
pub struct PlatformLocator {
    platform: Platform,
    env: ConfigEnv,
}

impl PlatformLocator {
    /// Locator for an explicit platform and environment.
    pub fn new(platform: Platform, env: ConfigEnv) -> Self {
        Self { platform, env }
    }

    /// Locator for the running system.
    pub fn current() -> Self {
        Self::new(Platform::current(), ConfigEnv::from_process())
    }
}

impl SettingsLocator for PlatformLocator {
    fn config_dirs(&self) -> Result<Vec<PathBuf>> {
        let home = || {
            self.env
                .home
                .clone()
                .ok_or(RelinkError::NoConfigDirectory("no home directory"))
        };

        match self.platform {
            Platform::MacOs => Ok(vec![home()?.join("Library").join("Application Support")]),
            Platform::Linux => {
                let mut dirs = Vec::with_capacity(2);
                dirs.extend(self.env.xdg_config_home.clone());
                match home() {
                    Ok(home) => dirs.push(home.join(".config")),
                    Err(err) if dirs.is_empty() => return Err(err),
                    Err(_) => {}
                }
                Ok(dirs)
            }
            Platform::Windows => self
                .env
                .app_data
                .clone()
                .map(|dir| vec![dir])
                .ok_or(RelinkError::NoConfigDirectory("no APPDATA environment variable")),
        }
    }
}

/// Find the first existing settings file offered by the locator.
pub fn locate_settings(locator: &impl SettingsLocator) -> Result<PathBuf> {
    let candidates = locator.settings_candidates()?;
    for candidate in &candidates {
        if candidate.is_file() {
            info!(path = %candidate.display(), "reading user settings");
            return Ok(candidate.clone());
        }
        debug!(path = %candidate.display(), "no settings file");
    }
    Err(RelinkError::SettingsNotFound { tried: candidates })
}
