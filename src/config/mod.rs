// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Application configuration.
//!
//! This module manages the application configuration file, which also acts as
//! the settings store consulted when sizing the queue popover.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::art::ART_SIZE_MEDIUM;

const CONFIG_NAME: &str = "queuepane";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub media_dirs: Vec<String>,
    pub database_file: String,
    pub log_file: String,
    pub art_size: u16,
    /// Popover width as a percentage of the window width.
    pub queue_width_percent: u16,
    /// Popover height as a percentage of the window height.
    pub queue_height_percent: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            media_dirs: vec![],
            database_file: "music.db".to_string(),
            log_file: "queuepane.log".to_string(),
            art_size: ART_SIZE_MEDIUM,
            queue_width_percent: 40,
            queue_height_percent: 80,
        }
    }
}

/// Loads the configuration, falling back to defaults if the file cannot be
/// read or parsed.
pub fn load_config() -> AppConfig {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .and_then(|path| load_config_from(&path))
        .unwrap_or_default()
}

/// Loads the configuration from an explicit path, creating the file with
/// default values if it does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig, confy::ConfyError> {
    confy::load_path(path)
}
