use crate::domain::model::{NextAction, Season};
use crate::utils::error::{PersistError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "dcs_persistence_config.json";

const DEFAULT_DCS_SERVER_EXE: &str =
    r"C:\Program Files\Eagle Dynamics\DCS World Server\bin\DCS_server.exe";
const DEFAULT_WEBGUI_URL: &str = "http://127.0.0.1:8088/api/server/status";
const DEFAULT_WEATHER_TEMPLATES_DIR: &str = "weather";
const DEFAULT_TIME_REPORT_PATH: &str = "extracted_time.json";

/// Configuration shared with the companion config GUI. The GUI writes this
/// JSON; this binary reads it. Unknown keys are ignored and missing keys
/// take defaults, so files written by either side stay compatible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the .miz mission archive to keep persistent.
    pub mission_path: String,

    pub hour_persistence_enabled: bool,

    pub weather_rotation_enabled: bool,
    pub weather_season: Season,
    pub weather_bad_weather_percentage: u8,

    // Persisted by the GUI; not acted on here. Acting on execution_time
    // would make this a scheduler, which it deliberately is not.
    pub backup_saves_enabled: bool,
    pub backup_saves_path: String,
    pub backup_saves_discord_enabled: bool,
    pub backup_saves_discord_webhook: String,
    pub execution_time: String,
    pub next_action: NextAction,

    pub send_errors_to_discord: bool,
    pub error_discord_webhook: String,

    /// Server binary to stop/start around mission edits.
    pub dcs_server_exe: String,
    /// Status endpoint the WebGUI dashboard itself polls.
    pub webgui_url: String,
    /// Directory holding `good_weather/` and `bad_weather/` template sets.
    pub weather_templates_dir: String,
    /// Where the extracted mission time is reported after each run.
    pub time_report_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mission_path: String::new(),
            hour_persistence_enabled: false,
            weather_rotation_enabled: false,
            weather_season: Season::None,
            weather_bad_weather_percentage: 0,
            backup_saves_enabled: false,
            backup_saves_path: String::new(),
            backup_saves_discord_enabled: false,
            backup_saves_discord_webhook: String::new(),
            execution_time: "00:00".to_string(),
            next_action: NextAction::None,
            send_errors_to_discord: false,
            error_discord_webhook: String::new(),
            dcs_server_exe: DEFAULT_DCS_SERVER_EXE.to_string(),
            webgui_url: DEFAULT_WEBGUI_URL.to_string(),
            weather_templates_dir: DEFAULT_WEATHER_TEMPLATES_DIR.to_string(),
            time_report_path: DEFAULT_TIME_REPORT_PATH.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| PersistError::ConfigError {
                message: format!(
                    "Failed to load config {}: {}",
                    path.as_ref().display(),
                    e
                ),
            })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| PersistError::ConfigError {
            message: format!("Config is not valid JSON: {}", e),
        })
    }

    pub fn anything_enabled(&self) -> bool {
        self.hour_persistence_enabled || self.weather_rotation_enabled
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if self.mission_path.trim().is_empty() {
            return Err(PersistError::MissingConfigError {
                field: "mission_path".to_string(),
            });
        }
        validate_file_extension("mission_path", &self.mission_path, "miz")?;

        validate_range(
            "weather_bad_weather_percentage",
            self.weather_bad_weather_percentage,
            0,
            100,
        )?;

        if self.send_errors_to_discord {
            validate_url("error_discord_webhook", &self.error_discord_webhook)?;
        }

        if self.hour_persistence_enabled {
            validate_url("webgui_url", &self.webgui_url)?;
        }

        validate_non_empty_string("dcs_server_exe", &self.dcs_server_exe)?;
        validate_non_empty_string("weather_templates_dir", &self.weather_templates_dir)?;

        Ok(())
    }
}
