use crate::domain::model::{MissionClock, ServerStatus};
use crate::utils::error::{PersistError, Result};
use reqwest::Client;
use std::time::Duration;

const STATUS_TIMEOUT: Duration = Duration::from_secs(40);

/// Client for the DCS server's WebGUI status endpoint (the same JSON the
/// dashboard itself polls).
pub struct WebGuiClient {
    url: String,
    client: Client,
    timeout: Duration,
}

impl WebGuiClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
            timeout: STATUS_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the mission clock, verifying the server is actually running
    /// the mission we are about to edit.
    pub async fn read_clock(&self, expected_miz_path: &str) -> Result<MissionClock> {
        tracing::info!("Querying DCS server status at {}", self.url);

        let status: ServerStatus = self
            .client
            .get(&self.url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::info!("Loaded mission: {}", status.mission);

        let loaded_norm = normalize_mission_path(&status.mission);
        let expected_norm = normalize_mission_path(expected_miz_path);
        tracing::debug!("Normalized loaded:   {}", loaded_norm);
        tracing::debug!("Normalized expected: {}", expected_norm);

        if loaded_norm != expected_norm {
            tracing::warn!(
                "MISSION MISMATCH -> Expected: {} | Found: {}",
                expected_norm,
                loaded_norm
            );
            return Err(PersistError::MissionMismatchError {
                expected: expected_norm,
                loaded: loaded_norm,
            });
        }

        let clock = MissionClock::from_hms(status.mission_time.trim());
        tracing::info!("Mission time extracted: {} ({} seconds)", clock.hms, clock.seconds);
        Ok(clock)
    }
}

/// Unify path format so the server's report and the config always compare
/// equal regardless of separators and casing.
pub fn normalize_mission_path(path: &str) -> String {
    path.replace('\\', "/")
        .replace("//", "/")
        .to_lowercase()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_normalize_mission_path() {
        assert_eq!(
            normalize_mission_path(r"C:\Missions\Persist.miz"),
            "c:/missions/persist.miz"
        );
        assert_eq!(
            normalize_mission_path("C://Missions//Persist.miz "),
            "c:/missions/persist.miz"
        );
        assert_eq!(
            normalize_mission_path("c:/missions/persist.miz"),
            normalize_mission_path(r"C:\MISSIONS\PERSIST.MIZ")
        );
    }

    #[tokio::test]
    async fn test_read_clock_from_status_endpoint() {
        let server = MockServer::start();
        let status_mock = server.mock(|when, then| {
            when.method(GET).path("/api/server/status");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "mission": "C:\\Missions\\Persist.miz",
                    "mission_time": "08:30:15"
                }));
        });

        let client = WebGuiClient::new(server.url("/api/server/status"));
        let clock = client.read_clock("c:/missions/persist.miz").await.unwrap();

        status_mock.assert();
        assert_eq!(clock.hms, "08:30:15");
        assert_eq!(clock.seconds, 8 * 3600 + 30 * 60 + 15);
    }

    #[tokio::test]
    async fn test_read_clock_mission_mismatch() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/server/status");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "mission": "C:\\Missions\\Other.miz",
                    "mission_time": "08:30:15"
                }));
        });

        let client = WebGuiClient::new(server.url("/api/server/status"));
        let result = client.read_clock("c:/missions/persist.miz").await;
        assert!(matches!(
            result,
            Err(PersistError::MissionMismatchError { .. })
        ));
    }

    #[tokio::test]
    async fn test_read_clock_server_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/server/status");
            then.status(500);
        });

        let client = WebGuiClient::new(server.url("/api/server/status"));
        let result = client.read_clock("c:/missions/persist.miz").await;
        assert!(matches!(result, Err(PersistError::HttpError(_))));
    }
}
