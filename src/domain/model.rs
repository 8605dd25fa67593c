use serde::{Deserialize, Serialize};

/// Mission clock as reported by the server dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionClock {
    pub hms: String,
    pub seconds: u32,
}

impl MissionClock {
    /// Parse an `HH:MM:SS` string. A malformed value yields 0 seconds,
    /// which turns the mission update into a no-op rather than an abort.
    pub fn from_hms(hms: &str) -> Self {
        let seconds = Self::hms_to_seconds(hms);
        Self {
            hms: hms.to_string(),
            seconds,
        }
    }

    fn hms_to_seconds(hms: &str) -> u32 {
        let parts: Vec<&str> = hms.split(':').collect();
        if parts.len() != 3 {
            return 0;
        }
        let parsed: Option<(u32, u32, u32)> = (|| {
            let h = parts[0].trim().parse().ok()?;
            let m = parts[1].trim().parse().ok()?;
            let s = parts[2].trim().parse().ok()?;
            Some((h, m, s))
        })();
        match parsed {
            Some((h, m, s)) => h * 3600 + m * 60 + s,
            None => 0,
        }
    }
}

/// What the WebGUI status endpoint reports about the running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Path of the currently loaded mission, as the server sees it.
    pub mission: String,
    /// Current in-mission clock, `HH:MM:SS`.
    pub mission_time: String,
}

/// Written to `extracted_time.json` after a successful extraction, so the
/// last applied value can be inspected after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeReport {
    pub time_hms: String,
    pub time_seconds: u32,
}

impl From<&MissionClock> for TimeReport {
    fn from(clock: &MissionClock) -> Self {
        Self {
            time_hms: clock.hms.clone(),
            time_seconds: clock.seconds,
        }
    }
}

/// Season driving the mission date rewrite. `Realistic` uses today's date;
/// `None` falls back to a fixed early-September date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Summer,
    Autumn,
    Winter,
    Spring,
    Realistic,
    #[default]
    None,
}

/// Pending action persisted by the companion config GUI. This binary only
/// parses it so GUI-written config files load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    #[default]
    None,
    SaveAndApply,
    SaveAndApplyNextRotation,
    ApplyRotation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_parses_hms() {
        let clock = MissionClock::from_hms("01:02:03");
        assert_eq!(clock.seconds, 3723);
        assert_eq!(clock.hms, "01:02:03");
    }

    #[test]
    fn test_clock_malformed_is_zero() {
        assert_eq!(MissionClock::from_hms("12:00").seconds, 0);
        assert_eq!(MissionClock::from_hms("not a clock").seconds, 0);
        assert_eq!(MissionClock::from_hms("aa:bb:cc").seconds, 0);
        assert_eq!(MissionClock::from_hms("").seconds, 0);
    }

    #[test]
    fn test_season_serde_names() {
        let season: Season = serde_json::from_str("\"realistic\"").unwrap();
        assert_eq!(season, Season::Realistic);
        assert_eq!(serde_json::to_string(&Season::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_next_action_serde_names() {
        let action: NextAction = serde_json::from_str("\"save_and_apply_next_rotation\"").unwrap();
        assert_eq!(action, NextAction::SaveAndApplyNextRotation);
    }
}
