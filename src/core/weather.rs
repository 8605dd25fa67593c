use crate::domain::model::Season;
use crate::utils::error::{PersistError, Result};
use chrono::{Datelike, Local};
use rand::Rng;
use regex::{NoExpand, Regex};
use std::path::{Path, PathBuf};

const BAD_WEATHER_DIR: &str = "bad_weather";
const GOOD_WEATHER_DIR: &str = "good_weather";
const TEMPLATE_EXTENSION: &str = "config";

// Tolerates field order, whitespace, and an optional trailer comment.
const DATE_BLOCK_PATTERN: &str = r#"(?s)\s*\["date"\]\s*=\s*\{.*?\},\s*(?:--\s*end of \["date"\])?"#;
const WEATHER_BLOCK_PATTERN: &str = r#"(?s)\["weather"\]\s*=\s*\{.*?\},\s*-- end of \["weather"\]"#;

/// Mission date for the configured season: `Realistic` is today, the fixed
/// seasons are anchored to 2025, anything else falls back to 1 September.
pub fn season_date(season: Season) -> (i32, u32, u32) {
    match season {
        Season::Realistic => {
            let today = Local::now().date_naive();
            (today.year(), today.month(), today.day())
        }
        Season::Summer => (2025, 8, 1),
        Season::Winter => (2025, 2, 1),
        Season::Autumn => (2025, 10, 1),
        Season::Spring => (2025, 5, 1),
        Season::None => (2025, 9, 1),
    }
}

/// Replace the mission's `["date"]` block with one for the given season.
pub fn rewrite_date_block(text: &str, season: Season) -> Result<String> {
    let (year, month, day) = season_date(season);
    tracing::info!(
        "Setting mission date for season '{:?}': {}-{}-{}",
        season,
        day,
        month,
        year
    );

    let new_block = format!(
        "\n\t[\"date\"] = \n\t{{\n\t\t[\"Day\"] = {},\n\t\t[\"Year\"] = {},\n\t\t[\"Month\"] = {},\n\t}}, -- end of [\"date\"]\n",
        day, year, month
    );

    let pattern = Regex::new(DATE_BLOCK_PATTERN)?;
    if !pattern.is_match(text) {
        return Err(PersistError::MissionError {
            message: "could not find date block in mission".to_string(),
        });
    }

    Ok(pattern.replacen(text, 1, NoExpand(&new_block)).into_owned())
}

/// Replace the full `["weather"]` block with a template. Templates carry the
/// whole block including the `-- end of ["weather"]` trailer.
pub fn rewrite_weather_block(text: &str, template: &str) -> Result<String> {
    let pattern = Regex::new(WEATHER_BLOCK_PATTERN)?;
    if !pattern.is_match(text) {
        return Err(PersistError::MissionError {
            message: "could not find weather block in mission".to_string(),
        });
    }

    Ok(pattern.replacen(text, 1, NoExpand(template)).into_owned())
}

/// Weighted random selection between the good- and bad-weather template
/// directories.
pub struct WeatherTemplates {
    root: PathBuf,
}

impl WeatherTemplates {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn pick(&self, bad_percentage: u8) -> Result<String> {
        let bad_percentage = bad_percentage.min(100);
        let roll: u8 = rand::thread_rng().gen_range(1..=100);
        tracing::info!("Bad weather percentage: {}%. Roll: {}", bad_percentage, roll);

        let chosen_dir = if roll <= bad_percentage {
            tracing::info!("Selecting BAD weather template.");
            self.root.join(BAD_WEATHER_DIR)
        } else {
            tracing::info!("Selecting GOOD weather template.");
            self.root.join(GOOD_WEATHER_DIR)
        };

        let candidates = Self::list_templates(&chosen_dir)?;
        let index = rand::thread_rng().gen_range(0..candidates.len());
        let template_path = &candidates[index];
        tracing::info!("Selected weather template: {}", template_path.display());

        let raw = std::fs::read(template_path)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    fn list_templates(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(dir).map_err(|e| PersistError::MissionError {
            message: format!("weather template directory {} unavailable: {}", dir.display(), e),
        })?;

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION))
            })
            .collect();
        candidates.sort();

        if candidates.is_empty() {
            return Err(PersistError::MissionError {
                message: format!("no .{} files found in {}", TEMPLATE_EXTENSION, dir.display()),
            });
        }
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MISSION_WITH_BLOCKS: &str = concat!(
        "mission = \n",
        "{\n",
        "\t[\"date\"] = \n",
        "\t{\n",
        "\t\t[\"Year\"] = 2011,\n",
        "\t\t[\"Day\"] = 21,\n",
        "\t\t[\"Month\"] = 6,\n",
        "\t}, -- end of [\"date\"]\n",
        "\t[\"weather\"] = \n",
        "\t{\n",
        "\t\t[\"clouds\"] = { [\"density\"] = 8 },\n",
        "\t}, -- end of [\"weather\"]\n",
        "\t[\"start_time\"] = 28800,\n",
        "}\n",
    );

    #[test]
    fn test_season_dates() {
        assert_eq!(season_date(Season::Summer), (2025, 8, 1));
        assert_eq!(season_date(Season::Winter), (2025, 2, 1));
        assert_eq!(season_date(Season::Autumn), (2025, 10, 1));
        assert_eq!(season_date(Season::Spring), (2025, 5, 1));
        assert_eq!(season_date(Season::None), (2025, 9, 1));

        let today = Local::now().date_naive();
        assert_eq!(
            season_date(Season::Realistic),
            (today.year(), today.month(), today.day())
        );
    }

    #[test]
    fn test_rewrite_date_block() {
        let rewritten = rewrite_date_block(MISSION_WITH_BLOCKS, Season::Winter).unwrap();
        assert!(rewritten.contains("[\"Day\"] = 1,"));
        assert!(rewritten.contains("[\"Year\"] = 2025,"));
        assert!(rewritten.contains("[\"Month\"] = 2,"));
        assert!(!rewritten.contains("2011"));
        // Everything around the block is untouched.
        assert!(rewritten.contains("[\"start_time\"] = 28800,"));
        assert!(rewritten.contains("[\"density\"] = 8"));
    }

    #[test]
    fn test_rewrite_date_block_field_order_insensitive() {
        let day_first = MISSION_WITH_BLOCKS.replace(
            "\t\t[\"Year\"] = 2011,\n\t\t[\"Day\"] = 21,\n\t\t[\"Month\"] = 6,\n",
            "\t\t[\"Day\"] = 21,\n\t\t[\"Month\"] = 6,\n\t\t[\"Year\"] = 2011,\n",
        );
        assert!(rewrite_date_block(&day_first, Season::Summer).is_ok());
    }

    #[test]
    fn test_rewrite_date_block_without_trailer_comment() {
        let no_trailer = MISSION_WITH_BLOCKS.replace("}, -- end of [\"date\"]", "},");
        let rewritten = rewrite_date_block(&no_trailer, Season::Spring).unwrap();
        assert!(rewritten.contains("[\"Month\"] = 5,"));
    }

    #[test]
    fn test_rewrite_date_block_missing_fails() {
        let err = rewrite_date_block("mission = {}", Season::Summer);
        assert!(matches!(err, Err(PersistError::MissionError { .. })));
    }

    #[test]
    fn test_rewrite_weather_block() {
        let template = "[\"weather\"] = \n{\n\t[\"name\"] = \"storm\",\n}, -- end of [\"weather\"]";
        let rewritten = rewrite_weather_block(MISSION_WITH_BLOCKS, template).unwrap();
        assert!(rewritten.contains("[\"name\"] = \"storm\""));
        assert!(!rewritten.contains("density"));
        assert!(rewritten.contains("[\"start_time\"] = 28800,"));
    }

    #[test]
    fn test_weather_template_with_dollar_signs_is_literal() {
        // Lua templates can legitimately contain `$`; it must not be treated
        // as a capture-group reference.
        let template =
            "[\"weather\"] = \n{\n\t[\"name\"] = \"$1 front\",\n}, -- end of [\"weather\"]";
        let rewritten = rewrite_weather_block(MISSION_WITH_BLOCKS, template).unwrap();
        assert!(rewritten.contains("$1 front"));
    }

    #[test]
    fn test_rewrite_weather_block_missing_fails() {
        assert!(rewrite_weather_block("mission = {}", "x").is_err());
    }

    fn template_root(bad: &[(&str, &str)], good: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(BAD_WEATHER_DIR)).unwrap();
        std::fs::create_dir_all(dir.path().join(GOOD_WEATHER_DIR)).unwrap();
        for (name, content) in bad {
            std::fs::write(dir.path().join(BAD_WEATHER_DIR).join(name), content).unwrap();
        }
        for (name, content) in good {
            std::fs::write(dir.path().join(GOOD_WEATHER_DIR).join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_pick_zero_percent_always_good() {
        let dir = template_root(&[("storm.config", "bad")], &[("clear.config", "good")]);
        let templates = WeatherTemplates::new(dir.path());
        for _ in 0..20 {
            assert_eq!(templates.pick(0).unwrap(), "good");
        }
    }

    #[test]
    fn test_pick_hundred_percent_always_bad() {
        let dir = template_root(&[("storm.config", "bad")], &[("clear.config", "good")]);
        let templates = WeatherTemplates::new(dir.path());
        for _ in 0..20 {
            assert_eq!(templates.pick(100).unwrap(), "bad");
        }
    }

    #[test]
    fn test_pick_ignores_non_config_files() {
        let dir = template_root(&[], &[("clear.config", "good"), ("notes.txt", "nope")]);
        let templates = WeatherTemplates::new(dir.path());
        assert_eq!(templates.pick(0).unwrap(), "good");
    }

    #[test]
    fn test_pick_empty_directory_fails() {
        let dir = template_root(&[], &[]);
        let templates = WeatherTemplates::new(dir.path());
        assert!(templates.pick(0).is_err());
    }

    #[test]
    fn test_pick_missing_root_fails() {
        let templates = WeatherTemplates::new("no/such/dir");
        assert!(templates.pick(50).is_err());
    }
}
