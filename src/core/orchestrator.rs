use crate::config::AppConfig;
use crate::core::miz::{
    advance_start_time, last_start_time, replace_last_start_time, MizArchive,
};
use crate::core::weather::{rewrite_date_block, rewrite_weather_block, WeatherTemplates};
use crate::core::webgui::WebGuiClient;
use crate::domain::model::{MissionClock, TimeReport};
use crate::domain::ports::{Notifier, ServerControl};
use crate::utils::error::{PersistError, Result};

/// Single-run engine: hour persistence first, then weather rotation,
/// each gated by its config flag. No scheduling, no supervision; one pass
/// and done, exactly like the launcher that used to kick this off.
pub struct Orchestrator<S: ServerControl, N: Notifier> {
    config: AppConfig,
    webgui: WebGuiClient,
    server: S,
    notifier: N,
}

impl<S: ServerControl, N: Notifier> Orchestrator<S, N> {
    pub fn new(config: AppConfig, webgui: WebGuiClient, server: S, notifier: N) -> Self {
        Self {
            config,
            webgui,
            server,
            notifier,
        }
    }

    /// Run every enabled step. Any hard failure is reported to Discord
    /// (best effort) before it propagates to the caller.
    pub async fn run(&self) -> Result<()> {
        match self.execute().await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("{}", e);
                self.notifier.error(&e.to_string()).await;
                Err(e)
            }
        }
    }

    async fn execute(&self) -> Result<()> {
        tracing::info!(
            "Hour persistence enabled: {}",
            self.config.hour_persistence_enabled
        );
        tracing::info!(
            "Weather rotation enabled: {}",
            self.config.weather_rotation_enabled
        );

        if !self.config.anything_enabled() {
            tracing::info!(
                "Both hour persistence and weather rotation are disabled. Nothing to do."
            );
            return Ok(());
        }

        if self.config.hour_persistence_enabled {
            tracing::info!("---- Hour persistence process START ----");
            self.persist_mission_hour().await?;
            tracing::info!("---- Hour persistence process DONE ----");
        } else {
            tracing::info!("Hour persistence disabled in config. Skipping time update.");
        }

        if self.config.weather_rotation_enabled {
            tracing::info!("---- Weather rotation process START ----");
            self.rotate_weather().await?;
            tracing::info!("---- Weather rotation process DONE ----");
        } else {
            tracing::info!("Weather rotation disabled in config. Skipping weather update.");
        }

        Ok(())
    }

    /// Carry the live mission clock over into the .miz start time.
    async fn persist_mission_hour(&self) -> Result<()> {
        let clock = self.webgui.read_clock(&self.config.mission_path).await?;
        self.save_time_report(&clock)?;

        self.stop_server("DCS server stopped to apply mission time update.")
            .await?;

        let miz = MizArchive::open(&self.config.mission_path)?;
        let text = miz.read_mission()?;

        let current = last_start_time(&text).ok_or_else(|| PersistError::MissionError {
            message: "no start_time found inside mission file".to_string(),
        })?;
        let updated = advance_start_time(current, clock.seconds);
        tracing::info!("Original start_time (last occurrence): {}", current);
        tracing::info!("New start_time: {}", updated);

        let new_text =
            replace_last_start_time(&text, updated).ok_or_else(|| PersistError::MissionError {
                message: "failed to rewrite start_time in mission file".to_string(),
            })?;
        miz.write_mission(&new_text)?;

        self.start_server("DCS server restarted successfully after mission update.")
            .await
    }

    /// Rotate the mission date and weather block in place.
    async fn rotate_weather(&self) -> Result<()> {
        tracing::info!("Mission file: {}", self.config.mission_path);
        tracing::info!("Season: {:?}", self.config.weather_season);
        tracing::info!(
            "Bad weather percentage: {}%",
            self.config.weather_bad_weather_percentage
        );

        let miz = MizArchive::open(&self.config.mission_path)?;

        self.stop_server("DCS server stopped to apply dynamic weather rotation.")
            .await?;

        let text = miz.read_mission()?;
        let text = rewrite_date_block(&text, self.config.weather_season)?;

        let templates = WeatherTemplates::new(&self.config.weather_templates_dir);
        let template = templates.pick(self.config.weather_bad_weather_percentage)?;
        let text = rewrite_weather_block(&text, &template)?;

        miz.write_mission(&text)?;

        self.start_server("DCS server restarted successfully after weather rotation.")
            .await
    }

    fn save_time_report(&self, clock: &MissionClock) -> Result<()> {
        let report = TimeReport::from(clock);
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&self.config.time_report_path, json)?;
        tracing::info!("Saved extracted time into {}", self.config.time_report_path);
        Ok(())
    }

    async fn stop_server(&self, notice: &str) -> Result<()> {
        if self.server.stop_if_running().await? {
            self.notifier.info(notice).await;
        }
        Ok(())
    }

    async fn start_server(&self, notice: &str) -> Result<()> {
        self.server.start().await?;
        self.notifier.info(notice).await;
        Ok(())
    }
}
