use crate::domain::ports::ServerControl;
use crate::utils::error::{PersistError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Duration;
use sysinfo::{RefreshKind, System};

/// Grace period after killing the server before the .miz is touched, so
/// file handles are fully released.
const SETTLE_DELAY: Duration = Duration::from_secs(15);

/// Stops and starts the DCS server executable via a process-table scan.
pub struct SysinfoServerControl {
    exe: PathBuf,
    settle: Duration,
}

impl SysinfoServerControl {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self {
            exe: exe.into(),
            settle: SETTLE_DELAY,
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    fn exe_file_name(&self) -> String {
        self.exe
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.exe.to_string_lossy().into_owned())
    }
}

#[async_trait]
impl ServerControl for SysinfoServerControl {
    async fn stop_if_running(&self) -> Result<bool> {
        let target = self.exe_file_name();
        tracing::info!("Checking if {} is running...", target);

        let mut system = System::new_with_specifics(RefreshKind::everything());
        system.refresh_all();

        for (pid, process) in system.processes() {
            let name = process.name().to_string_lossy();
            if name.eq_ignore_ascii_case(&target) {
                tracing::info!(
                    "{} detected (PID {}). Stopping it to update the mission...",
                    target,
                    pid
                );

                if !process.kill() {
                    return Err(PersistError::ProcessError {
                        message: format!("failed to stop {} (PID {})", target, pid),
                    });
                }

                tracing::info!(
                    "{} stopped successfully. Waiting {:?} before the mission update...",
                    target,
                    self.settle
                );
                tokio::time::sleep(self.settle).await;
                return Ok(true);
            }
        }

        tracing::info!("{} is not running. Continuing normally.", target);
        Ok(false)
    }

    async fn start(&self) -> Result<()> {
        tracing::info!("Starting DCS server: {}", self.exe.display());

        Command::new(&self.exe)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PersistError::ProcessError {
                message: format!("failed to start {}: {}", self.exe.display(), e),
            })?;

        tracing::info!("{} started successfully.", self.exe_file_name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stop_when_not_running_is_noop() {
        let control = SysinfoServerControl::new("definitely_not_a_real_process_name.exe")
            .with_settle(Duration::from_millis(0));
        assert_eq!(control.stop_if_running().await.unwrap(), false);
    }

    #[tokio::test]
    async fn test_start_with_missing_exe_fails() {
        let control = SysinfoServerControl::new("no/such/dir/DCS_server.exe");
        let result = control.start().await;
        assert!(matches!(result, Err(PersistError::ProcessError { .. })));
    }
}
