use crate::utils::error::Result;
use async_trait::async_trait;

/// Control over the external DCS server process. The orchestrator never
/// touches processes directly so tests can substitute a recording fake.
#[async_trait]
pub trait ServerControl: Send + Sync {
    /// Stop the server if it is currently running. Returns `true` when a
    /// running instance was found and stopped.
    async fn stop_if_running(&self) -> Result<bool>;

    /// Start the server executable as a detached child process.
    async fn start(&self) -> Result<()>;
}

/// Outbound operator notifications. Delivery is best-effort: implementations
/// log failures and never propagate them into the pipeline.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn error(&self, message: &str);
    async fn warning(&self, message: &str);
    async fn info(&self, message: &str);
}
