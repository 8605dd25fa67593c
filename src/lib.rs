pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::discord::DiscordNotifier;
pub use adapters::server::SysinfoServerControl;
pub use config::{AppConfig, CliArgs};
pub use core::orchestrator::Orchestrator;
pub use core::webgui::WebGuiClient;
pub use utils::error::{PersistError, Result};
