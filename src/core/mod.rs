pub mod miz;
pub mod orchestrator;
pub mod weather;
pub mod webgui;

pub use crate::domain::ports::{Notifier, ServerControl};
pub use crate::utils::error::Result;
