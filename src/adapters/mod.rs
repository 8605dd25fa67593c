// Adapters layer: concrete implementations for external systems (the DCS
// server process and the Discord webhook).

pub mod discord;
pub mod server;
