pub mod cli;
pub mod commands;
pub mod config;
pub mod render;

pub use cli::*;
pub use config::{AppConfig, MonitorSettings};
