pub mod cli;
pub mod commands;
pub mod config;
mod context;

pub use config::{ConfigOverrides, RuntimeConfig};
pub use context::AppContext;
