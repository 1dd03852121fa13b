pub mod core;
pub mod content;
pub mod ui;
pub mod config;
pub mod utils;

pub use crate::core::{GreetingEngine, Navigation, Screen, SessionState};
pub use content::{ContentLoader, ContentPack};
pub use ui::CardInterface;
pub use crate::config::Config;

// Re-export commonly used types
pub type Result<T> = anyhow::Result<T>;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
