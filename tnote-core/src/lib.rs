pub mod config;

pub use config::{Settings, SettingsError, expand_with};
