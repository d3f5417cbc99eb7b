//! Configuration for checkmygrade
//!
//! Lazy-loaded TOML config with env overrides and built-in defaults.

pub use app::{load, CipherSettings, Config, Features, Paths, SelfTestSettings};

mod app;
mod defaults;
