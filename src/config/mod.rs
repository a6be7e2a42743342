//! Configuration loading and validation
//!
//! The run configuration is a TOML file built once at startup; feature
//! toggles are explicit fields, never conditionally-populated state.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{
    CacheConfig, Config, CrawlerConfig, DelayMode, FilterConfig, OutputConfig, PingConfig,
};
pub use validation::validate;
