//! # hptk Common Library
//!
//! Shared code for the hptk support toolkit:
//! - Error and result types
//! - Bootstrap configuration loading (TOML + environment)
//! - Tool registry consumed by the navigation views
//! - Clock helpers

pub mod config;
pub mod error;
pub mod time;
pub mod tools;

pub use error::{Error, Result};
pub use tools::Tool;
