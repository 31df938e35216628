//! Curio Core — error taxonomy and configuration.

pub mod config;
pub mod error;

pub use config::CurioConfig;
pub use error::{Error, Result};
