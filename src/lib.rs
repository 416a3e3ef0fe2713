pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::presenter::{render, OutputMode};
pub use crate::config::settings::Settings;
pub use crate::core::engine::LookupEngine;
pub use crate::domain::model::{
    AggregateReport, Field, LookupRequest, NormalizedNumber, ProviderResult, ReportEntry,
};
pub use crate::domain::ports::Provider;
pub use crate::utils::error::{NumintelError, Result};
