#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "numintel")]
#[command(about = "Phone number intelligence from local parsing and lookup APIs")]
#[command(version)]
pub struct CliConfig {
    /// Phone number to look up, e.g. +14155552671
    #[arg(allow_negative_numbers = true)]
    pub number: String,

    #[arg(long, default_value = "US", allow_hyphen_values = true, help = "Default region for numbers without a country code")]
    pub region: String,

    #[arg(long, help = "Print the report as JSON")]
    pub json: bool,

    #[arg(long, help = "Settings file (TOML, or legacy config.json)")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn lookup_request(&self) -> crate::domain::model::LookupRequest {
        crate::domain::model::LookupRequest::new(self.number.clone(), self.region.clone())
    }

    pub fn output_mode(&self) -> crate::app::presenter::OutputMode {
        if self.json {
            crate::app::presenter::OutputMode::Json
        } else {
            crate::app::presenter::OutputMode::Text
        }
    }
}
