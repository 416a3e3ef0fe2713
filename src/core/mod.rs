pub mod engine;
pub mod normalizer;

pub use crate::domain::model::{AggregateReport, LookupRequest};
pub use crate::domain::ports::Provider;
