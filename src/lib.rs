//! Synthetic drive telemetry: generation, summary statistics and plots.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod render;
pub mod stats;

pub use analysis::Analyzer;
pub use engine::Generator;
pub use error::DriveError;
pub use model::{Record, SummaryStatistics, TelemetrySeries};
