use thiserror::Error;

/// Errors raised by the generator, the analyzer and the render sinks.
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("no data available, generate or load data first")]
    NoData,

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("failed to seed random number generator")]
    Rng(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to render plot: {0}")]
    Render(String),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for DriveError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        DriveError::Render(format!("{value:?}"))
    }
}

pub type Result<T> = std::result::Result<T, DriveError>;
