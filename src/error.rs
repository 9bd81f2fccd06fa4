use std::time::Duration;
use thiserror::Error;

/// All errors generated while building a market history series.
///
/// Missing tickers and missing previous windows are not errors: they resolve
/// to a default value or to an omitted point.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("invalid token address: {0}")]
    InvalidTokenAddress(String),

    #[error("graphql transport failure: {0}")]
    Transport(String),

    #[error("graphql query timed out after {0:?}")]
    Timeout(Duration),

    #[error("graphql errors: {0}")]
    GraphQl(String),

    #[error("unexpected graphql response: {0}")]
    UnexpectedResponse(String),

    #[error("cumulative volume is not a decimal number: {0}")]
    InvalidCounter(String),
}

impl HistoryError {
    /// Rejected at the boundary, before any outbound query was issued.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, HistoryError::InvalidTokenAddress(_))
    }
}

pub type Result<T> = std::result::Result<T, HistoryError>;
