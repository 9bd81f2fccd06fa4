pub mod api;
pub mod config;
pub mod error;
pub mod graphql;
pub mod history;
pub mod services;
pub mod types;

pub use config::Config;
pub use error::HistoryError;
pub use history::HistoryService;
pub use types::*;
