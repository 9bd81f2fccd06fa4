pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::create_router;

use crate::history::HistoryService;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiState {
    pub history: Arc<HistoryService>,
}

impl ApiState {
    pub fn new(history: HistoryService) -> Self {
        Self {
            history: Arc::new(history),
        }
    }
}
