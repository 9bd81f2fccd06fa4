pub mod history_handlers;
pub mod index_handlers;

pub use history_handlers::*;
pub use index_handlers::*;
