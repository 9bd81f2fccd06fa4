pub mod api_types;
pub mod metric;
pub mod token;
pub mod transfer;

pub use api_types::*;
pub use metric::*;
pub use token::*;
pub use transfer::*;
