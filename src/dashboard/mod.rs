pub mod aggregator;
pub mod handlers;
pub mod service;

pub use aggregator::*;
pub use handlers::*;
pub use service::*;
