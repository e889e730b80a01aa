pub mod handlers;
pub mod models;
pub mod seed;
pub mod service;

pub use handlers::*;
pub use models::*;
pub use service::*;
