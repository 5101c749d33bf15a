pub mod app;
pub mod config;
pub mod endpoint_handlers;
pub mod error;
pub mod responses;
pub mod validation;

pub use app::{create_router, DatabaseState};
