pub mod responses;

pub use responses::{ApiResponse, Reply};
