pub mod error_handlers;
pub mod post_handlers;

pub use error_handlers::ApiError;
