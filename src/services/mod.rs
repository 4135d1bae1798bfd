pub mod post_services;

pub use post_services::{PostService, ResourceNotFound, ServiceError};
