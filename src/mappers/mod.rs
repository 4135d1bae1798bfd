pub mod post_mapper;

pub use post_mapper::PostMapper;
