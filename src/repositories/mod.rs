pub mod memory_post_repo;
pub mod pg_post_repo;
pub mod post_repository;

pub use memory_post_repo::InMemoryPostRepository;
pub use pg_post_repo::PgPostRepository;
pub use post_repository::{PostRepository, RepoError};
