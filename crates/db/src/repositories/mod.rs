pub mod post_repo;
pub mod post_version_repo;

pub use post_repo::PostRepo;
pub use post_version_repo::PostVersionRepo;
