pub mod candidate;
pub mod memory;
pub mod resume;
pub mod sqlx_repo;
pub mod template;
