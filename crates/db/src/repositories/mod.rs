//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_file_repo;
pub mod article_repo;
pub mod journal_repo;
pub mod notification_repo;
pub mod role_repo;
pub mod supp_file_repo;

pub use article_file_repo::ArticleFileRepo;
pub use article_repo::ArticleRepo;
pub use journal_repo::JournalRepo;
pub use notification_repo::NotificationRepo;
pub use role_repo::RoleRepo;
pub use supp_file_repo::SuppFileRepo;
