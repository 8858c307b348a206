//! Well-known journal role name constants.
//!
//! These must match the seed data in the `create_user_roles` migration.

pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_AUTHOR: &str = "author";
