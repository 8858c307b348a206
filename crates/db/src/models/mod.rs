//! Row structs and DTOs, one module per table family.

pub mod article;
pub mod journal;
pub mod notification;
pub mod supp_file;
