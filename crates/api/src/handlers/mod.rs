//! HTTP request handlers.

pub mod notification;
pub mod oai;
pub mod submission;
pub mod supp_file;
