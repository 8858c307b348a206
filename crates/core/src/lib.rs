//! Folio domain logic.
//!
//! Pure, database-free building blocks shared by the repository and API
//! layers: the submission wizard step machine, author list editing,
//! role constants, and the OAI Dublin Core record formatter.

pub mod authors;
pub mod error;
pub mod oai_dc;
pub mod roles;
pub mod submission;
pub mod types;
