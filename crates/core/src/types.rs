use std::collections::BTreeMap;

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A localized text field: locale code (`en`, `pt_BR`, ...) to value.
///
/// Stored as JSONB; `BTreeMap` keeps locale iteration order stable so
/// rendered output (notably OAI records) is deterministic.
pub type LocalizedText = BTreeMap<String, String>;
