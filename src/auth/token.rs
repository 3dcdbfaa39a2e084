//! Token values and their persisted cookie-style records.

pub mod record;
pub mod secret;
