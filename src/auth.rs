//! Bearer token models and the token store that proxies them to storage.

pub mod token;
pub mod token_store;

pub use token::{record::*, secret::*};
pub use token_store::*;
