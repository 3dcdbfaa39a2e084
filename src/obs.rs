//! Optional observability helpers for client requests and token writes.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every request inside a span named `bearer_client.request` with the
//!   `method` and `stage` (call site) fields, and to emit debug events for token writes.
//! - Enable `metrics` to increment the `bearer_client_request_total` counter for every
//!   attempt/success/failure, labeled by `method` + `outcome`, and the `bearer_client_token_total`
//!   counter labeled by `event`.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to a client operation.
	Attempt,
	/// The transport returned a response.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::Failure => "failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Token store mutations worth observing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenEvent {
	/// A token was written.
	Stored,
	/// The token was removed.
	Cleared,
}
impl TokenEvent {
	/// Returns a stable label suitable for event or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenEvent::Stored => "stored",
			TokenEvent::Cleared => "cleared",
		}
	}
}
impl Display for TokenEvent {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
