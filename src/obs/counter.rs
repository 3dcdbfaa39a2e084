// self
use crate::{
	obs::{RequestOutcome, TokenEvent},
	request::Method,
};

/// Records a request outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(method: Method, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"bearer_client_request_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}

/// Records a token store mutation via the global metrics recorder (when enabled).
pub fn record_token_event(event: TokenEvent) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("bearer_client_token_total", "event" => event.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = event;
	}
}
