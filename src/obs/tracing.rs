// self
use crate::{_prelude::*, auth::IdTokenError, obs::FlowKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the flow kind, stage and provider name.
	pub fn new(kind: FlowKind, stage: &'static str, provider: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_quirks.flow",
				flow = kind.as_str(),
				stage,
				provider
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage, provider);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs an identity token that could not be decoded before profile resolution falls through.
pub fn record_id_token_fallback(error: &IdTokenError) {
	#[cfg(feature = "tracing")]
	tracing::debug!(error = %error, "Identity token could not be decoded; falling back to the profile endpoint.");
	#[cfg(not(feature = "tracing"))]
	let _ = error;
}

/// Logs that a resource call found the access token expired and is refreshing it.
pub fn record_expired_token(expire_at: Option<OffsetDateTime>) {
	#[cfg(feature = "tracing")]
	tracing::debug!(?expire_at, "Access token expired; refreshing before the resource call.");
	#[cfg(not(feature = "tracing"))]
	let _ = expire_at;
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn fallback_logging_is_infallible() {
		record_id_token_fallback(&IdTokenError::Malformed { segments: 1 });
		record_expired_token(None);
	}

	#[cfg(feature = "tracing")]
	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = FlowSpan::new(FlowKind::Refresh, "instrument_wraps_future", "idp");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
