//! Bridges transport failures reported through the `oauth2` HTTP traits into [`Error`].

pub use oauth2;

// crates.io
use oauth2::HttpClientError;
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
	obs::FlowKind,
};

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport during `flow`.
	fn map_transport_error(&self, flow: FlowKind, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, flow: FlowKind, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(flow, *inner),
			other => map_generic_transport_error(other),
		}
	}
}

/// Mapper for transports without transport-specific classification.
///
/// Transport-specific errors surface as [`TransportError::Network`].
#[derive(Clone, Debug, Default)]
pub struct GenericTransportErrorMapper;
impl<E> TransportErrorMapper<E> for GenericTransportErrorMapper
where
	E: 'static + Send + Sync + StdError,
{
	fn map_transport_error(&self, _flow: FlowKind, err: HttpClientError<E>) -> Error {
		map_generic_transport_error(err)
	}
}

/// Shared classification for the transport-agnostic [`HttpClientError`] variants.
pub fn map_generic_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner }.into(),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unclassified transport failure".into() }.into(),
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(flow: FlowKind, err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	#[cfg(feature = "tracing")]
	tracing::debug!(flow = flow.as_str(), timeout = err.is_timeout(), "Transport request failed.");
	#[cfg(not(feature = "tracing"))]
	let _ = flow;

	TransportError::from(err).into()
}
