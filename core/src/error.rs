//! Error types for the Aperture API client.
//!
//! # Design
//! Each failure stage of a call gets its own variant so callers can tell a
//! bad payload from an unreachable host. Variants carry the context needed
//! to diagnose without re-running the call: the request (password
//! redacted) for encode and transport failures, the raw body for decode
//! failures.
//!
//! An empty command name is not represented here. It can only come from a
//! bug in this crate and panics instead.

use std::io;

use thiserror::Error;

use crate::api::Operation;
use crate::http::TransportError;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `Client` operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required constructor or configuration argument was empty.
    #[error("{name} argument must not be empty")]
    EmptyArgument { name: &'static str },

    /// The request could not be serialized to JSON.
    #[error("failed to JSON encode request {request}")]
    Encode {
        request: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP POST itself failed (connect, DNS, TLS, timeout).
    #[error("HTTP POST failed for request {request}")]
    Transport {
        request: String,
        #[source]
        source: TransportError,
    },

    /// The response body could not be read to the end.
    #[error("failed to read response body")]
    Read(#[source] io::Error),

    /// The response body was not valid JSON for the expected shape.
    #[error("could not JSON decode response: {body}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The operation is part of the API surface but has no implementation.
    #[error("{0} is not implemented")]
    Unimplemented(Operation),
}
