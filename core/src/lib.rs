//! Blocking client core for the Aperture account-management API.
//!
//! # Overview
//! Every call is one JSON POST to a single base address. The request body is
//! a credential envelope (`APIUSER`, `APIPassword`, `cmd`) with the command
//! parameters flattened next to it; the response is a JSON object carrying
//! at least `code`, `message` and `debug`.
//!
//! # Design
//! - `Client` is stateless. It holds the base address, the credentials and
//!   a `Transport`, and can be shared between threads.
//! - Operations are split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`); `ApertureApi` joins them over
//!   the transport with exactly one POST per call and no retries.
//! - `UreqTransport` is the default transport. Tests and hosts can plug in
//!   their own.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use api::{ApertureApi, Operation};
pub use client::Client;
pub use config::{ClientConfig, DEFAULT_ADDRESS};
pub use error::{ApiError, Result};
pub use http::{HttpRequest, HttpResponse, ResponseBody, Transport, TransportError, UreqTransport};
pub use types::{
    Account, AccountCreate, AccountGet, ApplicationCreate, CommandRequest, Credentials, Envelope,
    EnvironmentCreate, ResponseEnvelope,
};
