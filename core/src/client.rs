//! Blocking client for the Aperture API.
//!
//! # Design
//! `Client` holds the base address, the credentials and a `Transport`, and
//! carries no mutable state between calls. Like the rest of the crate, each
//! operation is split into a `build_*` method that produces an `HttpRequest`
//! and a `parse_*` method that consumes an `HttpResponse`. The
//! `ApertureApi` methods join the two over the client's transport, so a host
//! can either let the client do the round trip or run it itself.
//!
//! Every call makes exactly one `Transport::execute`. Nothing is retried.

use std::fmt;
use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::api::{ApertureApi, Operation};
use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse, ResponseBody, Transport, UreqTransport};
use crate::types::{Account, AccountGet, CommandRequest, Credentials, Envelope};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Synchronous, stateless client for the Aperture API.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    address: String,
    credentials: Credentials,
    transport: T,
}

impl Client<UreqTransport> {
    /// Create a client for `DEFAULT_ADDRESS`.
    ///
    /// Fails if `user` or `password` is empty. No network activity occurs.
    pub fn new(user: &str, password: &str) -> Result<Self> {
        Self::with_config(user, password, ClientConfig::default())
    }

    pub fn with_config(user: &str, password: &str, config: ClientConfig) -> Result<Self> {
        Self::with_transport(user, password, config, UreqTransport::new())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(
        user: &str,
        password: &str,
        config: ClientConfig,
        transport: T,
    ) -> Result<Self> {
        if user.is_empty() {
            return Err(ApiError::EmptyArgument { name: "user" });
        }
        if password.is_empty() {
            return Err(ApiError::EmptyArgument { name: "password" });
        }
        config.validate()?;

        Ok(Self {
            address: config.base_address,
            credentials: Credentials {
                user: user.to_string(),
                password: password.to_string(),
            },
            transport,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn supports(&self, operation: Operation) -> bool {
        operation.is_implemented()
    }

    /// Build the JSON POST for an arbitrary command.
    ///
    /// # Panics
    /// Panics if `command` is empty. Command names are fixed by this crate,
    /// so an empty one is a bug at the call site.
    pub fn build_request<P>(&self, command: &str, params: P) -> Result<HttpRequest>
    where
        P: Serialize + fmt::Debug,
    {
        let request = self.command_request(command, params);
        self.encode(&request)
    }

    pub fn build_account_get(&self, account_id: i64) -> Result<HttpRequest> {
        self.build_request(Operation::AccountGet.name(), AccountGet { account_id })
    }

    pub fn parse_account_get(&self, response: HttpResponse) -> Result<Account> {
        parse_response(response)
    }

    fn envelope<'a>(&'a self, command: &'a str) -> Envelope<'a> {
        assert!(!command.is_empty(), "command is required");
        Envelope {
            user: &self.credentials.user,
            password: &self.credentials.password,
            command,
        }
    }

    fn command_request<'a, P>(&'a self, command: &'a str, params: P) -> CommandRequest<'a, P> {
        CommandRequest {
            envelope: self.envelope(command),
            params,
        }
    }

    fn encode<P>(&self, request: &CommandRequest<'_, P>) -> Result<HttpRequest>
    where
        P: Serialize + fmt::Debug,
    {
        let body = serde_json::to_vec(request).map_err(|source| ApiError::Encode {
            request: format!("{request:?}"),
            source,
        })?;
        Ok(HttpRequest {
            url: self.address.clone(),
            headers: vec![("content-type".to_string(), CONTENT_TYPE_JSON.to_string())],
            body,
        })
    }

    /// Encode, POST once, read, decode.
    fn call<P, R>(&self, command: &str, params: P) -> Result<R>
    where
        P: Serialize + fmt::Debug,
        R: DeserializeOwned,
    {
        let request = self.command_request(command, params);
        let http_request = self.encode(&request)?;

        debug!(command, address = %self.address, "posting command");
        let response = self
            .transport
            .execute(http_request)
            .map_err(|source| ApiError::Transport {
                request: format!("{request:?}"),
                source,
            })?;

        parse_response(response)
    }
}

impl<T: Transport> ApertureApi for Client<T> {
    fn account_get(&self, account_id: i64) -> Result<Account> {
        self.call(Operation::AccountGet.name(), AccountGet { account_id })
    }
}

/// Read the whole body, release it, then decode it as `R`.
///
/// The HTTP status is not interpreted: the API reports its outcome in the
/// envelope `code`, so any body is decoded.
fn parse_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
    let HttpResponse { status, body, .. } = response;
    if !(200..300).contains(&status) {
        debug!(status, "non-success HTTP status, decoding body anyway");
    }

    let bytes = read_and_release(body)?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
        body: String::from_utf8_lossy(&bytes).into_owned(),
        source,
    })
}

/// The body is closed on every path. A read failure outranks a close
/// failure, and a fully read body outranks one too.
fn read_and_release(mut body: Box<dyn ResponseBody>) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let read = body.read_to_end(&mut bytes);
    let closed = body.close();

    match (read, closed) {
        (Err(err), _) => Err(ApiError::Read(err)),
        (Ok(_), Err(err)) => {
            warn!(error = %err, "failed to release response body");
            Ok(bytes)
        }
        (Ok(_), Ok(())) => Ok(bytes),
    }
}
