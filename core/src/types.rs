//! Wire types for the Aperture API.
//!
//! # Design
//! Every request is one flat JSON object: the credential envelope
//! (`APIUSER`, `APIPassword`, `cmd`) with the command parameters flattened
//! next to it. Request types borrow from the client so nothing is copied
//! per call.
//!
//! `Debug` output of anything holding a password shows `<redacted>` in its
//! place; these values end up in error messages.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// User identity and password sent with every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) user: String,
    pub(crate) password: String,
}

impl Credentials {
    pub fn user(&self) -> &str {
        &self.user
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The credential and command fields common to every request.
#[derive(Clone, Copy, Serialize)]
pub struct Envelope<'a> {
    #[serde(rename = "APIUSER")]
    pub user: &'a str,
    #[serde(rename = "APIPassword")]
    pub password: &'a str,
    #[serde(rename = "cmd")]
    pub command: &'a str,
}

impl fmt::Debug for Envelope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("command", &self.command)
            .finish()
    }
}

/// An envelope plus the parameters of one command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest<'a, P> {
    #[serde(flatten)]
    pub envelope: Envelope<'a>,
    #[serde(flatten)]
    pub params: P,
}

/// Minimum shape of every API response.
///
/// `debug` is frequently omitted or `null`; both decode as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub code: String,
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub debug: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parameters of the `AccountGet` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountGet {
    #[serde(rename = "AccountID")]
    pub account_id: i64,
}

/// Result of `AccountGet`.
///
/// The account record's fields are not fixed by the API, so everything
/// beyond the response envelope is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(flatten)]
    pub status: ResponseEnvelope,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Arguments reserved for `account_create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreate {
    pub name: String,
    pub hostname: String,
    pub origin: String,
    pub stack_name: String,
}

/// Arguments reserved for `application_create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationCreate {
    pub hostname: String,
    pub origin: String,
    pub stack_name: String,
}

/// Arguments reserved for `environment_create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentCreate {
    pub name: String,
    pub source_environment_name: String,
    pub domain_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_envelope_reads_null_debug_as_empty() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"code":"200","message":"ok","debug":null}"#).unwrap();
        assert_eq!(envelope.debug, "");
    }

    #[test]
    fn response_envelope_reads_missing_debug_as_empty() {
        let envelope: ResponseEnvelope =
            serde_json::from_str(r#"{"code":"200","message":"ok"}"#).unwrap();
        assert_eq!(envelope.debug, "");
    }

    #[test]
    fn account_reads_null_debug_through_flatten() {
        let account: Account =
            serde_json::from_str(r#"{"code":"200","message":"ok","debug":null,"name":"acme"}"#)
                .unwrap();
        assert_eq!(account.status.debug, "");
        assert_eq!(account.details["name"], "acme");
    }

    #[test]
    fn response_envelope_rejects_non_string_debug() {
        let result: Result<ResponseEnvelope, _> =
            serde_json::from_str(r#"{"code":"200","message":"ok","debug":5}"#);
        assert!(result.is_err());
    }
}
