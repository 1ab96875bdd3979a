//! The operations the Aperture API client exposes.
//!
//! Only `AccountGet` is wired to the remote endpoint. The remaining
//! operations are part of the surface but answer `ApiError::Unimplemented`
//! without any network activity; their request and response shapes are not
//! defined yet.

use std::fmt;

use crate::error::{ApiError, Result};
use crate::types::{Account, AccountCreate, ApplicationCreate, EnvironmentCreate, ResponseEnvelope};

/// Every operation of the API surface, implemented or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    AccountCreate,
    AccountGet,
    ApplicationCreate,
    ApplicationGet,
    EnvironmentCreate,
    EnvironmentGet,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::AccountCreate,
        Operation::AccountGet,
        Operation::ApplicationCreate,
        Operation::ApplicationGet,
        Operation::EnvironmentCreate,
        Operation::EnvironmentGet,
    ];

    /// Name of the operation, which is also its `cmd` value on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Operation::AccountCreate => "AccountCreate",
            Operation::AccountGet => "AccountGet",
            Operation::ApplicationCreate => "ApplicationCreate",
            Operation::ApplicationGet => "ApplicationGet",
            Operation::EnvironmentCreate => "EnvironmentCreate",
            Operation::EnvironmentGet => "EnvironmentGet",
        }
    }

    pub fn is_implemented(self) -> bool {
        matches!(self, Operation::AccountGet)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability set of the Aperture API.
pub trait ApertureApi {
    fn account_get(&self, account_id: i64) -> Result<Account>;

    fn account_create(&self, _args: &AccountCreate) -> Result<ResponseEnvelope> {
        Err(ApiError::Unimplemented(Operation::AccountCreate))
    }

    fn application_create(&self, _args: &ApplicationCreate) -> Result<ResponseEnvelope> {
        Err(ApiError::Unimplemented(Operation::ApplicationCreate))
    }

    fn application_get(&self, _application_id: &str) -> Result<ResponseEnvelope> {
        Err(ApiError::Unimplemented(Operation::ApplicationGet))
    }

    fn environment_create(&self, _args: &EnvironmentCreate) -> Result<ResponseEnvelope> {
        Err(ApiError::Unimplemented(Operation::EnvironmentCreate))
    }

    fn environment_get(&self, _environment_id: &str) -> Result<ResponseEnvelope> {
        Err(ApiError::Unimplemented(Operation::EnvironmentGet))
    }
}
