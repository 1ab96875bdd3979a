//! Client configuration.

use serde::Deserialize;

use crate::error::{ApiError, Result};

/// Endpoint every request is POSTed to unless overridden.
pub const DEFAULT_ADDRESS: &str = "https://aperture.section.io/api/v1/";

/// Options recognized when building a `Client`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Overrides `DEFAULT_ADDRESS`. Used verbatim, no path is appended.
    pub base_address: String,
}

impl ClientConfig {
    pub fn with_base_address(base_address: impl Into<String>) -> Self {
        Self {
            base_address: base_address.into(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.base_address.is_empty() {
            return Err(ApiError::EmptyArgument {
                name: "base address",
            });
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_address(DEFAULT_ADDRESS)
    }
}
