use crate::{address, consts::DEFAULT_DEPLOYED_ADDRESS};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeploymentError {
    #[error("failed to read deployment file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse deployment metadata: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid deployed address {address:?}: {reason}")]
    InvalidAddress {
        address: String,
        reason: address::AddressError,
    },
}

/// Facts about the deployed token contract, as written by the contracts package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    deployed_address: String,
}

impl Default for Deployment {
    fn default() -> Self {
        Self {
            deployed_address: DEFAULT_DEPLOYED_ADDRESS.to_string(),
        }
    }
}

impl Deployment {
    pub fn new(deployed_address: impl Into<String>) -> Result<Self, DeploymentError> {
        let deployment = Self {
            deployed_address: deployed_address.into(),
        };
        deployment.validate()?;
        Ok(deployment)
    }

    pub fn from_json(content: &str) -> Result<Self, DeploymentError> {
        let deployment: Self = serde_json::from_str(content)?;
        deployment.validate()?;
        Ok(deployment)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DeploymentError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn deployed_address(&self) -> &str {
        &self.deployed_address
    }

    fn validate(&self) -> Result<(), DeploymentError> {
        address::parse_address(&self.deployed_address)
            .map(|_| ())
            .map_err(|reason| DeploymentError::InvalidAddress {
                address: self.deployed_address.clone(),
                reason,
            })
    }
}
