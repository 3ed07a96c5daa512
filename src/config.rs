use crate::{
    address,
    consts::{TOKEN_CONTRACT_ADDRESS_KEY, WALLET_CONNECT_PROJECT_ID_KEY},
    deployment::Deployment,
    errors::{EnvLineError, FieldError, ValidationError},
};
use ethers_core::types::Address;
use serde::{Deserialize, Serialize, Serializer};

/// Values exactly as they were found in the source, before defaults and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawEnv {
    pub token_contract_address: Option<String>,
    pub wallet_connect_project_id: Option<String>,
}

impl<K, V> FromIterator<(K, V)> for RawEnv
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(source: I) -> Self {
        let mut raw = RawEnv::default();
        for (key, value) in source {
            match key.as_ref() {
                TOKEN_CONTRACT_ADDRESS_KEY => raw.token_contract_address = Some(value.into()),
                WALLET_CONNECT_PROJECT_ID_KEY => raw.wallet_connect_project_id = Some(value.into()),
                _ => {}
            }
        }
        raw
    }
}

impl RawEnv {
    /// Keeps the values set here, taking the missing ones from `fallback`.
    pub fn with_fallback(self, fallback: RawEnv) -> Self {
        Self {
            token_contract_address: self
                .token_contract_address
                .or(fallback.token_contract_address),
            wallet_connect_project_id: self
                .wallet_connect_project_id
                .or(fallback.wallet_connect_project_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    #[serde(
        rename = "VITE_TOKEN_CONTRACT_ADDRESS",
        serialize_with = "serialize_checksummed"
    )]
    token_contract_address: Address,
    #[serde(
        rename = "VITE_WALLET_CONNECT_PROJECT_ID",
        skip_serializing_if = "Option::is_none"
    )]
    wallet_connect_project_id: Option<String>,
}

impl ResolvedConfig {
    pub fn resolve(raw: RawEnv, deployment: &Deployment) -> Result<Self, ValidationError> {
        // The project id accepts any string, so the address is the only field that may fail.
        match resolve_token_contract_address(raw.token_contract_address.as_deref(), deployment) {
            Ok(token_contract_address) => Ok(Self {
                token_contract_address,
                wallet_connect_project_id: raw.wallet_connect_project_id,
            }),
            Err(err) => Err(ValidationError { errors: vec![err] }),
        }
    }

    pub fn token_contract(&self) -> Address {
        self.token_contract_address
    }

    /// Checksummed representation of the token contract address.
    pub fn token_contract_address(&self) -> String {
        address::checksummed(&self.token_contract_address)
    }

    pub fn wallet_connect_project_id(&self) -> Option<&str> {
        self.wallet_connect_project_id.as_deref()
    }

    /// Resolved values keyed by the variables they were read from.
    pub fn env_vars(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![(TOKEN_CONTRACT_ADDRESS_KEY, self.token_contract_address())];
        if let Some(project_id) = &self.wallet_connect_project_id {
            vars.push((WALLET_CONNECT_PROJECT_ID_KEY, project_id.clone()));
        }
        vars
    }

    /// `KEY=value` lines readable by dotenv parsers.
    pub fn env_lines(&self) -> Result<Vec<String>, EnvLineError> {
        self.env_vars()
            .into_iter()
            .map(|(key, value)| env_line(key, &value))
            .collect()
    }
}

/// Loads the configuration from environment-like key/value pairs,
/// falling back to the compiled-in deployment for the token address.
pub fn load_config<I, K, V>(source: I) -> Result<ResolvedConfig, ValidationError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    load_config_with_deployment(source, &Deployment::default())
}

pub fn load_config_with_deployment<I, K, V>(
    source: I,
    deployment: &Deployment,
) -> Result<ResolvedConfig, ValidationError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    ResolvedConfig::resolve(source.into_iter().collect(), deployment)
}

/// Blank values count as missing. A non-blank value is returned untrimmed.
pub fn token_address_or_default<'a>(
    value: Option<&'a str>,
    deployment: &'a Deployment,
) -> &'a str {
    match value {
        Some(value) if !value.trim().is_empty() => value,
        _ => {
            log::debug!(
                "{TOKEN_CONTRACT_ADDRESS_KEY} is not set, using deployed address {}",
                deployment.deployed_address()
            );
            deployment.deployed_address()
        }
    }
}

fn resolve_token_contract_address(
    value: Option<&str>,
    deployment: &Deployment,
) -> Result<Address, FieldError> {
    let value = token_address_or_default(value, deployment);
    address::parse_address(value).map_err(|reason| FieldError {
        field: TOKEN_CONTRACT_ADDRESS_KEY,
        value: value.to_string(),
        reason,
    })
}

/// Values outside of `[A-Za-z0-9_.:/-]` are double-quoted. Dotenv does not unescape
/// quotes, so control characters and `"` are rejected.
fn env_line(key: &'static str, value: &str) -> Result<String, EnvLineError> {
    if let Some(character) = value
        .chars()
        .find(|character| character.is_control() || *character == '"')
    {
        return Err(EnvLineError {
            field: key,
            character,
        });
    }
    let plain = value
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || "_.:/-".contains(character));
    if plain && !value.is_empty() {
        Ok(format!("{key}={value}"))
    } else {
        Ok(format!("{key}=\"{value}\""))
    }
}

fn serialize_checksummed<S: Serializer>(
    address: &Address,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address::checksummed(address))
}
