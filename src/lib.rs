pub mod address;
pub mod cli;
mod config;
pub mod consts;
pub mod deployment;
pub mod errors;
mod settings;

pub use self::config::{
    load_config, load_config_with_deployment, token_address_or_default, RawEnv, ResolvedConfig,
};
pub use self::settings::{Settings, CONFIG_PATH_ENV};
pub use deployment::Deployment;
pub use errors::{FieldError, ValidationError};
