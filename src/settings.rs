use crate::{
    cli::Args,
    config::{RawEnv, ResolvedConfig},
    deployment::Deployment,
    errors::ValidationError,
};
use anyhow::Context;
use config::{Config, File, FileFormat, FileSourceFile, Source};
use std::path::PathBuf;

pub const CONFIG_PATH_ENV: &str = "FRONTEND_ENV__CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub env: RawEnv,
    pub deployment: Deployment,
}

impl Settings {
    /// Collects raw values from the optional settings file and the process environment,
    /// environment taking precedence.
    pub fn build(args: &Args) -> anyhow::Result<Self> {
        let config_path_env = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::build_from(args, config_path_env, process_env())
    }

    /// Same as [`Settings::build`], with the settings path variable and the
    /// environment passed in. Environment keys must match exactly.
    pub fn build_from<I, K, V>(
        args: &Args,
        config_path_env: Option<PathBuf>,
        vars: I,
    ) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let from_file = match args.config_path.clone().or(config_path_env) {
            Some(config_path) => {
                log::info!("reading settings from {}", config_path.display());
                read_settings_file(File::<FileSourceFile, FileFormat>::from(config_path))?
            }
            None => RawEnv::default(),
        };
        let env = vars.into_iter().collect::<RawEnv>().with_fallback(from_file);

        let deployment = match &args.deployment {
            Some(path) => Deployment::from_file(path)
                .with_context(|| format!("failed to load deployment from {}", path.display()))?,
            None => Deployment::default(),
        };

        Ok(Self { env, deployment })
    }

    pub fn resolve(self) -> Result<ResolvedConfig, ValidationError> {
        ResolvedConfig::resolve(self.env, &self.deployment)
    }
}

/// Variables with non-unicode names or values cannot hold any of our keys and are skipped.
fn process_env() -> impl Iterator<Item = (String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

fn read_settings_file<S>(file: S) -> anyhow::Result<RawEnv>
where
    S: Source + Send + Sync + 'static,
{
    Config::builder()
        .add_source(file)
        .build()
        .context("failed to build settings")?
        .try_deserialize()
        .context("failed to deserialize settings")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::OutputFormat,
        consts::{TOKEN_CONTRACT_ADDRESS_KEY, WALLET_CONNECT_PROJECT_ID_KEY},
    };
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const FILE_ADDRESS: &str = "0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb";
    const ENV_ADDRESS: &str = "0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fb";
    const DEPLOYED_ADDRESS: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";

    const NO_VARS: [(&str, &str); 0] = [];

    fn args(config_path: Option<PathBuf>, deployment: Option<PathBuf>) -> Args {
        Args {
            config_path,
            deployment,
            format: OutputFormat::Env,
        }
    }

    fn settings_file(token_contract_address: &str, project_id: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
            token_contract_address = "{token_contract_address}"
            wallet_connect_project_id = "{project_id}"
            "#
        )
        .unwrap();
        file
    }

    fn deployment_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn reads_values_from_file() {
        let file = File::from_str(
            &format!(
                r#"
                token_contract_address = "{FILE_ADDRESS}"
                wallet_connect_project_id = "0042"
                "#
            ),
            FileFormat::Toml,
        );
        assert_eq!(
            read_settings_file(file).unwrap(),
            RawEnv {
                token_contract_address: Some(FILE_ADDRESS.to_string()),
                wallet_connect_project_id: Some("0042".to_string()),
            }
        );
    }

    #[test]
    fn nothing_set_gives_default_settings() {
        let settings = Settings::build_from(&args(None, None), None, NO_VARS).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn config_path_variable_is_used_without_argument() {
        let file = settings_file(FILE_ADDRESS, "from-file");
        let settings =
            Settings::build_from(&args(None, None), Some(file.path().to_path_buf()), NO_VARS)
                .unwrap();
        assert_eq!(
            settings.env,
            RawEnv {
                token_contract_address: Some(FILE_ADDRESS.to_string()),
                wallet_connect_project_id: Some("from-file".to_string()),
            }
        );
    }

    #[test]
    fn config_path_argument_wins_over_variable() {
        let from_argument = settings_file(FILE_ADDRESS, "from-argument");
        let from_variable = settings_file(ENV_ADDRESS, "from-variable");
        let settings = Settings::build_from(
            &args(Some(from_argument.path().to_path_buf()), None),
            Some(from_variable.path().to_path_buf()),
            NO_VARS,
        )
        .unwrap();
        assert_eq!(
            settings.env.token_contract_address.as_deref(),
            Some(FILE_ADDRESS)
        );
        assert_eq!(
            settings.env.wallet_connect_project_id.as_deref(),
            Some("from-argument")
        );
    }

    #[test]
    fn environment_overrides_file() {
        let file = settings_file(FILE_ADDRESS, "from-file");
        let settings = Settings::build_from(
            &args(Some(file.path().to_path_buf()), None),
            None,
            [(TOKEN_CONTRACT_ADDRESS_KEY, ENV_ADDRESS)],
        )
        .unwrap();
        assert_eq!(
            settings.env.token_contract_address.as_deref(),
            Some(ENV_ADDRESS)
        );
        assert_eq!(
            settings.env.wallet_connect_project_id.as_deref(),
            Some("from-file")
        );
    }

    #[test]
    fn environment_keys_are_case_sensitive() {
        let settings = Settings::build_from(
            &args(None, None),
            None,
            [
                ("vite_token_contract_address", "not-an-address"),
                ("Vite_Wallet_Connect_Project_Id", "ignored"),
                (WALLET_CONNECT_PROJECT_ID_KEY, "abc123"),
            ],
        )
        .unwrap();
        assert_eq!(
            settings.env,
            RawEnv {
                token_contract_address: None,
                wallet_connect_project_id: Some("abc123".to_string()),
            }
        );
    }

    #[test]
    fn deployment_file_provides_default_address() {
        let file = deployment_file(&format!(r#"{{"deployedAddress": "{DEPLOYED_ADDRESS}"}}"#));
        let settings =
            Settings::build_from(&args(None, Some(file.path().to_path_buf())), None, NO_VARS)
                .unwrap();
        assert_eq!(settings.deployment, Deployment::new(DEPLOYED_ADDRESS).unwrap());
        assert_eq!(
            settings.resolve().unwrap().token_contract_address(),
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"
        );
    }

    #[test]
    fn malformed_deployment_file_fails() {
        let file = deployment_file(r#"{"deployedAddress": "0x1234"}"#);
        let err = Settings::build_from(&args(None, Some(file.path().to_path_buf())), None, NO_VARS)
            .unwrap_err();
        assert!(
            err.to_string().starts_with("failed to load deployment from"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn missing_deployment_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deployment.json");
        let err = Settings::build_from(&args(None, Some(path)), None, NO_VARS).unwrap_err();
        assert!(
            err.to_string().starts_with("failed to load deployment from"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn missing_settings_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontend.toml");
        let err = Settings::build_from(&args(None, None), Some(path), NO_VARS).unwrap_err();
        assert_eq!(err.to_string(), "failed to build settings");
    }

    #[test]
    fn empty_sources_resolve_to_deployment() {
        let settings = Settings {
            env: RawEnv::default(),
            deployment: Deployment::new(FILE_ADDRESS).unwrap(),
        };
        let config = settings.resolve().unwrap();
        assert_eq!(
            config.token_contract_address(),
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb"
        );
        assert_eq!(config.wallet_connect_project_id(), None);
    }
}
