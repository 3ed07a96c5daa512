use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Settings file with `token_contract_address` and `wallet_connect_project_id` keys.
    #[clap(short, long)]
    pub config_path: Option<std::path::PathBuf>,
    /// Deployment metadata (JSON with `deployedAddress`) used as the default address.
    #[clap(short, long)]
    pub deployment: Option<std::path::PathBuf>,
    #[clap(short, long, value_enum, default_value_t = OutputFormat::Env)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `KEY=value` lines
    Env,
    Json,
}
