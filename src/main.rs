use clap::Parser;
use frontend_env::{
    cli::{Args, OutputFormat},
    Settings,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = Settings::build(&args)?;
    let config = match settings.resolve() {
        Ok(config) => config,
        Err(err) => {
            for error in &err.errors {
                log::error!("{error}");
            }
            std::process::exit(1);
        }
    };
    log::info!("using token contract {}", config.token_contract_address());

    match args.format {
        OutputFormat::Env => match config.env_lines() {
            Ok(lines) => {
                for line in lines {
                    println!("{line}");
                }
            }
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}
