use clap::Parser as _;

mod cli;
mod config;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let args = cli::Args::parse();
    let cfg = config::Config::try_load_from_file_or_default(args.config.as_ref())?;
    cli::run(cfg, args)
}
