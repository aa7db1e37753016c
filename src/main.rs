use clap::Parser;
use varbias::cli::{Args, run};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();
    run(&args)
}
