use std::io;

use anyhow::Context;
use fasta_sampler::cli::build_cli;
use fasta_sampler::{subsample_files, Config};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = build_cli().get_matches();

    if let Some(shell) = matches.get_one::<clap_complete::Shell>("completions").copied() {
        clap_complete::generate(shell, &mut build_cli(), "fasta_sampler", &mut io::stdout());
        return Ok(());
    }

    let config = Config::from_matches(&matches)?;
    let summary = subsample_files(&config)
        .with_context(|| format!("Sampling into directory \"{}\" failed", config.outdir.display()))?;

    println!("{}", summary);
    Ok(())
}
