use clap::{value_parser, Arg, ArgAction, Command};

// Shared with build.rs, which generates the shell completions from it.
// Keep this file free of crate-internal imports.

pub fn parse_percent(s: &str) -> Result<f64, String> {
    let percent: f64 = s.parse().map_err(|_| format!("\"{}\" is not a number", s))?;
    if percent > 0.0 && percent < 1.0 {
        Ok(percent)
    } else {
        Err(format!("--percent \"{}\" must be between 0 and 1", percent))
    }
}

pub fn build_cli() -> Command {
    Command::new("fasta_sampler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Probabilistically subset FASTA files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .num_args(1..)
                .required_unless_present("completions")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Input FASTA file(s), optionally gzipped"),
        )
        .arg(
            Arg::new("percent")
                .short('p')
                .long("percent")
                .value_name("reads")
                .default_value("0.1")
                .value_parser(parse_percent)
                .help("Fraction of records to keep, between 0 and 1"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("seed")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Random seed value"),
        )
        .arg(
            Arg::new("outdir")
                .short('o')
                .long("outdir")
                .value_name("DIR")
                .default_value("out")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Output directory"),
        )
        .arg(
            Arg::new("line-width")
                .short('w')
                .long("line-width")
                .value_name("N")
                .default_value("60")
                .value_parser(value_parser!(usize))
                .help("Wrap output sequences at N characters, 0 for no wrapping"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only print the final summary"),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .exclusive(true)
                .value_parser(value_parser!(clap_complete::Shell))
                .help("Print a shell completion script and exit"),
        )
}
