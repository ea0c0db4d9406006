use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::writer::DEFAULT_LINE_WIDTH;

/// Validated settings for one sampling run.
#[derive(Debug, Clone)]
pub struct Config{
    pub inputs: Vec<PathBuf>,
    pub percent: f64,
    pub seed: Option<i64>,
    pub outdir: PathBuf,
    pub line_width: usize,
    pub quiet: bool,
}

impl Config{
    pub fn new(inputs: Vec<PathBuf>, percent: f64, seed: Option<i64>, outdir: &Path) -> Result<Self>{
        if !(percent > 0.0 && percent < 1.0){
            return Err(Error::InvalidPercent(percent));
        }
        Ok(Config{inputs,
                  percent,
                  seed,
                  outdir: outdir.to_path_buf(),
                  line_width: DEFAULT_LINE_WIDTH,
                  quiet: false})
    }

    pub fn with_line_width(mut self, line_width: usize) -> Self{
        self.line_width = line_width;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self{
        self.quiet = quiet;
        self
    }

    pub fn from_matches(args: &clap::ArgMatches) -> Result<Self>{
        let inputs: Vec<PathBuf> = args.get_many::<PathBuf>("file").map(|files| files.cloned().collect()).unwrap_or_default();
        let percent = args.get_one::<f64>("percent").copied().unwrap_or(0.1);
        let seed = args.get_one::<i64>("seed").copied();
        let outdir = args.get_one::<PathBuf>("outdir").cloned().unwrap_or_else(|| PathBuf::from("out"));
        let line_width = args.get_one::<usize>("line-width").copied().unwrap_or(DEFAULT_LINE_WIDTH);

        let config = Config::new(inputs, percent, seed, &outdir)?
            .with_line_width(line_width)
            .with_quiet(args.get_flag("quiet"));
        log::debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }
}
