//! Probabilistic subsetting of FASTA files.
//!
//! Every input file is streamed record by record. Each record is kept with
//! probability `percent`, decided by one draw from a single seeded generator
//! that is shared by all files of the run, and kept records are written to a
//! file of the same name in the output directory.

pub mod cli;
pub mod config;
pub mod error;
pub mod reader;
pub mod record;
pub mod sampler;
pub mod writer;

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::reader::FastaReader;
pub use crate::record::FastaRecord;
pub use crate::sampler::{seeded_rng, SampleError, SampleStats, Sampler};
pub use crate::writer::{FastaWriter, DEFAULT_LINE_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary{
    pub input: PathBuf,
    pub output: PathBuf,
    pub seen: u64,
    pub kept: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary{
    pub seed: i64,
    pub outdir: PathBuf,
    pub files: Vec<FileSummary>,
    pub total_kept: u64,
}

// Formats 1234567 as 1,234,567
pub fn with_commas(n: u64) -> String{
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate(){
        if i > 0 && (digits.len() - i) % 3 == 0{
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn plural(n: u64) -> &'static str{
    if n == 1 {""} else {"s"}
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n_files = self.files.len() as u64;
        write!(f, "Wrote {} sequence{} from {} file{} to directory \"{}\"",
               with_commas(self.total_kept), plural(self.total_kept),
               with_commas(n_files), plural(n_files),
               self.outdir.display())
    }
}

// The output file has the same base name as the input, inside outdir.
pub fn output_path(outdir: &Path, input: &Path) -> Result<PathBuf>{
    match input.file_name(){
        Some(name) => Ok(outdir.join(name)),
        None => Err(Error::NoFileName{path: input.to_path_buf()}),
    }
}

fn record_spinner(quiet: bool) -> ProgressBar{
    if quiet{
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner} {msg}: {pos} records ({per_sec})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// Samples every input of `config` into `config.outdir`.
///
/// Every input is checked for readability before anything is written, so a
/// missing or unreadable input leaves no output behind. Readers are only
/// built when their file's turn comes. After that, the first I/O
/// error aborts the run; output already written for the failing file is
/// left in place.
pub fn subsample_files(config: &Config) -> Result<RunSummary>{
    let mut jobs = Vec::with_capacity(config.inputs.len());
    let mut seen_outputs = HashSet::new();
    for input in config.inputs.iter(){
        File::open(input).map_err(|source| Error::OpenInput{path: input.clone(), source})?;
        let output = output_path(&config.outdir, input)?;
        if !seen_outputs.insert(output.clone()){
            log::warn!("{} appears more than once among the inputs, later output overwrites earlier", output.display());
        }
        jobs.push((input, output));
    }

    fs::create_dir_all(&config.outdir)
        .map_err(|source| Error::CreateOutdir{path: config.outdir.clone(), source})?;

    let (rng, seed) = seeded_rng(config.seed);
    log::info!("Using random seed {}", seed);
    let mut sampler = Sampler::new(rng, config.percent);

    let mut summary = RunSummary{seed, outdir: config.outdir.clone(), files: vec![], total_kept: 0};
    for (i, (input, output)) in jobs.into_iter().enumerate(){
        let basename = output.file_name().unwrap_or_default().to_string_lossy().into_owned();
        if !config.quiet{
            println!("{:3}: {}", i + 1, basename);
        }

        let reader = FastaReader::from_path(input)
            .map_err(|source| Error::OpenInput{path: input.clone(), source})?;
        let mut writer = FastaWriter::new_to_file(&output, config.line_width)
            .map_err(|source| Error::CreateOutput{path: output.clone(), source})?;

        let spinner = record_spinner(config.quiet);
        spinner.set_message(basename);
        let stats = sampler.sample_stream(reader, &mut writer, &spinner);
        spinner.finish_and_clear();

        let stats = stats.map_err(|e| match e{
            SampleError::Read(source) => Error::Read{path: input.clone(), source},
            SampleError::Write(source) => Error::Write{path: output.clone(), source},
        })?;
        writer.finish().map_err(|source| Error::Write{path: output.clone(), source})?;

        log::info!("{}: kept {} of {} records in {}", input.display(), stats.kept, stats.seen, output.display());
        summary.total_kept += stats.kept;
        summary.files.push(FileSummary{input: input.clone(), output, seen: stats.seen, kept: stats.kept});
    }

    Ok(summary)
}
