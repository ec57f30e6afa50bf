use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;

use crate::strings::utils as strings;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(short = 'd', long, default_value = "data", help = strings::DATA_DIR)]
    pub data_dir: PathBuf,
    #[arg(short, long, default_value_t = false, help = strings::VERBOSE)]
    pub verbose:  bool,
    #[arg(short, long, help = strings::THREADS)]
    pub threads:  Option<usize>,
    #[arg(long, default_value_t = false, help = strings::PROGRESS)]
    pub progress: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        init_logger(self.verbose)?;
        if let Some(threads) = self.threads {
            // Read once by the shared pool on first use.
            std::env::set_var("PLATEX_NUM_THREADS", threads.to_string());
        }
        Ok(())
    }
}

pub(crate) fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    }
    else {
        LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .try_init()?;
    Ok(())
}

pub(crate) fn init_pbar(
    total: usize,
    visible: bool,
) -> anyhow::Result<ProgressBar> {
    if !visible {
        return Ok(ProgressBar::hidden());
    }
    let progress_bar = ProgressBar::new(total as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}, ETA: {eta}] [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}")?
            .progress_chars("#>-"),
    );
    progress_bar.set_message("Processing...");
    Ok(progress_bar)
}
