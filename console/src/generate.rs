use std::path::PathBuf;

use clap::Args;
use console::style;
use log::error;
use platexplorer::prelude::*;

use crate::strings::generate as strings;
use crate::utils::{init_pbar, UtilsArgs};

#[derive(Args, Debug, Clone)]
pub(crate) struct GenerateArgs {
    #[arg(required = true, help = strings::ASSIGNMENT)]
    assignment: PathBuf,
    #[arg(short, long, default_value_t = ',', help = strings::SEPARATOR)]
    separator:  char,
}

impl GenerateArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<Vec<PathBuf>> {
        let assignments = load_assignments(&self.assignment)?;
        if assignments.is_empty() {
            eprintln!(
                "{} in {}",
                style("No assignments to process").red(),
                self.assignment.display()
            );
            return Ok(Vec::new());
        }

        let config = PlateParserConfig::default().with_separator(self.separator);
        let progress_bar = init_pbar(assignments.len(), utils.progress)?;

        let mut outputs = Vec::new();
        for assignment in assignments.iter() {
            progress_bar.set_message(assignment.input.display().to_string());
            match generate_plate(assignment, &utils.data_dir, &config) {
                Ok(Some(output)) => outputs.push(output),
                Ok(None) => {},
                Err(e) => {
                    error!(
                        "Failed to generate data for {}: {}",
                        assignment.input.display(),
                        e
                    )
                },
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        for output in outputs.iter() {
            println!("[{}] {}", style("V").green(), output.display());
        }
        println!(
            "{}",
            style(format!(
                "Generated {} of {} data files.",
                outputs.len(),
                assignments.len()
            ))
            .green()
            .bold()
        );
        Ok(outputs)
    }
}
