use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::ProgressBar;
use platexplorer::prelude::*;

use crate::prompt::PromptRoles;
use crate::strings::analyse as strings;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct AnalyseArgs {
    #[arg(short, long, requires = "denominator", conflicts_with = "no_ratio", help = strings::NUMERATOR)]
    numerator:   Option<String>,
    #[arg(short = 'D', long, requires = "numerator", conflicts_with = "no_ratio", help = strings::DENOMINATOR)]
    denominator: Option<String>,
    #[arg(long, default_value_t = false, help = strings::NO_RATIO)]
    no_ratio:    bool,
    #[arg(short, long, default_value = "*_data.csv", help = strings::PATTERN)]
    pattern:     String,
}

impl AnalyseArgs {
    fn selector(&self) -> Box<dyn RoleSelector> {
        match (&self.numerator, &self.denominator) {
            _ if self.no_ratio => Box::new(FixedRoles(RatioPolicy::Skip)),
            (Some(numerator), Some(denominator)) => {
                Box::new(FixedRoles(RatioPolicy::Compute(RatioRoles::new(
                    numerator.clone(),
                    denominator.clone(),
                ))))
            },
            _ => Box::new(PromptRoles),
        }
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        if !utils.data_dir.is_dir() {
            anyhow::bail!("Data directory {} does not exist", utils.data_dir.display());
        }
        let config = AnalysisConfig::default().with_pattern(&self.pattern)?;
        let mut selector = self.selector();

        let spinner = if utils.progress {
            let spinner = ProgressBar::new_spinner();
            spinner.set_message("Analysing...");
            spinner.enable_steady_tick(Duration::from_millis(100));
            spinner
        }
        else {
            ProgressBar::hidden()
        };
        let reports = analyse_data_dir(&utils.data_dir, &config, selector.as_mut())?;
        spinner.finish_and_clear();

        for report in reports.iter() {
            let name = report.directory.display();
            match (&report.merged, &report.ratios) {
                (Some(merged), Some(ratios)) => {
                    println!(
                        "[{}] {}: {}, {}",
                        style("V").green(),
                        name,
                        merged.display(),
                        ratios.display()
                    )
                },
                (Some(merged), None) => {
                    println!("[{}] {}: {}", style("V").green(), name, merged.display())
                },
                _ => {},
            }
            if let Some(failure) = &report.failure {
                eprintln!("[{}] {}: {}", style("X").red(), name, style(failure).red());
            }
        }
        let analysed = reports.iter().filter(|r| r.merged.is_some()).count();
        println!(
            "{}",
            style(format!(
                "Analysed {} of {} directories.",
                analysed,
                reports.len()
            ))
            .green()
            .bold()
        );
        Ok(())
    }
}
