use console::style;
use dialoguer::{Confirm, Select};
use platexplorer::prelude::*;

/// Asks on the terminal whether, and how, ratios are computed.
pub(crate) struct PromptRoles;

fn prompt_error(e: dialoguer::Error) -> PlateError {
    PlateError::Config(format!("role prompt failed: {}", e))
}

impl RoleSelector for PromptRoles {
    fn select(
        &mut self,
        measurements: &[String],
    ) -> PlateResult<RatioPolicy> {
        println!(
            "Found two measurement types: {}",
            style(measurements.join(", ")).green()
        );
        let compute = Confirm::new()
            .with_prompt("Compute numerator/denominator ratios for every directory?")
            .default(true)
            .interact()
            .map_err(prompt_error)?;
        if !compute {
            return Ok(RatioPolicy::Skip);
        }

        let numerator = Select::new()
            .with_prompt("Numerator")
            .items(measurements)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        let denominator = if measurements.len() == 2 {
            1 - numerator
        }
        else {
            Select::new()
                .with_prompt("Denominator")
                .items(measurements)
                .interact()
                .map_err(prompt_error)?
        };
        println!(
            "Ratio: {} / {}",
            style(&measurements[numerator]).green(),
            style(&measurements[denominator]).green()
        );

        Ok(RatioPolicy::Compute(RatioRoles::new(
            measurements[numerator].clone(),
            measurements[denominator].clone(),
        )))
    }
}
