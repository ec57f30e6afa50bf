mod analyse;
mod generate;
mod prompt;
mod strings;
mod utils;

use analyse::AnalyseArgs;
use clap::{Parser, Subcommand};
use generate::GenerateArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Build per-plate data files from plate exports and mapping grids.
    Generate {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  GenerateArgs,
    },

    /// Merge every data subdirectory and compute statistics and ratios.
    Analyse {
        #[clap(flatten)]
        utils: UtilsArgs,
        #[clap(flatten)]
        args:  AnalyseArgs,
    },

    /// Generate, then analyse.
    Run {
        #[clap(flatten)]
        utils:    UtilsArgs,
        #[clap(flatten)]
        generate: GenerateArgs,
        #[clap(flatten)]
        analyse:  AnalyseArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Generate { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Analyse { utils, args } => {
            utils.setup()?;
            args.run(&utils)?;
        },
        MainMenu::Run {
            utils,
            generate,
            analyse,
        } => {
            utils.setup()?;
            generate.run(&utils)?;
            analyse.run(&utils)?;
        },
    }
    Ok(())
}
