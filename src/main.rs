use clap::Parser;
use gherkin_report::cli::commands::{cmd_render, cmd_show};
use gherkin_report::cli::config::{Cli, Commands, load_config, resolve_settings};
use gherkin_report::cli::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Render {
            input,
            format,
            output,
            feature,
            expand,
        } => {
            let settings = resolve_settings(
                &config,
                format.as_deref(),
                output.as_deref(),
                expand.as_deref(),
            );
            let all_passed = cmd_render(&input, &settings, feature.as_deref())?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Show {
            input,
            feature,
            expand,
        } => {
            let settings = resolve_settings(&config, None, None, expand.as_deref());
            cmd_show(&input, &feature, &settings)?;
        }
    }

    Ok(())
}
