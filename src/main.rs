use anyhow::Result;
use instrumap::cli::{Cli, Commands};
use instrumap::commands::{run_diff, run_filter, DiffOptions, FilterOptions};
use instrumap::config::{load_config, FailurePolicy, InstrumapConfig};
use instrumap::reports::ReportSources;

fn main() -> Result<()> {
    let cli = instrumap::cli::parse_args();
    init_logging(&cli);
    configure_output(cli.plain);

    match cli.command {
        Commands::Filter {
            methods,
            output_dir,
            skip_invalid,
        } => {
            let result = load_config(cli.config.as_deref())
                .map_err(anyhow::Error::from)
                .and_then(|config| {
                    let options = FilterOptions {
                        input: methods,
                        output_dir: output_dir
                            .unwrap_or_else(|| config.filter.output_dir.clone()),
                        source_marker: config.filter.source_marker.clone(),
                        target_marker: config.filter.target_marker.clone(),
                        failure_policy: failure_policy(skip_invalid, &config),
                    };
                    run_filter(&options)
                });
            if let Err(e) = result {
                println!("USAGE: instrumap filter </path/to/method/list>.csv");
                println!("{:#}", e);
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Diff {
            invoked_methods,
            descartes_reports,
            descartes_folders,
            output,
            summary_json,
            skip_invalid,
        } => {
            // Checked before any file is touched
            let sources = ReportSources::new(descartes_reports, descartes_folders)?;
            let config = load_config(cli.config.as_deref())?;
            let options = DiffOptions {
                invoked_methods,
                sources,
                report_file_name: config.reports.file_name.clone(),
                output: output.unwrap_or_else(|| config.diff.output.clone()),
                summary_json,
                failure_policy: failure_policy(skip_invalid, &config),
            };
            run_diff(&options)?;
            Ok(())
        }
    }
}

// The command line flag can only make the policy more lenient
fn failure_policy(skip_invalid: bool, config: &InstrumapConfig) -> FailurePolicy {
    if skip_invalid {
        FailurePolicy::SkipInvalid
    } else {
        config.failure_policy
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn configure_output(plain: bool) {
    if plain || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
}
