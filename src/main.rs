use anyhow::Context;
use clap::Parser;
use exam_intake::adapters::form::decode_submission;
use exam_intake::app::report;
use exam_intake::config::cli::Command;
use exam_intake::core::{RequestMethod, Submission};
use exam_intake::utils::{logger, validation::Validate};
use exam_intake::{open_store, CliConfig, IntakeConfig, IntakeOutcome, IntakeService};
use std::io::Read;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let mut config = match &cli.config {
        Some(path) => match IntakeConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => IntakeConfig::default(),
    };
    cli.apply_overrides(&mut config);

    if cli.json_logs {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!(
        "Using {} store at {}",
        config.store_mode().as_str(),
        config.data_file().display()
    );

    let (submission, cgi) = match cli.command {
        Command::Submit(args) => (args.into_submission(), false),
        Command::List => (Submission::new(RequestMethod::Get), false),
        Command::Handle { method } => {
            let method = RequestMethod::parse(&method);
            let mut body = Vec::new();
            if method == RequestMethod::Post {
                std::io::stdin()
                    .read_to_end(&mut body)
                    .context("reading request body from stdin")?;
            }
            (decode_submission(method, &body), true)
        }
    };

    let store = open_store(config.store_mode(), config.data_file(), config.retry_policy());
    let service = IntakeService::new(store);

    let (status, body, exit_code) = match service.handle(submission).await {
        Ok(outcome) => {
            let exit_code = match outcome {
                IntakeOutcome::Rejected { .. } => 2,
                IntakeOutcome::Listing { .. } => 0,
            };
            (outcome.status_code(), report::render_outcome(&outcome), exit_code)
        }
        Err(e) => {
            tracing::error!(
                "Request failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            (e.status_code(), report::render_error(&e), 1)
        }
    };

    if cgi {
        print!("Status: {}\r\nContent-Type: text/plain; charset=utf-8\r\n\r\n{}", status, body);
    } else if exit_code == 1 {
        eprint!("❌ {}", body);
    } else {
        print!("{}", body);
    }

    if exit_code != 0 && !cgi {
        std::process::exit(exit_code);
    }

    Ok(())
}
