//! gymdesk-formcheck CLI
//!
//! Command-line tool for checking form schemas.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use gymdesk_formcheck::{apply_assignments, load_form, parse_assignment, status_report, submit};
use gymdesk_forms::render_form;

/// Check gymdesk form schemas without a browser.
#[derive(Parser)]
#[command(name = "gymdesk-formcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Field schema file (JSON array of field specs).
    #[arg(short, long, env = "GYMDESK_FORM_SCHEMA")]
    schema: PathBuf,

    /// Initial record file (JSON object), as in edit mode.
    #[arg(short, long)]
    record: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show value, flags and visible errors of every field.
    Status {
        /// Edit a field as a user would (repeatable).
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Mark every field touched, revealing all errors.
        #[arg(long)]
        touch_all: bool,
    },

    /// Submit the form and print the payload.
    Submit {
        /// Edit a field as a user would (repeatable).
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,
    },

    /// Render the form as Bootstrap 5 HTML.
    Render {
        /// Edit a field as a user would (repeatable).
        #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Submit button label.
        #[arg(long)]
        submit_label: Option<String>,

        /// Render the loading skeleton.
        #[arg(long)]
        loading: bool,

        /// Render as if a submission were in flight.
        #[arg(long)]
        submitting: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut form = load_form(&cli.schema, cli.record.as_deref())?;

    match cli.command {
        Commands::Status { set, touch_all } => {
            apply_assignments(&mut form, &set)?;
            if touch_all {
                form.mark_all_touched();
            }
            print!("{}", status_report(&form));
        }

        Commands::Submit { set } => {
            apply_assignments(&mut form, &set)?;
            match submit(&mut form) {
                Ok(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
                Err(errors) => {
                    error!("submission blocked by {} invalid field(s)", errors.len());
                    eprint!("{errors}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }

        Commands::Render {
            set,
            submit_label,
            loading,
            submitting,
        } => {
            apply_assignments(&mut form, &set)?;
            if let Some(label) = submit_label {
                form.set_submit_label(label);
            }
            form.set_loading(loading);
            form.set_submitting(submitting);
            println!("{}", render_form(&form));
        }
    }

    Ok(ExitCode::SUCCESS)
}
