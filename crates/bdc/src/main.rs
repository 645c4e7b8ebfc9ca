//! bdc CLI - Main entry point

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bdc_config::ConfigError;
use bdc_template::TemplateError;

mod commands;

#[derive(Parser)]
#[command(name = "bdc")]
#[command(version)]
#[command(about = "Expand and check bdc build-file templates", long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a template and print the result
    Expand {
        /// Template text (or use --file)
        template: Option<String>,

        /// Read the template from FILE
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Build file whose top-level variables become globals
        #[arg(long)]
        vars: Option<PathBuf>,

        /// Global variable (NAME=VALUE)
        #[arg(short = 'D', long = "define", value_name = "NAME=VALUE")]
        define: Vec<String>,

        /// Built-in variable (NAME=VALUE); cannot be overridden
        #[arg(short = 'B', long = "builtin", value_name = "NAME=VALUE")]
        builtin: Vec<String>,

        /// Notebook source path from which to derive path built-ins
        #[arg(long)]
        source: Option<PathBuf>,

        /// Expand undefined variables to empty strings instead of failing
        #[arg(long)]
        safe: bool,
    },

    /// Check that every notebook destination in a build file compiles
    Check {
        /// Build file
        build_file: PathBuf,
    },

    /// Show where a template references a variable
    Refs {
        /// Variable name
        name: String,

        /// Template text
        template: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "bdc=debug" } else { "bdc=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match template_error(&err) {
                Some(template_err) => eprint!("{}", template_err.to_report()),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Expand {
            template,
            file,
            vars,
            define,
            builtin,
            source,
            safe,
        } => commands::expand::execute(commands::expand::ExpandArgs {
            template,
            file,
            vars,
            define,
            builtin,
            source,
            safe,
        }),
        Commands::Check { build_file } => {
            commands::check::execute(commands::check::CheckArgs { build_file })
        }
        Commands::Refs { name, template } => {
            commands::refs::execute(commands::refs::RefsArgs { name, template })
        }
    }
}

/// Find a template parse error anywhere in the error chain, for rich rendering.
fn template_error(err: &anyhow::Error) -> Option<&TemplateError> {
    err.chain().find_map(|cause| {
        if let Some(template_err) = cause.downcast_ref::<TemplateError>() {
            return Some(template_err);
        }
        match cause.downcast_ref::<ConfigError>() {
            Some(ConfigError::Template(template_err)) => Some(template_err),
            _ => None,
        }
    })
    .filter(|template_err| matches!(template_err, TemplateError::Parse { .. }))
}
