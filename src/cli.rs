//! Command-line interface implementation for stencil.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

/// How values from the values file are turned into placeholder text.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Escape {
    /// Insert values as they are
    #[default]
    Raw,
    /// HTML-escape every value
    Text,
}

/// Command-line arguments structure for stencil.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "stencil: fill @@placeholder@@ templates",
    long_about = None
)]
pub struct Args {
    /// Path to the template file
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// JSON or YAML file mapping placeholder names to values
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Read the values mapping from stdin
    #[arg(short, long, conflicts_with = "values")]
    pub stdin: bool,

    /// Fail instead of leaving unbound placeholders in the output
    #[arg(long)]
    pub strict: bool,

    /// Escaping applied to every value
    #[arg(short, long, value_enum, default_value_t = Escape::Raw)]
    pub escape: Escape,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
