//! Open Voices CLI
//!
//! CLI tool for checking page identifier rules and resolving URLs against them.

mod bench;
mod explain;
mod logging;
mod rules;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ov-cli")]
#[command(about = "Open Voices page identifier rule tools")]
struct Cli {
    /// Log rule evaluation details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve page identifiers for one or more URLs
    Resolve {
        /// Rule document (JSON, or TOML with a .toml extension)
        #[arg(short, long)]
        rules: PathBuf,

        /// Page URLs to resolve
        #[arg(required = true)]
        urls: Vec<String>,

        /// Compile the rules without schema validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Validate a rule document
    Validate {
        /// Rule document to validate
        #[arg(short, long)]
        rules: PathBuf,
    },

    /// Show how every rule evaluates against a URL
    Explain {
        /// Rule document
        #[arg(short, long)]
        rules: PathBuf,

        /// Page URL
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Time identifier resolution for a URL
    Bench {
        /// Rule document
        #[arg(short, long)]
        rules: PathBuf,

        /// Page URL
        #[arg(short, long)]
        url: String,

        /// Number of timed resolutions
        #[arg(short, long, default_value_t = 100_000)]
        iterations: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Resolve {
            rules,
            urls,
            no_validate,
        } => cmd_resolve(&rules, &urls, no_validate),
        Commands::Validate { rules } => cmd_validate(&rules),
        Commands::Explain { rules, url, json } => explain::run_explain(&rules, &url, json),
        Commands::Bench {
            rules,
            url,
            iterations,
        } => bench::run_bench(&rules, &url, iterations),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_resolve(path: &std::path::Path, urls: &[String], no_validate: bool) -> Result<(), String> {
    let rule_set = if no_validate {
        rules::load_rule_set_unchecked(path)?
    } else {
        rules::load_rule_set(path)?
    };

    for url in urls {
        match rule_set.resolve(url) {
            Some(identifier) => println!("{}", identifier),
            None => {
                tracing::info!(url = %url, "no page identifier");
                println!("-");
            }
        }
    }

    Ok(())
}

fn cmd_validate(path: &std::path::Path) -> Result<(), String> {
    let rule_list = rules::read_rules(path)?;

    match ov_compiler::validate_rules(&rule_list) {
        Ok(()) => {
            println!("Rules '{}' are valid", path.display());
            println!("  Rules:       {}", rule_list.len());
            for (index, rule) in rule_list.iter().enumerate() {
                let unreachable = ov_compiler::unreachable_captures(rule);
                if !unreachable.is_empty() {
                    println!("  Warning:     rule {} references unreachable captures {:?}", index, unreachable);
                }
            }
            Ok(())
        }
        Err(errors) => {
            println!("Rules '{}' are invalid", path.display());
            for error in &errors {
                println!("  - {}", error);
            }
            Err(format!("{} validation error(s)", errors.len()))
        }
    }
}
