//! minipro-query-db - Query the minipro device database
//!
//! Looks up chips in the catalog compiled into the binary and prints them
//! as a line-oriented report or as JSON. The tool never talks to hardware.

mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use commands::Selection;
use minipro_core::device::Catalog;
use minipro_core::query::Predicate;
use minipro_core::render::OutputFormat;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Stdout carries data, so only warnings are logged unless asked for more
    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let catalog = Catalog::builtin();
    log::debug!("Loaded {} device definitions", catalog.len());

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    match commands::run(&catalog, selection(&cli), format) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Map the parsed selector flags onto a catalog selection
fn selection(cli: &Cli) -> Selection<'_> {
    if let Some(prefix) = &cli.search {
        Selection::Search(prefix)
    } else if let Some(name) = cli.name.as_deref().or(cli.device.as_deref()) {
        Selection::Query {
            predicate: Predicate::NameEquals,
            arg: name,
        }
    } else if let Some(term) = &cli.contains {
        Selection::Query {
            predicate: Predicate::NameContains,
            arg: term,
        }
    } else {
        Selection::Query {
            predicate: Predicate::All,
            arg: "",
        }
    }
}
