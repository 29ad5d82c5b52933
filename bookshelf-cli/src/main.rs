//! bookshelf - Consolidate scattered PDF files into an ordered bookshelf.

mod cli;

use clap::Parser;
use log::debug;
use serde::Serialize;
use std::process;

use crate::cli::{Cli, Command, ConsolidateArgs, ListArgs, OrderArgs};
use bookshelf::consolidate::Consolidator;
use bookshelf::error::{BookshelfError, Result};
use bookshelf::io::{FileSystem, LocalFileSystem};
use bookshelf::listing::Lister;
use bookshelf::naming::PatternRegistry;
use bookshelf::ordering::CollectionOrderer;
use bookshelf::output::{
    OutputFormatter, display_book_list, display_consolidation_result, display_ordered_collection,
    display_patterns, display_progress,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Consolidate(args) => consolidate(args, cli.verbose, cli.quiet).await,
        Command::List(args) => list(args, cli.verbose, cli.quiet).await,
        Command::Order(args) => order(args, OutputFormatter::new(cli.quiet, cli.verbose)).await,
        Command::Patterns => {
            display_patterns(
                &OutputFormatter::new(cli.quiet, cli.verbose),
                &PatternRegistry::new(),
            );
            Ok(())
        }
    }
}

async fn consolidate(args: &ConsolidateArgs, verbose: bool, quiet: bool) -> Result<()> {
    let config = args.to_config(verbose, quiet)?;
    let formatter = OutputFormatter::from_config(&config);

    if !args.json && formatter.should_print() {
        formatter.section(&format!("{} v{}", bookshelf::NAME, bookshelf::VERSION));
        formatter.blank_line();
    }

    let result = Consolidator::local(&config)
        .consolidate(&config, |event| {
            if !args.json {
                display_progress(&formatter, event);
            }
        })
        .await?;

    if args.json {
        print_json(&result)?;
    } else {
        display_consolidation_result(&formatter, &result);
    }

    if !result.success {
        return Err(BookshelfError::source_not_found(&config.source));
    }

    debug!("Consolidated {} book(s)", result.total_books);
    Ok(())
}

async fn list(args: &ListArgs, verbose: bool, quiet: bool) -> Result<()> {
    let config = args.to_config(verbose, quiet)?;
    let books = Lister::local().list(&config).await?;

    if args.json {
        print_json(&books)
    } else {
        display_book_list(
            &OutputFormatter::from_list_config(&config),
            &books,
            config.details,
        );
        Ok(())
    }
}

async fn order(args: &OrderArgs, formatter: OutputFormatter) -> Result<()> {
    let files = LocalFileSystem::new()
        .list_pdf_files_recursive(&args.dir)
        .await?;
    if files.is_empty() {
        return Err(BookshelfError::NoFilesToMerge);
    }

    let registry = PatternRegistry::new();
    let orderer = CollectionOrderer::new(&registry, args.strategy, args.pattern.as_deref())?;
    let ordered = orderer.order_async(&files).await;

    if args.json {
        print_json(&ordered)
    } else {
        display_ordered_collection(&formatter, &ordered);
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| BookshelfError::other(format!("Failed to serialize output: {e}")))?;
    println!("{json}");
    Ok(())
}
