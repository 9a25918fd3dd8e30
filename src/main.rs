// Catalog Analytics Engine - Main executable
// Author: Gabriel Demetrios Lafis

use anyhow::Context;
use clap::{App, Arg};

use catalog_analytics_engine::{
    cache::DatasetCache,
    ingest::{IngestOutcome, Ingestor},
    query::{apply, summarize, FilterQuery, Report, View},
    utils::{init_logging, Config},
};

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = App::new("Catalog Analytics Engine")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Resilient ingestion and analytics for streaming catalog data")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .subcommand(
            App::new("report")
                .about("Ingest a catalog source and print a filtered report")
                .arg(
                    Arg::new("source")
                        .short('s')
                        .long("source")
                        .value_name("PATH")
                        .help("Path to the catalog CSV source")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("type")
                        .short('t')
                        .long("type")
                        .value_name("TYPE")
                        .help("Restrict to a content type (repeatable)")
                        .takes_value(true)
                        .multiple_occurrences(true),
                )
                .arg(
                    Arg::new("country")
                        .long("country")
                        .value_name("COUNTRY")
                        .help("Restrict to a country (repeatable)")
                        .takes_value(true)
                        .multiple_occurrences(true),
                )
                .arg(
                    Arg::new("min-year")
                        .long("min-year")
                        .value_name("YEAR")
                        .help("Minimum release year (inclusive)")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("max-year")
                        .long("max-year")
                        .value_name("YEAR")
                        .help("Maximum release year (inclusive)")
                        .takes_value(true),
                )
                .arg(Arg::new("json").long("json").help("Print the report as JSON")),
        )
        .get_matches();

    // Load configuration
    let config = if let Some(config_path) = matches.value_of("config") {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config file: {}", err);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    // Handle subcommands
    if let Some(matches) = matches.subcommand_matches("report") {
        let source = matches
            .value_of("source")
            .map(str::to_string)
            .or_else(|| config.ingest.source.clone())
            .context("no source given; pass --source or set ingest.source in the config")?;

        let ingestor = Ingestor::new(&config.ingest);
        let cache = DatasetCache::new();
        let outcome = cache.load(&source, &ingestor);

        let mut query = FilterQuery::new();
        if let Some(types) = matches.values_of("type") {
            query = query.with_types(types);
        }
        if let Some(countries) = matches.values_of("country") {
            query = query.with_countries(countries);
        }

        let (min_default, max_default) = outcome
            .dataset
            .release_year_bounds()
            .unwrap_or((i32::MIN, i32::MAX));
        let min_year = matches
            .value_of("min-year")
            .map(|v| v.parse::<i32>().context("invalid --min-year"))
            .transpose()?
            .unwrap_or(min_default);
        let max_year = matches
            .value_of("max-year")
            .map(|v| v.parse::<i32>().context("invalid --max-year"))
            .transpose()?
            .unwrap_or(max_default);
        query = query.with_years(min_year, max_year);

        let view = apply(&outcome.dataset, &query);
        let report = summarize(&view);

        if matches.is_present("json") {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&outcome, &view, &report);
        }
    } else {
        println!("No subcommand specified. Use --help for usage information.");
    }

    Ok(())
}

/// Print a human-readable report to stdout
fn print_report(outcome: &IngestOutcome, view: &View, report: &Report) {
    println!("Source strategy: {}", outcome.strategy);
    if outcome.used_fallback {
        println!("Warning: built-in sample catalog substituted for the source");
    }
    if !outcome.rejected.is_empty() {
        println!("Rejected rows: {}", outcome.rejected.len());
    }

    println!();
    println!("Total filtered content: {}", report.total_count);
    println!("Movies:                 {}", report.movie_count);
    println!("TV shows:               {}", report.tv_show_count);
    println!("Countries:              {}", report.country_count);

    println!();
    println!("Content type distribution:");
    for entry in report.type_distribution.entries() {
        println!("  {:<20} {}", entry.value, entry.count);
    }

    println!();
    println!("Top {} countries:", report.top_countries.len());
    for entry in report.top_countries.entries() {
        println!("  {:<20} {}", entry.value, entry.count);
    }

    println!();
    println!("Content added over time:");
    for point in &report.additions_by_year {
        println!("  {:<20} {}", point.year, point.count);
    }

    println!();
    println!("Rating distribution:");
    for entry in report.rating_distribution.entries() {
        println!("  {:<20} {}", entry.value, entry.count);
    }

    println!();
    println!("Top {} genres:", report.top_genres.len());
    for entry in report.top_genres.entries() {
        println!("  {:<20} {}", entry.value, entry.count);
    }

    println!();
    println!("Sample of filtered content:");
    for title in view.head(10) {
        println!(
            "  {} | {} | {} | {} | {}",
            title.title,
            title.content_type,
            title.country.as_deref().unwrap_or("-"),
            title
                .release_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            title.rating.as_deref().unwrap_or("-"),
        );
    }
}
