// Ingestion pipeline tests
// Author: Gabriel Demetrios Lafis

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use catalog_analytics_engine::{
    cache::DatasetCache,
    data::{RawRow, RawTable, RejectReason, SAMPLE_ROW_COUNT},
    ingest::{
        clean, reconcile, DiagnosticLevel, Ingestor, LineRepairStrategy, MissingCountryPolicy,
        ParseStrategy, TokenStreamStrategy, DEFAULT_CAST, DEFAULT_COUNTRY, DEFAULT_DIRECTOR,
    },
    query::{apply, FilterQuery},
    utils::IngestConfig,
    YearAdded,
};

const HEADER: &str =
    "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in";

fn write_source(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_end_to_end_with_one_bad_row() {
    let dir = TempDir::new().unwrap();
    let csv = format!(
        "{}\n\
         s1,Movie,Alpha,,,United States,\"September 9, 2019\",2018,PG-13,90 min,\"Dramas, Comedies\"\n\
         s2,TV Show,Beta,,,India,,2020,TV-MA,2 Seasons,Thrillers\n\
         s3,Movie,Gamma,,,Canada,not-a-date,2019,R,100 min,Action\n\
         s4,Movie,Delta,,,United Kingdom,,2017,PG,95 min,Dramas,EXTRA\n",
        HEADER
    );
    let path = write_source(&dir, "catalog.csv", csv.as_bytes());

    let outcome = Ingestor::default().ingest(&path);

    // The extra-comma row is rejected with its 1-based source line number
    assert!(!outcome.used_fallback);
    assert_eq!(outcome.strategy, "strict CSV");
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].line, 5);
    assert_eq!(
        outcome.rejected[0].reason,
        RejectReason::FieldCountMismatch {
            expected: 11,
            found: 12
        }
    );

    let dataset = &outcome.dataset;
    assert_eq!(dataset.len(), 3);

    // Quoted delimiter survives the structured parse
    assert_eq!(dataset.get(0).unwrap().listed_in, "Dramas, Comedies");

    // Cleaning defaults applied to blank director and cast
    assert_eq!(dataset.get(1).unwrap().director, DEFAULT_DIRECTOR);
    assert_eq!(dataset.get(1).unwrap().cast, DEFAULT_CAST);

    // year_added: parsed date, release-year fallback for absent and unparsable
    assert_eq!(dataset.get(0).unwrap().year_added, YearAdded::Year(2019));
    assert_eq!(dataset.get(1).unwrap().year_added, YearAdded::Year(2020));
    assert_eq!(dataset.get(2).unwrap().year_added, YearAdded::Year(2019));

    // Filtering to movies keeps source order
    let query = FilterQuery::new().with_types(["Movie"]);
    let view = apply(dataset, &query);
    assert_eq!(view.len(), 2);
    assert_eq!(view.get(0).unwrap().show_id, "s1");
    assert_eq!(view.get(1).unwrap().show_id, "s3");
}

#[test]
fn test_missing_source_falls_back_to_sample() {
    let outcome = Ingestor::default().ingest("/no/such/file.csv");

    assert!(outcome.used_fallback);
    assert_eq!(outcome.strategy, "built-in sample");
    assert_eq!(outcome.dataset.len(), SAMPLE_ROW_COUNT);

    // The cascade surfaced a final error diagnostic, not a crash
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.level == DiagnosticLevel::Error));

    // Sample schema matches the real one, so cleaning defaults applied
    assert_eq!(outcome.dataset.get(0).unwrap().director, DEFAULT_DIRECTOR);
    assert_eq!(
        outcome.dataset.content_types(),
        vec!["Movie".to_string(), "TV Show".to_string()]
    );
}

#[test]
fn test_empty_source_falls_back_to_sample() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, "empty.csv", b"");

    let outcome = Ingestor::default().ingest(&path);

    assert!(outcome.used_fallback);
    assert_eq!(outcome.dataset.len(), SAMPLE_ROW_COUNT);
}

#[test]
fn test_latin1_source_is_decoded() {
    let dir = TempDir::new().unwrap();
    let mut bytes = format!("{}\n", HEADER).into_bytes();
    // "Café" encoded as Windows-1252: 0xE9 is not valid UTF-8
    bytes.extend_from_slice(b"s1,Movie,Caf\xe9,,,France,,2020,PG,90 min,Dramas\n");
    let path = write_source(&dir, "latin1.csv", &bytes);

    let outcome = Ingestor::default().ingest(&path);

    assert!(!outcome.used_fallback);
    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(outcome.dataset.get(0).unwrap().title, "Café");
    assert!(outcome
        .diagnostics
        .iter()
        .any(|d| d.message.contains("Windows-1252")));
}

#[test]
fn test_line_repair_strategy_splits_naively() {
    let dir = TempDir::new().unwrap();
    let csv = "a,b,c\n1,2,3\n\n\"x, y\",2,3\n4,5,6\n";
    let path = write_source(&dir, "repair.csv", csv.as_bytes());

    let mut diagnostics = Vec::new();
    let table = LineRepairStrategy::new(',')
        .parse(&path, &mut diagnostics)
        .unwrap();

    assert_eq!(table.headers, vec!["a", "b", "c"]);
    // Blank line skipped; quoted delimiter broken by the naive split
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0].line, 2);
    assert_eq!(table.rows[1].line, 4);
    assert_eq!(table.rows[1].fields.len(), 4);
    assert_eq!(table.rows[2].line, 5);

    // The reconciler drops the broken row and keeps its line number
    let (accepted, rejected) = reconcile(&table);
    assert_eq!(accepted.len(), 2);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].line, 4);
}

#[test]
fn test_token_stream_strategy_honors_quoting() {
    let dir = TempDir::new().unwrap();
    let csv = "a,b,c\n\"x, y\",2,3\n1,2\n";
    let path = write_source(&dir, "tokens.csv", csv.as_bytes());

    let mut diagnostics = Vec::new();
    let table = TokenStreamStrategy::new(b',')
        .parse(&path, &mut diagnostics)
        .unwrap();

    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].fields, vec!["x, y", "2", "3"]);

    // Short row is dropped, not repaired
    let (accepted, rejected) = reconcile(&table);
    assert_eq!(accepted.len(), 1);
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].line, 3);
}

#[test]
fn test_reconcile_accepts_only_exact_field_counts() {
    let mut table = RawTable::new(vec!["a".to_string(), "b".to_string()]);
    table.rows.push(RawRow::new(2, vec!["1".into(), "2".into()]));
    table.rows.push(RawRow::new(3, vec!["1".into()]));
    table
        .rows
        .push(RawRow::new(4, vec!["1".into(), "2".into(), "3".into()]));
    table.rows.push(RawRow::new(5, vec!["x".into(), "y".into()]));

    let (accepted, rejected) = reconcile(&table);

    assert!(accepted.iter().all(|row| row.fields.len() == 2));
    assert_eq!(accepted.len(), 2);

    // Rejected line numbers are strictly increasing and unique
    let lines: Vec<usize> = rejected.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![3, 4]);
}

#[test]
fn test_missing_country_policies() {
    let headers: Vec<String> = HEADER.split(',').map(|h| h.to_string()).collect();
    let rows = vec![RawRow::new(
        2,
        vec![
            "s1".into(),
            "Movie".into(),
            "Alpha".into(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            "2018".into(),
            "PG".into(),
            "90 min".into(),
            "Dramas".into(),
        ],
    )];

    let filled = clean(&headers, &rows, MissingCountryPolicy::FillUnknown);
    assert_eq!(
        filled.get(0).unwrap().country.as_deref(),
        Some(DEFAULT_COUNTRY)
    );

    let sparse = clean(&headers, &rows, MissingCountryPolicy::LeaveMissing);
    assert_eq!(sparse.get(0).unwrap().country, None);
}

#[test]
fn test_year_added_fallback_law() {
    let headers: Vec<String> = HEADER.split(',').map(|h| h.to_string()).collect();
    let row = |date: &str, year: &str| {
        RawRow::new(
            2,
            vec![
                "s1".into(),
                "Movie".into(),
                "Alpha".into(),
                String::new(),
                String::new(),
                "India".into(),
                date.to_string(),
                year.to_string(),
                "PG".into(),
                "90 min".into(),
                "Dramas".into(),
            ],
        )
    };

    // Unparsable date with a release year present falls back to the year
    let dataset = clean(
        &headers,
        &[row("not-a-date", "2018")],
        MissingCountryPolicy::FillUnknown,
    );
    assert_eq!(dataset.get(0).unwrap().year_added, YearAdded::Year(2018));

    // Neither source yields a year
    let dataset = clean(&headers, &[row("", "")], MissingCountryPolicy::FillUnknown);
    assert_eq!(dataset.get(0).unwrap().year_added, YearAdded::Missing);
}

#[test]
fn test_clean_is_idempotent_on_clean_input() {
    let headers: Vec<String> = HEADER.split(',').map(|h| h.to_string()).collect();
    let rows = vec![RawRow::new(
        2,
        vec![
            "s1".into(),
            "Movie".into(),
            "Alpha".into(),
            DEFAULT_DIRECTOR.into(),
            DEFAULT_CAST.into(),
            DEFAULT_COUNTRY.into(),
            "September 9, 2019".into(),
            "2018".into(),
            "PG".into(),
            "90 min".into(),
            "Dramas".into(),
        ],
    )];

    let once = clean(&headers, &rows, MissingCountryPolicy::FillUnknown);
    let twice = clean(&headers, &rows, MissingCountryPolicy::FillUnknown);

    assert_eq!(once.titles(), twice.titles());
    assert_eq!(once.get(0).unwrap().director, DEFAULT_DIRECTOR);
    assert_eq!(once.get(0).unwrap().year_added, YearAdded::Year(2019));
}

#[test]
#[should_panic(expected = "not ASCII")]
fn test_non_ascii_delimiter_is_rejected() {
    let config = IngestConfig {
        delimiter: '€',
        ..IngestConfig::default()
    };
    Ingestor::new(&config);
}

#[test]
fn test_semicolon_delimiter_is_honored() {
    let dir = TempDir::new().unwrap();
    let csv = format!(
        "{}\ns1;Movie;Alpha;;;India;;2018;PG;90 min;Dramas\n",
        HEADER.replace(',', ";")
    );
    let path = write_source(&dir, "semicolon.csv", csv.as_bytes());

    let config = IngestConfig {
        delimiter: ';',
        ..IngestConfig::default()
    };
    let outcome = Ingestor::new(&config).ingest(&path);

    assert!(!outcome.used_fallback);
    assert_eq!(outcome.dataset.len(), 1);
    assert_eq!(outcome.dataset.get(0).unwrap().show_id, "s1");
}

#[test]
fn test_cache_memoizes_by_locator() {
    let dir = TempDir::new().unwrap();
    let csv = format!(
        "{}\ns1,Movie,Alpha,,,India,,2018,PG,90 min,Dramas\n",
        HEADER
    );
    let path = write_source(&dir, "cached.csv", csv.as_bytes());
    let locator = path.to_str().unwrap();

    let ingestor = Ingestor::default();
    let cache = DatasetCache::new();

    let first = cache.load(locator, &ingestor);
    let second = cache.load(locator, &ingestor);
    assert!(Arc::ptr_eq(&first, &second));

    // Invalidation forces a fresh ingestion
    cache.invalidate();
    let third = cache.load(locator, &ingestor);
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(third.dataset.len(), 1);

    // A different locator replaces the cached entry
    let fallback = cache.load("/no/such/file.csv", &ingestor);
    assert!(fallback.used_fallback);
}
