//! # qlq
//!
//! Lists the entries of a directory that match a name/time query.
//!
//! Try:
//!   qlq ./photos --starts-with img_ --max 2
//!   qlq ./logs --ends-with .log --newer 1700000000 --unbounded
//!   qlq ./share --query query.json --long

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use qaul_query::{fs, Query, QueryBuilder, QuerySpec};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// CLI DEFINITION
// ============================================================================

/// Query directory entries by name and modification time
#[derive(Parser, Debug)]
#[command(name = "qlq", version)]
struct Cli {
    /// Directory to scan
    dir: PathBuf,

    /// Keep entries whose name starts with PATTERN (repeatable)
    #[arg(long = "starts-with", value_name = "PATTERN")]
    starts_with: Vec<String>,

    /// Keep entries whose name ends with PATTERN (repeatable)
    #[arg(long = "ends-with", value_name = "PATTERN")]
    ends_with: Vec<String>,

    /// Keep entries whose name is exactly NAME (repeatable)
    #[arg(long, value_name = "NAME")]
    equals: Vec<String>,

    /// Keep entries modified strictly after SECS since the epoch (repeatable)
    #[arg(long, value_name = "SECS")]
    newer: Vec<u64>,

    /// Keep entries modified strictly before SECS since the epoch (repeatable)
    #[arg(long, value_name = "SECS")]
    older: Vec<u64>,

    /// Return at most N entries
    #[arg(long, value_name = "N", conflicts_with = "unbounded")]
    max: Option<usize>,

    /// Return every matching entry
    #[arg(long)]
    unbounded: bool,

    /// Load predicates and bound from a JSON query file; flags add to it
    #[arg(long, value_name = "FILE")]
    query: Option<PathBuf>,

    /// Print the modification time next to each name
    #[arg(short, long)]
    long: bool,

    /// Log evaluation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================================
// QUERY ASSEMBLY
// ============================================================================

fn load_spec(path: &Path) -> Result<QueryBuilder> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read query file {}", path.display()))?;
    let spec: QuerySpec = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse query file {}", path.display()))?;
    debug!(
        names = spec.names.len(),
        times = spec.times.len(),
        "loaded query file"
    );

    spec.into_builder()
        .with_context(|| format!("invalid query file {}", path.display()))
}

fn build_query(cli: &Cli) -> Result<Query> {
    let mut builder = match &cli.query {
        Some(path) => load_spec(path)?,
        None => Query::builder(),
    };

    for pattern in &cli.starts_with {
        builder = builder.starts_with(pattern.as_str());
    }
    for pattern in &cli.ends_with {
        builder = builder.ends_with(pattern.as_str());
    }
    for pattern in &cli.equals {
        builder = builder.equals(pattern.as_str());
    }
    for secs in &cli.newer {
        builder = builder.newer(*secs);
    }
    for secs in &cli.older {
        builder = builder.older(*secs);
    }

    if let Some(n) = cli.max {
        builder = builder.max_count(n);
    } else if cli.unbounded {
        builder = builder.unbounded();
    }

    builder
        .build()
        .context("invalid query (pass --max <N> or --unbounded to choose a bound)")
}

// ============================================================================
// EXECUTION
// ============================================================================

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let query = build_query(cli)?;
    let records = fs::scan_dir(&cli.dir)
        .with_context(|| format!("failed to open {}", cli.dir.display()))?;
    let result = query
        .try_evaluate(records)
        .with_context(|| format!("failed while scanning {}", cli.dir.display()))?;

    for record in &result {
        if cli.long {
            writeln!(out, "{}\t{}", record.modified().as_secs(), record.name())?;
        } else {
            writeln!(out, "{}", record.name())?;
        }
    }

    info!(
        matched = result.len(),
        limit_reached = result.limit_reached(),
        "query complete"
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str, modified_secs: u64) {
        let file = File::create(dir.join(name)).unwrap();
        file.set_modified(UNIX_EPOCH + Duration::from_secs(modified_secs))
            .unwrap();
    }

    fn sample_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "img_001.png", 100);
        create_file(dir.path(), "img_002.png", 200);
        create_file(dir.path(), "doc_1.txt", 300);
        dir
    }

    fn parse(dir: &Path, args: &[&str]) -> Cli {
        let mut argv = vec!["qlq".to_string(), dir.display().to_string()];
        argv.extend(args.iter().map(|a| a.to_string()));
        Cli::try_parse_from(argv).unwrap()
    }

    fn run_lines(cli: &Cli) -> Vec<String> {
        let mut out: Vec<u8> = Vec::new();
        run(cli, &mut out).unwrap();
        let mut lines: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        lines.sort();
        lines
    }

    #[test]
    fn flags_build_query() {
        let cli = parse(
            Path::new("."),
            &["--starts-with", "img_", "--ends-with", ".png", "--newer", "5", "--max", "3"],
        );
        let query = build_query(&cli).unwrap();
        assert_eq!(query.name_predicates().len(), 2);
        assert_eq!(query.time_predicates().len(), 1);
        assert_eq!(query.max_count().get(), Some(3));
    }

    #[test]
    fn bound_is_required() {
        let cli = parse(Path::new("."), &["--equals", "a"]);
        assert!(build_query(&cli).is_err());
    }

    #[test]
    fn max_and_unbounded_conflict() {
        let argv = ["qlq", ".", "--max", "1", "--unbounded"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn prints_matching_entries() {
        let dir = sample_dir();
        let cli = parse(dir.path(), &["--starts-with", "img_", "--unbounded"]);
        assert_eq!(run_lines(&cli), ["img_001.png", "img_002.png"]);
    }

    #[test]
    fn long_output_includes_time() {
        let dir = sample_dir();
        let cli = parse(dir.path(), &["--older", "150", "--unbounded", "--long"]);
        assert_eq!(run_lines(&cli), ["100\timg_001.png"]);
    }

    #[test]
    fn query_file_combines_with_flags() {
        let dir = sample_dir();
        let spec_path = dir.path().join("query.json");
        std::fs::write(
            &spec_path,
            r#"{ "names": [{ "pattern": "img_", "limit": "startswith" }] }"#,
        )
        .unwrap();

        let spec_arg = spec_path.display().to_string();
        let cli = parse(dir.path(), &["--query", &spec_arg, "--newer", "150"]);
        assert_eq!(run_lines(&cli), ["img_002.png"]);
    }

    #[test]
    fn zero_bound_in_query_file_rejected_even_with_max_flag() {
        let dir = TempDir::new().unwrap();
        let spec_path = dir.path().join("query.json");
        std::fs::write(&spec_path, r#"{ "max_count": 0 }"#).unwrap();

        let spec_arg = spec_path.display().to_string();
        let cli = parse(dir.path(), &["--query", &spec_arg, "--max", "3"]);
        let err = build_query(&cli).unwrap_err();
        assert!(err.to_string().starts_with("invalid query file"));
    }

    #[test]
    fn missing_directory_reports_error() {
        let dir = TempDir::new().unwrap();
        let cli = parse(&dir.path().join("gone"), &["--unbounded"]);
        let err = run(&cli, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().starts_with("failed to open"));
    }
}
