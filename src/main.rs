#![forbid(unsafe_code)]

//! `bookapi-contract` — contract-test runner binary.
//!
//! Loads suite configuration, builds the scenario context, and executes
//! the scenario list sequentially against the target API, reporting one
//! outcome line per scenario and a final summary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use bookapi_contract::client::ApiClient;
use bookapi_contract::config::SuiteConfig;
use bookapi_contract::scenario::{expect_status, ScenarioContext};
use bookapi_contract::validator::{self, ResponseValidator};
use bookapi_contract::{fixtures, AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "bookapi-contract", about = "Contract test suite for the bookstore sample REST API", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured base URL of the API under test.
    #[arg(long)]
    base_url: Option<String>,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("bookapi-contract suite bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    let mut config = match args.config {
        Some(path) => SuiteConfig::load_from_path(path)?,
        None => SuiteConfig::default(),
    };

    if let Some(base_url) = args.base_url {
        config.base_url = base_url.trim_end_matches('/').to_owned();
    }
    info!(base_url = %config.base_url, "configuration loaded");

    let client = ApiClient::new(&config)?;
    let ctx = ScenarioContext::new(client, ResponseValidator::new(config.expected_book_count));

    let report = run_suite(&ctx, &config).await;
    info!(
        passed = report.passed,
        failed = report.failed,
        "suite complete"
    );

    if report.failed > 0 {
        return Err(AppError::Validation(format!(
            "{} scenario(s) failed",
            report.failed
        )));
    }
    Ok(())
}

#[derive(Debug, Default)]
struct SuiteReport {
    passed: usize,
    failed: usize,
}

impl SuiteReport {
    fn record(&mut self, name: &str, result: &Result<()>) {
        match result {
            Ok(()) => {
                self.passed += 1;
                info!(scenario = name, "scenario passed");
            }
            Err(err) => {
                self.failed += 1;
                error!(scenario = name, %err, "scenario failed");
            }
        }
    }
}

/// Execute every scenario in program order.
///
/// Scenarios run sequentially: the randomized flows chain multiple steps
/// on one generated id, and the catalog-size invariant is not safe to
/// check concurrently with scenarios that mutate the same id range.
#[allow(clippy::too_many_lines)] // The scenario list is deliberately explicit and sequential.
async fn run_suite(ctx: &ScenarioContext, config: &SuiteConfig) -> SuiteReport {
    let mut report = SuiteReport::default();
    let ids = config.random_ids;

    // ── Catalog and known-record reads ──────────────────
    report.record("book catalog", &ctx.verify_book_catalog().await);
    report.record("author catalog", &ctx.verify_author_catalog().await);

    let known_book = fixtures::deterministic_book();
    report.record(
        "known book verified",
        &ctx.verify_book(known_book.id, &known_book).await,
    );
    let known_author = fixtures::deterministic_author();
    report.record(
        "known author verified",
        &ctx.verify_author(known_author.id, &known_author).await,
    );

    let timed = match ctx
        .client()
        .get_book_by_id_within(known_book.id, Duration::from_secs(3))
        .await
    {
        Ok(response) => validator::validate_book(&response.data),
        Err(err) => Err(err),
    };
    report.record("known book fetched within timeout", &timed);

    // ── Randomized round trips and CRUD flows ───────────
    let book = fixtures::randomized_book(fixtures::random_id(ids.min, ids.max));
    report.record("book round trip", &ctx.book_round_trip(&book).await);
    report.record("book crud flow", &ctx.book_crud_flow(&book).await);

    let author = fixtures::randomized_author(fixtures::random_id(ids.min, ids.max));
    report.record("author round trip", &ctx.author_round_trip(&author).await);
    report.record("author crud flow", &ctx.author_crud_flow(&author).await);
    report.record(
        "authors for book",
        &ctx.verify_authors_for_book(book.id).await,
    );

    // ── Not-found paths ─────────────────────────────────
    let missing = fixtures::non_existing_id();
    report.record(
        "book not found",
        &expect_status(ctx.client().get_book_by_id(missing).await, 404),
    );
    report.record(
        "author not found",
        &expect_status(ctx.client().get_author_by_id(missing).await, 404),
    );
    report.record(
        "delete missing book not found",
        &expect_status(ctx.client().delete_book(missing).await, 404),
    );
    report.record(
        "update missing author not found",
        &expect_status(
            ctx.client()
                .update_author(missing, &fixtures::deterministic_author())
                .await,
            404,
        ),
    );

    // ── Rejection paths ─────────────────────────────────
    report.record(
        "invalid book rejected",
        &expect_status(ctx.client().create_book(&fixtures::invalid_book()).await, 400),
    );
    report.record(
        "invalid author rejected",
        &expect_status(
            ctx.client().create_author(&fixtures::invalid_author()).await,
            400,
        ),
    );
    report.record(
        "incomplete book rejected",
        &expect_status(
            ctx.client()
                .create_book(&fixtures::missing_fields_book())
                .await,
            400,
        ),
    );
    report.record(
        "incomplete author rejected",
        &expect_status(
            ctx.client()
                .create_author(&fixtures::missing_fields_author())
                .await,
            400,
        ),
    );
    report.record(
        "empty body rejected",
        &expect_status(ctx.client().create_book(&json!({})).await, 400),
    );
    report.record(
        "malformed id delete rejected",
        &expect_status(ctx.client().delete_book_raw("abc").await, 400),
    );
    report.record(
        "empty id delete not allowed",
        &expect_status(ctx.client().delete_author_raw("").await, 405),
    );

    // ── Boundary and conflict paths ─────────────────────
    report.record(
        "edge case book accepted",
        &ctx.expect_book_accepted(&fixtures::edge_case_book()).await,
    );
    report.record(
        "edge case author accepted",
        &ctx.expect_author_accepted(&fixtures::edge_case_author())
            .await,
    );
    report.record(
        "duplicate book conflict",
        &expect_status(
            ctx.client()
                .create_book(&fixtures::deterministic_book())
                .await,
            500,
        ),
    );
    report.record(
        "duplicate author conflict",
        &expect_status(
            ctx.client()
                .create_author(&fixtures::deterministic_author())
                .await,
            500,
        ),
    );

    report
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
