// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! Developer and CI entry points for the workspace: linting, building,
//! testing, coverage, and schema verification.
//!
//! ### Schema Verification
//!
//! `cargo xtask verify-migrations` applies the embedded persistence
//! migrations to a fresh in-memory `SQLite` database, introspects the
//! result, and compares it with the schema the persistence crate expects.
//! It then reverts every migration and checks that nothing is left behind.
//! No external services are involved, so it runs as part of `ci`.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, verify migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Check if README.md is up-to-date
    #[command(visible_alias = "cr")]
    CheckReadme,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    // Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos in the project
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Apply and revert the migrations and check the resulting schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::CheckReadme => check_readme(),
            Self::Coverage => coverage(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::LintMarkdown => lint_markdown(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::FixTypos => fix_typos(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Run cargo-rdme to check if README.md is up-to-date with the library documentation
fn check_readme() -> Result<()> {
    run_cargo(vec!["rdme", "--workspace-project", "apply-bureau-server", "--check"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs (and a soft fail on markdown)
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    if let Err(err) = lint_markdown() {
        tracing::warn!("known issue: markdownlint is currently noisy and can be ignored: {err}");
    }
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Lint markdown files using [markdownlint-cli2](https://github.com/DavidAnson/markdownlint-cli2)
fn lint_markdown() -> Result<()> {
    cmd!("markdownlint-cli2", "**/*.md", "!target", "!**/target").run_with_trace()?;

    Ok(())
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Fix typos in the project
fn fix_typos() -> Result<()> {
    cmd!("typos", "-w").run_with_trace()?;
    Ok(())
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// Apply and revert the persistence migrations and check the resulting schema
///
/// ## What This Command Does
///
/// 1. Creates an in-memory `SQLite` database with foreign keys enabled
/// 2. Applies every embedded migration
/// 3. Introspects tables, columns, primary keys, unique constraints, and indexes
/// 4. Compares the result with [`expected_schema`]
/// 5. Reverts every migration and checks that no tables remain
///
/// ## Usage
///
/// ```bash
/// cargo xtask verify-migrations
/// ```
///
/// ## Failures
///
/// The command fails if a migration does not apply or revert cleanly, or if
/// the migrated schema differs from the expected one in any way.
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    const MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply migrations: {}", e))?;
    tracing::info!("Migrations applied successfully");

    tracing::info!("Introspecting schema");
    let actual = introspect_sqlite_schema(&mut conn)?;

    tracing::info!("Comparing with the expected schema");
    compare_schemas(&expected_schema(), &actual)?;

    tracing::info!("Reverting migrations");
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to revert migrations: {}", e))?;

    let leftover = introspect_sqlite_schema(&mut conn)?;
    if !leftover.tables.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "❌ Migration verification FAILED: tables left after revert: {:?}",
            leftover.tables.keys().collect::<Vec<_>>()
        ));
    }

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    unique_constraints: BTreeSet<Vec<String>>,
    /// Columns of each non-unique index, keyed by index name.
    indexes: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    normalized_type: String,
    nullable: bool,
}

/// Column spec: name, normalized type, nullable.
type ColumnSpec = (&'static str, &'static str, bool);

/// Builds a table whose primary key is a non-null `id` text column.
fn table(columns: &[ColumnSpec], unique: &[&str], indexes: &[(&str, &str)]) -> Table {
    let mut all: Vec<ColumnSpec> = vec![("id", "text", false)];
    all.extend_from_slice(columns);

    Table {
        columns: all
            .into_iter()
            .map(|(name, normalized_type, nullable)| {
                (
                    name.to_string(),
                    Column {
                        normalized_type: normalized_type.to_string(),
                        nullable,
                    },
                )
            })
            .collect(),
        primary_keys: BTreeSet::from([String::from("id")]),
        unique_constraints: unique.iter().map(|c| vec![(*c).to_string()]).collect(),
        indexes: indexes
            .iter()
            .map(|(name, column)| ((*name).to_string(), vec![(*column).to_string()]))
            .collect(),
    }
}

/// The schema the persistence crate's queries are written against
fn expected_schema() -> Schema {
    let applications = table(
        &[
            ("client_id", "text", false),
            ("company_name", "text", false),
            ("job_title", "text", false),
            ("job_url", "text", true),
            ("job_description", "text", true),
            ("location", "text", true),
            ("job_type", "text", true),
            ("salary_range", "text", true),
            ("application_method", "text", true),
            ("application_strategy", "text", true),
            ("status", "text", false),
            ("date_applied", "text", false),
            ("interview_date", "text", true),
            ("interview_type", "text", true),
            ("interview_notes", "text", true),
            ("offer_amount", "real", true),
            ("offer_benefits", "text", true),
            ("offer_deadline", "text", true),
            ("resume_url", "text", true),
            ("cover_letter_url", "text", true),
            ("notes", "text", true),
            ("admin_notes", "text", true),
            ("created_at", "text", false),
            ("updated_at", "text", false),
        ],
        &[],
        &[
            ("idx_applications_client_id", "client_id"),
            ("idx_applications_created_at", "created_at"),
        ],
    );

    let notifications = table(
        &[
            ("user_id", "text", false),
            ("notification_type", "text", false),
            ("title", "text", false),
            ("message", "text", false),
            ("is_read", "integer", false),
            ("created_at", "text", false),
        ],
        &[],
        &[("idx_notifications_user_id", "user_id")],
    );

    let consultations = table(
        &[
            ("client_id", "text", true),
            ("name", "text", false),
            ("email", "text", false),
            ("phone", "text", true),
            ("reason", "text", false),
            ("preferred_date", "text", false),
            ("preferred_time", "text", false),
            ("package_interest", "text", false),
            ("current_situation", "text", true),
            ("timeline", "text", false),
            ("status", "text", false),
            ("created_at", "text", false),
        ],
        &[],
        &[("idx_consultations_client_id", "client_id")],
    );

    let onboarding_submissions = table(
        &[
            ("client_id", "text", false),
            ("responses", "text", false),
            ("status", "text", false),
            ("submitted_at", "text", false),
            ("approved_at", "text", true),
            ("approved_by", "text", true),
        ],
        &["client_id"],
        &[],
    );

    Schema {
        tables: BTreeMap::from([
            (String::from("applications"), applications),
            (String::from("consultations"), consultations),
            (String::from("notifications"), notifications),
            (String::from("onboarding_submissions"), onboarding_submissions),
        ]),
    }
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name"
    )
    .load(conn)
    .wrap_err("Failed to query SQLite tables")?;

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            unique_constraints: BTreeSet::new(),
            indexes: BTreeMap::new(),
        };

        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get columns for table {}", table.name))?;

        for col in columns {
            if col.pk > 0 {
                table_info.primary_keys.insert(col.name.clone());
            }
            table_info.columns.insert(
                col.name,
                Column {
                    normalized_type: normalize_sqlite_type(&col.r#type),
                    nullable: col.notnull == 0,
                },
            );
        }

        let indexes: Vec<IndexInfo> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err(format!("Failed to get indexes for table {}", table.name))?;

        for idx in indexes {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            let column_names: Vec<String> = index_columns.into_iter().map(|c| c.name).collect();

            // origin 'u' is a UNIQUE constraint, 'pk' the primary key, 'c' CREATE INDEX
            match idx.origin.as_str() {
                "u" => {
                    table_info.unique_constraints.insert(column_names);
                }
                "c" => {
                    table_info.indexes.insert(idx.name, column_names);
                }
                _ => {}
            }
        }

        schema.tables.insert(table.name, table_info);
    }

    Ok(schema)
}

/// Normalize `SQLite` type to common representation
fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let normalized = sqlite_type.to_uppercase();
    if normalized.contains("INT") {
        "integer".to_string()
    } else if normalized.contains("TEXT")
        || normalized.contains("CHAR")
        || normalized.contains("CLOB")
    {
        "text".to_string()
    } else if normalized.contains("REAL")
        || normalized.contains("FLOA")
        || normalized.contains("DOUB")
    {
        "real".to_string()
    } else if normalized.contains("BLOB") {
        "blob".to_string()
    } else {
        "text".to_string() // Default for SQLite
    }
}

/// Compare the expected schema with the migrated one
fn compare_schemas(expected: &Schema, actual: &Schema) -> Result<()> {
    let expected_tables: BTreeSet<_> = expected.tables.keys().collect();
    let actual_tables: BTreeSet<_> = actual.tables.keys().collect();

    if expected_tables != actual_tables {
        return Err(color_eyre::eyre::eyre!(
            "❌ Migration verification FAILED: table set mismatch\n  Missing: {:?}\n  Unexpected: {:?}",
            expected_tables.difference(&actual_tables).collect::<Vec<_>>(),
            actual_tables.difference(&expected_tables).collect::<Vec<_>>()
        ));
    }

    for (table_name, expected_table) in &expected.tables {
        let actual_table = &actual.tables[table_name];

        for (col_name, expected_col) in &expected_table.columns {
            match actual_table.columns.get(col_name) {
                None => {
                    return Err(color_eyre::eyre::eyre!(
                        "❌ Migration verification FAILED: column '{}.{}' is missing",
                        table_name,
                        col_name
                    ));
                }
                Some(actual_col) if actual_col != expected_col => {
                    return Err(color_eyre::eyre::eyre!(
                        "❌ Migration verification FAILED: column '{}.{}' differs\n  Expected: {:?}\n  Actual: {:?}",
                        table_name,
                        col_name,
                        expected_col,
                        actual_col
                    ));
                }
                Some(_) => {}
            }
        }

        let unexpected: Vec<_> = actual_table
            .columns
            .keys()
            .filter(|name| !expected_table.columns.contains_key(*name))
            .collect();
        if !unexpected.is_empty() {
            return Err(color_eyre::eyre::eyre!(
                "❌ Migration verification FAILED: unexpected columns in '{}': {:?}",
                table_name,
                unexpected
            ));
        }

        if expected_table.primary_keys != actual_table.primary_keys {
            return Err(color_eyre::eyre::eyre!(
                "❌ Migration verification FAILED: primary key mismatch in '{}'\n  Expected: {:?}\n  Actual: {:?}",
                table_name,
                expected_table.primary_keys,
                actual_table.primary_keys
            ));
        }

        if expected_table.unique_constraints != actual_table.unique_constraints {
            return Err(color_eyre::eyre::eyre!(
                "❌ Migration verification FAILED: unique constraint mismatch in '{}'\n  Expected: {:?}\n  Actual: {:?}",
                table_name,
                expected_table.unique_constraints,
                actual_table.unique_constraints
            ));
        }

        if expected_table.indexes != actual_table.indexes {
            return Err(color_eyre::eyre::eyre!(
                "❌ Migration verification FAILED: index mismatch in '{}'\n  Expected: {:?}\n  Actual: {:?}",
                table_name,
                expected_table.indexes,
                actual_table.indexes
            ));
        }
    }

    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
