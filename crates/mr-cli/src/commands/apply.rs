//! Apply command implementation - execute the migration statement by statement

use anyhow::Result;
use mr_db::{
    connect, redact_url, Database, ExecutionReport, StatementOutcome, StatementRunner,
    StatementStatus,
};
use mr_sql::{split_statements, HazardScanner};
use std::io::{BufRead, IsTerminal, Write};

use crate::cli::{ApplyArgs, GlobalArgs};
use crate::commands::common::{load_migration, print_banner};
use crate::commands::instructions::{render, render_editor_fallback, InstructionContext};
use crate::context::RuntimeContext;

/// Where the connection string came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UrlSource {
    /// `--database-url` or `DATABASE_URL`
    Argument,
    /// `database.url` in migrun.yml
    Config,
    /// Typed at the prompt
    Prompt,
}

/// Read a connection string from `input`, writing the prompt to `output`.
///
/// Returns `None` when the user just presses Enter or input is closed.
pub(crate) fn prompt_connection_string<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    ctx: &InstructionContext<'_>,
) -> std::io::Result<Option<String>> {
    writeln!(output, "A database connection string is needed to run the SQL.")?;
    writeln!(output, "   Get it from: {}", ctx.database_settings_url())?;
    writeln!(output)?;
    writeln!(output, "   Format: {}", ctx.connection_string_template())?;
    writeln!(output)?;
    write!(
        output,
        "Enter the connection string (or press Enter to use the SQL editor): "
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// Resolve the connection string: argument, then config, then prompt.
fn resolve_database_url(
    args: &ApplyArgs,
    ctx: &RuntimeContext,
    instruction_ctx: &InstructionContext<'_>,
) -> Result<Option<(String, UrlSource)>> {
    if let Some(url) = args.database_url.as_deref().filter(|u| !u.trim().is_empty()) {
        return Ok(Some((url.trim().to_string(), UrlSource::Argument)));
    }

    if let Some(url) = ctx.configured_database_url()? {
        return Ok(Some((url, UrlSource::Config)));
    }

    let stdin = std::io::stdin();
    if args.no_prompt || !stdin.is_terminal() {
        log::debug!("No connection string configured and prompting is disabled");
        return Ok(None);
    }

    let answer = prompt_connection_string(stdin.lock(), std::io::stdout(), instruction_ctx)?;
    println!();
    Ok(answer.map(|url| (url, UrlSource::Prompt)))
}

/// Print one statement outcome as it happens
fn print_outcome(outcome: &StatementOutcome) {
    match &outcome.status {
        StatementStatus::Success { .. } => println!(
            "  \u{2713} Statement {}/{} executed [{}ms]",
            outcome.index,
            outcome.total,
            outcome.duration.as_millis()
        ),
        StatementStatus::Failed { message } => println!(
            "  \u{2717} Statement {}/{} - {}",
            outcome.index, outcome.total, message
        ),
        StatementStatus::NotAttempted => println!(
            "  - Statement {}/{} not attempted",
            outcome.index, outcome.total
        ),
    }
}

fn print_summary(report: &ExecutionReport) {
    println!();
    if report.all_succeeded() {
        println!("Migration applied: all {} statements succeeded", report.total());
    } else {
        println!(
            "Migration finished with errors: {} succeeded, {} failed, {} not attempted",
            report.succeeded(),
            report.failed(),
            report.not_attempted()
        );
    }
    println!("Total time: {}ms", report.duration.as_millis());
}

/// Check the tables the migration is expected to create
async fn verify_tables(db: &dyn Database, tables: &[String]) {
    println!();
    println!("Verifying expected tables:");
    for table in tables {
        match db.relation_exists(table).await {
            Ok(true) => println!("  \u{2713} {}", table),
            Ok(false) => println!("  \u{2717} {} (missing)", table),
            Err(e) => println!("  ? {} ({})", table, e),
        }
    }
}

/// Execute the apply command
pub async fn execute(args: &ApplyArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let instruction_ctx = InstructionContext::from_runtime(&ctx);

    print_banner("Migrun: applying SQL migrations");
    let script = load_migration(&ctx.migration_path)?;

    let statements: Vec<&str> = split_statements(script.raw()).collect();
    if statements.is_empty() {
        println!(
            "No statements found in {}; nothing to do.",
            ctx.migration_path.display()
        );
        return Ok(());
    }

    let Some((url, source)) = resolve_database_url(args, &ctx, &instruction_ctx)? else {
        println!("No connection string given.");
        print!("{}", render_editor_fallback(&instruction_ctx));
        return Ok(());
    };
    log::debug!("Connection string from {:?}: {}", source, redact_url(&url));

    println!("Connecting to {}...", redact_url(&url));
    let db = match connect(&url).await {
        Ok(db) => db,
        Err(e) => {
            log::warn!("Direct execution unavailable: {}", e);
            println!("\u{2717} Could not connect: {}", e);
            println!();
            println!("{}", render(&instruction_ctx));
            return Ok(());
        }
    };
    println!("\u{2713} Connected ({})", db.db_type());
    println!();

    let scanner = HazardScanner::for_backend(db.db_type());
    for (i, statement) in statements.iter().enumerate() {
        if let Some(hazard) = scanner.scan(statement) {
            log::warn!("Statement {}/{}: {}", i + 1, statements.len(), hazard);
        }
    }

    println!("Executing {} statements...", statements.len());
    let report = StatementRunner::new(db.as_ref())
        .run(&statements, print_outcome)
        .await;
    print_summary(&report);

    if let Some(reason) = &report.aborted {
        println!();
        println!("\u{2717} Connection lost: {}", reason);
        print!("{}", render_editor_fallback(&instruction_ctx));
        return Ok(());
    }

    if !ctx.config.expect_tables.is_empty() {
        verify_tables(db.as_ref(), &ctx.config.expect_tables).await;
    }

    Ok(())
}

#[cfg(test)]
#[path = "apply_test.rs"]
mod tests;
