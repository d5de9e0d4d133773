use super::*;
use crate::commands::common::{ExitCode, EXIT_MISSING_FILE};
use mr_db::DuckDbBackend;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn global_for(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.to_path_buf(),
        file: None,
        target: None,
        project_ref: Some("abcdefghijklmnop".to_string()),
    }
}

fn apply_with_url(url: String) -> ApplyArgs {
    ApplyArgs {
        database_url: Some(url),
        no_prompt: true,
    }
}

#[test]
fn test_prompt_reads_trimmed_answer() {
    let path = PathBuf::from("migrate-database.sql");
    let ctx = InstructionContext {
        dashboard_url: "https://supabase.com/dashboard",
        project_ref: "abcdefghijklmnop",
        migration_path: &path,
    };
    let mut output = Vec::new();

    let answer = prompt_connection_string(
        Cursor::new("  postgresql://postgres:pw@localhost/postgres \n"),
        &mut output,
        &ctx,
    )
    .unwrap();

    assert_eq!(
        answer.as_deref(),
        Some("postgresql://postgres:pw@localhost/postgres")
    );
    let shown = String::from_utf8(output).unwrap();
    assert!(shown.contains("project/abcdefghijklmnop/settings/database"));
    assert!(shown.contains("db.abcdefghijklmnop.supabase.co"));
}

#[test]
fn test_prompt_empty_answer_is_none() {
    let path = PathBuf::from("migrate-database.sql");
    let ctx = InstructionContext {
        dashboard_url: "https://supabase.com/dashboard",
        project_ref: "abcdefghijklmnop",
        migration_path: &path,
    };

    let answer = prompt_connection_string(Cursor::new("\n"), Vec::new(), &ctx).unwrap();
    assert_eq!(answer, None);

    let answer = prompt_connection_string(Cursor::new(""), Vec::new(), &ctx).unwrap();
    assert_eq!(answer, None);
}

#[tokio::test]
async fn test_apply_against_duckdb_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("migrate-database.sql"),
        "-- schema\nCREATE TABLE profiles (id INT);\n\
         INSERT INTO missing VALUES (1);\n\
         CREATE TABLE cases (id INT, profile_id INT);\n",
    )
    .unwrap();
    let db_path = dir.path().join("rehearsal.duckdb");

    execute(
        &apply_with_url(format!("duckdb://{}", db_path.display())),
        &global_for(dir.path()),
    )
    .await
    .unwrap();

    // The failing INSERT does not prevent the later CREATE TABLE
    let db = DuckDbBackend::from_path(&db_path).unwrap();
    assert!(db.relation_exists("profiles").await.unwrap());
    assert!(db.relation_exists("cases").await.unwrap());
}

#[tokio::test]
async fn test_apply_missing_file_exits_1() {
    let dir = tempdir().unwrap();

    let err = execute(
        &apply_with_url("duckdb://:memory:".to_string()),
        &global_for(dir.path()),
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<ExitCode>().map(|c| c.0),
        Some(EXIT_MISSING_FILE)
    );
}

#[tokio::test]
async fn test_apply_empty_file_never_connects() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("migrate-database.sql"), "-- nothing yet\n;\n").unwrap();
    let db_path = dir.path().join("never.duckdb");

    execute(
        &apply_with_url(format!("duckdb://{}", db_path.display())),
        &global_for(dir.path()),
    )
    .await
    .unwrap();

    // Opening the DuckDB URL would have created the file
    assert!(!db_path.exists());
}

#[tokio::test]
async fn test_apply_unsupported_url_falls_back() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("migrate-database.sql"), "SELECT 1;").unwrap();

    let result = execute(
        &apply_with_url("mysql://localhost/app".to_string()),
        &global_for(dir.path()),
    )
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_apply_without_url_and_no_prompt_falls_back() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("migrate-database.sql"), "SELECT 1;").unwrap();

    let args = ApplyArgs {
        database_url: None,
        no_prompt: true,
    };
    assert!(execute(&args, &global_for(dir.path())).await.is_ok());
}

#[tokio::test]
async fn test_apply_uses_config_url_and_file() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("from-config.duckdb");
    fs::create_dir_all(dir.path().join("sql")).unwrap();
    fs::write(
        dir.path().join("sql/init.sql"),
        "CREATE TABLE configured (id INT);",
    )
    .unwrap();
    fs::write(
        dir.path().join("migrun.yml"),
        format!(
            "migration_file: sql/init.sql\ndatabase:\n  url: \"duckdb://{}\"\nexpect_tables:\n  - configured\n",
            db_path.display()
        ),
    )
    .unwrap();

    let args = ApplyArgs {
        database_url: None,
        no_prompt: true,
    };
    execute(&args, &global_for(dir.path())).await.unwrap();

    let db = DuckDbBackend::from_path(&db_path).unwrap();
    assert!(db.relation_exists("configured").await.unwrap());
}

#[cfg(not(feature = "postgres"))]
#[tokio::test]
async fn test_apply_without_postgres_driver_falls_back() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("migrate-database.sql"), "SELECT 1;").unwrap();

    let result = execute(
        &apply_with_url("postgresql://postgres:pw@localhost:5432/postgres".to_string()),
        &global_for(dir.path()),
    )
    .await;

    assert!(result.is_ok());
}
