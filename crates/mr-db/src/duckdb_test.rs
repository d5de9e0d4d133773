use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.db_type(), "duckdb");
}

#[tokio::test]
async fn test_execute_returns_affected_rows() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE TABLE t (id INT)").await.unwrap();

    let inserted = db
        .execute("INSERT INTO t VALUES (1), (2), (3)")
        .await
        .unwrap();
    assert_eq!(inserted, 3);
}

#[tokio::test]
async fn test_execute_error_is_execution_error() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db
        .execute("INSERT INTO missing VALUES (1)")
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::ExecutionError(_)));
    assert!(!err.is_connection_lost());
}

#[tokio::test]
async fn test_relation_exists() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert!(!db.relation_exists("profiles").await.unwrap());

    db.execute("CREATE TABLE profiles (id INT)").await.unwrap();
    assert!(db.relation_exists("profiles").await.unwrap());
    assert!(db.relation_exists("main.profiles").await.unwrap());
}

#[tokio::test]
async fn test_relation_exists_in_schema() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute("CREATE SCHEMA staging").await.unwrap();
    db.execute("CREATE VIEW staging.v AS SELECT 1 AS id")
        .await
        .unwrap();

    assert!(db.relation_exists("staging.v").await.unwrap());
    assert!(!db.relation_exists("v").await.unwrap());
}

#[tokio::test]
async fn test_file_backed_database_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rehearsal.duckdb");

    {
        let db = DuckDbBackend::new(path.to_str().unwrap()).unwrap();
        db.execute("CREATE TABLE kept (id INT)").await.unwrap();
    }

    let db = DuckDbBackend::from_path(&path).unwrap();
    assert!(db.relation_exists("kept").await.unwrap());
}
