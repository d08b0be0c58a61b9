//! Contract tests that every TaskRepository implementation must pass
//!
//! The SQLite store runs the same suite as the in-memory mock, against both a
//! file-backed and an in-memory database.

use database::{DatabaseSettings, SqliteTaskRepository};
use mocks::test_repository_contract;
use tempfile::TempDir;

#[tokio::test]
async fn test_sqlite_file_repository_contract() {
    let temp_dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("contract.sqlite").display());

    let repo = SqliteTaskRepository::connect(&DatabaseSettings::new(url))
        .await
        .unwrap();
    repo.migrate().await.unwrap();

    test_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_sqlite_memory_repository_contract() {
    let repo = SqliteTaskRepository::connect(&DatabaseSettings::new("sqlite::memory:"))
        .await
        .unwrap();
    repo.migrate().await.unwrap();

    test_repository_contract(&repo).await;
}
