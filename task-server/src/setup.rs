use anyhow::{Context, Result};
use database::SqliteTaskRepository;
use std::path::Path;
use std::sync::Arc;
use task_api::TaskServer;
use tracing::info;

use crate::config::Config;

/// The wired application: the store and the server that exposes it
pub struct App {
    pub repository: Arc<SqliteTaskRepository>,
    pub server: TaskServer<SqliteTaskRepository>,
}

/// Open the database described by the configuration and bring its schema up to date
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTaskRepository>> {
    let settings = config.database_settings();
    info!(database_url = %settings.url, "Opening task database");

    let repo = SqliteTaskRepository::connect(&settings)
        .await
        .with_context(|| format!("Failed to connect to database at {}", settings.url))?;

    info!("Running database migrations");
    repo.migrate()
        .await
        .context("Failed to run database migrations")?;

    Ok(Arc::new(repo))
}

/// Create and configure the HTTP server
pub fn create_server(
    repository: Arc<SqliteTaskRepository>,
    config: &Config,
) -> Result<TaskServer<SqliteTaskRepository>> {
    TaskServer::new(repository, &config.server.allowed_origin)
        .context("Failed to create server")
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<App> {
    info!("Initializing application");

    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    let server = create_server(repository.clone(), config)?;

    info!("Application initialized successfully");
    Ok(App { repository, server })
}

/// Ensure the parent directory of a file-backed SQLite URL exists
///
/// In-memory URLs and URLs without a directory component are left alone. A
/// directory created here is restricted to its owner on Unix.
pub fn ensure_database_directory(database_url: &str) -> Result<()> {
    let Some(db_path) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if db_path.is_empty() || db_path.contains(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating database directory: {}", parent.display());
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = std::fs::Permissions::from_mode(0o700);
                std::fs::set_permissions(parent, permissions)
                    .context("Failed to set directory permissions")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_for(url: String) -> Config {
        let mut config = Config::default();
        config.database.url = Some(url);
        config
    }

    #[tokio::test]
    async fn test_create_repository_with_custom_url() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let repo = create_repository(&config_for(format!("sqlite://{}", db_path.display())))
            .await
            .unwrap();

        assert!(db_path.exists());
        repo.database().close().await;
    }

    #[tokio::test]
    async fn test_create_repository_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("absent").join("test.db");

        let result = create_repository(&config_for(format!("sqlite://{}", db_path.display()))).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_ensure_database_directory() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("subdir").join("test.db");
        let database_url = format!("sqlite://{}", db_path.display());

        ensure_database_directory(&database_url).unwrap();
        assert!(db_path.parent().unwrap().exists());
    }

    #[test]
    fn test_ensure_database_directory_ignores_memory_and_query() {
        ensure_database_directory("sqlite::memory:").unwrap();
        ensure_database_directory("sqlite://:memory:").unwrap();

        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");
        ensure_database_directory(&format!("sqlite://{}?mode=rwc", db_path.display())).unwrap();
        assert!(db_path.parent().unwrap().exists());
    }

    #[tokio::test]
    async fn test_initialize_app() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("server_test.db");

        let app = initialize_app(&config_for(format!("sqlite://{}", db_path.display())))
            .await
            .unwrap();

        assert!(app.repository.database().ping().await.is_ok());
        app.repository.database().close().await;
    }
}
