use crate::{
    common::{row_to_task, sqlx_error_to_task_error, task_id_to_db},
    connector::{Database, DatabaseSettings},
};
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use task_core::{
    error::{Result, TaskError},
    models::{NewTask, Task},
    repository::TaskRepository,
};
use tracing::{debug, warn};

const SELECT_TASK_BY_ID: &str = "SELECT id, name, complete FROM tasks WHERE id = ?";
const SELECT_ALL_TASKS: &str = "SELECT id, name, complete FROM tasks";
const INSERT_TASK: &str = "INSERT INTO tasks (name) VALUES (?)";
const UPDATE_TASK: &str = "UPDATE tasks SET name = ?, complete = ? WHERE id = ?";

/// SQLite implementation of the TaskRepository trait
///
/// Reads run directly on the pool; every write runs inside its own
/// transaction that is committed before the call returns.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    database: Database,
}

impl SqliteTaskRepository {
    /// Wrap an already opened connector
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Open a connector with the given settings and wrap it
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::{DatabaseSettings, SqliteTaskRepository};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let settings = DatabaseSettings::new("sqlite:///tmp/tasks.sqlite");
    /// let repo = SqliteTaskRepository::connect(&settings).await?;
    /// repo.migrate().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self> {
        Database::open(settings).await.map(Self::new)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// The connector this store issues statements through
    pub fn database(&self) -> &Database {
        &self.database
    }
}

/// Roll back explicitly so the failure is logged, then hand back the error that caused it
async fn rollback(
    tx: Transaction<'static, Sqlite>,
    operation: &str,
    error: TaskError,
) -> TaskError {
    match tx.rollback().await {
        Ok(()) => warn!(operation, error = %error, "Transaction rolled back"),
        Err(rollback_error) => warn!(
            operation,
            error = %error,
            rollback_error = %rollback_error,
            "Transaction rollback failed"
        ),
    }
    error
}

async fn commit(tx: Transaction<'static, Sqlite>) -> Result<()> {
    tx.commit()
        .await
        .map_err(|e| TaskError::Transaction(format!("Failed to commit transaction: {e}")))
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn get_by_id(&self, id: u64) -> Result<Task> {
        let db_id = task_id_to_db(id)?;

        let rows = self
            .database
            .query(sqlx::query(SELECT_TASK_BY_ID).bind(db_id))
            .await?;

        match rows.first() {
            Some(row) => row_to_task(row),
            None => Err(TaskError::not_found_id(id)),
        }
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let rows = self.database.query(sqlx::query(SELECT_ALL_TASKS)).await?;
        rows.iter().map(row_to_task).collect()
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        let mut tx = self.database.begin().await?;

        let inserted = sqlx::query(INSERT_TASK)
            .bind(task.name.as_str())
            .execute(&mut *tx)
            .await;

        let result = match inserted {
            Ok(result) => result,
            Err(e) => return Err(rollback(tx, "create", sqlx_error_to_task_error(e)).await),
        };

        let row_id = result.last_insert_rowid();
        let id = match u64::try_from(row_id) {
            Ok(id) => id,
            Err(_) => {
                let error = TaskError::Database(format!("Invalid generated task ID: {row_id}"));
                return Err(rollback(tx, "create", error).await);
            }
        };

        commit(tx).await?;

        debug!(task_id = id, "Task created");
        Ok(task.into_task(id))
    }

    async fn update(&self, task: &Task) -> Result<()> {
        let db_id = task_id_to_db(task.id)?;
        let mut tx = self.database.begin().await?;

        let updated = sqlx::query(UPDATE_TASK)
            .bind(task.name.as_str())
            .bind(task.complete)
            .bind(db_id)
            .execute(&mut *tx)
            .await;

        let result = match updated {
            Ok(result) => result,
            Err(e) => return Err(rollback(tx, "update", sqlx_error_to_task_error(e)).await),
        };

        if result.rows_affected() == 0 {
            return Err(rollback(tx, "update", TaskError::not_found_id(task.id)).await);
        }

        commit(tx).await?;

        debug!(task_id = task.id, complete = task.complete, "Task updated");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.database.ping().await
    }
}
