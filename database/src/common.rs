use sqlx::{sqlite::SqliteRow, Row};
use task_core::{
    error::{Result, TaskError},
    models::Task,
};

/// Convert SQLite row to Task model
///
/// Columns are read positionally as `(id, name, complete)`; any decode
/// failure fails the whole operation.
pub fn row_to_task(row: &SqliteRow) -> Result<Task> {
    let id: i64 = row.try_get(0).map_err(sqlx_error_to_task_error)?;
    let name: String = row.try_get(1).map_err(sqlx_error_to_task_error)?;
    let complete: bool = row.try_get(2).map_err(sqlx_error_to_task_error)?;

    let id = u64::try_from(id)
        .map_err(|_| TaskError::Database(format!("Invalid task ID in database: {id}")))?;

    Ok(Task::new(id, name, complete))
}

/// Convert a task ID to the signed column type SQLite stores.
///
/// IDs beyond `i64::MAX` can never have been assigned, so they map to not found.
pub fn task_id_to_db(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| TaskError::not_found_id(id))
}

/// Convert SQLx error to TaskError
pub fn sqlx_error_to_task_error(err: sqlx::Error) -> TaskError {
    match &err {
        sqlx::Error::Database(db_err) => {
            TaskError::Database(format!("Database constraint error: {}", db_err.message()))
        }
        sqlx::Error::RowNotFound => {
            // Callers use fetch_all/fetch_optional, so this only shows up on misuse
            TaskError::Database("Unexpected RowNotFound error".to_string())
        }
        sqlx::Error::ColumnDecode { index, source } => {
            TaskError::Database(format!("Failed to decode column {index}: {source}"))
        }
        sqlx::Error::ColumnNotFound(column) => {
            TaskError::Database(format!("Column not found: {column}"))
        }
        sqlx::Error::PoolTimedOut => TaskError::Connection("Connection pool timeout".to_string()),
        sqlx::Error::PoolClosed => TaskError::Connection("Connection pool closed".to_string()),
        sqlx::Error::Io(io_err) => TaskError::Database(format!("Database I/O error: {io_err}")),
        _ => TaskError::Database(format!("Database operation failed: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_to_db() {
        assert_eq!(task_id_to_db(42).unwrap(), 42);
        assert!(task_id_to_db(u64::MAX).unwrap_err().is_not_found());
    }

    #[test]
    fn test_pool_errors_map_to_connection() {
        assert!(matches!(
            sqlx_error_to_task_error(sqlx::Error::PoolTimedOut),
            TaskError::Connection(_)
        ));
        assert!(matches!(
            sqlx_error_to_task_error(sqlx::Error::PoolClosed),
            TaskError::Connection(_)
        ));
    }

    #[test]
    fn test_other_errors_map_to_database() {
        let error = sqlx_error_to_task_error(sqlx::Error::ColumnNotFound("name".to_string()));
        assert_eq!(error, TaskError::Database("Column not found: name".to_string()));

        let error = sqlx_error_to_task_error(sqlx::Error::RowNotFound);
        assert!(error.is_database());
    }
}
