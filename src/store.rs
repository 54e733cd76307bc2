//! SQLite store handles: file-backed and in-memory pools, table introspection, SQL dump and file export.

use crate::error::StoreError;
use crate::sql::{quoted, select_all_text};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tracing::{debug, info};

/// Open or create a file-backed store.
pub async fn open_store(path: impl AsRef<Path>, max_connections: u32) -> Result<SqlitePool, StoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    info!(path = %path.display(), "store opened");
    Ok(pool)
}

/// Open an existing file-backed store; fails if the file does not exist.
pub async fn open_existing_store(path: impl AsRef<Path>, max_connections: u32) -> Result<SqlitePool, StoreError> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await? {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let options = SqliteConnectOptions::new().filename(path);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    info!(path = %path.display(), "store opened");
    Ok(pool)
}

/// Fresh in-memory store. One connection that is never recycled, so every statement sees the same database.
pub async fn open_memory_store() -> Result<SqlitePool, StoreError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}

/// User tables in name order.
pub async fn table_names(pool: &SqlitePool) -> Result<Vec<String>, StoreError> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// Column names of a table in declaration order. Empty if the table does not exist.
pub async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>, StoreError> {
    let names = sqlx::query_scalar::<_, String>("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
        .bind(table)
        .fetch_all(pool)
        .await?;
    Ok(names)
}

/// Every row of a table as text, in insertion order.
pub async fn read_table(pool: &SqlitePool, table: &str) -> Result<Vec<Vec<Option<String>>>, StoreError> {
    let columns = table_columns(pool, table).await?;
    if columns.is_empty() {
        return Ok(Vec::new());
    }
    let sql = select_all_text(table, &columns);
    debug!(sql = %sql, "query");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            values.push(row.try_get::<Option<String>, _>(i)?);
        }
        out.push(values);
    }
    Ok(out)
}

/// Textual dump that rebuilds the store: schema statements followed by one INSERT per row,
/// wrapped in a single transaction. Values are rendered with SQLite's `quote()`.
pub async fn dump_sql(pool: &SqlitePool) -> Result<String, StoreError> {
    let mut lines = vec!["BEGIN TRANSACTION;".to_string()];

    let tables: Vec<(String, String)> = sqlx::query_as(
        "SELECT name, sql FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND sql IS NOT NULL ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    for (name, create_sql) in &tables {
        lines.push(format!("{};", create_sql));
        let columns = table_columns(pool, name).await?;
        if columns.is_empty() {
            continue;
        }
        let values_expr = columns
            .iter()
            .map(|c| format!("quote({})", quoted(c)))
            .collect::<Vec<_>>()
            .join(" || ',' || ");
        let sql = format!(
            "SELECT 'INSERT INTO ' || ?1 || ' VALUES(' || {} || ');' FROM {} ORDER BY rowid",
            values_expr,
            quoted(name)
        );
        let inserts = sqlx::query_scalar::<_, String>(&sql)
            .bind(quoted(name))
            .fetch_all(pool)
            .await?;
        lines.extend(inserts);
    }

    let extras = sqlx::query_scalar::<_, String>(
        "SELECT sql FROM sqlite_master \
         WHERE type IN ('index', 'trigger', 'view') AND sql IS NOT NULL ORDER BY type, name",
    )
    .fetch_all(pool)
    .await?;
    lines.extend(extras.into_iter().map(|sql| format!("{};", sql)));

    lines.push("COMMIT;".to_string());
    Ok(lines.join("\n"))
}

/// Full SQLite database file for the store. The dump is replayed into a scratch file-backed
/// database in rollback-journal mode, so the file is complete once the pool is closed.
pub async fn export_database(pool: &SqlitePool) -> Result<Vec<u8>, StoreError> {
    let dump = dump_sql(pool).await?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("export.db");
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete);
    let target = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    let replayed = sqlx::raw_sql(&dump).execute(&target).await;
    target.close().await;
    replayed?;
    let bytes = tokio::fs::read(&path).await?;
    debug!(bytes = bytes.len(), "store exported");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn seeded_memory_store() -> SqlitePool {
        let pool = open_memory_store().await.unwrap();
        sqlx::query("CREATE TABLE \"people\" (\"id\" TEXT, \"name\" TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO people VALUES ('1', 'Alice'), ('2', 'O''Brien'), ('3', NULL)")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn open_store_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("data.db");
        let pool = open_store(&path, 1).await.unwrap();
        assert!(path.exists());
        pool.close().await;
    }

    #[tokio::test]
    async fn open_existing_store_requires_file() {
        let tmp = TempDir::new().unwrap();
        let err = open_existing_store(tmp.path().join("missing.db"), 1).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn memory_store_is_shared_across_statements() {
        let pool = seeded_memory_store().await;
        assert_eq!(table_names(&pool).await.unwrap(), vec!["people".to_string()]);
        assert_eq!(table_columns(&pool, "people").await.unwrap(), vec!["id", "name"]);
    }

    #[tokio::test]
    async fn read_table_returns_rows_in_order() {
        let pool = seeded_memory_store().await;
        let rows = read_table(&pool, "people").await.unwrap();
        assert_eq!(
            rows,
            vec![
                vec![Some("1".to_string()), Some("Alice".to_string())],
                vec![Some("2".to_string()), Some("O'Brien".to_string())],
                vec![Some("3".to_string()), None],
            ]
        );
        assert!(read_table(&pool, "missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn dump_rebuilds_the_store() {
        let pool = seeded_memory_store().await;
        let dump = dump_sql(&pool).await.unwrap();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.first(), Some(&"BEGIN TRANSACTION;"));
        assert_eq!(lines.last(), Some(&"COMMIT;"));
        assert!(lines.contains(&"INSERT INTO \"people\" VALUES('1','Alice');"));
        assert!(lines.contains(&"INSERT INTO \"people\" VALUES('2','O''Brien');"));
        assert!(lines.contains(&"INSERT INTO \"people\" VALUES('3',NULL);"));

        let replay = open_memory_store().await.unwrap();
        sqlx::raw_sql(&dump).execute(&replay).await.unwrap();
        assert_eq!(read_table(&replay, "people").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn export_produces_sqlite_file() {
        let pool = seeded_memory_store().await;
        let bytes = export_database(&pool).await.unwrap();
        assert!(bytes.starts_with(b"SQLite format 3\0"));

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("exported.db");
        std::fs::write(&path, &bytes).unwrap();
        let reopened = open_existing_store(&path, 1).await.unwrap();
        assert_eq!(table_names(&reopened).await.unwrap(), vec!["people".to_string()]);
        assert_eq!(read_table(&reopened, "people").await.unwrap().len(), 3);
        reopened.close().await;
    }
}
