use std::path::Path;
use std::str::FromStr;

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};

use crate::models::Note;

/// Persistence layer over a single `notes` table in a file-backed SQLite
/// database. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

fn note_from_row(row: &SqliteRow) -> Note {
    Note {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl Repository {
    /// Opens (creating if missing) the database file at `db_path`.
    pub async fn new(db_path: &str) -> Result<Self, sqlx::Error> {
        if let Some(parent) = Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Idempotent schema creation. AUTOINCREMENT keeps deleted ids from ever
    /// being reassigned within the lifetime of the database file.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    pub async fn create_note(&self, title: String, content: String) -> Result<Note, sqlx::Error> {
        // One clock read for both columns so created_at == updated_at exactly.
        let now = Utc::now();

        let row = sqlx::query(
            "INSERT INTO notes (title, content, created_at, updated_at) VALUES (?, ?, ?, ?) \
             RETURNING id, title, content, created_at, updated_at",
        )
        .bind(&title)
        .bind(&content)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(note_from_row(&row))
    }

    pub async fn update_note(
        &self,
        id: i64,
        title: String,
        content: String,
    ) -> Result<Option<Note>, sqlx::Error> {
        let now = Utc::now();

        let row = sqlx::query(
            "UPDATE notes SET title = ?, content = ?, updated_at = ? WHERE id = ? \
             RETURNING id, title, content, created_at, updated_at",
        )
        .bind(&title)
        .bind(&content)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<Note>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(note_from_row))
    }

    /// All notes, most recently touched first.
    pub async fn get_all_notes(&self) -> Result<Vec<Note>, sqlx::Error> {
        let rows = sqlx::query(
            "SELECT id, title, content, created_at, updated_at FROM notes \
             ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    /// Closes the pool; called once on shutdown so in-flight writes are not
    /// severed.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn test_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.db");
        let repo = Repository::new(path.to_str().unwrap()).await.unwrap();
        repo.migrate().await.unwrap();
        (dir, repo)
    }

    #[tokio::test]
    async fn create_then_get_returns_matching_record() {
        let (_dir, repo) = test_repo().await;

        let created = repo
            .create_note("Groceries".to_string(), "milk, eggs".to_string())
            .await
            .unwrap();
        assert_eq!(created.title, "Groceries");
        assert_eq!(created.content, "milk, eggs");
        assert_eq!(created.created_at, created.updated_at);

        let fetched = repo.get_one_note(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "Groceries");
        assert_eq!(fetched.content, "milk, eggs");
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() {
        let (_dir, repo) = test_repo().await;

        let created = repo
            .create_note("draft".to_string(), String::new())
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;

        let updated = repo
            .update_note(created.id, "final".to_string(), "done".to_string())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > updated.created_at);
        assert_eq!(updated.title, "final");
        assert_eq!(updated.content, "done");
    }

    #[tokio::test]
    async fn update_missing_note_returns_none() {
        let (_dir, repo) = test_repo().await;

        let updated = repo
            .update_note(42, "title".to_string(), String::new())
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn delete_then_get_returns_none() {
        let (_dir, repo) = test_repo().await;

        let created = repo
            .create_note("gone soon".to_string(), String::new())
            .await
            .unwrap();

        assert!(repo.delete_note(created.id).await.unwrap());
        assert!(repo.get_one_note(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_note_returns_false() {
        let (_dir, repo) = test_repo().await;

        assert!(!repo.delete_note(999).await.unwrap());
    }

    #[tokio::test]
    async fn list_orders_by_updated_at_desc() {
        let (_dir, repo) = test_repo().await;

        let first = repo
            .create_note("first".to_string(), String::new())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = repo
            .create_note("second".to_string(), String::new())
            .await
            .unwrap();

        let notes = repo.get_all_notes().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].id, second.id);
        assert_eq!(notes[1].id, first.id);

        // Touching the older note moves it back to the front.
        tokio::time::sleep(Duration::from_millis(5)).await;
        repo.update_note(first.id, "first".to_string(), "edited".to_string())
            .await
            .unwrap()
            .unwrap();

        let notes = repo.get_all_notes().await.unwrap();
        assert_eq!(notes[0].id, first.id);
        assert_eq!(notes[1].id, second.id);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let (_dir, repo) = test_repo().await;

        let first = repo
            .create_note("one".to_string(), String::new())
            .await
            .unwrap();
        assert!(repo.delete_note(first.id).await.unwrap());

        let second = repo
            .create_note("two".to_string(), String::new())
            .await
            .unwrap();
        assert!(second.id > first.id);
    }
}
