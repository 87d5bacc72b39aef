//! SQLite-backed word store. Owns the connection for its whole lifetime:
//! opened once at startup, closed when the [`Store`] is dropped.
//!
//! Two tables: `categories` (global) and `words` (scoped by owner).

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

/// Categories every database starts with.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Outdoors", "Drinks", "Clothes"];

/// A named grouping for words, shared by all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// A Spanish/English pair belonging to one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    pub id: i64,
    pub owner: String,
    pub spanish: String,
    pub english: String,
    pub category_id: Option<i64>,
}

impl Word {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner: row.get(1)?,
            spanish: row.get(2)?,
            english: row.get(3)?,
            category_id: row.get(4)?,
        })
    }
}

const WORD_COLUMNS: &str = "word_id, user_id, word_in_spanish, english, category_id";

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path` and initialize tables.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        log::info!("opening word store at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory database with the full schema. Nothing survives the process.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Create tables if absent, seed the default categories and drop duplicate
    /// category names (keeping the lowest id). Idempotent; also repairs
    /// duplicates that were already in the file.
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                category_id INTEGER PRIMARY KEY,
                category_name TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS words (
                word_id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                word_in_spanish TEXT NOT NULL,
                english TEXT NOT NULL,
                category_id INTEGER,
                FOREIGN KEY (category_id) REFERENCES categories(category_id)
            );

            CREATE INDEX IF NOT EXISTS idx_words_user_id ON words(user_id);
            "#,
        )?;

        for name in DEFAULT_CATEGORIES {
            insert_category_if_absent(&tx, name)?;
        }

        // Older files stored an empty string for "no category".
        tx.execute("UPDATE words SET category_id = NULL WHERE category_id = ''", [])?;

        // Point words at the surviving row before its duplicates go away.
        let repointed = tx.execute(
            "UPDATE words SET category_id = (
                 SELECT MIN(keep.category_id)
                 FROM categories keep
                 JOIN categories dup ON dup.category_name = keep.category_name
                 WHERE dup.category_id = words.category_id
             )
             WHERE category_id IN (
                 SELECT category_id FROM categories
                 WHERE category_id NOT IN (
                     SELECT MIN(category_id) FROM categories GROUP BY category_name
                 )
             )",
            [],
        )?;
        let removed = tx.execute(
            "DELETE FROM categories
             WHERE category_id NOT IN (
                 SELECT MIN(category_id) FROM categories GROUP BY category_name
             )",
            [],
        )?;
        tx.commit()?;

        if removed > 0 {
            log::info!(
                "removed {} duplicate categories ({} words repointed)",
                removed,
                repointed
            );
        }
        Ok(())
    }

    /// Add a category unless one with the same name exists. Returns the stored category.
    pub fn add_category(&self, name: &str) -> Result<Category, StoreError> {
        insert_category_if_absent(&self.conn, name)?;
        let id = self.conn.query_row(
            "SELECT MIN(category_id) FROM categories WHERE category_name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(Category {
            id,
            name: name.to_string(),
        })
    }

    /// All categories, ordered by id.
    pub fn categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT category_id, category_name FROM categories ORDER BY category_id")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(categories)
    }

    pub fn category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let category = self
            .conn
            .query_row(
                "SELECT category_id, category_name FROM categories WHERE category_id = ?1",
                params![id],
                |row| {
                    Ok(Category {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(category)
    }

    /// Insert a word. A category id that doesn't exist is rejected with
    /// [`StoreError::UnknownCategory`] rather than stored as a dangling reference.
    pub fn add_word(
        &self,
        owner: &str,
        spanish: &str,
        english: &str,
        category_id: Option<i64>,
    ) -> Result<Word, StoreError> {
        if let Some(id) = category_id {
            if self.category(id)?.is_none() {
                return Err(StoreError::UnknownCategory(id));
            }
        }
        self.conn.execute(
            "INSERT INTO words (user_id, word_in_spanish, english, category_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![owner, spanish, english, category_id],
        )?;
        let id = self.conn.last_insert_rowid();
        log::debug!("added word {} for {}", id, owner);
        Ok(Word {
            id,
            owner: owner.to_string(),
            spanish: spanish.to_string(),
            english: english.to_string(),
            category_id,
        })
    }

    /// Every word belonging to `owner`, in insertion order.
    pub fn words(&self, owner: &str) -> Result<Vec<Word>, StoreError> {
        let sql = format!("SELECT {WORD_COLUMNS} FROM words WHERE user_id = ?1 ORDER BY word_id");
        let mut stmt = self.conn.prepare(&sql)?;
        let words = stmt
            .query_map(params![owner], Word::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(words)
    }

    /// Words of `owner` joined with their category name. Words without a
    /// category are left out.
    pub fn words_with_category_names(&self, owner: &str) -> Result<Vec<(String, Word)>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT c.category_name, w.word_id, w.user_id, w.word_in_spanish, w.english, w.category_id
             FROM words w
             JOIN categories c ON w.category_id = c.category_id
             WHERE w.user_id = ?1
             ORDER BY w.word_id",
        )?;
        let rows = stmt
            .query_map(params![owner], |row| {
                Ok((
                    row.get(0)?,
                    Word {
                        id: row.get(1)?,
                        owner: row.get(2)?,
                        spanish: row.get(3)?,
                        english: row.get(4)?,
                        category_id: row.get(5)?,
                    },
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn words_in_category(&self, owner: &str, category_id: i64) -> Result<Vec<Word>, StoreError> {
        let sql = format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE user_id = ?1 AND category_id = ?2 ORDER BY word_id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let words = stmt
            .query_map(params![owner, category_id], Word::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(words)
    }

    pub fn word_count(&self, owner: &str) -> Result<usize, StoreError> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM words WHERE user_id = ?1",
            params![owner],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(n).unwrap_or_default())
    }
}

fn insert_category_if_absent(conn: &Connection, name: &str) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO categories (category_name)
         SELECT ?1 WHERE NOT EXISTS (
             SELECT 1 FROM categories WHERE category_name = ?1
         )",
        params![name],
    )
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown category: {0}")]
    UnknownCategory(i64),
}
