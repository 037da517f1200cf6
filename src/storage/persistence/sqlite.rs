//! `SQLite`-based study set store.
//!
//! Durable storage for study sets and their terms. Term batches are written
//! inside a single transaction, so a batch is either fully stored or not at
//! all.

use crate::models::{NewStudySet, NewTerm, StudySet, StudySetId, Term, UserId};
use crate::storage::sqlite::{acquire_lock, configure_connection, record_operation_metrics};
use crate::storage::traits::StudySetStore;
use crate::{Error, Result, current_timestamp};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing::instrument;
use uuid::Uuid;

const BACKEND: &str = "sqlite";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS study_sets (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    owner_id TEXT NOT NULL,
    description TEXT NOT NULL,
    created_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_study_sets_owner ON study_sets(owner_id, created_at);
CREATE TABLE IF NOT EXISTS terms (
    id TEXT PRIMARY KEY,
    study_set_id TEXT NOT NULL REFERENCES study_sets(id) ON DELETE CASCADE,
    word TEXT NOT NULL,
    definition TEXT NOT NULL,
    rank INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_terms_study_set ON terms(study_set_id);
";

/// `SQLite`-based study set store.
///
/// # Concurrency Model
///
/// Uses a `Mutex<Connection>` because `rusqlite::Connection` is not `Sync`.
/// WAL mode and `busy_timeout` absorb contention with other processes.
///
/// # Schema
///
/// - `study_sets`: id, title, `owner_id`, description, `created_at`
/// - `terms`: id, `study_set_id`, word, definition, rank
///
/// Identifiers are random UUIDv4 strings.
pub struct SqliteStudySetStore {
    conn: Mutex<Connection>,
    /// Path to the database (None for in-memory).
    db_path: Option<PathBuf>,
}

impl SqliteStudySetStore {
    /// Opens (or creates) a store at `db_path`.
    ///
    /// Parent directories are created when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::operation("create_data_dir", e))?;
        }

        let conn = Connection::open(&db_path).map_err(|e| Error::operation("open_sqlite", e))?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::operation("open_sqlite_in_memory", e))?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub const fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    fn initialize(&self) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        configure_connection(&conn)?;
        conn.execute_batch(SCHEMA)
            .map_err(|e| Error::operation("create_schema", e))
    }

    fn study_set_from_row(row: &Row<'_>) -> rusqlite::Result<StudySet> {
        let created_at: i64 = row.get(4)?;
        Ok(StudySet {
            id: StudySetId::new(row.get::<_, String>(0)?),
            title: row.get(1)?,
            owner_id: UserId::new(row.get::<_, String>(2)?),
            description: row.get(3)?,
            created_at: u64::try_from(created_at).unwrap_or(0),
        })
    }
}

impl StudySetStore for SqliteStudySetStore {
    #[instrument(skip(self, request), fields(operation = "create_study_set", backend = BACKEND, owner = %request.owner_id))]
    fn create_study_set(&self, request: &NewStudySet) -> Result<StudySetId> {
        let start = Instant::now();
        let result = (|| {
            let id = StudySetId::new(Uuid::new_v4().to_string());
            // rusqlite has no ToSql for u64
            let created_at = i64::try_from(current_timestamp()).unwrap_or(i64::MAX);

            let conn = acquire_lock(&self.conn);
            conn.execute(
                "INSERT INTO study_sets (id, title, owner_id, description, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id.as_str(),
                    request.title,
                    request.owner_id.as_str(),
                    request.description,
                    created_at
                ],
            )
            .map_err(|e| Error::operation("insert_study_set", e))?;
            Ok(id)
        })();

        record_operation_metrics(BACKEND, "create_study_set", start, &result);
        result
    }

    #[instrument(skip(self, terms), fields(operation = "create_terms_batch", backend = BACKEND, set_id = %set_id, count = terms.len()))]
    fn create_terms_batch(&self, set_id: &StudySetId, terms: &[NewTerm]) -> Result<usize> {
        let start = Instant::now();
        let result = (|| {
            let mut conn = acquire_lock(&self.conn);
            let tx = conn
                .transaction()
                .map_err(|e| Error::operation("begin_transaction", e))?;

            let mut inserted = 0;
            {
                let mut stmt = tx
                    .prepare_cached(
                        "INSERT INTO terms (id, study_set_id, word, definition, rank)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                    )
                    .map_err(|e| Error::operation("prepare_insert_term", e))?;
                for term in terms {
                    inserted += stmt
                        .execute(params![
                            Uuid::new_v4().to_string(),
                            set_id.as_str(),
                            term.word,
                            term.definition,
                            term.rank
                        ])
                        .map_err(|e| Error::operation("insert_term", e))?;
                }
            }

            // Dropping an uncommitted transaction rolls it back
            tx.commit()
                .map_err(|e| Error::operation("commit_transaction", e))?;
            Ok(inserted)
        })();

        record_operation_metrics(BACKEND, "create_terms_batch", start, &result);
        result
    }

    #[instrument(skip(self), fields(operation = "list_study_sets", backend = BACKEND))]
    fn list_study_sets(&self, owner: &UserId) -> Result<Vec<StudySet>> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            let mut stmt = conn
                .prepare(
                    "SELECT id, title, owner_id, description, created_at FROM study_sets
                     WHERE owner_id = ?1 ORDER BY created_at, rowid",
                )
                .map_err(|e| Error::operation("prepare_list_study_sets", e))?;
            let rows = stmt
                .query_map(params![owner.as_str()], Self::study_set_from_row)
                .map_err(|e| Error::operation("list_study_sets", e))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::operation("read_study_set_row", e))
        })();

        record_operation_metrics(BACKEND, "list_study_sets", start, &result);
        result
    }

    #[instrument(skip(self), fields(operation = "get_study_set", backend = BACKEND, set_id = %id))]
    fn get_study_set(&self, id: &StudySetId) -> Result<Option<StudySet>> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            conn.query_row(
                "SELECT id, title, owner_id, description, created_at FROM study_sets WHERE id = ?1",
                params![id.as_str()],
                Self::study_set_from_row,
            )
            .optional()
            .map_err(|e| Error::operation("get_study_set", e))
        })();

        record_operation_metrics(BACKEND, "get_study_set", start, &result);
        result
    }

    #[instrument(skip(self), fields(operation = "list_terms", backend = BACKEND, set_id = %set_id))]
    fn list_terms(&self, set_id: &StudySetId) -> Result<Vec<Term>> {
        let start = Instant::now();
        let result = (|| {
            let conn = acquire_lock(&self.conn);
            let mut stmt = conn
                .prepare(
                    "SELECT id, study_set_id, word, definition, rank FROM terms
                     WHERE study_set_id = ?1 ORDER BY rowid",
                )
                .map_err(|e| Error::operation("prepare_list_terms", e))?;
            let rows = stmt
                .query_map(params![set_id.as_str()], |row| {
                    Ok(Term {
                        id: row.get(0)?,
                        study_set_id: StudySetId::new(row.get::<_, String>(1)?),
                        word: row.get(2)?,
                        definition: row.get(3)?,
                        rank: row.get(4)?,
                    })
                })
                .map_err(|e| Error::operation("list_terms", e))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| Error::operation("read_term_row", e))
        })();

        record_operation_metrics(BACKEND, "list_terms", start, &result);
        result
    }
}
