//! Durable mix storage on SQLite with batched change notifications.
//!
//! Every write runs as one batch: buffered row signals are cleared, the
//! statement(s) run inside a transaction, and after commit the store re-reads
//! the ordered id list, diffs it against the last observed ordering and calls
//! the registered observer once. Failed writes notify nobody.

mod diff;
pub mod error;
pub mod schema;
#[cfg(test)]
mod tests;

pub use error::{CorruptReason, StoreError, StoreResult};

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::hooks::Action;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Transaction};

use emojimix_types::{ChangeNotification, ColorRgba, Mix, MixId, PresentableMix};

use diff::RowChange;

/// Single-slot change observer.
pub type Observer = Box<dyn FnMut(&ChangeNotification)>;

type PendingChanges = Arc<Mutex<Vec<(MixId, RowChange)>>>;

const SELECT_ORDERED: &str =
    "SELECT id, symbols, color_hex FROM mixes ORDER BY symbols ASC, id ASC";

pub struct MixStore {
    conn: Connection,
    /// Raw row signals from the engine hook since the current batch began.
    pending: PendingChanges,
    /// Signals from committed writes whose batch could not be reported yet.
    carried: Vec<(MixId, RowChange)>,
    /// Ids in sorted order as of the last delivered batch.
    observed: Vec<MixId>,
    observer: Option<Observer>,
}

impl MixStore {
    /// Open (or create) a database file.
    ///
    /// Uses WAL mode so a crash mid-write leaves the previous contents intact.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        log::info!(target: "store", "opened {}", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        schema::create_tables(&conn)?;

        let pending: PendingChanges = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&pending);
        conn.update_hook(Some(
            move |action: Action, _db: &str, table: &str, rowid: i64| {
                if table != schema::MIX_TABLE {
                    return;
                }
                let change = match action {
                    Action::SQLITE_INSERT => RowChange::Insert,
                    Action::SQLITE_DELETE => RowChange::Delete,
                    Action::SQLITE_UPDATE => RowChange::Update,
                    _ => return,
                };
                if let Ok(mut pending) = sink.lock() {
                    pending.push((MixId::new(rowid), change));
                }
            },
        ));

        let observed = ordered_ids(&conn)?;
        Ok(Self {
            conn,
            pending,
            carried: Vec::new(),
            observed,
            observer: None,
        })
    }

    /// Install the observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: impl FnMut(&ChangeNotification) + 'static) {
        if self.observer.is_some() {
            log::debug!(target: "store", "replacing change observer");
        }
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Persist a new mix and return its id.
    pub fn create(&mut self, mix: &Mix) -> StoreResult<MixId> {
        validate(mix)?;
        let color_hex = mix.color.to_hex();
        let id = self.write_batch(|tx| {
            tx.execute(
                "INSERT INTO mixes (symbols, color_hex) VALUES (?1, ?2)",
                params![mix.symbols, color_hex],
            )?;
            Ok(MixId::new(tx.last_insert_rowid()))
        })?;
        log::debug!(target: "store", "created mix {} {}", id, mix.symbols);
        Ok(id)
    }

    /// Replace the symbols and color of an existing mix.
    pub fn update(&mut self, id: MixId, mix: &Mix) -> StoreResult<()> {
        validate(mix)?;
        let color_hex = mix.color.to_hex();
        self.write_batch(|tx| {
            let changed = tx.execute(
                "UPDATE mixes SET symbols = ?1, color_hex = ?2 WHERE id = ?3",
                params![mix.symbols, color_hex, id.get()],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(id));
            }
            Ok(())
        })
    }

    /// Remove one mix. Returns whether a row was removed.
    pub fn delete(&mut self, id: MixId) -> StoreResult<bool> {
        let removed = self.write_batch(|tx| {
            Ok(tx.execute("DELETE FROM mixes WHERE id = ?1", params![id.get()])? > 0)
        })?;
        if removed {
            log::debug!(target: "store", "deleted mix {}", id);
        }
        Ok(removed)
    }

    /// Remove every mix in one transaction and return how many were removed.
    pub fn delete_all(&mut self) -> StoreResult<usize> {
        // Row by row: an unconditional DELETE lets SQLite truncate the table
        // without reporting the rows to the update hook.
        let removed = self.write_batch(|tx| {
            let ids = ordered_ids(tx)?;
            let mut stmt = tx.prepare("DELETE FROM mixes WHERE id = ?1")?;
            for id in &ids {
                stmt.execute(params![id.get()])?;
            }
            Ok(ids.len())
        })?;
        log::debug!(target: "store", "deleted all {} mixes", removed);
        Ok(removed)
    }

    /// All mixes sorted by symbols. Fails as a whole on the first corrupt row.
    pub fn list_all(&self) -> StoreResult<Vec<Mix>> {
        Ok(self.records()?.into_iter().map(|r| r.to_mix()).collect())
    }

    /// Like [`list_all`](Self::list_all), keeping the storage ids.
    pub fn records(&self) -> StoreResult<Vec<PresentableMix>> {
        let mut stmt = self.conn.prepare(SELECT_ORDERED)?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Value>(1)?,
                row.get::<_, Value>(2)?,
            ))
        })?;

        let mut mixes = Vec::new();
        for row in rows {
            let (id, symbols, color_hex) = row?;
            let id = MixId::new(id);
            mixes.push(PresentableMix::new(id, decode_record(id, symbols, color_hex)?));
        }
        Ok(mixes)
    }

    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM mixes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Pick up writes made by other connections to the same database and
    /// notify the observer if the ordering changed.
    pub fn refresh(&mut self) -> StoreResult<()> {
        self.end_batch()
    }

    fn write_batch<T>(
        &mut self,
        op: impl FnOnce(&Transaction<'_>) -> StoreResult<T>,
    ) -> StoreResult<T> {
        self.begin_batch();
        let result = self
            .conn
            .transaction()
            .map_err(StoreError::from)
            .and_then(|tx| {
                let value = op(&tx)?;
                tx.commit()?;
                Ok(value)
            });

        match result {
            Ok(value) => {
                // The write is durable at this point; a failed report is
                // retried by the next batch.
                if let Err(e) = self.end_batch() {
                    log::warn!(target: "store", "write committed, notification deferred: {}", e);
                }
                Ok(value)
            }
            Err(e) => {
                self.take_pending();
                log::warn!(target: "store", "write failed, batch discarded: {}", e);
                Err(e)
            }
        }
    }

    fn begin_batch(&self) {
        self.take_pending();
    }

    fn end_batch(&mut self) -> StoreResult<()> {
        let mut raw = std::mem::take(&mut self.carried);
        raw.extend(self.take_pending());
        let current = match ordered_ids(&self.conn) {
            Ok(current) => current,
            Err(e) => {
                self.carried = raw;
                return Err(e);
            }
        };
        let rows = diff::coalesce(&raw);
        let note = diff::diff(&self.observed, &current, &rows);
        self.observed = current;

        if note.is_empty() {
            return Ok(());
        }
        log::debug!(
            target: "store",
            "batch: {} inserted, {} deleted, {} updated, {} moved",
            note.inserted.len(),
            note.deleted.len(),
            note.updated.len(),
            note.moved.len()
        );
        if let Some(observer) = self.observer.as_mut() {
            observer(&note);
        }
        Ok(())
    }

    fn take_pending(&self) -> Vec<(MixId, RowChange)> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

fn validate(mix: &Mix) -> StoreResult<()> {
    if mix.symbols.is_empty() {
        return Err(StoreError::InvalidMix("symbols must not be empty"));
    }
    Ok(())
}

fn ordered_ids(conn: &Connection) -> StoreResult<Vec<MixId>> {
    let mut stmt = conn.prepare("SELECT id FROM mixes ORDER BY symbols ASC, id ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(MixId::new(row?));
    }
    Ok(ids)
}

fn decode_record(id: MixId, symbols: Value, color_hex: Value) -> StoreResult<Mix> {
    let corrupt = |reason| StoreError::CorruptRecord { id, reason };

    let symbols = match symbols {
        Value::Text(s) if !s.is_empty() => s,
        _ => return Err(corrupt(CorruptReason::MissingSymbols)),
    };
    let color_hex = match color_hex {
        Value::Text(s) => s,
        _ => return Err(corrupt(CorruptReason::MissingColor)),
    };
    let color = ColorRgba::from_hex(&color_hex)
        .map_err(|e| corrupt(CorruptReason::InvalidColor(e)))?;

    Ok(Mix::new(symbols, color))
}

#[cfg(test)]
impl MixStore {
    /// Raw connection, for tests that plant rows the store would never write.
    pub(crate) fn conn_for_tests(&self) -> &Connection {
        &self.conn
    }
}
