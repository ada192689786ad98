//! Documents, always scoped to their owner: another user's row behaves
//! exactly like a missing one.

use common::model::document::{Document, DocumentId};
use common::requests::{ContentPayload, ContentUpdate};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{now, StoreError};

const COLUMNS: &str = "id, title, body, created_at, updated_at";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Document> {
    Ok(Document {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

/// The owner's documents, most recently updated first.
pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<Document>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM contents WHERE user_id = ?1 ORDER BY updated_at DESC, id DESC"
    ))?;
    let documents = stmt
        .query_map(params![user_id], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(documents)
}

pub fn get(conn: &Connection, user_id: i64, id: DocumentId) -> Result<Document, StoreError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM contents WHERE id = ?1 AND user_id = ?2"),
        params![id, user_id],
        from_row,
    )
    .optional()?
    .ok_or(StoreError::NotFound)
}

pub fn insert(
    conn: &Connection,
    user_id: i64,
    payload: &ContentPayload,
) -> Result<DocumentId, StoreError> {
    let stamp = now();
    conn.execute(
        "INSERT INTO contents (user_id, title, body, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![user_id, payload.title, payload.body, stamp],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Applies the present, non-empty fields of `changes` and bumps `updated_at`.
pub fn update(
    conn: &Connection,
    user_id: i64,
    id: DocumentId,
    changes: &ContentUpdate,
) -> Result<Document, StoreError> {
    let mut document = get(conn, user_id, id)?;

    if let Some(title) = changes.title.as_deref().filter(|t| !t.is_empty()) {
        document.title = title.to_string();
    }
    if let Some(body) = changes.body.as_deref().filter(|b| !b.is_empty()) {
        document.body = body.to_string();
    }
    let stamp = now();

    conn.execute(
        "UPDATE contents SET title = ?1, body = ?2, updated_at = ?3 WHERE id = ?4 AND user_id = ?5",
        params![document.title, document.body, stamp, id, user_id],
    )?;
    document.updated_at = Some(stamp);
    Ok(document)
}

pub fn delete(conn: &Connection, user_id: i64, id: DocumentId) -> Result<(), StoreError> {
    let removed = conn.execute(
        "DELETE FROM contents WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?;
    if removed == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
