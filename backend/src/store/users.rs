//! Accounts and login sessions.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use common::model::user::UserProfile;
use rusqlite::{params, Connection, OptionalExtension};

use super::{now, StoreError};

/// Inserts a new account; `Conflict` when the email is taken.
pub fn create_user(
    conn: &Connection,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<UserProfile, StoreError> {
    let taken = conn
        .query_row("SELECT 1 FROM users WHERE email = ?1", params![email], |_| Ok(()))
        .optional()?
        .is_some();
    if taken {
        return Err(StoreError::Conflict("User already exists".to_string()));
    }

    let stamp = now();
    conn.execute(
        "INSERT INTO users (name, email, password_hash, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![name, email, password_hash, stamp],
    )?;

    Ok(UserProfile {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// Profile and stored password hash for `email`.
pub fn find_credentials(
    conn: &Connection,
    email: &str,
) -> Result<Option<(UserProfile, String)>, StoreError> {
    let found = conn
        .query_row(
            "SELECT id, name, email, password_hash FROM users WHERE email = ?1",
            params![email],
            |row| {
                Ok((
                    UserProfile {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                    },
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;
    Ok(found)
}

pub fn create_session(
    conn: &Connection,
    user_id: i64,
    token: &str,
    ttl: Duration,
) -> Result<(), StoreError> {
    let expires_at = (Utc::now() + ttl).to_rfc3339_opts(SecondsFormat::Secs, true);
    conn.execute(
        "INSERT INTO sessions (token, user_id, expires_at) VALUES (?1, ?2, ?3)",
        params![token, user_id, expires_at],
    )?;
    Ok(())
}

/// The user behind a session token, if the session exists and has not expired.
/// Expired sessions are removed on sight.
pub fn session_user(conn: &Connection, token: &str) -> Result<Option<UserProfile>, StoreError> {
    let row = conn
        .query_row(
            "SELECT u.id, u.name, u.email, s.expires_at
             FROM sessions s JOIN users u ON u.id = s.user_id
             WHERE s.token = ?1",
            params![token],
            |row| {
                Ok((
                    UserProfile {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                    },
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((user, expires_at)) = row else {
        return Ok(None);
    };

    let expired = DateTime::parse_from_rfc3339(&expires_at)
        .map(|at| at.with_timezone(&Utc) <= Utc::now())
        .unwrap_or(true);
    if expired {
        delete_session(conn, token)?;
        return Ok(None);
    }
    Ok(Some(user))
}

pub fn delete_session(conn: &Connection, token: &str) -> Result<(), StoreError> {
    conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(())
}
