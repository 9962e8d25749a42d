use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::user::TIMESTAMP_FORMAT;
use crate::models::User;

// ── Users ──

pub fn find_user_by_email_or_phone(
    conn: &Connection,
    email: &str,
    phone: &str,
) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT id FROM users WHERE email = ?1 OR phone = ?2 LIMIT 1",
        params![email, phone],
        |row| row.get(0),
    )
    .optional()
}

/// Inserts a new, unverified user and returns its assigned id.
pub fn insert_user(
    conn: &Connection,
    business_name: &str,
    email: &str,
    phone: &str,
    created_at: NaiveDateTime,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (business_name, email, phone, is_verified, created_at)
         VALUES (?1, ?2, ?3, 0, ?4)",
        params![
            business_name,
            email,
            phone,
            created_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// True when the store rejected a write on a UNIQUE constraint.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

pub fn get_user(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    conn.query_row(
        "SELECT id, business_name, email, phone, is_verified, created_at
         FROM users WHERE id = ?1",
        params![id],
        parse_user_row,
    )
    .optional()
}

pub fn latest_created_at(conn: &Connection) -> rusqlite::Result<Option<NaiveDateTime>> {
    let latest: Option<String> =
        conn.query_row("SELECT MAX(created_at) FROM users", [], |row| row.get(0))?;

    latest
        .map(|s| {
            NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
            })
        })
        .transpose()
}

pub fn count_users(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let created_at_str: String = row.get(5)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, TIMESTAMP_FORMAT)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(User {
        id: row.get(0)?,
        business_name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        is_verified: row.get(4)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use chrono::Utc;

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    #[test]
    fn test_insert_and_get_user() {
        let conn = db::init_db(":memory:").unwrap();
        let id = insert_user(&conn, "Acme", "a@x.com", "+111", now()).unwrap();

        let user = get_user(&conn, id).unwrap().unwrap();
        assert_eq!(user.business_name, "Acme");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.phone, "+111");
        assert!(!user.is_verified);
    }

    #[test]
    fn test_get_missing_user() {
        let conn = db::init_db(":memory:").unwrap();
        assert!(get_user(&conn, 42).unwrap().is_none());
    }

    #[test]
    fn test_find_by_email_or_phone() {
        let conn = db::init_db(":memory:").unwrap();
        let id = insert_user(&conn, "Acme", "a@x.com", "+111", now()).unwrap();

        assert_eq!(find_user_by_email_or_phone(&conn, "a@x.com", "+999").unwrap(), Some(id));
        assert_eq!(find_user_by_email_or_phone(&conn, "b@x.com", "+111").unwrap(), Some(id));
        assert_eq!(find_user_by_email_or_phone(&conn, "b@x.com", "+999").unwrap(), None);
    }

    #[test]
    fn test_unique_constraint_on_email() {
        let conn = db::init_db(":memory:").unwrap();
        insert_user(&conn, "Acme", "a@x.com", "+111", now()).unwrap();

        let err = insert_user(&conn, "Other", "a@x.com", "+222", now()).unwrap_err();
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn test_unique_constraint_on_phone() {
        let conn = db::init_db(":memory:").unwrap();
        insert_user(&conn, "Acme", "a@x.com", "+111", now()).unwrap();

        let err = insert_user(&conn, "Other", "b@x.com", "+111", now()).unwrap_err();
        assert!(is_unique_violation(&err));
        assert_eq!(count_users(&conn).unwrap(), 1);
    }
}
