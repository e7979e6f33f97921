use rusqlite::OptionalExtension;

use social_types::User;

use super::{format_timestamp, now, read_timestamp};
use crate::db::Database;
use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a user and write the generated id and creation time back onto it.
    /// Duplicate usernames or emails come back as a plain database error.
    pub fn create(&self, user: &mut User) -> StoreResult<()> {
        let conn = self.db.connection()?;
        let created_at = now();

        let id: i64 = conn.query_row(
            "INSERT INTO users (username, email, password, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id",
            (
                &user.username,
                &user.email,
                &user.password,
                format_timestamp(&created_at),
            ),
            |row| row.get(0),
        )?;

        user.id = id;
        user.created_at = created_at;
        Ok(())
    }

    /// Get user by ID
    pub fn get_by_id(&self, user_id: i64) -> StoreResult<User> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id, username, email, password, created_at
             FROM users
             WHERE id = ?",
        )?;

        let user = stmt
            .query_row([user_id], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    password: row.get(3)?,
                    created_at: read_timestamp(row, 4)?,
                })
            })
            .optional()?;

        user.ok_or(StoreError::NotFound)
    }
}
