use super::{format_timestamp, now};
use crate::db::Database;
use crate::error::{is_unique_violation, StoreError, StoreResult};

/// Follow edges. A row `(user_id, follower_id)` means `user_id` follows
/// `follower_id`, which puts `follower_id`'s posts in `user_id`'s feed.
#[derive(Clone)]
pub struct FollowerRepository {
    db: Database,
}

impl FollowerRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Follow a user. Following twice is a `Conflict`.
    pub fn follow(&self, user_id: i64, target_id: i64) -> StoreResult<()> {
        let conn = self.db.connection()?;
        conn.execute(
            "INSERT INTO followers (user_id, follower_id, created_at) VALUES (?, ?, ?)",
            (user_id, target_id, format_timestamp(&now())),
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Conflict
            } else {
                StoreError::from(e)
            }
        })?;
        Ok(())
    }

    /// Unfollow a user; `NotFound` when no edge existed
    pub fn unfollow(&self, user_id: i64, target_id: i64) -> StoreResult<()> {
        let conn = self.db.connection()?;
        let rows_affected = conn.execute(
            "DELETE FROM followers WHERE user_id = ? AND follower_id = ?",
            (user_id, target_id),
        )?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Ids of the users `user_id` follows, most recent first
    pub fn following(&self, user_id: i64) -> StoreResult<Vec<i64>> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(
            "SELECT follower_id FROM followers WHERE user_id = ? ORDER BY created_at DESC, follower_id DESC",
        )?;

        let following = stmt
            .query_map([user_id], |row| row.get(0))?
            .collect::<Result<Vec<i64>, _>>()?;

        Ok(following)
    }

    /// Number of users following `user_id`
    pub fn follower_count(&self, user_id: i64) -> StoreResult<usize> {
        let conn = self.db.connection()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM followers WHERE follower_id = ?",
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
