mod user_repository;
mod post_repository;
mod comment_repository;
mod follower_repository;

pub use user_repository::UserRepository;
pub use post_repository::PostRepository;
pub use comment_repository::CommentRepository;
pub use follower_repository::FollowerRepository;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

/// Current time at the precision timestamps are stored with
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339, so string order in SQL equals time order
pub(crate) fn format_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn read_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    raw.parse::<DateTime<Utc>>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn read_tags(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use social_types::{Post, User};

    use crate::db::Database;

    pub fn test_db() -> Database {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");
        db
    }

    pub fn insert_user(db: &Database, name: &str) -> User {
        let mut user = User::new(name, format!("{}@example.com", name), "hash");
        super::UserRepository::new(db.clone())
            .create(&mut user)
            .expect("Failed to create user");
        user
    }

    pub fn insert_post(db: &Database, user_id: i64, title: &str, content: &str, tags: &[&str]) -> Post {
        let mut post = Post::new(
            user_id,
            title,
            content,
            tags.iter().map(|t| t.to_string()).collect(),
        );
        super::PostRepository::new(db.clone())
            .create(&mut post)
            .expect("Failed to create post");
        post
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_sort_lexically() {
        let earlier: DateTime<Utc> = "2024-01-01T09:00:00Z".parse().unwrap();
        let later: DateTime<Utc> = "2024-01-01T09:00:00.000001Z".parse().unwrap();

        let a = format_timestamp(&earlier);
        let b = format_timestamp(&later);
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(a, "2024-01-01T09:00:00.000000Z");
    }
}
