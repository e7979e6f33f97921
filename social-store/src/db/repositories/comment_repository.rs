use social_types::Comment;

use super::{format_timestamp, now, read_timestamp};
use crate::db::Database;
use crate::error::StoreResult;

#[derive(Clone)]
pub struct CommentRepository {
    db: Database,
}

impl CommentRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a comment; id and creation time are written back
    pub fn create(&self, comment: &mut Comment) -> StoreResult<()> {
        let conn = self.db.connection()?;
        let created_at = now();

        let id: i64 = conn.query_row(
            "INSERT INTO comments (post_id, user_id, content, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id",
            (
                comment.post_id,
                comment.user_id,
                &comment.content,
                format_timestamp(&created_at),
            ),
            |row| row.get(0),
        )?;

        comment.id = id;
        comment.created_at = created_at;
        Ok(())
    }

    /// Comments on a post, newest first
    pub fn get_by_post_id(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(
            "SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, u.username
             FROM comments c
             LEFT JOIN users u ON u.id = c.user_id
             WHERE c.post_id = ?
             ORDER BY c.created_at DESC, c.id DESC",
        )?;

        let comments = stmt
            .query_map([post_id], |row| {
                Ok(Comment {
                    id: row.get(0)?,
                    post_id: row.get(1)?,
                    user_id: row.get(2)?,
                    content: row.get(3)?,
                    created_at: read_timestamp(row, 4)?,
                    author_username: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::test_support::{insert_post, insert_user, test_db};

    #[test]
    fn test_comments_listed_newest_first_with_author() {
        let db = test_db();
        let author = insert_user(&db, "EnergeticRaven");
        let reader = insert_user(&db, "BravePanda");
        let post = insert_post(&db, author.id, "T", "C", &[]);
        let other = insert_post(&db, author.id, "Other", "C", &[]);
        let repo = CommentRepository::new(db);

        let mut first = Comment::new(post.id, reader.id, "Thanks for sharing!");
        let mut second = Comment::new(post.id, author.id, "Keep up the good work!");
        let mut elsewhere = Comment::new(other.id, reader.id, "Wow!");
        repo.create(&mut first).expect("Failed to create comment");
        repo.create(&mut second).expect("Failed to create comment");
        repo.create(&mut elsewhere).expect("Failed to create comment");
        assert!(second.id > first.id);

        let comments = repo.get_by_post_id(post.id).expect("Failed to list comments");
        let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(comments[0].author_username.as_deref(), Some("EnergeticRaven"));
        assert_eq!(comments[1].author_username.as_deref(), Some("BravePanda"));
        assert_eq!(comments[1].content, "Thanks for sharing!");
    }

    #[test]
    fn test_post_without_comments_lists_empty() {
        let db = test_db();
        let repo = CommentRepository::new(db);
        assert!(repo.get_by_post_id(5).expect("Failed to list comments").is_empty());
    }
}
