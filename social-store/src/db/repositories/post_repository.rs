use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension, Row};

use social_types::{FeedQuery, Post, PostWithMetadata};

use super::{format_timestamp, now, read_tags, read_timestamp};
use crate::db::conditions::Conditions;
use crate::db::connection::FOLD_FUNCTION;
use crate::db::Database;
use crate::error::{StoreError, StoreResult};

#[derive(Clone)]
pub struct PostRepository {
    db: Database,
}

/// Columns read by `row_to_post`, in order
const POST_COLUMNS: &str =
    "p.id, p.content, p.title, p.user_id, p.tags, p.created_at, p.updated_at, p.version";

fn row_to_post(row: &Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        content: row.get(1)?,
        title: row.get(2)?,
        user_id: row.get(3)?,
        tags: read_tags(row, 4)?,
        created_at: read_timestamp(row, 5)?,
        updated_at: read_timestamp(row, 6)?,
        version: row.get(7)?,
        comments: Vec::new(),
        user: None,
    })
}

/// Escape LIKE wildcards so the search text matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Predicates selecting the posts in `user_id`'s feed
pub(crate) fn feed_conditions(user_id: i64, query: &FeedQuery) -> StoreResult<Conditions> {
    let mut conditions = Conditions::new();

    conditions.push(
        "visible_author",
        "p.user_id = ? OR p.user_id IN (SELECT f.follower_id FROM followers f WHERE f.user_id = ?)",
        [Value::Integer(user_id), Value::Integer(user_id)],
    );

    if !query.search.is_empty() {
        let pattern = format!("%{}%", escape_like(&query.search.to_lowercase()));
        conditions.push(
            "search",
            format!(
                r"{f}(p.title) LIKE ? ESCAPE '\' OR {f}(p.content) LIKE ? ESCAPE '\'",
                f = FOLD_FUNCTION
            ),
            [Value::Text(pattern.clone()), Value::Text(pattern)],
        );
    }

    if !query.tags.is_empty() {
        conditions.push(
            "tags_overlap",
            "EXISTS (SELECT 1 FROM json_each(p.tags) AS t
                     WHERE t.value IN (SELECT value FROM json_each(?)))",
            [Value::Text(serde_json::to_string(&query.tags)?)],
        );
    }

    Ok(conditions)
}

impl PostRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Insert a post; id, timestamps and the initial version are written back
    pub fn create(&self, post: &mut Post) -> StoreResult<()> {
        let conn = self.db.connection()?;
        let created_at = now();
        let tags = serde_json::to_string(&post.tags)?;

        let (id, version): (i64, i64) = conn.query_row(
            "INSERT INTO posts (content, title, user_id, tags, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, version",
            (
                &post.content,
                &post.title,
                post.user_id,
                tags,
                format_timestamp(&created_at),
                format_timestamp(&created_at),
            ),
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        post.id = id;
        post.version = version;
        post.created_at = created_at;
        post.updated_at = created_at;
        Ok(())
    }

    /// Get a single post by ID
    pub fn get_by_id(&self, post_id: i64) -> StoreResult<Post> {
        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM posts p WHERE p.id = ?",
            POST_COLUMNS
        ))?;

        let post = stmt.query_row([post_id], row_to_post).optional()?;
        post.ok_or(StoreError::NotFound)
    }

    /// Delete a post. Its comments are left in place.
    pub fn delete(&self, post_id: i64) -> StoreResult<()> {
        let conn = self.db.connection()?;
        let rows_affected = conn.execute("DELETE FROM posts WHERE id = ?", [post_id])?;

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Compare-and-swap update of title and content.
    ///
    /// Succeeds only while the stored version still equals `post.version`;
    /// the bumped version and new `updated_at` are then written back. A stale
    /// version or a missing post yields `NotFound` and leaves the row as it
    /// was, so callers re-fetch and retry.
    pub fn update(&self, post: &mut Post) -> StoreResult<()> {
        let conn = self.db.connection()?;
        let updated_at = now();

        let version: Option<i64> = conn
            .query_row(
                "UPDATE posts
                 SET title = ?, content = ?, updated_at = ?, version = version + 1
                 WHERE id = ? AND version = ?
                 RETURNING version",
                (
                    &post.title,
                    &post.content,
                    format_timestamp(&updated_at),
                    post.id,
                    post.version,
                ),
                |row| row.get(0),
            )
            .optional()?;

        match version {
            Some(version) => {
                post.version = version;
                post.updated_at = updated_at;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    /// Posts by `user_id` and the users they follow, filtered, counted and paged
    pub fn get_user_feed(&self, user_id: i64, query: &FeedQuery) -> StoreResult<Vec<PostWithMetadata>> {
        query.validate()?;

        let conditions = feed_conditions(user_id, query)?;
        let direction = query.sort.as_sql();
        let sql = format!(
            "SELECT {columns}, COUNT(c.id) AS comments_count, u.username
             FROM posts p
             LEFT JOIN comments c ON c.post_id = p.id
             LEFT JOIN users u ON u.id = p.user_id
             {where_clause}
             GROUP BY p.id
             ORDER BY p.created_at {direction}, p.id {direction}
             LIMIT ? OFFSET ?",
            columns = POST_COLUMNS,
            where_clause = conditions.where_clause(),
            direction = direction,
        );

        let mut params = conditions.params();
        params.push(Value::Integer(query.limit));
        params.push(Value::Integer(query.offset));

        let conn = self.db.connection()?;
        let mut stmt = conn.prepare(&sql)?;

        let feed = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(PostWithMetadata {
                    post: row_to_post(row)?,
                    comments_count: row.get(8)?,
                    author_username: row.get(9)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            user_id,
            filters = ?conditions.names(),
            rows = feed.len(),
            "Loaded user feed"
        );
        Ok(feed)
    }
}
