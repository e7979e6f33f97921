use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.to_rfc3339();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Password hash; never leaves the process in serialized form
    #[serde(skip_serializing, default)]
    pub password: String,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved user. `id` and `created_at` are assigned on insert.
    pub fn new(username: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: 0,
            username: username.into(),
            email: email.into(),
            password: password.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub content: String,
    pub title: String,
    pub user_id: i64,
    pub tags: Vec<String>,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "datetime_format")]
    pub updated_at: DateTime<Utc>,
    /// Optimistic lock; bumped by one on every successful update
    pub version: i64,
    /// Only filled in by read helpers that load the thread
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Author record, when a read helper loads it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Post {
    /// Build an unsaved post. `id`, timestamps and `version` are assigned on insert.
    pub fn new(user_id: i64, title: impl Into<String>, content: impl Into<String>, tags: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            content: content.into(),
            title: title.into(),
            user_id,
            tags,
            created_at: now,
            updated_at: now,
            version: 0,
            comments: Vec::new(),
            user: None,
        }
    }
}

/// A feed row: the post plus values aggregated by the feed query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithMetadata {
    #[serde(flatten)]
    pub post: Post,
    pub comments_count: i64,
    /// Username of the author (for display)
    #[serde(default)]
    pub author_username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub author_username: Option<String>,
}

impl Comment {
    pub fn new(post_id: i64, user_id: i64, content: impl Into<String>) -> Self {
        Self {
            id: 0,
            post_id,
            user_id,
            content: content.into(),
            created_at: Utc::now(),
            author_username: None,
        }
    }
}
