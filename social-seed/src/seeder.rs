use anyhow::{ensure, Result};
use rand::Rng;
use social_store::{Storage, StoreError};
use social_types::{Comment, Post, User};

use crate::corpus::{COMMENTS, CONTENTS, TAGS, TITLES, USERNAMES};

/// How many of each entity to create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            users: 100,
            posts: 200,
            comments: 500,
        }
    }
}

/// Entities written by a completed run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Log a failed insert and turn it into the error that ends the run
fn abort(entity: &str, index: usize, err: StoreError) -> anyhow::Error {
    tracing::error!(entity, index, error = %err, "Error seeding {}", entity);
    anyhow::Error::new(err).context(format!("Failed to seed {} #{}", entity, index))
}

/// Users named `<Name><i>` with matching example.com emails
pub fn generate_users(n: usize, password_hash: &str) -> Vec<User> {
    (0..n)
        .map(|i| {
            let username = format!("{}{}", USERNAMES[i % USERNAMES.len()], i);
            let email = format!("{}@example.com", username);
            User::new(username, email, password_hash)
        })
        .collect()
}

/// Posts by random users from `users`, each with two random tags
pub fn generate_posts<R: Rng + ?Sized>(n: usize, users: &[User], rng: &mut R) -> Result<Vec<Post>> {
    ensure!(n == 0 || !users.is_empty(), "cannot generate posts without users");

    Ok((0..n)
        .map(|_| {
            let user = pick(users, rng);
            let title = *pick(TITLES, rng);
            let content = *pick(CONTENTS, rng);
            let tags = vec![pick(TAGS, rng).to_string(), pick(TAGS, rng).to_string()];
            Post::new(user.id, title, content, tags)
        })
        .collect())
}

/// Comments by random users on random posts
pub fn generate_comments<R: Rng + ?Sized>(
    n: usize,
    users: &[User],
    posts: &[Post],
    rng: &mut R,
) -> Result<Vec<Comment>> {
    ensure!(
        n == 0 || (!users.is_empty() && !posts.is_empty()),
        "cannot generate comments without users and posts"
    );

    Ok((0..n)
        .map(|_| {
            let content = *pick(COMMENTS, rng);
            let user = pick(users, rng);
            let post = pick(posts, rng);
            Comment::new(post.id, user.id, content)
        })
        .collect())
}

/// Create users, then posts, then comments, one insert at a time.
///
/// The first failed insert stops the run: nothing of any kind is written
/// after it and nothing already written is rolled back.
pub fn seed<R: Rng + ?Sized>(
    storage: &Storage,
    counts: &SeedCounts,
    password_hash: &str,
    rng: &mut R,
) -> Result<SeedReport> {
    ensure!(
        counts.posts == 0 || counts.users > 0,
        "posts need at least one user to reference"
    );
    ensure!(
        counts.comments == 0 || (counts.users > 0 && counts.posts > 0),
        "comments need at least one user and one post to reference"
    );

    let mut report = SeedReport::default();

    let mut users = generate_users(counts.users, password_hash);
    for (i, user) in users.iter_mut().enumerate() {
        storage.users.create(user).map_err(|e| abort("user", i, e))?;
        report.users += 1;
    }
    tracing::info!(count = report.users, "Seeded users");

    let mut posts = generate_posts(counts.posts, &users, rng)?;
    for (i, post) in posts.iter_mut().enumerate() {
        storage.posts.create(post).map_err(|e| abort("post", i, e))?;
        report.posts += 1;
    }
    tracing::info!(count = report.posts, "Seeded posts");

    let mut comments = generate_comments(counts.comments, &users, &posts, rng)?;
    for (i, comment) in comments.iter_mut().enumerate() {
        storage.comments.create(comment).map_err(|e| abort("comment", i, e))?;
        report.comments += 1;
    }
    tracing::info!(count = report.comments, "Seeded comments");

    Ok(report)
}
