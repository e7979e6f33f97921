use social_types::Post;

use crate::db::repositories::{CommentRepository, FollowerRepository, PostRepository, UserRepository};
use crate::db::Database;
use crate::error::StoreResult;

/// All repositories over one shared pool
#[derive(Clone)]
pub struct Storage {
    pub db: Database,
    pub users: UserRepository,
    pub posts: PostRepository,
    pub comments: CommentRepository,
    pub followers: FollowerRepository,
}

impl Storage {
    pub fn new(db: Database) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            posts: PostRepository::new(db.clone()),
            comments: CommentRepository::new(db.clone()),
            followers: FollowerRepository::new(db.clone()),
            db,
        }
    }

    /// A post with its comments and author attached.
    ///
    /// A post whose author no longer exists still loads, with `user` left empty.
    pub fn get_post_with_comments(&self, post_id: i64) -> StoreResult<Post> {
        let mut post = self.posts.get_by_id(post_id)?;
        post.comments = self.comments.get_by_post_id(post_id)?;
        post.user = match self.users.get_by_id(post.user_id) {
            Ok(user) => Some(user),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_types::{Comment, User};

    fn storage() -> Storage {
        let db = Database::in_memory().expect("Failed to create database");
        db.initialize().expect("Failed to initialize schema");
        Storage::new(db)
    }

    #[test]
    fn test_post_with_comments() {
        let storage = storage();
        let mut user = User::new("WisePanda", "WisePanda@example.com", "hash");
        storage.users.create(&mut user).expect("Failed to create user");

        let mut post = Post::new(user.id, "Title", "Body", vec!["ai".to_string()]);
        storage.posts.create(&mut post).expect("Failed to create post");

        for text in ["Great post!", "Super!"] {
            let mut comment = Comment::new(post.id, user.id, text);
            storage.comments.create(&mut comment).expect("Failed to create comment");
        }

        let loaded = storage
            .get_post_with_comments(post.id)
            .expect("Failed to load post");
        assert_eq!(loaded.comments.len(), 2);
        assert_eq!(loaded.comments[0].content, "Super!");
        let author = loaded.user.expect("author should be attached");
        assert_eq!(author.id, user.id);
        assert_eq!(author.username, "WisePanda");
    }

    #[test]
    fn test_post_with_missing_author_still_loads() {
        let storage = storage();
        let mut post = Post::new(42, "Orphan", "Body", Vec::new());
        storage.posts.create(&mut post).expect("Failed to create post");

        let loaded = storage
            .get_post_with_comments(post.id)
            .expect("Failed to load post");
        assert!(loaded.user.is_none());
        assert!(loaded.comments.is_empty());
    }

    #[test]
    fn test_missing_post_with_comments_is_not_found() {
        let storage = storage();
        assert!(storage
            .get_post_with_comments(1)
            .expect_err("no post")
            .is_not_found());
    }
}
