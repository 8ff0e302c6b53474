//! In-memory store adapter implementing the repository ports.
//!
//! Tables live behind one `RwLock`, acquired for exactly the scope of each
//! operation and released on every exit path, including panics elsewhere in
//! the request. The adapter contains no business logic: version checks are
//! mechanical comparisons, and the service layer decides what a conflict
//! means.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    BlogRepository, BlogRepositoryError, PostDraft, PostRepository, PostRepositoryError,
};
use crate::domain::{Blog, BlogId, Post, PostId};

use super::seed::{seed_rows, SeedSelection};

#[derive(Debug, Default)]
struct Tables {
    blogs: BTreeMap<BlogId, Blog>,
    posts: BTreeMap<PostId, Post>,
    next_post_id: i32,
}

/// Process-local store backing the sample.
///
/// `BTreeMap` tables give a deterministic store-default order (ascending id)
/// without promising anything stronger.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows with the selected seed data set.
    ///
    /// Used both by the startup initialiser and the demo reset action. Post
    /// ids restart from 1.
    pub fn reset(&self, selection: SeedSelection) -> Result<(), PostRepositoryError> {
        let rows = seed_rows(selection)?;
        let mut tables = self.write_tables()?;
        tables.blogs = rows.blogs.into_iter().map(|blog| (blog.id, blog)).collect();
        tables.posts.clear();
        tables.next_post_id = 1;
        let now = Utc::now();
        for (blog_id, title, content) in rows.posts {
            let id = Self::take_post_id(&mut tables)?;
            tables.posts.insert(
                id,
                Post {
                    id,
                    blog_id,
                    title: title.to_owned(),
                    content: content.to_owned(),
                    last_updated: now,
                    version: 1,
                },
            );
        }
        Ok(())
    }

    fn take_post_id(tables: &mut Tables) -> Result<PostId, PostRepositoryError> {
        let id = PostId::new(tables.next_post_id)
            .map_err(|err| PostRepositoryError::query(format!("post id sequence: {err}")))?;
        tables.next_post_id += 1;
        Ok(id)
    }

    fn read_tables(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, PostRepositoryError> {
        self.inner
            .read()
            .map_err(|_| PostRepositoryError::query("store lock poisoned"))
    }

    fn write_tables(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, PostRepositoryError> {
        self.inner
            .write()
            .map_err(|_| PostRepositoryError::query("store lock poisoned"))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list(&self, filter: Option<BlogId>) -> Result<Vec<Post>, PostRepositoryError> {
        let tables = self.read_tables()?;
        Ok(tables
            .posts
            .values()
            .filter(|post| filter.is_none_or(|blog_id| post.blog_id == blog_id))
            .cloned()
            .collect())
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let tables = self.read_tables()?;
        Ok(tables.posts.get(&id).cloned())
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, PostRepositoryError> {
        let mut tables = self.write_tables()?;
        let id = Self::take_post_id(&mut tables)?;
        let post = Post {
            id,
            blog_id: draft.blog_id,
            title: draft.title,
            content: draft.content,
            last_updated: Utc::now(),
            version: 1,
        };
        tables.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: PostId,
        expected_version: u32,
        draft: PostDraft,
    ) -> Result<Post, PostRepositoryError> {
        let mut tables = self.write_tables()?;
        let post = tables
            .posts
            .get_mut(&id)
            .ok_or(PostRepositoryError::NotFound { id })?;
        if post.version != expected_version {
            return Err(PostRepositoryError::version_conflict(
                id,
                expected_version,
                post.version,
            ));
        }
        post.blog_id = draft.blog_id;
        post.title = draft.title;
        post.content = draft.content;
        post.version += 1;
        post.last_updated = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> Result<Post, PostRepositoryError> {
        let mut tables = self.write_tables()?;
        tables
            .posts
            .remove(&id)
            .ok_or(PostRepositoryError::NotFound { id })
    }

    async fn count(&self) -> Result<usize, PostRepositoryError> {
        // Guard scope covers exactly this read.
        let tables = self.read_tables()?;
        Ok(tables.posts.len())
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError> {
        let tables = self
            .inner
            .read()
            .map_err(|_| BlogRepositoryError::query("store lock poisoned"))?;
        Ok(tables.blogs.values().cloned().collect())
    }

    async fn find(&self, id: BlogId) -> Result<Option<Blog>, BlogRepositoryError> {
        let tables = self
            .inner
            .read()
            .map_err(|_| BlogRepositoryError::query("store lock poisoned"))?;
        Ok(tables.blogs.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(blog: i32, title: &str) -> PostDraft {
        PostDraft {
            blog_id: BlogId::new(blog).expect("positive id"),
            title: title.to_owned(),
            content: "body".to_owned(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_version_one() {
        let store = InMemoryStore::new();
        let first = store.insert(draft(1, "a")).await.expect("insert");
        let second = store.insert(draft(1, "b")).await.expect("insert");
        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(first.version, 1);
    }

    #[tokio::test]
    async fn update_increments_version_and_rejects_stale_tokens() {
        let store = InMemoryStore::new();
        let post = store.insert(draft(1, "a")).await.expect("insert");

        let updated = store
            .update(post.id, post.version, draft(1, "a2"))
            .await
            .expect("first update wins");
        assert_eq!(updated.version, 2);
        assert_eq!(updated.title, "a2");

        let err = store
            .update(post.id, post.version, draft(1, "stale"))
            .await
            .expect_err("stale token loses");
        assert_eq!(
            err,
            PostRepositoryError::version_conflict(post.id, 1, 2)
        );

        let current = PostRepository::find(&store, post.id)
            .await
            .expect("find")
            .expect("post exists");
        assert_eq!(current.title, "a2");
    }

    #[tokio::test]
    async fn delete_of_a_missing_row_is_not_found() {
        let store = InMemoryStore::new();
        let id = PostId::new(999).expect("positive id");
        let err = store.delete(id).await.expect_err("nothing to delete");
        assert_eq!(err, PostRepositoryError::not_found(id));
    }

    #[tokio::test]
    async fn list_filters_by_blog() {
        let store = InMemoryStore::new();
        store.reset(SeedSelection::Medium).expect("seed");
        let all = PostRepository::list(&store, None).await.expect("list");
        let filter = BlogId::new(1).expect("positive id");
        let filtered = PostRepository::list(&store, Some(filter))
            .await
            .expect("filtered list");
        assert!(!filtered.is_empty());
        assert!(filtered.len() < all.len());
        assert!(filtered.iter().all(|post| post.blog_id == filter));
    }

    #[tokio::test]
    async fn reset_restarts_the_id_sequence() {
        let store = InMemoryStore::new();
        store.reset(SeedSelection::Small).expect("seed");
        let before = store.count().await.expect("count");
        store.insert(draft(1, "extra")).await.expect("insert");
        store.reset(SeedSelection::Small).expect("reseed");
        assert_eq!(store.count().await.expect("count"), before);
        let posts = PostRepository::list(&store, None).await.expect("list");
        assert_eq!(posts.first().map(|post| post.id.get()), Some(1));
    }
}
