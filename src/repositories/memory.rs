use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::post::Post;
use crate::repositories::post_repository::{PostRepository, StoreError};

/// Embedded post store backed by an ordered map. Used by the test suite and
/// by the server when no Postgres host is configured.
#[derive(Default)]
pub struct MemoryPostRepository {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Post>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, title: &str, content: &str) -> Result<i64, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(
            id,
            Post {
                id,
                title: title.to_string(),
                content: content.to_string(),
            },
        );
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.get(&id).cloned())
    }

    async fn scan_desc(&self, limit: i64, offset: i64) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let limit = limit.max(0) as usize;
        let offset = offset.max(0) as usize;
        Ok(inner
            .rows
            .values()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, post: &Post) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.get_mut(&post.id) {
            Some(row) => {
                *row = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Ok(inner.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.len() as i64)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.clear();
        Ok(())
    }
}
