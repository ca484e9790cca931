use std::sync::Arc;

use log::debug;

use crate::dtos::post_dtos::{PostCreate, PostEdit, PostResponse, PostSearch};
use crate::error::PostError;
use crate::repositories::post_repository::PostRepository;

/// Query-and-mutation service for posts. Stateless between calls; the
/// repository owns every post record and all id assignment.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Inserts a new post. Field presence and non-blankness are enforced at
    /// the handler before this is called.
    pub async fn write(&self, create: PostCreate) -> Result<(), PostError> {
        let title = create.title.unwrap_or_default();
        let content = create.content.unwrap_or_default();
        let id = self.repo.insert(&title, &content).await?;
        debug!("wrote post id={id}");
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<PostResponse, PostError> {
        let post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound)?;
        Ok(post.into())
    }

    /// Returns one page of posts, newest first. An offset past the end of the
    /// table yields an empty page, not an error.
    pub async fn get_list(&self, search: PostSearch) -> Result<Vec<PostResponse>, PostError> {
        let posts = self.repo.scan_desc(search.limit(), search.offset()).await?;
        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// Partial update: a `None` field keeps the stored value, a `Some` field
    /// overwrites it. Never a full replace.
    pub async fn edit(&self, id: i64, edit: PostEdit) -> Result<(), PostError> {
        let mut post = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound)?;
        if let Some(title) = edit.title {
            post.title = title;
        }
        if let Some(content) = edit.content {
            post.content = content;
        }
        // The row can vanish between the read and the write when a delete
        // races this edit; surface that the same way as a missing id.
        if !self.repo.update(&post).await? {
            return Err(PostError::NotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), PostError> {
        if !self.repo.delete(id).await? {
            return Err(PostError::NotFound);
        }
        Ok(())
    }
}
