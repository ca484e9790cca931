use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::post::Post;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Body of `POST /posts`. Both fields must be present and non-blank; the
/// handler rejects the request with a validation body otherwise.
#[derive(Debug, Deserialize, Validate)]
pub struct PostCreate {
    #[validate(
        required(message = "title must not be blank"),
        custom(function = "not_blank", message = "title must not be blank")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "content must not be blank"),
        custom(function = "not_blank", message = "content must not be blank")
    )]
    pub content: Option<String>,
}

/// Body of `PATCH /posts/{id}`. A missing or null field means "leave the
/// stored value unchanged"; a present field overwrites it. This is a partial
/// update, not a full replace.
#[derive(Debug, Default, Deserialize)]
pub struct PostEdit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

fn default_page() -> i32 {
    1
}

fn default_size() -> i32 {
    10
}

/// Query parameters of `GET /posts`. Pages are 1-based; page values below 1
/// clamp to the first page and sizes above `MAX_SIZE` clamp down.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PostSearch {
    #[serde(default = "default_page")]
    pub page: i32,
    #[serde(default = "default_size")]
    pub size: i32,
}

impl PostSearch {
    const MAX_SIZE: i32 = 2000;

    pub fn limit(&self) -> i64 {
        i64::from(self.size.clamp(0, Self::MAX_SIZE))
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * self.limit()
    }
}

impl Default for PostSearch {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

/// Read projection returned by the fetch endpoints.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
        }
    }
}
