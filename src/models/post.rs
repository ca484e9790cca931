use serde::Serialize;

/// A stored blog post. `id` is assigned by the store on insert and never
/// changes afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
}
