/// Row of the `posts` table.
/// `id` stays `None` until the repository assigns one on first save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub content: String,
}

impl Post {
    pub fn new(title: impl Into<String>, description: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            content: content.into(),
        }
    }
}
