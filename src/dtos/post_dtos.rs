use serde::{Deserialize, Serialize};
use validator::Validate;

/// Post as sent and received over the API. `id` is ignored on create.
/// Missing text fields read as empty so `validate` reports them per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PostDTO {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, message = "Post title should not be empty"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Post description should not be empty"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Post content should not be empty"))]
    pub content: String,
}

/// One page of posts plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub content: Vec<PostDTO>,
    pub page_no: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}
