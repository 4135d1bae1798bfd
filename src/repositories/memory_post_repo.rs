use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::page::{Page, PageRequest, SortField};
use crate::models::post::Post;
use crate::repositories::post_repository::{PostRepository, RepoError};

/// Process-local post store. Titles are unique, like the `posts.title`
/// column in Postgres.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<i64, Post>,
}

impl State {
    fn check_unique(&self, post: &Post) -> Result<(), RepoError> {
        let taken = self
            .rows
            .values()
            .any(|row| row.title == post.title && row.id != post.id);
        if taken {
            return Err(RepoError::UniqueViolation {
                value: post.title.clone(),
            });
        }
        Ok(())
    }
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sort_key(post: &Post, field: SortField) -> &str {
    match field {
        SortField::Id => "",
        SortField::Title => &post.title,
        SortField::Description => &post.description,
        SortField::Content => &post.content,
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self, request: PageRequest) -> Result<Page<Post>, RepoError> {
        let state = self.state.read().await;

        // rows iterate in id order, so the stable sort keeps id as tie-breaker
        let mut rows: Vec<&Post> = state.rows.values().collect();
        if request.sort != SortField::Id {
            rows.sort_by(|a, b| sort_key(a, request.sort).cmp(sort_key(b, request.sort)));
        }

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = rows
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, &request, state.rows.len() as u64))
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut state = self.state.write().await;
        state.check_unique(&post)?;

        let id = match post.id {
            Some(id) if state.rows.contains_key(&id) => id,
            Some(id) => return Err(RepoError::Missing(id)),
            None => {
                state.last_id += 1;
                state.last_id
            }
        };
        post.id = Some(id);
        state.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepoError> {
        self.state.write().await.rows.remove(&id);
        Ok(())
    }
}
