// src/services/post_services.rs - post use cases over the repository

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::dtos::post_dtos::{PostDTO, PostResponse};
use crate::logging::Logger;
use crate::mappers::PostMapper;
use crate::models::page::{PageError, PageRequest};
use crate::models::post::Post;
use crate::repositories::{PostRepository, RepoError};

/// A lookup by `field_name` found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{resource_name} not found with {field_name} : '{field_value}'")]
pub struct ResourceNotFound {
    pub resource_name: String,
    pub field_name: String,
    pub field_value: String,
}

impl ResourceNotFound {
    pub fn new(resource_name: &str, field_name: &str, field_value: impl fmt::Display) -> Self {
        Self {
            resource_name: resource_name.to_string(),
            field_name: field_name.to_string(),
            field_value: field_value.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    NotFound(#[from] ResourceNotFound),
    #[error("duplicate value '{value}'")]
    Conflict { value: String },
    #[error("request failed: {0}")]
    Internal(String),
}

impl From<RepoError> for ServiceError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::UniqueViolation { value } => ServiceError::Conflict { value },
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<PageError> for ServiceError {
    fn from(err: PageError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    mapper: PostMapper,
    log: Logger,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, log: Logger) -> Self {
        Self {
            repo,
            mapper: PostMapper,
            log,
        }
    }

    pub async fn create_post(&self, dto: PostDTO) -> Result<PostDTO, ServiceError> {
        let mut post = self.mapper.map_to_entity(dto);
        post.id = None;

        match self.repo.save(post).await {
            Ok(saved) => {
                self.log.info(format_args!(
                    "New Post with ID: {}, was created",
                    display_id(saved.id)
                ));
                Ok(self.mapper.map_to_dto(saved))
            }
            Err(e) => {
                self.log.error(format_args!("Invalid input {}", e));
                Err(e.into())
            }
        }
    }

    pub async fn get_all_posts(
        &self,
        page_no: i32,
        page_size: i32,
        sort_by: &str,
    ) -> Result<PostResponse, ServiceError> {
        let page = match PageRequest::of(page_no, page_size, sort_by) {
            Ok(request) => self.repo.find_all(request).await.map_err(ServiceError::from),
            Err(e) => Err(e.into()),
        };
        let page = page.inspect_err(|e| self.log.error(format_args!("Error: {}", e)))?;

        let response = PostResponse {
            page_no: page.number,
            page_size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
            last: page.is_last(),
            content: page
                .content
                .into_iter()
                .map(|post| self.mapper.map_to_dto(post))
                .collect(),
        };
        self.log
            .info(format_args!("Getting all {} posts", response.total_elements));
        Ok(response)
    }

    pub async fn get_post_by_id(&self, id: i64) -> Result<PostDTO, ServiceError> {
        let post = self
            .find_existing(id)
            .await
            .inspect_err(|_| self.log.error(format_args!("Didn`t find post with ID: {}", id)))?;
        self.log.info(format_args!("Found post with ID: {}", id));
        Ok(self.mapper.map_to_dto(post))
    }

    pub async fn update_post(&self, dto: PostDTO, id: i64) -> Result<PostDTO, ServiceError> {
        let result = async {
            let mut post = self.find_existing(id).await?;
            post.title = dto.title;
            post.description = dto.description;
            post.content = dto.content;
            Ok::<_, ServiceError>(self.repo.save(post).await?)
        }
        .await;

        match result {
            Ok(updated) => {
                self.log.info(format_args!("Updated post with ID: {}", id));
                Ok(self.mapper.map_to_dto(updated))
            }
            Err(e) => {
                self.log.error(format_args!("{}", e));
                Err(e)
            }
        }
    }

    pub async fn delete_post_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let result = async {
            let post = self.find_existing(id).await?;
            self.repo.delete_by_id(post.id.unwrap_or(id)).await?;
            Ok::<_, ServiceError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.log.info(format_args!("Deleted post with ID: {}", id));
                Ok(())
            }
            Err(e) => {
                self.log.error(format_args!("{}", e));
                Err(e)
            }
        }
    }

    async fn find_existing(&self, id: i64) -> Result<Post, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ResourceNotFound::new("Post", "id", id).into())
    }
}

fn display_id(id: Option<i64>) -> String {
    id.map_or_else(|| "<unassigned>".to_string(), |id| id.to_string())
}
