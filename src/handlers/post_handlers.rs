// src/handlers/post_handlers.rs - REST endpoints for posts

use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::AppState;
use crate::dtos::post_dtos::PostDTO;
use crate::handlers::error_handlers::ApiError;
use crate::middleware::PageParams;

pub const DELETED_MESSAGE: &str = "Post entity deleted successfully.";

/// POST /api/posts
#[post("/posts")]
pub async fn create_post(
    app_state: web::Data<AppState>,
    body: web::Json<PostDTO>,
) -> Result<HttpResponse, ApiError> {
    let dto = body.into_inner();
    dto.validate()?;

    let created = app_state.post_service.create_post(dto).await?;
    Ok(HttpResponse::Created().json(created))
}

/// GET /api/posts?pageNo=0&pageSize=10&sortBy=id
#[get("/posts")]
pub async fn list_posts(
    app_state: web::Data<AppState>,
    params: PageParams,
) -> Result<HttpResponse, ApiError> {
    let page = app_state
        .post_service
        .get_all_posts(params.page_no, params.page_size, &params.sort_by)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/posts/{id}")]
pub async fn get_post(
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let post = app_state.post_service.get_post_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[put("/posts/{id}")]
pub async fn update_post(
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<PostDTO>,
) -> Result<HttpResponse, ApiError> {
    let dto = body.into_inner();
    dto.validate()?;

    let updated = app_state
        .post_service
        .update_post(dto, id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    app_state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    app_state
        .post_service
        .delete_post_by_id(id.into_inner())
        .await?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(DELETED_MESSAGE))
}
