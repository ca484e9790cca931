use actix_web::{HttpResponse, delete, get, patch, post, web};
use validator::Validate;

use crate::dtos::post_dtos::{PostCreate, PostEdit, PostSearch};
use crate::error::{ErrorResponse, PostError};
use crate::services::post_service::PostService;

#[post("/posts")]
pub async fn create_post(
    service: web::Data<PostService>,
    body: web::Json<PostCreate>,
) -> Result<HttpResponse, PostError> {
    let request = body.into_inner();
    if let Err(errors) = request.validate() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse::from_validation(&errors)));
    }
    service.write(request).await?;
    Ok(HttpResponse::Ok().finish())
}

#[get("/posts/{post_id}")]
pub async fn get_post(
    service: web::Data<PostService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, PostError> {
    let post = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

#[get("/posts")]
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<PostSearch>,
) -> Result<HttpResponse, PostError> {
    let posts = service.get_list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[patch("/posts/{post_id}")]
pub async fn edit_post(
    service: web::Data<PostService>,
    path: web::Path<i64>,
    body: web::Json<PostEdit>,
) -> Result<HttpResponse, PostError> {
    service.edit(path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

#[delete("/posts/{post_id}")]
pub async fn delete_post(
    service: web::Data<PostService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, PostError> {
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Registers every post route. Shared by the server and the HTTP tests so
/// both run the exact same surface.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_post)
        .service(get_post)
        .service(list_posts)
        .service(edit_post)
        .service(delete_post);
}
