use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info, warn};

use blog_api::config;
use blog_api::handlers::post_handlers;
use blog_api::repositories::memory::MemoryPostRepository;
use blog_api::repositories::post_repository::{PgPostRepository, PostRepository};
use blog_api::services::post_service::PostService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let repo: Arc<dyn PostRepository> = if env::var("PG_HOST").is_ok() {
        let pool = match config::pg_pool() {
            Ok(p) => p,
            Err(e) => {
                error!("failed to create PG pool: {e}");
                std::process::exit(1);
            }
        };
        let repo = PgPostRepository::new(pool);
        if let Err(e) = repo.ensure_schema().await {
            error!("failed to prepare posts table: {e}");
            std::process::exit(1);
        }
        info!("using postgres post store");
        Arc::new(repo)
    } else {
        warn!("PG_HOST not set, falling back to in-memory post store");
        Arc::new(MemoryPostRepository::new())
    };

    let service = web::Data::new(PostService::new(repo));

    let allowed_origins = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into());

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{port}");

    info!("starting server on {bind_address}");

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec!["authorization", "content-type", "accept"])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(service.clone())
            .configure(post_handlers::routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
