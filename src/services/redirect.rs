use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::{debug, error};

use crate::errors::ShortlyError;
use crate::services::LinkService;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let alias = path.into_inner();

        match service.resolve_link(&alias).await {
            Ok(original_url) => HttpResponse::Found()
                .insert_header(("Location", original_url))
                .finish(),
            Err(ShortlyError::NotFound(_)) => {
                debug!("Redirect alias not found: {}", alias);
                HttpResponse::build(StatusCode::NOT_FOUND)
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .insert_header(("Cache-Control", "public, max-age=60")) // 缓存404
                    .body("Not Found")
            }
            Err(e) => {
                error!("Redirect lookup failed for '{}': {}", alias, e);
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}
