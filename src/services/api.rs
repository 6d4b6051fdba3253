use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::ShortlyError;
use crate::services::{short_link_url, LinkService};
use crate::storages::UrlMapping;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub data: T,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ShortenedLink {
    pub alias: String,
    pub short_url: String,
    pub original_url: String,
}

pub struct ApiService;

impl ApiService {
    pub async fn get_all_links(service: web::Data<Arc<LinkService>>) -> impl Responder {
        match service.list_links().await {
            Ok(mappings) => {
                info!("API: returning {} mappings", mappings.len());
                HttpResponse::Ok().json(ApiResponse::<Vec<UrlMapping>> {
                    code: 0,
                    data: mappings,
                })
            }
            Err(e) => {
                error!("API: failed to list mappings: {}", e);
                HttpResponse::InternalServerError().json(ApiResponse {
                    code: 500,
                    data: "Internal Server Error".to_string(),
                })
            }
        }
    }

    pub async fn post_link(
        req: HttpRequest,
        form: web::Form<ShortenRequest>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let host = req.connection_info().host().to_string();

        match service.create_link(&form.url).await {
            Ok(mapping) => HttpResponse::Ok().json(ApiResponse {
                code: 0,
                data: ShortenedLink {
                    short_url: short_link_url(&host, &mapping.alias),
                    alias: mapping.alias,
                    original_url: mapping.original_url,
                },
            }),
            Err(ShortlyError::Validation(msg)) => HttpResponse::BadRequest().json(ApiResponse {
                code: 400,
                data: msg,
            }),
            Err(e) => {
                error!("API: failed to create mapping: {}", e);
                HttpResponse::InternalServerError().json(ApiResponse {
                    code: 500,
                    data: "Internal Server Error".to_string(),
                })
            }
        }
    }

    pub async fn delete_link(
        path: web::Path<String>,
        service: web::Data<Arc<LinkService>>,
    ) -> impl Responder {
        let alias = path.into_inner();

        // 删除是幂等的：不存在的别名同样返回成功
        match service.delete_link(&alias).await {
            Ok(()) => HttpResponse::Ok().json(ApiResponse {
                code: 0,
                data: alias,
            }),
            Err(e) => {
                error!("API: failed to delete '{}': {}", alias, e);
                HttpResponse::InternalServerError().json(ApiResponse {
                    code: 500,
                    data: "Internal Server Error".to_string(),
                })
            }
        }
    }
}
