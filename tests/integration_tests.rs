use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use tempfile::TempDir;

use shortly::services::api::ShortenRequest;
use shortly::services::{ApiService, LinkService, RedirectService};
use shortly::storages::sqlite::SqliteStorage;
use shortly::utils::AliasGenerator;

async fn link_service(dir: &TempDir) -> Arc<LinkService> {
    let db_path = dir.path().join("urls.db");
    let storage = SqliteStorage::new_async(db_path.to_str().unwrap())
        .await
        .expect("Failed to open sqlite storage");
    Arc::new(LinkService::new(Arc::new(storage), AliasGenerator::new(6)))
}

macro_rules! shortly_app {
    ($service:expr) => {
        test::init_service(
            App::new().app_data(web::Data::new($service.clone())).service(
                web::scope("/shortly")
                    .route("", web::get().to(ApiService::get_all_links))
                    .route("/", web::get().to(ApiService::get_all_links))
                    .route("/shorten", web::post().to(ApiService::post_link))
                    .route("/delete/{alias}", web::delete().to(ApiService::delete_link))
                    .route("/{alias}", web::get().to(RedirectService::handle_redirect)),
            ),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_shorten_returns_alias_and_short_url() {
    let dir = TempDir::new().unwrap();
    let service = link_service(&dir).await;
    let app = shortly_app!(service);

    let req = test::TestRequest::post()
        .uri("/shortly/shorten")
        .set_form(ShortenRequest {
            url: "example.com".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);

    let alias = body["data"]["alias"].as_str().unwrap();
    assert_eq!(alias.len(), 6);
    assert_eq!(body["data"]["original_url"], "https://example.com");
    assert!(body["data"]["short_url"]
        .as_str()
        .unwrap()
        .ends_with(&format!("/shortly/{}", alias)));
}

#[actix_rt::test]
async fn test_shorten_rejects_invalid_url() {
    let dir = TempDir::new().unwrap();
    let service = link_service(&dir).await;
    let app = shortly_app!(service);

    let req = test::TestRequest::post()
        .uri("/shortly/shorten")
        .set_form(ShortenRequest {
            url: "   ".to_string(),
        })
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_redirect_to_original_url() {
    let dir = TempDir::new().unwrap();
    let service = link_service(&dir).await;

    let mapping = service.create_link("https://example.com/page").await.unwrap();

    let app = shortly_app!(service);
    let req = test::TestRequest::get()
        .uri(&format!("/shortly/{}", mapping.alias))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(
        resp.headers().get("Location").unwrap(),
        "https://example.com/page"
    );
}

#[actix_rt::test]
async fn test_redirect_unknown_alias_is_404() {
    let dir = TempDir::new().unwrap();
    let service = link_service(&dir).await;
    let app = shortly_app!(service);

    let req = test::TestRequest::get()
        .uri("/shortly/nope42")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_list_contains_created_mappings() {
    let dir = TempDir::new().unwrap();
    let service = link_service(&dir).await;

    let first = service.create_link("https://one.example").await.unwrap();
    let second = service.create_link("https://two.example").await.unwrap();

    let app = shortly_app!(service);
    let req = test::TestRequest::get().uri("/shortly").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["alias"], first.alias.as_str());
    assert_eq!(data[1]["alias"], second.alias.as_str());
}

#[actix_rt::test]
async fn test_delete_is_idempotent_over_http() {
    let dir = TempDir::new().unwrap();
    let service = link_service(&dir).await;

    let mapping = service.create_link("https://example.com").await.unwrap();
    let app = shortly_app!(service);

    let req = test::TestRequest::delete()
        .uri(&format!("/shortly/delete/{}", mapping.alias))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 再次删除同一别名仍然成功
    let req = test::TestRequest::delete()
        .uri(&format!("/shortly/delete/{}", mapping.alias))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 随后的跳转应 404
    let req = test::TestRequest::get()
        .uri(&format!("/shortly/{}", mapping.alias))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
