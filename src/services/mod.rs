pub mod api;
pub mod link_service;
pub mod redirect;

pub use api::ApiService;
pub use link_service::{short_link_url, LinkService};
pub use redirect::RedirectService;
