use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use tera::Tera;

use crate::views::PageShellView;
use crate::views::Site;

/// `GET /`
///
/// The landing page with an empty form. Also where the overlay's close
/// button leads, so closing always starts from scratch.
pub async fn home(
    templates: web::Data<Tera>,
    site: web::Data<Site>,
) -> Result<HttpResponse, actix_web::Error> {
    PageShellView::empty(&site).respond(&templates, StatusCode::OK)
}
