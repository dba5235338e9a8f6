use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use serde::Deserialize;
use tera::Tera;

use crate::submission::SubmissionFlow;
use crate::submission::Surface;
use crate::views::OverlayView;
use crate::views::PageShellView;
use crate::views::Site;
use crate::waitlist_store::WaitlistStore;

/// A missing field deserializes as empty and gets the same "Please enter ..."
/// message as an empty one.
#[derive(Deserialize)]
pub struct FormData {
    #[serde(default)]
    alias: String,
    #[serde(default)]
    email: String,
}

impl FormData {
    pub fn into_parts(self) -> (String, String) { (self.alias, self.email) }
}

/// `POST /waitlist`
///
/// Hero form (and floating call-to-action) submission. On success the overlay
/// opens straight into its confirmation state; on failure the page comes
/// back with the typed values and the error under the form.
///
/// # Request example
///
/// ```sh
///     curl -v --data 'alias=john_doe&email=john%40example.com' http://127.0.0.1:8000/waitlist
/// ```
#[tracing::instrument(name = "Joining waitlist", skip(form, store, templates, site))]
pub async fn join_waitlist(
    form: web::Form<FormData>,
    store: web::Data<WaitlistStore>,
    templates: web::Data<Tera>,
    site: web::Data<Site>,
) -> Result<HttpResponse, actix_web::Error> {
    let (alias, email) = form.0.into_parts();

    let mut flow = SubmissionFlow::new(Surface::PageShell);
    match flow.submit(&store, alias.clone(), email.clone()).await {
        Ok(_) => {
            let overlay = OverlayView::new(alias, &site, flow.state());
            PageShellView::empty(&site)
                .with_overlay(overlay)
                .respond(&templates, StatusCode::OK)
        }
        Err(e) => PageShellView::new(&site, alias, email)
            .with_error(e.to_string())
            .respond(&templates, e.status_code()),
    }
}
