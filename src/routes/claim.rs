use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpResponse;
use serde::Deserialize;
use tera::Tera;

use super::FormData;
use crate::domain::Alias;
use crate::submission::FlowState;
use crate::submission::SubmissionFlow;
use crate::submission::Surface;
use crate::views::OverlayView;
use crate::views::PageShellView;
use crate::views::Site;
use crate::waitlist_store::WaitlistStore;

#[derive(Deserialize)]
pub struct ClaimParams {
    #[serde(default)]
    alias: String,
    #[serde(default)]
    email: String,
}

/// `GET /waitlist/claim?alias=...[&email=...]`
///
/// Opens the overlay for an alias picked upstream, reached from the hero
/// form's "reserve first" button. The alias gets the first-pass check only
/// (present, allowed characters); the email is asked for in the dialog,
/// prefilled with whatever was already typed.
pub async fn claim_form(
    params: web::Query<ClaimParams>,
    templates: web::Data<Tera>,
    site: web::Data<Site>,
) -> Result<HttpResponse, actix_web::Error> {
    let ClaimParams { alias, email } = params.0;
    match Alias::parse(alias.clone()) {
        Ok(_) => {
            let state = FlowState {
                email: email.clone(),
                ..FlowState::default()
            };
            let overlay = OverlayView::new(alias.clone(), &site, &state);
            PageShellView::new(&site, alias, email)
                .with_overlay(overlay)
                .respond(&templates, StatusCode::OK)
        }
        Err(e) => PageShellView::new(&site, alias, email)
            .with_error(e.to_string())
            .respond(&templates, StatusCode::BAD_REQUEST),
    }
}

/// `POST /waitlist/claim`
///
/// The overlay's own submission. `alias` is a hidden field carried over from
/// `claim_form`, so it is validated again here like any other input.
#[tracing::instrument(name = "Reserving alias", skip(form, store, templates, site))]
pub async fn claim(
    form: web::Form<FormData>,
    store: web::Data<WaitlistStore>,
    templates: web::Data<Tera>,
    site: web::Data<Site>,
) -> Result<HttpResponse, actix_web::Error> {
    let (alias, email) = form.0.into_parts();

    let mut flow = SubmissionFlow::new(Surface::Overlay);
    let status = match flow.submit(&store, alias.clone(), email).await {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };

    // the dialog shows the alias as it was chosen, whatever was stored
    let overlay = OverlayView::new(alias.clone(), &site, flow.state());
    PageShellView::new(&site, alias, String::new())
        .with_overlay(overlay)
        .respond(&templates, status)
}
