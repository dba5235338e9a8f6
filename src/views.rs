use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use tera::Context;
use tera::Tera;

use crate::submission::FlowState;
use crate::utils::error_500;

/// Site-wide values every page needs
#[derive(Clone)]
pub struct Site {
    pub base_url: String,
    pub alias_domain: String,
}

/// Templates are embedded, so a missing file is a compile error rather than a
/// startup error. Tera autoescapes anything ending in `.html`.
pub fn build_templates() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("landing.html", include_str!("../templates/landing.html")),
        ("overlay.html", include_str!("../templates/overlay.html")),
    ])?;
    Ok(tera)
}

/// What the floating call-to-action does when clicked
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CtaAction {
    ScrollToTop,
    Resubmit,
}

impl CtaAction {
    /// Nothing typed yet: send the visitor back to the form. Otherwise post
    /// the current values again.
    pub fn for_fields(
        alias: &str,
        email: &str,
    ) -> Self {
        match alias.is_empty() && email.is_empty() {
            true => Self::ScrollToTop,
            false => Self::Resubmit,
        }
    }
}

/// The dialog, in either of its two states
#[derive(Serialize, Debug)]
pub struct OverlayView {
    /// Chosen upstream; read-only here
    pub alias: String,
    /// `alias@domain`
    pub address: String,
    pub email: String,
    pub error: Option<String>,
    pub success: bool,
}

impl OverlayView {
    pub fn new(
        alias: String,
        site: &Site,
        state: &FlowState,
    ) -> Self {
        Self {
            address: format!("{alias}@{}", site.alias_domain),
            alias,
            email: state.email.clone(),
            error: state.error.clone(),
            success: state.success,
        }
    }
}

/// The landing page: marketing sections plus the hero form, optionally with
/// the overlay open on top.
#[derive(Serialize, Debug)]
pub struct PageShellView {
    pub base_url: String,
    pub alias_domain: String,
    pub alias: String,
    pub email: String,
    pub error: Option<String>,
    pub floating_cta: CtaAction,
    pub overlay: Option<OverlayView>,
}

impl PageShellView {
    pub fn new(
        site: &Site,
        alias: String,
        email: String,
    ) -> Self {
        Self {
            base_url: site.base_url.clone(),
            alias_domain: site.alias_domain.clone(),
            floating_cta: CtaAction::for_fields(&alias, &email),
            alias,
            email,
            error: None,
            overlay: None,
        }
    }

    pub fn empty(site: &Site) -> Self { Self::new(site, String::new(), String::new()) }

    pub fn with_error(
        mut self,
        error: String,
    ) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_overlay(
        mut self,
        overlay: OverlayView,
    ) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn render(
        &self,
        templates: &Tera,
    ) -> Result<String, tera::Error> {
        templates.render("landing.html", &Context::from_serialize(self)?)
    }

    /// Render as an HTML response; failures to render are HTTP 500
    pub fn respond(
        &self,
        templates: &Tera,
        status: StatusCode,
    ) -> Result<HttpResponse, actix_web::Error> {
        let body = self.render(templates).map_err(error_500)?;
        Ok(HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(body))
    }
}
