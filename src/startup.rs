use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web;
use actix_web::App;
use actix_web::HttpServer;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tera::Tera;
use tracing_actix_web::TracingLogger;

use crate::configuration::DatabaseSettings;
use crate::configuration::Settings;
use crate::routes::claim;
use crate::routes::claim_form;
use crate::routes::health_check;
use crate::routes::home;
use crate::routes::join_waitlist;
use crate::views::build_templates;
use crate::views::Site;
use crate::waitlist_store::WaitlistStore;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the listener, build the datastore client and templates, then hand
    /// everything to `run`
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(addr)?;

        // with port 0, this is the port the OS picked
        let port = listener.local_addr()?.port();

        let store = WaitlistStore::from_settings(&cfg);
        let templates = build_templates()?;
        let site = Site {
            base_url: cfg.application.base_url,
            alias_domain: cfg.waitlist.alias_domain,
        };

        let server = run(listener, store, templates, site)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// `connect_lazy_with` only connects when the pool is first used, so
/// db-free requests (e.g. `health_check`) work without a running db
pub fn get_connection_pool(db_cfg: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(db_cfg.connection())
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all endpoints.
pub fn run(
    listener: TcpListener,
    store: WaitlistStore,
    templates: Tera,
    site: Site,
) -> Result<Server, anyhow::Error> {
    // `Data` is an `Arc`, so each worker's `App` shares the same store and
    // templates
    let store = web::Data::new(store);
    let templates = web::Data::new(templates);
    let site = web::Data::new(site);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/waitlist", web::post().to(join_waitlist))
            .route("/waitlist/claim", web::get().to(claim_form))
            .route("/waitlist/claim", web::post().to(claim))
            .app_data(store.clone())
            .app_data(templates.clone())
            .app_data(site.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
