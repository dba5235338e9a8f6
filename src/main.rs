use receiptit_waitlist::configuration::get_configuration;
use receiptit_waitlist::startup::Application;
use receiptit_waitlist::telemetry::get_subscriber;
use receiptit_waitlist::telemetry::init_subscriber;

/// Initialise telemetry, load config, and start the server
#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("receiptit-waitlist", "info", std::io::stdout);
    init_subscriber(subscriber);

    let cfg = get_configuration()?;
    tracing::info!(
        backend = ?cfg.datastore.backend,
        "starting on {}:{}",
        cfg.application.host,
        cfg.application.port
    );

    let server = Application::build(cfg).await?;
    server.run_until_stopped().await?;
    Ok(())
}
