pub mod configuration;
pub mod domain;
pub mod rest_client;
pub mod routes;
pub mod startup;
pub mod submission;
pub mod telemetry;
pub mod utils;
pub mod views;
pub mod waitlist_store;
