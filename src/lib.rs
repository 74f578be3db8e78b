pub mod configuration;
pub mod console;
pub mod db_interaction;
pub mod dispatcher;
pub mod domain;
pub mod executor;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod session;
pub mod telemetry;
pub mod utils;
