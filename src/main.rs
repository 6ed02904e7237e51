use std::sync::Arc;

use palbox::config::{load_config, print_schema};
use palbox::startup;
use palbox::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    if std::env::args().skip(1).any(|arg| arg == "--print-schema") {
        print_schema();
        return;
    }

    let config = load_config();

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("Error initialising logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(Arc::new(config)).await {
        error!("Palbox manager stopped: {}", e);
        std::process::exit(1);
    }
}
