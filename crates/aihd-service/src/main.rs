//! AIHD report binary.

use aihd_service::{load_store, ReportRunner, ServiceConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ServiceConfig::from_env()?;

    tracing::info!("Loading AIHD extract from: {}", config.data_path.display());
    let store = load_store(&config.data_path, &config.load, config.parallel)?;

    // Every report term must resolve before any cohort is evaluated
    let runner = ReportRunner::new(store)?;

    let context = config.context();
    tracing::info!("Running report for {}", config.report_date);
    let counts = runner.run(&context, config.parallel)?;

    match runner.hypertension_types(&context) {
        Ok(types) => {
            for (label, count) in types {
                tracing::info!("Hypertension type {:?}: {}", label, count);
            }
        }
        Err(e) => tracing::warn!("Could not classify hypertension types: {}", e),
    }

    println!("{}", serde_json::to_string_pretty(&counts)?);

    Ok(())
}
