use mimalloc::MiMalloc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use untappd_sync::config::Config;
use untappd_sync::service::runner;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cfg = Config::from_env();
    let loglevel = cfg
        .as_ref()
        .map(|c| c.loglevel.clone())
        .unwrap_or_else(|_| "info".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(loglevel));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return;
        }
    };

    info!(
        profile_url = %cfg.profile_url,
        cookie_path = %cfg.cookie_path.display(),
        output_path = %cfg.output_path.display(),
        database = cfg.database_url.is_some(),
        headless = cfg.headless
    );

    match runner::run(&cfg).await {
        Ok(Some(report)) if !report.is_complete() => {
            for failure in &report.failures {
                warn!(index = failure.index, name = %failure.name, error = %failure.error, "not imported");
            }
            warn!(
                merged = report.merged,
                failed = report.failures.len(),
                "database import finished with failures"
            );
        }
        Ok(_) => {}
        Err(e) => error!("Error: {e}"),
    }
}
