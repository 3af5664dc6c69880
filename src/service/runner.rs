//! One complete run: restore session, guard login, expand, extract, export.

use crate::browser::{ChromeSession, PageDriver};
use crate::config::Config;
use crate::db::BeerLogStorage;
use crate::error::ScrapeError;
use crate::service::exporter::{self, ExportReport};
use crate::service::extractor::{CheckinCount, Extractor};
use crate::service::pagination::PaginationDriver;
use crate::session::{OperatorSignal, SessionGuard, SessionStore, StdinSignal};
use crate::types::{ItemSelectors, ScrapeResult};

use tracing::info;

/// Drive `page` from the saved session to a fully extracted result.
pub async fn scrape<P, S>(page: &P, cfg: &Config, signal: &mut S) -> Result<ScrapeResult, ScrapeError>
where
    P: PageDriver,
    S: OperatorSignal,
{
    let store = SessionStore::new(cfg.cookie_path.clone());
    let profile_url = cfg.profile_url.as_str();

    // Cookies can only be set once the page is on the site's origin.
    page.goto(profile_url).await?;
    if let Some(session) = store.load()?.filter(|s| !s.is_empty()) {
        page.set_cookies(&session.cookies).await?;
        info!(cookies = session.cookies.len(), "Loaded session cookies");
        page.goto(profile_url).await?;
    }
    settle(cfg).await;

    SessionGuard::new(
        &store,
        &cfg.login_probe_selector,
        cfg.login_url.as_str(),
        profile_url,
        cfg.login_timeout(),
    )
    .ensure(page, signal)
    .await?;

    let outcome = PaginationDriver::new(&cfg.item_selector, &cfg.show_more_text, cfg.settle())
        .expand_all(page)
        .await?;
    info!(
        checks = outcome.checks,
        expansions = outcome.expansions,
        items = outcome.items,
        stop = ?outcome.stop,
        "pagination finished"
    );

    let snapshots = page
        .item_snapshots(&cfg.item_selector, &ItemSelectors::default())
        .await?;
    let result = Extractor::new(CheckinCount::from_legacy_flag(cfg.legacy_checkin_count))
        .extract(&snapshots);
    info!("Total Beers Scraped: {}", result.len());
    Ok(result)
}

/// Navigation only waits for the load event; give late scripts the settle interval.
async fn settle(cfg: &Config) {
    let settle = cfg.settle();
    if !settle.is_zero() {
        tokio::time::sleep(settle).await;
    }
}

/// Persist `result` to the output file, then forward it to the database when configured.
pub async fn export(cfg: &Config, result: &ScrapeResult) -> Result<Option<ExportReport>, ScrapeError> {
    exporter::write_records(&cfg.output_path, result).await?;

    let Some(database_url) = cfg.database_url.as_deref() else {
        info!("DATABASE_URL not set; skipping database import");
        return Ok(None);
    };
    let storage = BeerLogStorage::connect(database_url, cfg.export_concurrency()).await?;
    let report = exporter::forward_records(&storage, result, cfg.export_concurrency()).await;
    storage.close().await;
    Ok(Some(report))
}

/// Launch a browser, run one scrape + export, and release the browser on every path.
pub async fn run(cfg: &Config) -> Result<Option<ExportReport>, ScrapeError> {
    let browser = ChromeSession::launch(cfg.headless).await?;

    let outcome = async {
        let result = scrape(&browser, cfg, &mut StdinSignal).await?;
        export(cfg, &result).await
    }
    .await;

    browser.close().await;
    outcome
}
