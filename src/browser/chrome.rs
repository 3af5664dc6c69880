use crate::browser::PageDriver;
use crate::error::ScrapeError;
use crate::types::{ItemSelectors, ItemSnapshot, StoredCookie};

use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight)";
const ANCHOR_TEXTS: &str = r#"Array.from(document.querySelectorAll("a")).map(a => a.innerText ?? "")"#;

/// One launched browser with a single working page.
pub struct ChromeSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Page,
}

impl ChromeSession {
    pub async fn launch(headless: bool) -> Result<Self, ScrapeError> {
        let mut builder = BrowserConfig::builder()
            .viewport(None)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--no-first-run")
            .arg("--no-default-browser-check");
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(ScrapeError::BrowserConfig)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move { while (handler.next().await).is_some() {} });
        let page = browser.new_page("about:blank").await?;
        info!(headless, "browser launched");

        Ok(Self {
            browser,
            handler_task,
            page,
        })
    }

    /// Close the browser and stop the CDP handler. Failures are logged, not returned.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "browser close failed");
        }
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "waiting for browser exit failed");
        }
        self.handler_task.abort();
        debug!("browser released");
    }

    async fn anchor(&self, index: usize) -> Result<Element, ScrapeError> {
        self.page
            .find_elements("a")
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| ScrapeError::ElementMissing {
                selector: "a".to_string(),
                index,
            })
    }
}

impl PageDriver for ChromeSession {
    async fn goto(&self, url: &str) -> Result<(), ScrapeError> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn has_element(&self, selector: &str) -> Result<bool, ScrapeError> {
        let expr = format!(
            "document.querySelector({}) !== null",
            serde_json::to_string(selector)?
        );
        Ok(self.page.evaluate(expr).await?.into_value::<bool>()?)
    }

    async fn scroll_to_bottom(&self) -> Result<(), ScrapeError> {
        self.page.evaluate(SCROLL_TO_BOTTOM).await?;
        Ok(())
    }

    async fn anchor_texts(&self) -> Result<Vec<String>, ScrapeError> {
        Ok(self
            .page
            .evaluate(ANCHOR_TEXTS)
            .await?
            .into_value::<Vec<String>>()?)
    }

    async fn scroll_anchor_into_view(&self, index: usize) -> Result<(), ScrapeError> {
        self.anchor(index).await?.scroll_into_view().await?;
        Ok(())
    }

    async fn click_anchor(&self, index: usize) -> Result<(), ScrapeError> {
        self.anchor(index).await?.click().await?;
        Ok(())
    }

    async fn count(&self, selector: &str) -> Result<usize, ScrapeError> {
        let expr = format!(
            "document.querySelectorAll({}).length",
            serde_json::to_string(selector)?
        );
        Ok(self.page.evaluate(expr).await?.into_value::<usize>()?)
    }

    async fn item_snapshots(
        &self,
        item_selector: &str,
        fields: &ItemSelectors,
    ) -> Result<Vec<ItemSnapshot>, ScrapeError> {
        let expr = format!(
            r#"(() => {{
                const f = {fields};
                const text = (root, sel) => {{
                    const el = root.querySelector(sel);
                    return el ? el.innerText : null;
                }};
                return Array.from(document.querySelectorAll({items})).map(item => ({{
                    name: text(item, f.name),
                    brewery: text(item, f.brewery),
                    rating: text(item, f.rating),
                    style: text(item, f.style),
                    abv: text(item, f.abv),
                    checkins: text(item, f.checkins),
                }}));
            }})()"#,
            fields = serde_json::to_string(fields)?,
            items = serde_json::to_string(item_selector)?,
        );
        Ok(self
            .page
            .evaluate(expr)
            .await?
            .into_value::<Vec<ItemSnapshot>>()?)
    }

    async fn cookies(&self) -> Result<Vec<StoredCookie>, ScrapeError> {
        self.page
            .get_cookies()
            .await?
            .into_iter()
            .map(|c| -> Result<StoredCookie, ScrapeError> {
                Ok(serde_json::from_value(serde_json::to_value(c)?)?)
            })
            .collect()
    }

    async fn set_cookies(&self, cookies: &[StoredCookie]) -> Result<(), ScrapeError> {
        let params = cookies
            .iter()
            .map(|c| serde_json::from_value::<CookieParam>(c.to_cookie_param_value()))
            .collect::<Result<Vec<_>, _>>()?;
        if !params.is_empty() {
            self.page.set_cookies(params).await?;
        }
        Ok(())
    }
}
