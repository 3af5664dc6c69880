use crate::browser::PageDriver;
use crate::error::ScrapeError;
use crate::session::SessionStore;
use crate::types::Session;

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tracing::info;

/// External "operator finished logging in" notification.
#[allow(async_fn_in_trait)]
pub trait OperatorSignal {
    async fn wait(&mut self) -> Result<(), ScrapeError>;
}

/// Waits for one line (ENTER) on the process stdin.
#[derive(Debug, Default)]
pub struct StdinSignal;

impl OperatorSignal for StdinSignal {
    async fn wait(&mut self) -> Result<(), ScrapeError> {
        let mut line = String::new();
        let read = BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        if read == 0 {
            return Err(ScrapeError::OperatorSignalClosed);
        }
        Ok(())
    }
}

impl OperatorSignal for oneshot::Receiver<()> {
    async fn wait(&mut self) -> Result<(), ScrapeError> {
        self.await.map_err(|_| ScrapeError::OperatorSignalClosed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The page was already served to a logged-in user.
    Authenticated,
    /// A manual login happened and `cookies` entries were persisted.
    Refreshed { cookies: usize },
}

/// Decides whether the loaded page belongs to an authenticated session and,
/// if not, blocks until the operator logs in by hand.
pub struct SessionGuard<'a> {
    store: &'a SessionStore,
    probe_selector: &'a str,
    login_url: &'a str,
    return_url: &'a str,
    timeout: Duration,
}

impl<'a> SessionGuard<'a> {
    pub fn new(
        store: &'a SessionStore,
        probe_selector: &'a str,
        login_url: &'a str,
        return_url: &'a str,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            probe_selector,
            login_url,
            return_url,
            timeout,
        }
    }

    pub async fn ensure<P, S>(&self, page: &P, signal: &mut S) -> Result<SessionState, ScrapeError>
    where
        P: PageDriver,
        S: OperatorSignal,
    {
        if !page.has_element(self.probe_selector).await? {
            info!("Already logged in!");
            return Ok(SessionState::Authenticated);
        }

        info!("Session expired. Please log in manually.");
        page.goto(self.login_url).await?;

        info!(
            timeout_secs = self.timeout.as_secs(),
            "Log in manually in the browser window, then press ENTER here..."
        );
        tokio::time::timeout(self.timeout, signal.wait())
            .await
            .map_err(|_| ScrapeError::LoginTimeout(self.timeout))??;

        let session = Session::new(page.cookies().await?);
        self.store.save(&session)?;
        info!("Session saved! Next time, login will be skipped.");

        page.goto(self.return_url).await?;
        Ok(SessionState::Refreshed {
            cookies: session.cookies.len(),
        })
    }
}
