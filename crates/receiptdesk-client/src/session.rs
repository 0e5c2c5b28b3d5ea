//! QuickBooks session actions
//!
//! Connecting sends the user to the backend's authorization URL when there
//! is no session yet. After authorization, `await_authentication` polls the
//! status endpoint, pushes any preference saved while offline, and syncs.

use std::time::Duration;

use crate::page::Page;
use receiptdesk_core::{CoreError, FlushOutcome, PageAction};

impl Page {
    /// Ask the backend whether QuickBooks is connected and remember the
    /// answer. A failed check counts as not connected.
    pub async fn refresh_status(&mut self) -> bool {
        let authenticated = match self.client.quickbooks_status().await {
            Ok(status) => status.is_authenticated,
            Err(e) => {
                self.log_quiet_failure("quickbooks_status", &e.to_string());
                false
            }
        };
        self.authenticated = authenticated;
        authenticated
    }

    pub async fn connect(&mut self) -> PageAction {
        if self.refresh_status().await {
            return self.sync().await;
        }
        let url = self.config.quickbooks_auth_url();
        log::info!("Redirecting to QuickBooks authorization: {}", url);
        PageAction::Redirect(url)
    }

    /// Pull transactions and rebuild the table. The active search and sort
    /// are applied again to the new rows.
    pub async fn sync(&mut self) -> PageAction {
        if !self.refresh_status().await {
            self.fail("sync", CoreError::Unauthorized);
            return PageAction::Redirect(self.config.quickbooks_auth_url());
        }

        match self.client.transactions().await {
            Ok(transactions) => {
                let today = self.today();
                self.table.load_transactions(&transactions, today);
                self.notifier
                    .success(format!("Synced {} transaction(s) from QuickBooks", transactions.len()));
            }
            Err(e) => self.fail("sync_transactions", e),
        }
        PageAction::None
    }

    /// Push a preference saved while offline. Nothing is shown to the user
    /// either way; a failure is retried on the next call.
    pub async fn flush_pending_preferences(&mut self) -> FlushOutcome {
        let outcome = self.preferences.flush_pending(&self.client).await;
        if let FlushOutcome::Failed(reason) = &outcome {
            self.log_quiet_failure("flush_pending_preferences", reason);
        }
        outcome
    }

    /// Poll until the backend reports a session, then finish the connection
    pub async fn await_authentication(&mut self) -> PageAction {
        let attempts = self.config.quickbooks.status_poll_attempts;
        let interval = Duration::from_millis(self.config.quickbooks.status_poll_interval_ms);

        for attempt in 1..=attempts {
            if self.refresh_status().await {
                log::info!("QuickBooks connected after {} status check(s)", attempt);
                self.flush_pending_preferences().await;
                return self.sync().await;
            }
            if attempt < attempts {
                tokio::time::sleep(interval).await;
            }
        }

        self.notifier
            .warning("QuickBooks authentication did not complete. Please try connecting again.");
        PageAction::None
    }

    pub async fn disconnect(&mut self) -> PageAction {
        match self.client.disconnect_quickbooks().await {
            Ok(_) => {
                self.authenticated = false;
                self.notifier.success("Disconnected from QuickBooks");
                PageAction::Reload
            }
            Err(e) => {
                self.fail("disconnect", e);
                PageAction::None
            }
        }
    }
}
