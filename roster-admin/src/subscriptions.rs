//! Periodic refresh of the user list and the session user.

use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::app::AdminPanel;
use crate::common::Message;

#[derive(Debug, Clone, Copy, Default)]
pub struct Poller;

impl Poller {
    /// Start polling every `period`. The first poll fires one period after
    /// start, since the caller has just done an initial load.
    ///
    /// Each tick spawns the users refresh and the session refresh as
    /// separate tasks, so a slow or failing one never holds up the other.
    pub fn start(panel: AdminPanel, period: Duration) -> PollHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval yields immediately on the first tick
            ticker.tick().await;

            info!("Polling every {}", humantime::format_duration(period));
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        debug!("Poll tick");
                        let users = panel.clone();
                        tokio::spawn(async move { users.dispatch(Message::RefreshUsers).await });
                        let session = panel.clone();
                        tokio::spawn(async move { session.dispatch(Message::LoadCurrentUser).await });
                    }
                }
            }
            debug!("Poller stopped");
        });

        PollHandle {
            token,
            handle: Some(handle),
        }
    }
}

/// Stops the poller when dropped.
#[derive(Debug)]
pub struct PollHandle {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
            && self
                .handle
                .as_ref()
                .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel and wait for the polling loop to exit. Requests already in
    /// flight are left to finish on their own.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take()
            && let Err(err) = handle.await
        {
            warn!("Poller task ended abnormally: {}", err);
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::infra::testing::{ApiOperation, TestApiService};
    use crate::infra::errors::ClientError;
    use reqwest::StatusCode;
    use roster_model::ErrorBody;

    fn panel(api: &TestApiService) -> AdminPanel {
        AdminPanel::new(Arc::new(api.clone()))
    }

    #[tokio::test(start_paused = true)]
    async fn polls_once_per_period() {
        let api = TestApiService::new();
        let handle = Poller::start(panel(&api), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert_eq!(api.count(ApiOperation::ListUsers), 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(api.count(ApiOperation::ListUsers), 1);
        assert_eq!(api.count(ApiOperation::CurrentUser), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(api.count(ApiOperation::ListUsers), 3);
        assert_eq!(api.count(ApiOperation::CurrentUser), 3);

        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_polling() {
        let api = TestApiService::new();
        let handle = Poller::start(panel(&api), Duration::from_secs(5));
        handle.stop().await;

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels() {
        let api = TestApiService::new();
        drop(Poller::start(panel(&api), Duration::from_secs(1)));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn session_failure_does_not_block_users() {
        let api = TestApiService::new();
        api.fail_next(
            ApiOperation::CurrentUser,
            ClientError::api(StatusCode::UNAUTHORIZED, ErrorBody::generic()),
        );
        let panel = panel(&api);
        let handle = Poller::start(panel.clone(), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_millis(5_100)).await;
        assert_eq!(api.count(ApiOperation::ListUsers), 1);
        assert_eq!(panel.view().await.table.len(), 1);
        assert!(panel.view().await.header.is_none());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(panel.view().await.header.is_some());
        handle.stop().await;
    }
}
