//! Runtime that drives the reducer
//!
//! [`AdminPanel`] owns the state behind an async mutex. Messages are applied
//! one at a time; the tasks they return run outside the lock and their
//! results are fed back in until the queue drains.

pub mod bootstrap;

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::Mutex;

use crate::common::{Message, Task};
use crate::infra::api_client::ApiClient;
use crate::infra::errors::ClientResult;
use crate::infra::services::{UserAdminApiAdapter, UserAdminService};
use crate::state::AdminState;
use crate::update::update;
use crate::view::{AdminView, view};

pub use bootstrap::AppConfig;

#[derive(Clone)]
pub struct AdminPanel {
    state: Arc<Mutex<AdminState>>,
}

impl std::fmt::Debug for AdminPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminPanel").finish_non_exhaustive()
    }
}

impl AdminPanel {
    pub fn new(service: Arc<dyn UserAdminService>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AdminState::new(service))),
        }
    }

    /// Panel backed by the HTTP user service at `config.server_url()`.
    pub fn connect(config: &AppConfig) -> ClientResult<Self> {
        let client = ApiClient::with_timeout(config.server_url(), config.request_timeout())?;
        info!("Connecting to user service at {}", client.base_url());
        let service = UserAdminApiAdapter::new(Arc::new(client));
        Ok(Self::new(Arc::new(service)))
    }

    /// Apply `message` and every follow-up it produces.
    pub async fn dispatch(&self, message: Message) {
        let mut queue = VecDeque::from([message]);

        while let Some(message) = queue.pop_front() {
            let task: Task<Message> = {
                let mut state = self.state.lock().await;
                update(&mut state, message)
            };

            if !task.is_none() {
                debug!("Running {} pending request(s)", task.len());
                queue.extend(task.run().await);
            }
        }
    }

    /// Initial page load: roles, then users, then the session user.
    pub async fn init(&self) {
        self.dispatch(Message::LoadRoles).await;
        self.dispatch(Message::RefreshUsers).await;
        self.dispatch(Message::LoadCurrentUser).await;
    }

    pub async fn refresh(&self) {
        self.dispatch(Message::RefreshUsers).await;
    }

    pub async fn view(&self) -> AdminView {
        let state = self.state.lock().await;
        view(&state)
    }

    pub async fn with_state<R>(&self, f: impl FnOnce(&AdminState) -> R) -> R {
        let state = self.state.lock().await;
        f(&state)
    }
}
