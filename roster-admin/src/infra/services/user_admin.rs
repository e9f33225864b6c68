use std::sync::Arc;

use async_trait::async_trait;
use roster_model::{Role, User, UserId, UserPayload};

use crate::infra::api_client::ApiClient;
use crate::infra::constants::routes::{auth, roles, users, utils};
use crate::infra::errors::ClientResult;

/// Every call the admin client makes against the user service.
///
/// One method, one request. Implementations must not retry.
#[async_trait]
pub trait UserAdminService: Send + Sync {
    async fn list_roles(&self) -> ClientResult<Vec<Role>>;
    async fn list_users(&self) -> ClientResult<Vec<User>>;
    async fn get_user(&self, id: UserId) -> ClientResult<User>;
    async fn create_user(&self, payload: UserPayload) -> ClientResult<User>;
    async fn update_user(&self, id: UserId, payload: UserPayload) -> ClientResult<User>;
    async fn delete_user(&self, id: UserId) -> ClientResult<()>;
    async fn current_user(&self) -> ClientResult<User>;
}

#[derive(Clone, Debug)]
pub struct UserAdminApiAdapter {
    client: Arc<ApiClient>,
}

impl UserAdminApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn item_path(id: UserId) -> String {
        utils::replace_param(users::ITEM, "{id}", id.to_string())
    }
}

#[async_trait]
impl UserAdminService for UserAdminApiAdapter {
    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        self.client.get(roles::LIST).await
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.client.get(users::COLLECTION).await
    }

    async fn get_user(&self, id: UserId) -> ClientResult<User> {
        self.client.get(&Self::item_path(id)).await
    }

    async fn create_user(&self, payload: UserPayload) -> ClientResult<User> {
        self.client.post(users::COLLECTION, &payload).await
    }

    async fn update_user(&self, id: UserId, payload: UserPayload) -> ClientResult<User> {
        self.client.put(&Self::item_path(id), &payload).await
    }

    async fn delete_user(&self, id: UserId) -> ClientResult<()> {
        self.client.delete(&Self::item_path(id)).await
    }

    async fn current_user(&self) -> ClientResult<User> {
        self.client.get(auth::CURRENT_USER).await
    }
}
