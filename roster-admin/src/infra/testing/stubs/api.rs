use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::StatusCode;
use roster_model::{ErrorBody, Role, User, UserId, UserPayload};

use crate::infra::errors::{ClientError, ClientResult};
use crate::infra::services::user_admin::UserAdminService;

/// Operations recorded by [`TestApiService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    ListRoles,
    ListUsers,
    GetUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    CurrentUser,
}

/// A recorded request, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    ListRoles,
    ListUsers,
    GetUser(UserId),
    CreateUser(UserPayload),
    UpdateUser(UserId, UserPayload),
    DeleteUser(UserId),
    CurrentUser,
}

impl ApiCall {
    pub fn operation(&self) -> ApiOperation {
        match self {
            ApiCall::ListRoles => ApiOperation::ListRoles,
            ApiCall::ListUsers => ApiOperation::ListUsers,
            ApiCall::GetUser(_) => ApiOperation::GetUser,
            ApiCall::CreateUser(_) => ApiOperation::CreateUser,
            ApiCall::UpdateUser(..) => ApiOperation::UpdateUser,
            ApiCall::DeleteUser(_) => ApiOperation::DeleteUser,
            ApiCall::CurrentUser => ApiOperation::CurrentUser,
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            ApiCall::CreateUser(_) | ApiCall::UpdateUser(..) | ApiCall::DeleteUser(_)
        )
    }
}

/// In-memory stand-in for the user service.
///
/// Applies the same validation rules and error envelopes as the real
/// backend, records every call, and can be told to fail the next call of a
/// given kind.
#[derive(Debug, Clone)]
pub struct TestApiService {
    inner: Arc<RwLock<InnerApiState>>,
}

#[derive(Debug)]
struct InnerApiState {
    roles: Vec<Role>,
    users: Vec<User>,
    current_user: Option<UserId>,
    next_id: i64,
    calls: Vec<ApiCall>,
    failures: HashMap<ApiOperation, VecDeque<ClientError>>,
}

impl Default for TestApiService {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApiService {
    /// Two roles, one admin user who is also the session user.
    pub fn new() -> Self {
        let admin = sample_user(1, "admin", &["ROLE_ADMIN", "ROLE_USER"]);
        Self {
            inner: Arc::new(RwLock::new(InnerApiState {
                roles: vec![Role::new("ROLE_ADMIN"), Role::new("ROLE_USER")],
                current_user: Some(admin.id),
                users: vec![admin],
                next_id: 2,
                calls: Vec::new(),
                failures: HashMap::new(),
            })),
        }
    }

    pub fn set_roles(&self, roles: Vec<Role>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.roles = roles;
        }
    }

    /// Insert (or replace) a user, keeping id allocation ahead of it.
    pub fn push_user(&self, user: User) {
        if let Ok(mut guard) = self.inner.write() {
            guard.next_id = guard.next_id.max(user.id.get() + 1);
            guard.users.retain(|existing| existing.id != user.id);
            guard.users.push(user);
        }
    }

    pub fn set_current_user(&self, id: Option<UserId>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.current_user = id;
        }
    }

    /// Server-side truth, for comparing against what the client rendered.
    pub fn users(&self) -> Vec<User> {
        self.inner.read().expect("lock poisoned").users.clone()
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.inner.read().expect("lock poisoned").calls.clone()
    }

    pub fn count(&self, operation: ApiOperation) -> usize {
        self.inner
            .read()
            .expect("lock poisoned")
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.calls.clear();
        }
    }

    /// Make the next call of `operation` fail with `error`.
    pub fn fail_next(&self, operation: ApiOperation, error: ClientError) {
        if let Ok(mut guard) = self.inner.write() {
            guard.failures.entry(operation).or_default().push_back(error);
        }
    }

    /// Record the call and pop any injected failure for it.
    fn begin(&self, call: ApiCall) -> ClientResult<std::sync::RwLockWriteGuard<'_, InnerApiState>> {
        let mut guard = self.inner.write().expect("lock poisoned");
        let operation = call.operation();
        guard.calls.push(call);
        if let Some(error) = guard.failures.get_mut(&operation).and_then(VecDeque::pop_front) {
            return Err(error);
        }
        Ok(guard)
    }
}

#[async_trait]
impl UserAdminService for TestApiService {
    async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        let guard = self.begin(ApiCall::ListRoles)?;
        Ok(guard.roles.clone())
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        let guard = self.begin(ApiCall::ListUsers)?;
        Ok(guard.users.clone())
    }

    async fn get_user(&self, id: UserId) -> ClientResult<User> {
        let guard = self.begin(ApiCall::GetUser(id))?;
        guard.find(id).cloned()
    }

    async fn create_user(&self, payload: UserPayload) -> ClientResult<User> {
        let mut guard = self.begin(ApiCall::CreateUser(payload.clone()))?;
        validate(&payload)?;
        if guard.users.iter().any(|user| user.email == payload.email) {
            return Err(bad_request(format!("Email already exists {}", payload.email)));
        }
        guard.check_roles(&payload.roles)?;

        let user = User {
            id: UserId(guard.next_id),
            name: payload.name,
            age: payload.age.unwrap_or_default(),
            email: payload.email,
            roles: payload.roles,
        };
        guard.next_id += 1;
        guard.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: UserId, payload: UserPayload) -> ClientResult<User> {
        let mut guard = self.begin(ApiCall::UpdateUser(id, payload.clone()))?;
        validate(&payload)?;
        guard.find(id)?;
        if guard
            .users
            .iter()
            .any(|user| user.email == payload.email && user.id != id)
        {
            return Err(bad_request(format!(
                "Email for update already exists: {}",
                payload.email
            )));
        }
        guard.check_roles(&payload.roles)?;

        let user = guard
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| user_not_found(id))?;
        user.name = payload.name;
        user.age = payload.age.unwrap_or_default();
        user.email = payload.email;
        user.roles = payload.roles;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> ClientResult<()> {
        let mut guard = self.begin(ApiCall::DeleteUser(id))?;
        let before = guard.users.len();
        guard.users.retain(|user| user.id != id);
        if guard.users.len() == before {
            return Err(user_not_found(id));
        }
        if guard.current_user == Some(id) {
            guard.current_user = None;
        }
        Ok(())
    }

    async fn current_user(&self) -> ClientResult<User> {
        let guard = self.begin(ApiCall::CurrentUser)?;
        let id = guard.current_user.ok_or_else(|| {
            ClientError::api(StatusCode::UNAUTHORIZED, ErrorBody::with_message("Unauthorized"))
        })?;
        guard.find(id).cloned()
    }
}

impl InnerApiState {
    fn find(&self, id: UserId) -> ClientResult<&User> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .ok_or_else(|| user_not_found(id))
    }

    fn check_roles(&self, names: &[String]) -> ClientResult<()> {
        match names
            .iter()
            .find(|name| !self.roles.iter().any(|role| &role.name == *name))
        {
            Some(missing) => Err(ClientError::api(
                StatusCode::NOT_FOUND,
                ErrorBody::with_message(format!("Role not found: {missing}")),
            )),
            None => Ok(()),
        }
    }
}

/// Bean-validation rules of the backend's user DTO.
fn validate(payload: &UserPayload) -> ClientResult<()> {
    let mut body = ErrorBody::with_message("Validation failed");

    let name_len = payload.name.trim().chars().count();
    if name_len == 0 {
        body = body.with_field_error("name", "Name is required");
    } else if !(2..=50).contains(&payload.name.chars().count()) {
        body = body.with_field_error("name", "Name must be 2-50 characters");
    }

    match payload.age {
        None => body = body.with_field_error("age", "Age is required"),
        Some(age) if age < 12 => body = body.with_field_error("age", "Age must be at least 12"),
        Some(age) if age > 130 => body = body.with_field_error("age", "Age must be at most 130"),
        Some(_) => {}
    }

    if payload.email.trim().is_empty() {
        body = body.with_field_error("email", "Email is required");
    } else if !looks_like_email(&payload.email) {
        body = body.with_field_error("email", "Invalid email format");
    }

    if let Some(password) = &payload.password
        && password.chars().count() < 6
    {
        body = body.with_field_error("password", "Password must be at least 6 characters");
    }

    if payload.roles.is_empty() {
        body = body.with_field_error("roles", "At least one role must be selected");
    }

    if body.has_field_errors() {
        body.status = Some(StatusCode::BAD_REQUEST.as_u16());
        return Err(ClientError::api(StatusCode::BAD_REQUEST, body));
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

fn bad_request(message: String) -> ClientError {
    ClientError::api(StatusCode::BAD_REQUEST, ErrorBody::with_message(message))
}

fn user_not_found(id: UserId) -> ClientError {
    ClientError::api(
        StatusCode::NOT_FOUND,
        ErrorBody::with_message(format!("User not found: {id}")),
    )
}

/// A user with a derived email and a fixed age.
pub fn sample_user(id: i64, name: &str, roles: &[&str]) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        age: 30,
        email: format!("{name}@example.com"),
        roles: roles.iter().map(|role| role.to_string()).collect(),
    }
}

/// A payload that passes backend validation.
pub fn valid_payload(name: &str, roles: &[&str]) -> UserPayload {
    UserPayload {
        name: name.to_string(),
        age: Some(30),
        email: format!("{name}@example.com"),
        password: Some("secret-password".to_string()),
        roles: roles.iter().map(|role| role.to_string()).collect(),
    }
}
