use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::user::models::CreateUserParams;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UpdateUserParams;
use crate::domain::user::models::User;
use crate::domain::user::models::UserView;
use crate::domain::user::tasks::SendVerifyEmailPayload;
use crate::domain::user::tasks::TaskOptions;
use crate::user::errors::StoreError;
use crate::user::errors::TaskDistributorError;
use crate::user::errors::UserError;

/// Port for user domain service operations.
///
/// Every operation takes the caller's cancellation token; once it is
/// cancelled no further step of the operation starts.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and schedule the verification email.
    ///
    /// # Arguments
    /// * `ctx` - Caller's cancellation token
    /// * `command` - Raw registration fields
    ///
    /// # Returns
    /// Sanitized view of the created user
    ///
    /// # Errors
    /// * `Validation` - One or more fields are invalid (all are reported)
    /// * `Conflict` - Username or email is already taken
    /// * `Internal` - Hashing, store or task dispatch failed; after a dispatch
    ///   failure the user has already been created
    /// * `Cancelled` - `ctx` was cancelled before the pipeline completed
    async fn register_user(
        &self,
        ctx: &CancellationToken,
        command: RegisterUserCommand,
    ) -> Result<UserView, UserError>;

    /// Retrieve user by unique username.
    ///
    /// # Errors
    /// * `Validation` - Username is syntactically invalid
    /// * `NotFound` - No user with this username
    /// * `Internal` - Store failure
    async fn get_user(&self, ctx: &CancellationToken, username: &str)
        -> Result<UserView, UserError>;

    /// Update the present fields of an existing user.
    ///
    /// A new password is hashed and stamps `password_changed_at`.
    ///
    /// # Errors
    /// * `Validation` - A present field is invalid
    /// * `NotFound` - User does not exist
    /// * `Conflict` - New email is already registered
    /// * `Internal` - Hashing or store failure
    async fn update_user(
        &self,
        ctx: &CancellationToken,
        command: UpdateUserCommand,
    ) -> Result<UserView, UserError>;

    /// Verify login credentials.
    ///
    /// # Errors
    /// * `Validation` - Username or password is syntactically invalid
    /// * `NotFound` - User does not exist
    /// * `InvalidCredentials` - Password does not match
    /// * `Internal` - Verification or store failure
    async fn login_user(
        &self,
        ctx: &CancellationToken,
        command: LoginUserCommand,
    ) -> Result<UserView, UserError>;
}

/// Persistence operations for user accounts.
///
/// Implementations classify backend failures into [`StoreError`] themselves.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Insert a new user atomically.
    ///
    /// # Errors
    /// * `Conflict` - Username or email is already taken
    /// * `Other` - Backend failure
    async fn create_user(&self, params: CreateUserParams) -> Result<User, StoreError>;

    /// Retrieve user by username.
    ///
    /// # Errors
    /// * `NotFound` - No user with this username
    /// * `Other` - Backend failure
    async fn get_user(&self, username: &str) -> Result<User, StoreError>;

    /// Overwrite the `Some` fields of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Conflict` - New email is already registered
    /// * `Other` - Backend failure
    async fn update_user(&self, params: UpdateUserParams) -> Result<User, StoreError>;
}

/// Enqueues asynchronous tasks for later processing.
#[async_trait]
pub trait TaskDistributor: Send + Sync + 'static {
    /// Enqueue the verification email for a newly registered user.
    ///
    /// # Errors
    /// * `SerializationFailed` - Task could not be encoded
    /// * `EnqueueFailed` - Broker rejected the task
    /// * `Timeout` - Broker did not acknowledge in time
    async fn distribute_send_verify_email(
        &self,
        payload: &SendVerifyEmailPayload,
        options: &TaskOptions,
    ) -> Result<(), TaskDistributorError>;
}
