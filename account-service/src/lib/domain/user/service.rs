use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::domain::user::models::CreateUserParams;
use crate::domain::user::models::LoginUserCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UpdateUserParams;
use crate::domain::user::models::Username;
use crate::domain::user::models::UserView;
use crate::domain::user::tasks::SendVerifyEmailPayload;
use crate::domain::user::tasks::TaskOptions;
use crate::user::errors::FieldViolations;
use crate::user::errors::StoreError;
use crate::user::errors::UserError;
use crate::user::ports::TaskDistributor;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Registration runs validate → hash → persist → dispatch → respond, each
/// step short-circuiting on failure. The store write and the task dispatch
/// are not transactional: if dispatch fails the user stays created and the
/// caller gets an internal error.
pub struct UserService<UR, TD, PH>
where
    UR: UserRepository,
    TD: TaskDistributor,
    PH: PasswordHasher + 'static,
{
    repository: Arc<UR>,
    task_distributor: Arc<TD>,
    password_hasher: Arc<PH>,
    verify_email_options: TaskOptions,
}

impl<UR, TD, PH> UserService<UR, TD, PH>
where
    UR: UserRepository,
    TD: TaskDistributor,
    PH: PasswordHasher + 'static,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `task_distributor` - Task queue implementation
    /// * `password_hasher` - Credential hashing implementation
    /// * `verify_email_options` - Delivery options for the verification email task
    pub fn new(
        repository: Arc<UR>,
        task_distributor: Arc<TD>,
        password_hasher: Arc<PH>,
        verify_email_options: TaskOptions,
    ) -> Self {
        Self {
            repository,
            task_distributor,
            password_hasher,
            verify_email_options,
        }
    }

    async fn hash_password(
        &self,
        ctx: &CancellationToken,
        password: Password,
    ) -> Result<String, UserError> {
        let hasher = Arc::clone(&self.password_hasher);
        let task = tokio::task::spawn_blocking(move || hasher.hash(password.expose()));

        until_cancelled(ctx, task)
            .await?
            .map_err(|e| UserError::Internal(format!("failed to hash password: {}", e)))?
            .map_err(|e| UserError::Internal(format!("failed to hash password: {}", e)))
    }

    async fn verify_password(
        &self,
        ctx: &CancellationToken,
        password: Password,
        hashed_password: String,
    ) -> Result<bool, UserError> {
        let hasher = Arc::clone(&self.password_hasher);
        let task = tokio::task::spawn_blocking(move || {
            hasher.verify(password.expose(), &hashed_password)
        });

        until_cancelled(ctx, task)
            .await?
            .map_err(|e| UserError::Internal(format!("failed to verify password: {}", e)))?
            .map_err(|e| UserError::Internal(format!("failed to verify password: {}", e)))
    }
}

/// Race a pipeline step against cancellation.
///
/// Cancellation wins ties, so a step never starts once `ctx` is cancelled.
async fn until_cancelled<F>(ctx: &CancellationToken, step: F) -> Result<F::Output, UserError>
where
    F: Future,
{
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(UserError::Cancelled),
        output = step => Ok(output),
    }
}

#[async_trait]
impl<UR, TD, PH> UserServicePort for UserService<UR, TD, PH>
where
    UR: UserRepository,
    TD: TaskDistributor,
    PH: PasswordHasher + 'static,
{
    async fn register_user(
        &self,
        ctx: &CancellationToken,
        command: RegisterUserCommand,
    ) -> Result<UserView, UserError> {
        if ctx.is_cancelled() {
            return Err(UserError::Cancelled);
        }

        let registration = command.validate()?;

        let hashed_password = self.hash_password(ctx, registration.password).await?;

        let params = CreateUserParams {
            username: registration.username.into_inner(),
            hashed_password,
            full_name: registration.full_name.into_inner(),
            email: registration.email.into_inner(),
        };
        let user = until_cancelled(ctx, self.repository.create_user(params))
            .await?
            .map_err(|e| match e {
                StoreError::Conflict(key) => UserError::Conflict(key),
                other => UserError::Internal(format!("failed to create user: {}", other)),
            })?;
        tracing::info!(username = %user.username, "User created");

        let payload = SendVerifyEmailPayload {
            username: user.username.clone(),
        };
        until_cancelled(
            ctx,
            self.task_distributor
                .distribute_send_verify_email(&payload, &self.verify_email_options),
        )
        .await
        .map_err(|_| {
            tracing::error!(
                username = %user.username,
                "Registration cancelled after user was created; verify email task not enqueued"
            );
            UserError::Internal(
                "failed to distribute task to send verification email: request cancelled"
                    .to_string(),
            )
        })?
        .map_err(|e| {
            tracing::error!(
                username = %user.username,
                error = %e,
                "Failed to distribute verify email task; user remains created"
            );
            UserError::Internal(format!(
                "failed to distribute task to send verification email: {}",
                e
            ))
        })?;
        tracing::info!(
            username = %user.username,
            queue = %self.verify_email_options.queue,
            max_retry = self.verify_email_options.max_retry,
            process_in_secs = self.verify_email_options.process_in.as_secs(),
            "Verify email task enqueued"
        );

        Ok(UserView::from(user))
    }

    async fn get_user(
        &self,
        ctx: &CancellationToken,
        username: &str,
    ) -> Result<UserView, UserError> {
        let username = Username::new(username.to_string()).map_err(|e| {
            let mut violations = FieldViolations::new();
            violations.push("username", e);
            UserError::Validation(violations)
        })?;

        let user = until_cancelled(ctx, self.repository.get_user(username.as_str())).await??;

        Ok(UserView::from(user))
    }

    async fn update_user(
        &self,
        ctx: &CancellationToken,
        command: UpdateUserCommand,
    ) -> Result<UserView, UserError> {
        if ctx.is_cancelled() {
            return Err(UserError::Cancelled);
        }

        let update = command.validate()?;

        let (hashed_password, password_changed_at) = match update.password {
            Some(password) => (
                Some(self.hash_password(ctx, password).await?),
                Some(Utc::now()),
            ),
            None => (None, None),
        };

        let params = UpdateUserParams {
            username: update.username.into_inner(),
            full_name: update.full_name.map(|name| name.into_inner()),
            hashed_password,
            password_changed_at,
            email: update.email.map(|email| email.into_inner()),
        };
        let user = until_cancelled(ctx, self.repository.update_user(params)).await??;
        tracing::info!(username = %user.username, "User updated");

        Ok(UserView::from(user))
    }

    async fn login_user(
        &self,
        ctx: &CancellationToken,
        command: LoginUserCommand,
    ) -> Result<UserView, UserError> {
        let (username, password) = command.validate()?;

        let user = until_cancelled(ctx, self.repository.get_user(username.as_str())).await??;

        let is_valid = self
            .verify_password(ctx, password, user.hashed_password.clone())
            .await?;
        if !is_valid {
            tracing::warn!(username = %user.username, "Login rejected: incorrect password");
            return Err(UserError::InvalidCredentials);
        }

        Ok(UserView::from(user))
    }
}
