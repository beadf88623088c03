use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::ports::TaskDistributor;
use crate::domain::user::tasks::SendVerifyEmailPayload;
use crate::domain::user::tasks::TaskOptions;
use crate::outbound::tasks::messages::TaskMessage;
use crate::user::errors::TaskDistributorError;

/// Records tasks instead of sending them. Built with [`failing`] it rejects
/// every task.
///
/// [`failing`]: InMemoryTaskDistributor::failing
#[derive(Clone, Default)]
pub struct InMemoryTaskDistributor {
    tasks: Arc<Mutex<Vec<TaskMessage>>>,
    fail: bool,
}

impl InMemoryTaskDistributor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            tasks: Arc::default(),
            fail: true,
        }
    }

    pub fn recorded_tasks(&self) -> Vec<TaskMessage> {
        self.tasks
            .lock()
            .map(|tasks| tasks.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TaskDistributor for InMemoryTaskDistributor {
    async fn distribute_send_verify_email(
        &self,
        payload: &SendVerifyEmailPayload,
        options: &TaskOptions,
    ) -> Result<(), TaskDistributorError> {
        if self.fail {
            return Err(TaskDistributorError::EnqueueFailed(
                "broker unavailable".to_string(),
            ));
        }

        let message = TaskMessage::send_verify_email(payload, options, Utc::now())
            .map_err(|e| TaskDistributorError::SerializationFailed(e.to_string()))?;

        self.tasks
            .lock()
            .map_err(|e| TaskDistributorError::EnqueueFailed(e.to_string()))?
            .push(message);

        Ok(())
    }
}
