use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::user::tasks::Queue;
use crate::domain::user::tasks::SendVerifyEmailPayload;
use crate::domain::user::tasks::TaskOptions;
use crate::domain::user::tasks::TASK_SEND_VERIFY_EMAIL;

/// Serializable envelope for every enqueued task.
///
/// Workers read `task_type` to pick a handler and decode `payload` accordingly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMessage {
    pub task_id: Uuid,
    pub task_type: String,
    pub payload: serde_json::Value,
    pub max_retry: u32,
    /// Earliest time a worker may start processing.
    pub process_at: DateTime<Utc>,
    pub enqueued_at: DateTime<Utc>,
    pub queue: Queue,
}

impl TaskMessage {
    pub fn send_verify_email(
        payload: &SendVerifyEmailPayload,
        options: &TaskOptions,
        now: DateTime<Utc>,
    ) -> Result<Self, serde_json::Error> {
        let process_in = chrono::Duration::from_std(options.process_in)
            .unwrap_or_else(|_| chrono::Duration::zero());

        Ok(Self {
            task_id: Uuid::new_v4(),
            task_type: TASK_SEND_VERIFY_EMAIL.to_string(),
            payload: serde_json::to_value(payload)?,
            max_retry: options.max_retry,
            process_at: now + process_in,
            enqueued_at: now,
            queue: options.queue,
        })
    }
}
