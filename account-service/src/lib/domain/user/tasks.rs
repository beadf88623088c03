use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

pub const TASK_SEND_VERIFY_EMAIL: &str = "task:send_verify_email";

/// Priority queue a task is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Queue {
    Critical,
    Default,
}

impl Queue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Queue::Critical => "critical",
            Queue::Default => "default",
        }
    }
}

impl fmt::Display for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery options handed to the task distributor with every task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOptions {
    /// Maximum number of retries after the first failed attempt.
    pub max_retry: u32,
    /// Delay before the first processing attempt.
    pub process_in: Duration,
    pub queue: Queue,
}

impl TaskOptions {
    /// Options used for the verification email sent after registration.
    pub fn verify_email() -> Self {
        Self {
            max_retry: 10,
            process_in: Duration::from_secs(10),
            queue: Queue::Critical,
        }
    }
}

/// Payload of the verification-email task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendVerifyEmailPayload {
    pub username: String,
}
