use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rdkafka::config::ClientConfig;
use rdkafka::error::KafkaError;
use rdkafka::error::RDKafkaErrorCode;
use rdkafka::producer::FutureProducer;
use rdkafka::producer::FutureRecord;
use rdkafka::util::Timeout;

use crate::config::Config;
use crate::domain::user::ports::TaskDistributor;
use crate::domain::user::tasks::Queue;
use crate::domain::user::tasks::SendVerifyEmailPayload;
use crate::domain::user::tasks::TaskOptions;
use crate::outbound::tasks::messages::TaskMessage;
use crate::user::errors::TaskDistributorError;

pub struct KafkaTaskDistributor {
    producer: FutureProducer,
    topic_prefix: String,
    timeout: Duration,
}

impl KafkaTaskDistributor {
    /// Create a new Kafka task distributor with "at least once" delivery semantics
    ///
    /// # Notes:
    /// - `acks=all`: Wait for all in-sync replicas to acknowledge
    /// - `enable.idempotence=true`: Prevents duplicate tasks during retries
    /// - `max.in.flight.requests.per.connection=5`: Allows pipelining with ordering guarantees
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        tracing::info!(
            "Initializing Kafka task distributor: brokers={}, topic_prefix={}",
            &config.kafka.brokers,
            &config.kafka.task_topic_prefix
        );

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.kafka.brokers)
            .set("message.timeout.ms", "30000")
            .set("queue.buffering.max.messages", "10000")
            .set("compression.type", "gzip")
            .set("enable.idempotence", "true")
            .set("acks", "all")
            .set("retries", "10")
            .set("max.in.flight.requests.per.connection", "5")
            .set("retry.backoff.ms", "100")
            .create()?;

        tracing::info!("Kafka task distributor initialized successfully");

        Ok(Self {
            producer,
            topic_prefix: config.kafka.task_topic_prefix.clone(),
            timeout: Duration::from_secs(30),
        })
    }

    fn topic(&self, queue: Queue) -> String {
        format!("{}.{}", self.topic_prefix, queue)
    }

    /// Enqueue a task on its queue's topic, keyed so that tasks for one user
    /// land on the same partition.
    async fn enqueue(&self, key: &str, message: &TaskMessage) -> Result<(), TaskDistributorError> {
        let payload = serde_json::to_string(message)
            .map_err(|e| TaskDistributorError::SerializationFailed(e.to_string()))?;
        let topic = self.topic(message.queue);

        tracing::debug!(
            task_id = %message.task_id,
            task_type = %message.task_type,
            "Enqueueing task to topic '{}'",
            topic
        );

        let record = FutureRecord::to(&topic).key(key).payload(&payload);

        self.producer
            .send(record, Timeout::After(self.timeout))
            .await
            .map(|_| ())
            .map_err(|(err, _)| match err {
                KafkaError::MessageProduction(RDKafkaErrorCode::MessageTimedOut) => {
                    TaskDistributorError::Timeout(err.to_string())
                }
                _ => TaskDistributorError::EnqueueFailed(err.to_string()),
            })
    }
}

#[async_trait]
impl TaskDistributor for KafkaTaskDistributor {
    async fn distribute_send_verify_email(
        &self,
        payload: &SendVerifyEmailPayload,
        options: &TaskOptions,
    ) -> Result<(), TaskDistributorError> {
        let message = TaskMessage::send_verify_email(payload, options, Utc::now())
            .map_err(|e| TaskDistributorError::SerializationFailed(e.to_string()))?;

        self.enqueue(&payload.username, &message).await.map_err(|e| {
            tracing::error!(
                "Failed to enqueue verification email task for user {}: {}",
                payload.username,
                e
            );
            e
        })
    }
}
