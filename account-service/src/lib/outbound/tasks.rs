pub mod in_memory;
pub mod messages;
pub mod producer;

pub use in_memory::InMemoryTaskDistributor;
pub use producer::KafkaTaskDistributor;
