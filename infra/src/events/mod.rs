//! Events module - message bus publishers

pub mod redis_publisher;

pub use redis_publisher::RedisUserEventPublisher;
