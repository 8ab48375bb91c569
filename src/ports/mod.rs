//! Port traits the domain depends on; implementations live in `adapters`.

pub mod config_port;
pub mod feed_port;
pub mod order_port;
