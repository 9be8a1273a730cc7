//! Background Tasks Module
//!
//! Long-lived tasks that run alongside request handling.
//!
//! # Tasks
//! - TTL Sweeper: purges expired cache records at a configured interval

mod sweeper;

pub use sweeper::{spawn_sweeper, SweeperHandle};
