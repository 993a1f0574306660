//! Room concurrency layer.
//!
//! Each room runs as its own tokio task owning the [`game::engine::Room`]
//! state exclusively; commands arrive over an mpsc inbox and are applied in
//! arrival order, which is the serialization point for everything in
//! [`crate::game`].
//!
//! [`game::engine::Room`]: crate::game::engine::Room

pub mod actor;
pub mod manager;
pub mod messages;
