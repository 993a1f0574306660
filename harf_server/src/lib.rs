//! Server library surface, exposed so integration tests can build the
//! router without going through the binary.

pub mod api;
pub mod config;
