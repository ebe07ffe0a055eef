//! Database access: connection pool and repository implementations

pub mod connection;
pub mod memory;
pub mod mysql;
