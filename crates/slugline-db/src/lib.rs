//! `PostgreSQL` storage for slugline: connection pooling, the uniqueness oracle,
//! and write-conflict classification.

pub mod db;
pub mod error;
