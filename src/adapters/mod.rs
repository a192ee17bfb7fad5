//! Adapters - Implementations of port interfaces.
//!
//! - `http` - axum REST surface
//! - `postgres` - sqlx draft persistence
//! - `remote` - reqwest clients for the parser service and the host CMS
//! - `auth` - token validators (JWT, mock)
//! - `memory` - in-memory ports for tests and local development

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod remote;
