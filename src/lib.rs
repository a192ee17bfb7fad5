//! Curate - schema-driven document curation backend.
//!
//! Users fill out documents derived from schema templates, checkpoint drafts,
//! validate against the schema, and promote finished documents to Data
//! records in the host content-management system.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
