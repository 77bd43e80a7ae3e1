//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into adapter-facing use-case APIs.
//! - Keep adapters decoupled from storage details.

pub mod issue_service;
