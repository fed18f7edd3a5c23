//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Hold the in-memory contact cache the presentation layer renders from.
//!
//! # Invariants
//! - The cache is always a snapshot of a prior full read of storage.
//! - Business validation runs before any storage access.

pub mod contact_service;
