//! LeadBoost Enrichment API Library
//!
//! This library provides the core functionality for the LeadBoost lead
//! enrichment API: the deterministic rubric scorer, the AI response parser,
//! the enrichment orchestrator with its timeout/fallback control flow, and
//! the HTTP handlers around them.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `enrichment`: Lead enrichment orchestration and score reconciliation.
//! - `errors`: Error handling types.
//! - `gemini_client`: Gemini REST API client.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `parser`: AI response parsing.
//! - `scoring`: Deterministic rubric scorer.
//! - `services`: Optional company-lookup collaborator client.

pub mod config;
pub mod enrichment;
pub mod errors;
pub mod gemini_client;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod scoring;
pub mod services;
