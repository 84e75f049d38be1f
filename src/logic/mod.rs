//! Logic Module - Triage Engines & State
//!
//! Contains the triage building blocks: policy engine, rolling history,
//! incident queue, audit log, stats, and the background pipeline that
//! drives them.

pub mod audit;
pub mod classifier;
pub mod config;
pub mod event;
pub mod history;
pub mod persist;
pub mod pipeline;
pub mod policy;
pub mod queue;
pub mod source;
pub mod state;
pub mod stats;
