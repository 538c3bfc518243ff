//! Clinic Queue - Real-time patient flow coordination
//!
//! This crate keeps per-doctor, per-date, per-hospital waiting queues
//! ordered under concurrent writes and fans change notifications out to
//! every connected viewer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
