//! Core library for the ability assessment service: the question catalog,
//! the weighted archetype scoring engine, the result lifecycle (create,
//! e-mail attach, payment unlock), and the payment provider adapters.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
