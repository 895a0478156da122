//! Core library for the `speedtest-exporter` CLI.
//!
//! The binary runs the Ookla `speedtest` CLI once per network interface,
//! keeps every raw JSON result on disk and renders each one as a Prometheus
//! text exposition file for the node exporter textfile collector. This crate
//! exposes the building blocks: CLI argument types, configuration parsing,
//! the probe runner, metric extraction and rendering, the artifact store and
//! the batch orchestrator.
pub mod args;
pub mod batch;
pub mod config;
pub mod error;
pub mod extract;
pub mod probe;
pub mod render;
pub mod store;
