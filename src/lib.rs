//! Core library for the `surge` CLI.
//!
//! This crate provides the building blocks used by the binary: the benchmark
//! tracker with its scoped timers and instrumentation wrapper, the batch
//! dispatcher that fans one remote tool out over many requests, the MCP
//! client behind the tool boundary, and CLI/config parsing. The primary
//! user-facing interface is the `surge` command-line application; library
//! APIs may evolve as the CLI grows.
pub mod args;
pub mod bench;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod remote;
pub mod shutdown;
