//! # LightPool CLI
//!
//! Library half of the `lightpool` binary: argument definitions, logging
//! setup, and the HTTP JSON-RPC [`SubmissionChannel`](lightpool_sdk::SubmissionChannel)
//! implementation. Split out of `main.rs` so the transport can be tested
//! against a mock node.

pub mod cli;
pub mod logging;
pub mod rpc;

pub use rpc::{HttpSubmitter, HttpSubmitterConfig};
