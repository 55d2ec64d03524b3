//! xcms-bridge is a local HTTP bridge to a single XCMS backend.
//!
//! It accepts `GET`/`POST` requests under `/api/xcms/`, re-issues each one
//! against a fixed backend (`http://host:port/<path>`), and relays the
//! backend's status and body (JSON or text). Forwarding failures become
//! HTTP 500 with `{"error": "..."}`. `/health` is a static liveness stub.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, init, validate,
//!   health, tunnel).
//! - [`config`] -- Config file loading and validation; the backend target
//!   lives in [`config::model::BackendTarget`].
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `GET /health` liveness handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`proxy`] -- The front door handler and the [`proxy::forward::Forwarder`].
//! - [`server`] -- Axum router, shared state and graceful shutdown.
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `yaml` | YAML config file support _(enabled by default)_ |
//! | `json` | JSON config file support |
//! | `toml` | TOML config file support |
//! | `file-backends` | All file formats |

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod proxy;
pub mod server;
