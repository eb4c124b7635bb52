//! Structured logging for vqueue runs
//!
//! Everything goes to stderr through `tracing`; stdout carries query
//! results only. [`init`] installs the subscriber for a [`Profile`], and
//! [`test_capture`] records events in memory for assertions.
//!
//! # Events
//!
//! Field names come from `vqueue_core_types::schema`.
//!
//! | Source | Level | Fields |
//! |---|---|---|
//! | `run_batch` start | info | `run_id`, `strategy`, `ops_len` |
//! | `run_batch` end | info | `run_id`, `version`, `queries`, `duration_ms` |
//! | `run_batch` end_error | error | `run_id`, `version`, `err_kind`, `err_code` |
//! | `check_batch` start / end | info | `ops_len` / `mutations`, `queries` |
//! | each query | info | `version`, `strategy`, message "The queue at version V is [...]" |
//! | table lease load / save | debug | `backend`, `table_len` |
//! | file store save | debug | `path`, `bytes`, `versions` |
//!
//! ```rust
//! use vqueue_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
