//! # Sift Embed Server
//!
//! Batch embedding over HTTP plus a pending-file worker. The service
//! exposes `POST /embed_batch` (a bare JSON array of `{id, content}`
//! items, answered with `{"results": {id: [f32, …]}}`) and
//! `GET /health`; the worker drains `<dir>/pending/` through the
//! service and persists each vector as raw little-endian f32 beside a
//! JSON done marker.

mod service;
mod worker;

pub use service::{router, run_service};
pub use worker::{WorkerSummary, run_worker_pass};
