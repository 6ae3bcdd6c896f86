//! Tessera Node — HTTP service exposing the verification engine over an
//! in-memory store loaded from a dataset file.

pub mod api;
pub mod config;
pub mod state;

pub use api::{build_router, start_api_server, ApiEnvelope, ApiError};
pub use config::TesseraConfig;
pub use state::NodeState;
