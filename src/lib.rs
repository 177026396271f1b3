//! HTTP service that classifies integers (prime, perfect, Armstrong, parity,
//! digit sum) and attaches a fun fact from a numbers trivia service.

pub mod classifier;
pub mod config;
pub mod error;
pub mod facts;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use classifier::{Classification, NumberProperty};
pub use config::{AppState, Config};
pub use error::{Result, ServerError};
