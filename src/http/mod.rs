//! HTTP protocol layer module
//!
//! Response builders shared by the router and the classify handler,
//! decoupled from classification logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_500_response, build_health_response,
    build_json_response, build_options_response,
};
