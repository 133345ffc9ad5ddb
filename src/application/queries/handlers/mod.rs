//! Query Handlers 实现

mod service_handlers;

pub use service_handlers::*;
