//! HTTP Layer - Client Proxy
//!
//! 浏览器只与本服务通信，厂商凭证始终留在服务端

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
