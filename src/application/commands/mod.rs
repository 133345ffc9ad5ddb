//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：合成与对比

mod synthesize_commands;

pub mod handlers;

pub use synthesize_commands::*;
