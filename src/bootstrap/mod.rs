//! Bootstrap module - Application initialization and dependency injection
//! 引导模块 - 应用初始化和依赖注入

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::load_config;
pub use tracing::init_tracing_subscriber;
pub use wiring::{build_orchestrator, WiringError, WiringResult};
