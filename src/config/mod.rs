//! Process configuration
//!
//! [`AppConfig`] covers the server itself (files + `APP__*` variables).
//! [`GatewayConfig`] covers the providers and is read from an [`EnvSource`].

mod app_config;
mod env;
mod gateway;

pub use app_config::{AppConfig, CorsConfig, LogFormat, LoggingConfig, ServerConfig};
pub use env::{EnvSource, ProcessEnv};
pub use gateway::{vars, GatewayConfig, ProviderConfig, ValidatedProvider};
