//! Application services

mod chat_gateway;

pub use chat_gateway::ChatGateway;
