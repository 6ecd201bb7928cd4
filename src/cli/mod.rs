//! Command line entry points
//!
//! - `serve`: run the HTTP gateway
//! - `chat`: send one message through the gateway and print the reply

pub mod chat;
pub mod serve;

use clap::{Parser, Subcommand};

/// Netabot gateway - one chat endpoint over sync and async-job LLM providers
#[derive(Parser)]
#[command(name = "netabot-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Send a single message and print the reply
    Chat(chat::ChatArgs),
}
