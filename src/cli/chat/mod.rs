//! Chat command - one message through the gateway, reply on stdout

use clap::Args;
use tokio_util::sync::CancellationToken;

use crate::config::{GatewayConfig, ProcessEnv};
use crate::domain::ChatMode;
use crate::infrastructure::logging;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Message to send
    pub message: String,

    /// Chat mode (`sync`, `async_job`, or an alias such as `libre`)
    #[arg(short, long)]
    pub mode: Option<String>,
}

pub async fn run(args: ChatArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = super::serve::load_config();
    logging::init_logging(&config.logging);

    let gateway = crate::create_gateway(&GatewayConfig::from_env(&ProcessEnv))?;
    let mode = ChatMode::resolve(args.mode.as_deref());

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let result = gateway.run_chat_job(&args.message, mode, &cancel).await;
    println!("{}", result.render());

    Ok(())
}
