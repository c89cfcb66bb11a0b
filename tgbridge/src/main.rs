use anyhow::Result;
use clap::Parser;
use tgbridge::{
    delete_webhook, load_config, print_webhook_info, run_bridge, set_webhook, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, mode } => {
            let config = load_config(token, mode)?;
            run_bridge(config).await
        }
        Commands::SetWebhook { token, url } => set_webhook(token, url).await,
        Commands::DeleteWebhook {
            token,
            drop_pending,
        } => delete_webhook(token, drop_pending).await,
        Commands::WebhookInfo { token } => print_webhook_info(token).await,
    }
}
