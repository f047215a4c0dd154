use std::error::Error;
use std::sync::Arc;

use dotenvy::dotenv;
use flashcards_bot::database::connection::Connection;
use flashcards_bot::schema::schema;
use flashcards_bot::settings::{Settings, Webhook};
use flashcards_bot::state::TrainerState;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::IgnoringErrorHandlerSafe;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let settings = Settings::load()?;
    init_tracing(&settings.log_level)?;

    let connection = Arc::new(Connection::connect(&settings.database_url).await?);
    connection.run_migrations().await?;

    let bot = Bot::new(&settings.token);
    tracing::info!("Starting bot...");

    let webhook = settings.webhook.clone();
    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![
            InMemStorage::<TrainerState>::new(),
            connection,
            Arc::new(settings)
        ])
        .enable_ctrlc_handler()
        .build();

    if let Some(Webhook { url, addr }) = webhook {
        tracing::info!("Listening for webhook updates on {}", addr);
        let listener = webhooks::axum(bot, Options::new(addr, url)).await?;
        dispatcher
            .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
            .await
    } else {
        dispatcher.dispatch().await
    }

    Ok(())
}

fn init_tracing(level: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_span_events(FmtSpan::ENTER)
        .log_internal_errors(true)
        .with_line_number(true)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;
    Ok(())
}
