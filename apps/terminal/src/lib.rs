//! Terminal front-end for the vocabulary game.

mod app;
mod console;
mod paths;
mod screens;

pub use app::App;
pub use console::Console;
pub use paths::AppPaths;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so they stay out of the prompts.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let paths = AppPaths::resolve();
    paths
        .ensure_dirs()
        .with_context(|| format!("failed to create data directory {}", paths.root.display()))?;
    tracing::info!(root = %paths.root.display(), "Starting Vocab Quest");

    let mut app = App::new(paths, Console::stdin());
    app.main_menu().await
}
