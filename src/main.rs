use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod media;
mod mpris;
mod player;
mod playlist;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics go to stderr so the alternate screen stays clean;
    // redirect 2> somewhere if the host refuses playback a lot.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    runtime::run()
}
