//! Musicompose - headless player core
//! Opens the library, brings the navigation host up and runs until Ctrl-C

use musicompose::app::App;
use musicompose::navigation::LifecycleEvent;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut app = App::init().await?;
    app.on_lifecycle_event(LifecycleEvent::Create);

    let playlists = app.core.db.playlist_dao().count().await?;
    let frame = app.nav_host.frame();
    tracing::info!(playlists, screen = ?frame.screen, "Musicompose ready");

    tokio::signal::ctrl_c().await?;

    app.on_lifecycle_event(LifecycleEvent::Destroy);
    app.shutdown().await
}
