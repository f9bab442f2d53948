//! Application root
//!
//! Builds every long-lived component once and hands dependencies down
//! explicitly: the database, preferences, the shared player state, the
//! playlist feature and the navigation host.

mod controller;
mod state;

use std::sync::Arc;

use tokio::task::JoinHandle;

pub use controller::{SongController, StateSongController};
pub use state::{Ambient, MusicomposeState};

use crate::database::{Database, Table};
use crate::dispatcher::Dispatcher;
use crate::features::{
    PlaylistViewModel, PreferenceError, Preferences, StorePlaylistEnvironment, UiMode,
};
use crate::navigation::{LifecycleEvent, NavHost};

/// Core infrastructure
pub struct CoreState {
    pub db: Database,
    pub preferences: Preferences,
    pub dispatcher: Dispatcher,
}

/// Main application state
pub struct App {
    pub core: CoreState,
    /// Player and library state visible to every screen
    pub state: Ambient<MusicomposeState>,
    pub playlist: PlaylistViewModel<StorePlaylistEnvironment>,
    pub nav_host: NavHost,
    song_sync: JoinHandle<()>,
}

impl App {
    /// Wire the application around an opened database.
    /// Must be called inside a tokio runtime.
    pub fn new(db: Database, preferences: Preferences, dispatcher: Dispatcher) -> Self {
        let state = Ambient::provide(MusicomposeState::default());

        let mut controller = StateSongController::new(state.clone());
        if let Dispatcher::Runtime(handle) = &dispatcher {
            controller = controller.with_persistence(db.song_dao(), handle.clone());
        }
        let controller: Arc<dyn SongController> = Arc::new(controller);

        let environment = Arc::new(StorePlaylistEnvironment::new(
            db.playlist_dao().with_dispatcher(dispatcher.clone()),
            dispatcher.clone(),
        ));
        let playlist = PlaylistViewModel::new(environment, Some(db.song_dao()));

        let nav_host = NavHost::new(state.clone(), Some(controller), preferences.ui_mode());
        let song_sync = spawn_song_sync(db.clone(), state.clone());

        Self {
            core: CoreState {
                db,
                preferences,
                dispatcher,
            },
            state,
            playlist,
            nav_host,
            song_sync,
        }
    }

    /// Open the default database and preferences
    pub async fn init() -> anyhow::Result<Self> {
        let db = Database::open_default().await?;
        let preferences = Preferences::load();
        tracing::info!(
            language = preferences.language().code(),
            ui_mode = ?preferences.ui_mode(),
            "Preferences loaded"
        );
        Ok(Self::new(db, preferences, Dispatcher::background()))
    }

    /// Forward a platform lifecycle event to the host
    pub fn on_lifecycle_event(&mut self, event: LifecycleEvent) {
        self.nav_host.on_lifecycle_event(event);
    }

    /// Record the theme choice and repaint with it
    pub fn set_ui_mode(&mut self, ui_mode: UiMode) -> Result<(), PreferenceError> {
        self.core.preferences.set_ui_mode(ui_mode)?;
        self.nav_host.set_ui_mode(ui_mode);
        tracing::info!(?ui_mode, "UI mode changed");
        Ok(())
    }

    /// Persist preferences and release the database
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        self.nav_host.dispose();
        self.song_sync.abort();
        self.core.preferences.save()?;
        self.core.db.close().await;
        tracing::info!("Shut down");
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.song_sync.abort();
    }
}

/// Keep `MusicomposeState::songs` in step with the song table
fn spawn_song_sync(db: Database, state: Ambient<MusicomposeState>) -> JoinHandle<()> {
    let mut changes = db.tracker().subscribe(Table::Song);
    let songs = db.song_dao();

    tokio::spawn(async move {
        loop {
            changes.borrow_and_update();
            match songs.get_all().await {
                Ok(all) => {
                    tracing::debug!("Loaded {} songs", all.len());
                    state.update(|s| MusicomposeState {
                        songs: all,
                        ..s.clone()
                    });
                }
                Err(e) => tracing::error!("Failed to load songs: {}", e),
            }
            if changes.changed().await.is_err() {
                break;
            }
        }
    })
}
