//! Navigation host
//!
//! Maps the back stack to what is on screen, owns the bottom sheet layout
//! and reveals the mini-player shortly after the host is created.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::controller::NavController;
use super::destination::{Destination, NavigationError};
use crate::app::{Ambient, MusicomposeState, SongController};
use crate::database::Song;
use crate::features::{SortType, UiMode};
use crate::ui::theme::{self, Color};

/// Delay between host creation and revealing the mini-player
pub const MINI_PLAYER_REVEAL_DELAY: Duration = Duration::from_millis(600);

/// Lifecycle events delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

/// Full-screen content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Search,
    Setting,
    Language,
    Theme,
}

/// Layout of the modal sheet container
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BottomSheetLayoutConfig {
    pub sheet_background_color: Color,
}

/// Persistent player bar content
#[derive(Debug, Clone, PartialEq)]
pub struct MiniPlayer {
    pub is_playing: bool,
    pub current_song: Option<Song>,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct NavFrame {
    pub screen: Screen,
    pub sheet: Option<SortType>,
    pub sheet_layout: BottomSheetLayoutConfig,
    /// Present only while the player is revealed
    pub mini_player: Option<MiniPlayer>,
}

fn screen_for(destination: Destination) -> Screen {
    match destination {
        Destination::Main => Screen::Main,
        Destination::Search => Screen::Search,
        Destination::Setting => Screen::Setting,
        Destination::Language => Screen::Language,
        Destination::Theme => Screen::Theme,
        // A sheet never stands alone; current_screen() skips it
        Destination::Sort(_) => Screen::Main,
    }
}

/// Root of the screen tree
pub struct NavHost {
    nav: NavController,
    state: Ambient<MusicomposeState>,
    song_controller: Option<Arc<dyn SongController>>,
    sheet_layout: BottomSheetLayoutConfig,
    ui_mode: UiMode,
    reveal_timer: Option<JoinHandle<()>>,
}

impl NavHost {
    pub fn new(
        state: Ambient<MusicomposeState>,
        song_controller: Option<Arc<dyn SongController>>,
        ui_mode: UiMode,
    ) -> Self {
        Self {
            nav: NavController::new(),
            state,
            song_controller,
            sheet_layout: BottomSheetLayoutConfig::default(),
            ui_mode,
            reveal_timer: None,
        }
    }

    pub fn nav(&self) -> &NavController {
        &self.nav
    }

    pub fn navigate(&mut self, route: &str) -> Result<(), NavigationError> {
        self.nav.navigate_route(route)
    }

    pub fn pop_back_stack(&mut self) -> bool {
        self.nav.pop_back_stack()
    }

    /// Switch palettes; an already painted sheet container follows along
    pub fn set_ui_mode(&mut self, ui_mode: UiMode) {
        self.ui_mode = ui_mode;
        if self.sheet_layout != BottomSheetLayoutConfig::default() {
            self.sheet_layout.sheet_background_color = theme::surface_variant(ui_mode);
        }
    }

    pub fn sheet_layout(&self) -> BottomSheetLayoutConfig {
        self.sheet_layout
    }

    /// React to the owner's lifecycle
    pub fn on_lifecycle_event(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Create => self.schedule_reveal(),
            LifecycleEvent::Destroy => self.dispose(),
            _ => {}
        }
    }

    fn schedule_reveal(&mut self) {
        let Some(controller) = self.song_controller.clone() else {
            return;
        };
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("No runtime to schedule the mini-player reveal on");
                return;
            }
        };

        if let Some(previous) = self.reveal_timer.take() {
            previous.abort();
        }
        self.reveal_timer = Some(handle.spawn(async move {
            tokio::time::sleep(MINI_PLAYER_REVEAL_DELAY).await;
            controller.show_bottom_music_player();
        }));
    }

    /// Detach from the lifecycle and cancel a pending reveal
    pub fn dispose(&mut self) {
        if let Some(timer) = self.reveal_timer.take() {
            timer.abort();
            tracing::debug!("Navigation host disposed");
        }
    }

    /// Compose the current frame
    pub fn frame(&mut self) -> NavFrame {
        let sheet = self.nav.current_sheet();
        if sheet.is_some() {
            self.sheet_layout.sheet_background_color = theme::surface_variant(self.ui_mode);
        }

        let mini_player = self.state.with(|s| {
            s.is_bottom_music_player_showed.then(|| MiniPlayer {
                is_playing: s.is_playing,
                current_song: s.current_song_played.clone(),
            })
        });

        NavFrame {
            screen: screen_for(self.nav.current_screen()),
            sheet,
            sheet_layout: self.sheet_layout,
            mini_player,
        }
    }

    /// Mini-player body tap
    pub fn on_mini_player_clicked(&self) {}

    pub fn on_favorite_clicked(&self, is_favorite: bool) {
        if let Some(controller) = &self.song_controller {
            controller.set_favorite(is_favorite);
        }
    }

    /// `is_playing` is the state the user asked for
    pub fn on_play_pause_clicked(&self, is_playing: bool) {
        if let Some(controller) = &self.song_controller {
            if is_playing {
                controller.resume();
            } else {
                controller.pause();
            }
        }
    }
}

impl Drop for NavHost {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StateSongController;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingController {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingController {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    impl SongController for RecordingController {
        fn show_bottom_music_player(&self) {
            self.record("show");
        }
        fn set_favorite(&self, is_favorite: bool) {
            self.record(format!("favorite:{}", is_favorite));
        }
        fn resume(&self) {
            self.record("resume");
        }
        fn pause(&self) {
            self.record("pause");
        }
    }

    fn host_with_state() -> (NavHost, Ambient<MusicomposeState>) {
        let state = Ambient::provide(MusicomposeState::default());
        let controller: Arc<dyn SongController> =
            Arc::new(StateSongController::new(state.clone()));
        let host = NavHost::new(state.clone(), Some(controller), UiMode::Dark);
        (host, state)
    }

    #[test]
    fn starts_on_main_without_player() {
        let (mut host, _state) = host_with_state();
        let frame = host.frame();
        assert_eq!(frame.screen, Screen::Main);
        assert_eq!(frame.sheet, None);
        assert_eq!(frame.mini_player, None);
        assert_eq!(frame.sheet_layout, BottomSheetLayoutConfig::default());
    }

    #[tokio::test(start_paused = true)]
    async fn reveals_player_after_delay() {
        let (mut host, state) = host_with_state();
        host.on_lifecycle_event(LifecycleEvent::Create);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!state.get().is_bottom_music_player_showed);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(state.get().is_bottom_music_player_showed);
        assert!(host.frame().mini_player.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_cancels_reveal() {
        let (mut host, state) = host_with_state();
        host.on_lifecycle_event(LifecycleEvent::Create);
        tokio::time::sleep(Duration::from_millis(100)).await;

        host.dispose();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!state.get().is_bottom_music_player_showed);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_host_cancels_reveal() {
        let (mut host, state) = host_with_state();
        host.on_lifecycle_event(LifecycleEvent::Create);
        drop(host);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!state.get().is_bottom_music_player_showed);
    }

    #[tokio::test(start_paused = true)]
    async fn other_lifecycle_events_do_nothing() {
        let (mut host, state) = host_with_state();
        host.on_lifecycle_event(LifecycleEvent::Start);
        host.on_lifecycle_event(LifecycleEvent::Resume);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!state.get().is_bottom_music_player_showed);
    }

    #[test]
    fn sort_sheet_sets_background() {
        let (mut host, _state) = host_with_state();
        host.navigate("Search").unwrap();
        host.navigate("BottomSheet.Sort").unwrap();

        let frame = host.frame();
        assert_eq!(frame.screen, Screen::Search);
        assert_eq!(frame.sheet, Some(SortType::Song));
        assert_eq!(
            frame.sheet_layout.sheet_background_color,
            theme::surface_variant(UiMode::Dark)
        );

        // The layout keeps the color once the sheet is dismissed
        host.pop_back_stack();
        let frame = host.frame();
        assert_eq!(frame.sheet, None);
        assert_eq!(
            frame.sheet_layout.sheet_background_color,
            theme::surface_variant(UiMode::Dark)
        );
    }

    #[test]
    fn painted_sheet_follows_ui_mode() {
        let (mut host, _state) = host_with_state();
        host.set_ui_mode(UiMode::Light);
        assert_eq!(host.sheet_layout(), BottomSheetLayoutConfig::default());

        host.navigate("BottomSheet.Sort?type=artist").unwrap();
        host.frame();
        host.pop_back_stack();

        host.set_ui_mode(UiMode::Dark);
        assert_eq!(
            host.frame().sheet_layout.sheet_background_color,
            theme::surface_variant(UiMode::Dark)
        );
    }

    #[test]
    fn mini_player_mirrors_state() {
        let (mut host, state) = host_with_state();
        let song = Song {
            id: 3,
            file_path: "/music/3.mp3".to_string(),
            title: "Three".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            duration_secs: 120,
            cover_path: None,
            is_favorite: false,
        };
        state.replace(MusicomposeState {
            current_song_played: Some(song.clone()),
            is_playing: true,
            is_bottom_music_player_showed: true,
            ..Default::default()
        });

        assert_eq!(
            host.frame().mini_player,
            Some(MiniPlayer {
                is_playing: true,
                current_song: Some(song),
            })
        );
    }

    #[test]
    fn player_taps_delegate_to_controller() {
        let controller = Arc::new(RecordingController::default());
        let state = Ambient::provide(MusicomposeState::default());
        let host = NavHost::new(
            state.clone(),
            Some(controller.clone() as Arc<dyn SongController>),
            UiMode::Light,
        );

        host.on_favorite_clicked(true);
        host.on_play_pause_clicked(false);
        host.on_play_pause_clicked(true);
        host.on_mini_player_clicked();

        assert_eq!(controller.calls(), vec!["favorite:true", "pause", "resume"]);
        assert_eq!(state.get(), MusicomposeState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn without_controller_nothing_is_scheduled() {
        let state = Ambient::provide(MusicomposeState::default());
        let mut host = NavHost::new(state.clone(), None, UiMode::Dark);
        host.on_lifecycle_event(LifecycleEvent::Create);
        host.on_play_pause_clicked(true);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(state.get(), MusicomposeState::default());
    }
}
