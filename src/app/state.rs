// src/app/state.rs
//! Application state definitions

use std::sync::Arc;

use tokio::sync::watch;

use crate::database::Song;

/// Global player and library state shared by every screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MusicomposeState {
    /// Library songs as last reported by the song table
    pub songs: Vec<Song>,
    pub current_song_played: Option<Song>,
    pub is_playing: bool,
    pub is_bottom_music_player_showed: bool,
}

impl MusicomposeState {
    pub fn song(&self, id: i64) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }
}

/// Shared state handed down explicitly instead of looked up implicitly.
///
/// Clones read and write the same value. [`Ambient::scoped_with`] starts a child
/// scope: whoever receives the child sees its value, the parent and its
/// other holders keep seeing theirs. Writes always replace the whole value.
#[derive(Debug)]
pub struct Ambient<T> {
    inner: Arc<watch::Sender<T>>,
}

impl<T> Clone for Ambient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone> Ambient<T> {
    /// Root scope holding `value`
    pub fn provide(value: T) -> Self {
        Self {
            inner: Arc::new(watch::Sender::new(value)),
        }
    }

    /// Child scope derived from the current value, overriding it for
    /// whoever receives the child
    pub fn scoped_with(&self, f: impl FnOnce(&T) -> T) -> Self {
        let value = f(&self.inner.borrow());
        Self::provide(value)
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }

    /// Read without cloning
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.inner.subscribe()
    }

    /// Replace the value, returning the previous one
    pub fn replace(&self, value: T) -> T {
        self.inner.send_replace(value)
    }

    /// Build the next value from the current one and replace it
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        self.inner.send_modify(|current| {
            let next = f(current);
            *current = next;
        });
    }

    /// Whether two handles share one scope
    pub fn same_scope(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + Default> Default for Ambient<T> {
    fn default() -> Self {
        Self::provide(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_writes() {
        let root = Ambient::provide(MusicomposeState::default());
        let reader = root.clone();
        root.update(|s| MusicomposeState {
            is_playing: true,
            ..s.clone()
        });
        assert!(reader.get().is_playing);
        assert!(reader.same_scope(&root));
    }

    #[test]
    fn child_scope_shadows_parent() {
        let root = Ambient::provide(MusicomposeState::default());
        let child = root.scoped_with(|s| MusicomposeState {
            is_bottom_music_player_showed: true,
            ..s.clone()
        });

        assert!(child.get().is_bottom_music_player_showed);
        assert!(!root.get().is_bottom_music_player_showed);

        root.update(|s| MusicomposeState {
            is_playing: true,
            ..s.clone()
        });
        assert!(!child.get().is_playing);
        assert!(!child.same_scope(&root));
    }

    #[tokio::test]
    async fn subscribers_see_replacements() {
        let root = Ambient::provide(1u32);
        let mut rx = root.subscribe();
        assert_eq!(root.replace(2), 1);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 2);
    }
}
