//! Navigation: destinations, back stack and the host that renders them

mod controller;
mod destination;
mod host;

pub use controller::NavController;
pub use destination::{
    Destination, NavigationError, SORT_SHEET_ROUTE, SORT_TYPE_ARG, decode_sort_type,
};
pub use host::{
    BottomSheetLayoutConfig, LifecycleEvent, MINI_PLAYER_REVEAL_DELAY, MiniPlayer, NavFrame,
    NavHost, Screen,
};
