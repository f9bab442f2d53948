//! Navigation destinations and route decoding

use crate::features::SortType;

/// Route of the sort bottom sheet
pub const SORT_SHEET_ROUTE: &str = "BottomSheet.Sort";

/// Argument name carried by the sort sheet route
pub const SORT_TYPE_ARG: &str = "type";

/// Errors from route decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("unknown route: {0}")]
    UnknownRoute(String),
    #[error("invalid value '{value}' for route argument '{name}'")]
    InvalidArgument { name: &'static str, value: String },
}

/// Every place the host can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Main,
    Search,
    Setting,
    Language,
    Theme,
    /// Modal sort sheet over the current screen
    Sort(SortType),
}

impl Destination {
    /// Screen shown when the host starts
    pub const START: Destination = Destination::Main;

    /// Route string. Sort sheets carry their type by name.
    pub fn route(&self) -> String {
        match self {
            Destination::Main => "Main".to_string(),
            Destination::Search => "Search".to_string(),
            Destination::Setting => "Setting".to_string(),
            Destination::Language => "Language".to_string(),
            Destination::Theme => "Theme".to_string(),
            Destination::Sort(sort_type) => {
                format!("{}/{}", SORT_SHEET_ROUTE, sort_type.name())
            }
        }
    }

    pub fn is_bottom_sheet(&self) -> bool {
        matches!(self, Destination::Sort(_))
    }

    /// Decode a route.
    ///
    /// The sort sheet accepts `BottomSheet.Sort`, `BottomSheet.Sort/<type>`
    /// and `BottomSheet.Sort?type=<type>`.
    pub fn parse(route: &str) -> Result<Self, NavigationError> {
        let route = route.trim();
        match route {
            "Main" => return Ok(Destination::Main),
            "Search" => return Ok(Destination::Search),
            "Setting" => return Ok(Destination::Setting),
            "Language" => return Ok(Destination::Language),
            "Theme" => return Ok(Destination::Theme),
            _ => {}
        }

        let Some(rest) = route.strip_prefix(SORT_SHEET_ROUTE) else {
            return Err(NavigationError::UnknownRoute(route.to_string()));
        };

        let arg = if rest.is_empty() {
            None
        } else if let Some(path_arg) = rest.strip_prefix('/') {
            Some(path_arg)
        } else if let Some(query) = rest.strip_prefix('?') {
            query_arg(query, SORT_TYPE_ARG)
        } else {
            return Err(NavigationError::UnknownRoute(route.to_string()));
        };

        decode_sort_type(arg).map(Destination::Sort)
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.route())
    }
}

fn query_arg<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Resolve the sort sheet argument.
///
/// A missing or empty argument yields the first sort type. Names are
/// matched case-insensitively; numeric ordinals are accepted only when in
/// range.
pub fn decode_sort_type(arg: Option<&str>) -> Result<SortType, NavigationError> {
    let Some(raw) = arg.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(SortType::default());
    };

    if let Some(sort_type) = SortType::from_name(raw) {
        return Ok(sort_type);
    }

    raw.parse::<usize>()
        .ok()
        .and_then(SortType::from_ordinal)
        .ok_or_else(|| NavigationError::InvalidArgument {
            name: SORT_TYPE_ARG,
            value: raw.to_string(),
        })
}
