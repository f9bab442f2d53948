//! Back stack for the navigation host

use super::destination::{Destination, NavigationError};
use crate::features::SortType;

/// Back stack starting at [`Destination::START`]
#[derive(Debug, Clone)]
pub struct NavController {
    back_stack: Vec<Destination>,
}

impl NavController {
    pub fn new() -> Self {
        Self {
            back_stack: vec![Destination::START],
        }
    }

    /// Top of the back stack
    pub fn current(&self) -> Destination {
        // The start destination is never popped
        self.back_stack
            .last()
            .copied()
            .unwrap_or(Destination::START)
    }

    pub fn back_stack(&self) -> &[Destination] {
        &self.back_stack
    }

    /// Push a destination. Re-navigating to the current one is ignored, and
    /// a sheet opened over another sheet replaces it.
    pub fn navigate(&mut self, destination: Destination) {
        let current = self.current();
        if current == destination {
            return;
        }
        if current.is_bottom_sheet() && destination.is_bottom_sheet() {
            self.back_stack.pop();
        }
        tracing::debug!("Navigate {} -> {}", current, destination);
        self.back_stack.push(destination);
    }

    pub fn navigate_route(&mut self, route: &str) -> Result<(), NavigationError> {
        let destination = Destination::parse(route).inspect_err(|e| {
            tracing::warn!("Rejected navigation request: {}", e);
        })?;
        self.navigate(destination);
        Ok(())
    }

    /// Pop the top destination. Returns false at the start destination.
    pub fn pop_back_stack(&mut self) -> bool {
        if self.back_stack.len() > 1 {
            self.back_stack.pop();
            true
        } else {
            false
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.back_stack.len() > 1
    }

    /// Full screen under any open sheet
    pub fn current_screen(&self) -> Destination {
        self.back_stack
            .iter()
            .rev()
            .find(|d| !d.is_bottom_sheet())
            .copied()
            .unwrap_or(Destination::START)
    }

    /// Sort type of the open sheet, if one is on top
    pub fn current_sheet(&self) -> Option<SortType> {
        match self.current() {
            Destination::Sort(sort_type) => Some(sort_type),
            _ => None,
        }
    }
}

impl Default for NavController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_main() {
        let nav = NavController::new();
        assert_eq!(nav.current(), Destination::Main);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn push_and_pop() {
        let mut nav = NavController::new();
        nav.navigate(Destination::Setting);
        nav.navigate(Destination::Language);
        assert_eq!(
            nav.back_stack(),
            &[Destination::Main, Destination::Setting, Destination::Language]
        );

        assert!(nav.pop_back_stack());
        assert_eq!(nav.current(), Destination::Setting);
        assert!(nav.pop_back_stack());
        assert!(!nav.pop_back_stack());
        assert_eq!(nav.current(), Destination::Main);
    }

    #[test]
    fn same_destination_not_pushed_twice() {
        let mut nav = NavController::new();
        nav.navigate(Destination::Search);
        nav.navigate(Destination::Search);
        assert_eq!(nav.back_stack().len(), 2);
    }

    #[test]
    fn sheet_sits_over_screen() {
        let mut nav = NavController::new();
        nav.navigate(Destination::Search);
        nav.navigate_route("BottomSheet.Sort?type=album").unwrap();
        nav.navigate_route("BottomSheet.Sort?type=artist").unwrap();

        assert_eq!(nav.current_screen(), Destination::Search);
        assert_eq!(nav.current_sheet(), Some(SortType::Artist));
        assert_eq!(nav.back_stack().len(), 3);

        nav.pop_back_stack();
        assert_eq!(nav.current_sheet(), None);
    }

    #[test]
    fn bad_route_leaves_stack_alone() {
        let mut nav = NavController::new();
        assert!(nav.navigate_route("Nowhere").is_err());
        assert_eq!(nav.back_stack(), &[Destination::Main]);
    }
}
