//! Bounded comparison selection: up to four countries chosen for the
//! side-by-side view. Session-only, never persisted.

use crate::models::Country;

/// Hard cap on the number of countries compared at once.
pub const MAX_COMPARE: usize = 4;

/// What a [`CompareSelection::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Selection was full and the id was not in it; nothing changed. The
    /// caller is expected to surface a warning to the user.
    Rejected,
}

/// Ordered, duplicate-free set of selected cca3 ids, capped at
/// [`MAX_COMPARE`]. Insertion order is remembered but the resolved view
/// follows the master list's order, not insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    ids: Vec<String>,
}

impl CompareSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` if present; otherwise add it unless the selection is
    /// already full.
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        if let Some(pos) = self.ids.iter().position(|x| x == id) {
            self.ids.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.ids.len() >= MAX_COMPARE {
            return ToggleOutcome::Rejected;
        }
        self.ids.push(id.to_string());
        ToggleOutcome::Added
    }

    /// Unconditional removal; no-op when absent.
    pub fn remove(&mut self, id: &str) {
        self.ids.retain(|x| x != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= MAX_COMPARE
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Project the master list down to the selected countries, preserving
    /// the master list's order. A derived view, not separate storage.
    pub fn resolve<'a>(&self, countries: &'a [Country]) -> Vec<&'a Country> {
        countries
            .iter()
            .filter(|c| self.contains(&c.cca3))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_respects_the_cap() {
        let mut sel = CompareSelection::new();
        for id in ["BRA", "FRA", "TCD", "JPN"] {
            assert_eq!(sel.toggle(id), ToggleOutcome::Added);
        }
        assert!(sel.is_full());
        assert_eq!(sel.toggle("DEU"), ToggleOutcome::Rejected);
        assert_eq!(sel.len(), 4);
        // Removal by toggle still works at the cap.
        assert_eq!(sel.toggle("FRA"), ToggleOutcome::Removed);
        assert_eq!(sel.len(), 3);
    }
}
