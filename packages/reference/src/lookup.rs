//! Name to label lookups over a [`ReferenceTable`].

use crate::{ReferenceTable, StateEntry};

/// Strips every whitespace character so `"New York"`, `"NewYork"` and
/// `"New  York"` compare equal.
fn squash_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

impl ReferenceTable {
    /// Finds a state by name, ignoring whitespace. The first state in
    /// pre-order wins.
    #[must_use]
    pub fn find_state(&self, state_name: &str) -> Option<&StateEntry> {
        let wanted = squash_whitespace(state_name);
        self.states()
            .find(|state| squash_whitespace(&state.name) == wanted)
    }

    /// City names of the given state in document order, for dependent
    /// selectors. Empty when the state is unknown.
    #[must_use]
    pub fn city_names(&self, state_name: &str) -> Vec<&str> {
        self.find_state(state_name)
            .map(|state| state.cities.iter().map(|c| c.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// State names in pre-order.
    #[must_use]
    pub fn state_names(&self) -> Vec<&str> {
        self.states().map(|s| s.name.as_str()).collect()
    }
}

/// Returns the encoded label of a state, comparing names with all
/// whitespace removed.
///
/// Returns `None` if no state matches or the matching state has no label.
#[must_use]
pub fn lookup_state_code(table: &ReferenceTable, state_name: &str) -> Option<u32> {
    table.find_state(state_name).and_then(|state| state.code)
}

/// Returns the encoded label of the first city named `city_name` found in a
/// pre-order walk of the whole table.
///
/// City labels are only unique within a state, so a name shared between
/// states resolves to whichever state comes first in the document. Use
/// [`lookup_city_code_in_state`] when the state is known.
#[must_use]
pub fn lookup_city_code(table: &ReferenceTable, city_name: &str) -> Option<u32> {
    table
        .states()
        .find_map(|state| state.city(city_name))
        .map(|city| city.code)
}

/// Returns the encoded label of `city_name` within the named state.
#[must_use]
pub fn lookup_city_code_in_state(
    table: &ReferenceTable,
    state_name: &str,
    city_name: &str,
) -> Option<u32> {
    table
        .find_state(state_name)
        .and_then(|state| state.city(city_name))
        .map(|city| city.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ReferenceTable {
        ReferenceTable::from_json(&serde_json::json!({
            "New York": { "le_state": 32, "cities": { "Albany": 4, "Portland": 90 } },
            "New England": {
                "Maine": { "le_state": 19, "cities": { "Portland": 12, "Bangor": 2 } }
            },
            "North Dakota": { "cities": { "Fargo": 1 } }
        }))
        .unwrap()
    }

    #[test]
    fn state_lookup_ignores_whitespace() {
        let table = table();
        assert_eq!(lookup_state_code(&table, "New York"), Some(32));
        assert_eq!(lookup_state_code(&table, "NewYork"), Some(32));
        assert_eq!(lookup_state_code(&table, "New  York"), Some(32));
        assert_eq!(lookup_state_code(&table, " New York\t"), Some(32));
    }

    #[test]
    fn state_lookup_reaches_nested_states() {
        assert_eq!(lookup_state_code(&table(), "Maine"), Some(19));
    }

    #[test]
    fn state_lookup_misses() {
        let table = table();
        assert_eq!(lookup_state_code(&table, "Texas"), None);
        assert_eq!(lookup_state_code(&table, "New England"), None);
        assert_eq!(lookup_state_code(&table, "North Dakota"), None);
    }

    #[test]
    fn city_lookup_returns_first_pre_order_match() {
        let table = table();
        assert_eq!(lookup_city_code(&table, "Portland"), Some(90));
        assert_eq!(lookup_city_code(&table, "Bangor"), Some(2));
        assert_eq!(lookup_city_code(&table, "Fargo"), Some(1));
        assert_eq!(lookup_city_code(&table, "Austin"), None);
    }

    #[test]
    fn scoped_city_lookup() {
        let table = table();
        assert_eq!(lookup_city_code_in_state(&table, "Maine", "Portland"), Some(12));
        assert_eq!(lookup_city_code_in_state(&table, "NewYork", "Portland"), Some(90));
        assert_eq!(lookup_city_code_in_state(&table, "Maine", "Albany"), None);
        assert_eq!(lookup_city_code_in_state(&table, "Texas", "Albany"), None);
    }

    #[test]
    fn selector_listings() {
        let table = table();
        assert_eq!(table.state_names(), ["New York", "Maine", "North Dakota"]);
        assert_eq!(table.city_names("Maine"), ["Portland", "Bangor"]);
        assert!(table.city_names("Texas").is_empty());
    }
}
