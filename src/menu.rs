//! Restaurant and menu directory

use std::collections::BTreeMap;

/// Looks up menus and restaurants
pub trait MenuDirectory {
    /// Menu items for a restaurant (case-insensitive exact name match)
    fn menu(&self, restaurant: &str) -> Option<Vec<String>>;

    /// Restaurants serving a cuisine, in listing order
    fn restaurants_serving(&self, cuisine: &str) -> Vec<String>;
}

/// In-memory directory
#[derive(Debug, Clone)]
pub struct StaticMenu {
    menus: BTreeMap<String, Vec<String>>,
    cuisines: BTreeMap<String, Vec<String>>,
}

impl Default for StaticMenu {
    fn default() -> Self {
        let menus: [(&str, &[&str]); 4] = [
            ("empire", &["Chicken Biryani", "Veg Biryani", "Butter Chicken"]),
            ("mcdonalds", &["Big Mac", "McChicken", "French Fries"]),
            ("dominos", &["Margherita Pizza", "Farmhouse Pizza", "Garlic Bread"]),
            ("mainland china", &["Hakka Noodles", "Chilli Chicken", "Fried Rice"]),
        ];
        let cuisines: [(&str, &[&str]); 6] = [
            ("indian", &["Empire", "Spice Route"]),
            ("chinese", &["China Town", "Peking Palace"]),
            ("italian", &["Dominos", "Little Italy"]),
            ("mexican", &["Taco Bell", "El Camino"]),
            ("thai", &["Thai Orchid", "Bangkok Street"]),
            ("american", &["Mcdonalds", "Burger Barn"]),
        ];

        Self {
            menus: to_map(&menus),
            cuisines: to_map(&cuisines),
        }
    }
}

impl StaticMenu {
    /// Directory with no entries
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            menus: BTreeMap::new(),
            cuisines: BTreeMap::new(),
        }
    }

    /// Add or replace a restaurant's menu
    #[must_use]
    pub fn with_menu(mut self, restaurant: &str, items: Vec<String>) -> Self {
        self.menus.insert(restaurant.to_lowercase(), items);
        self
    }

    /// Add or replace the restaurants listed for a cuisine
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: &str, restaurants: Vec<String>) -> Self {
        self.cuisines.insert(cuisine.to_lowercase(), restaurants);
        self
    }
}

impl MenuDirectory for StaticMenu {
    fn menu(&self, restaurant: &str) -> Option<Vec<String>> {
        let menu = self.menus.get(&restaurant.to_lowercase()).cloned();
        if menu.is_none() {
            tracing::debug!(restaurant, "no menu found");
        }
        menu
    }

    fn restaurants_serving(&self, cuisine: &str) -> Vec<String> {
        self.cuisines
            .get(&cuisine.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

fn to_map(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, values)| {
            (
                (*key).to_string(),
                values.iter().map(|v| (*v).to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lookup_case_insensitive() {
        let directory = StaticMenu::default();
        assert_eq!(
            directory.menu("Empire").unwrap(),
            ["Chicken Biryani", "Veg Biryani", "Butter Chicken"]
        );
        assert!(directory.menu("MCDONALDS").is_some());
    }

    #[test]
    fn test_menu_lookup_is_exact() {
        let directory = StaticMenu::default();
        assert!(directory.menu("empire restaurant").is_none());
        assert!(directory.menu("Nowhere").is_none());
    }

    #[test]
    fn test_overrides() {
        let directory = StaticMenu::empty()
            .with_menu("Corner Cafe", vec!["Toast".to_string()])
            .with_cuisine("Breakfast", vec!["Corner Cafe".to_string()]);

        assert_eq!(directory.menu("corner cafe").unwrap(), ["Toast"]);
        assert_eq!(directory.restaurants_serving("breakfast"), ["Corner Cafe"]);
        assert!(directory.restaurants_serving("thai").is_empty());
    }
}
