//! Conversation session state
//!
//! One `Session` lives for the lifetime of an assistant. The cart is private:
//! it changes only through [`Session::add_to_cart`], [`Session::remove_from_cart`]
//! and the checkout commit.

/// Dietary and cuisine preferences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Prefer vegetarian dishes
    pub vegetarian: bool,
    /// Preferred cuisine
    pub cuisine: Option<String>,
}

/// Outcome of a cart mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartUpdate {
    /// Item appended; carries the cart after the change
    Added { item: String, cart: Vec<String> },
    /// First occurrence removed; carries the cart after the change
    Removed { item: String, cart: Vec<String> },
    /// Item was not in the cart
    NotFound { item: String },
    /// No item was recognised in an add request
    NothingToAdd,
    /// No item was recognised in a remove request
    NothingToRemove,
}

impl CartUpdate {
    /// Reply text for the user
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Added { item, cart } => {
                format!("Added {item} to your cart. Current cart: {}", cart.join(", "))
            }
            Self::Removed { item, cart } => {
                format!("Removed {item}. Current cart: {}", cart.join(", "))
            }
            Self::NotFound { item } => format!("{item} not found in your cart"),
            Self::NothingToAdd => "What would you like to add to your cart?".to_string(),
            Self::NothingToRemove => "What would you like to remove from your cart?".to_string(),
        }
    }

    /// Whether the cart changed
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Added { .. } | Self::Removed { .. })
    }
}

/// Read-only view of the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartView<'a> {
    /// Nothing in the cart
    Empty,
    /// Items in insertion order
    Items(&'a [String]),
}

impl CartView<'_> {
    /// Reply text for the user
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Empty => "Your cart is empty".to_string(),
            Self::Items(items) => format!("Your cart contains: {}", items.join(", ")),
        }
    }
}

/// Per-conversation state
#[derive(Debug, Clone, Default)]
pub struct Session {
    cart: Vec<String>,
    current_restaurant: Option<String>,
    address: Option<String>,
    preferences: Preferences,
}

impl Session {
    /// Create an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item to the end of the cart
    ///
    /// `None` (nothing recognised) leaves the cart untouched.
    pub fn add_to_cart(&mut self, item: Option<&str>) -> CartUpdate {
        let Some(item) = item else {
            return CartUpdate::NothingToAdd;
        };

        self.cart.push(item.to_string());
        tracing::debug!(item, cart_len = self.cart.len(), "added to cart");

        CartUpdate::Added {
            item: item.to_string(),
            cart: self.cart.clone(),
        }
    }

    /// Remove the first occurrence of an item
    pub fn remove_from_cart(&mut self, item: Option<&str>) -> CartUpdate {
        let Some(item) = item else {
            return CartUpdate::NothingToRemove;
        };

        match self.cart.iter().position(|i| i == item) {
            Some(index) => {
                self.cart.remove(index);
                tracing::debug!(item, cart_len = self.cart.len(), "removed from cart");
                CartUpdate::Removed {
                    item: item.to_string(),
                    cart: self.cart.clone(),
                }
            }
            None => CartUpdate::NotFound {
                item: item.to_string(),
            },
        }
    }

    /// View the cart
    #[must_use]
    pub fn view_cart(&self) -> CartView<'_> {
        if self.cart.is_empty() {
            CartView::Empty
        } else {
            CartView::Items(&self.cart)
        }
    }

    /// Cart contents in order
    #[must_use]
    pub fn cart(&self) -> &[String] {
        &self.cart
    }

    /// Empty the cart, returning what was in it
    pub(crate) fn drain_cart(&mut self) -> Vec<String> {
        std::mem::take(&mut self.cart)
    }

    /// Set the vegetarian preference from an utterance
    ///
    /// Turns the preference on when "vegetarian" is present, unless "no"
    /// appears anywhere in the utterance. Returns the new value.
    pub fn set_vegetarian(&mut self, utterance: &str) -> bool {
        if utterance.contains("vegetarian") {
            self.preferences.vegetarian = !utterance.contains("no");
            tracing::debug!(vegetarian = self.preferences.vegetarian, "preference updated");
        }
        self.preferences.vegetarian
    }

    /// Overwrite the preferred cuisine
    pub fn set_cuisine_preference(&mut self, cuisine: &str) {
        self.preferences.cuisine = Some(cuisine.to_string());
        tracing::debug!(cuisine, "preference updated");
    }

    /// Current preferences
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Restaurant the user last ordered from
    #[must_use]
    pub fn current_restaurant(&self) -> Option<&str> {
        self.current_restaurant.as_deref()
    }

    /// Set the restaurant the user is ordering from
    pub fn set_current_restaurant(&mut self, restaurant: &str) {
        self.current_restaurant = Some(restaurant.to_string());
    }

    /// Delivery address
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Set the delivery address
    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_order() {
        let mut session = Session::new();
        session.add_to_cart(Some("pizza"));
        session.add_to_cart(Some("fries"));

        assert_eq!(
            session.view_cart(),
            CartView::Items(&["pizza".to_string(), "fries".to_string()])
        );
    }

    #[test]
    fn test_add_nothing() {
        let mut session = Session::new();
        let update = session.add_to_cart(None);

        assert_eq!(update, CartUpdate::NothingToAdd);
        assert!(!update.changed());
        assert_eq!(update.message(), "What would you like to add to your cart?");
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_add_message_lists_cart() {
        let mut session = Session::new();
        session.add_to_cart(Some("pizza"));
        let update = session.add_to_cart(Some("fries"));

        assert_eq!(
            update.message(),
            "Added fries to your cart. Current cart: pizza, fries"
        );
    }

    #[test]
    fn test_remove_first_occurrence_only() {
        let mut session = Session::new();
        session.add_to_cart(Some("pizza"));
        session.add_to_cart(Some("fries"));
        session.add_to_cart(Some("pizza"));

        let update = session.remove_from_cart(Some("pizza"));
        assert!(update.changed());
        assert_eq!(session.cart(), ["fries", "pizza"]);
    }

    #[test]
    fn test_remove_missing() {
        let mut session = Session::new();
        session.add_to_cart(Some("pizza"));

        let update = session.remove_from_cart(Some("sushi"));
        assert_eq!(
            update,
            CartUpdate::NotFound {
                item: "sushi".to_string()
            }
        );
        assert_eq!(update.message(), "sushi not found in your cart");
        assert_eq!(session.cart(), ["pizza"]);
    }

    #[test]
    fn test_view_empty() {
        let session = Session::new();
        assert_eq!(session.view_cart(), CartView::Empty);
        assert_eq!(session.view_cart().message(), "Your cart is empty");
    }

    #[test]
    fn test_vegetarian_whole_utterance_negation() {
        let mut session = Session::new();
        assert!(session.set_vegetarian("turn on vegetarian"));
        assert!(!session.set_vegetarian("no vegetarian please"));
        // "no" inside another word still counts
        assert!(!session.set_vegetarian("vegetarian is now on"));
    }

    #[test]
    fn test_vegetarian_untouched_without_keyword() {
        let mut session = Session::new();
        session.set_vegetarian("vegetarian");
        assert!(session.set_vegetarian("something else, no"));
    }

    #[test]
    fn test_cuisine_overwrite() {
        let mut session = Session::new();
        session.set_cuisine_preference("thai");
        session.set_cuisine_preference("indian");
        assert_eq!(session.preferences().cuisine.as_deref(), Some("indian"));
    }

    #[test]
    fn test_drain_cart() {
        let mut session = Session::new();
        session.add_to_cart(Some("pasta"));
        assert_eq!(session.drain_cart(), ["pasta"]);
        assert_eq!(session.view_cart(), CartView::Empty);
    }
}
