//! Intent handlers
//!
//! The [`Assistant`] owns one conversation: its session, the checkout flow and
//! the directory collaborators. Each call to [`Assistant::handle`] processes
//! exactly one utterance.

use crate::checkout::{CheckoutFlow, CheckoutOutcome};
use crate::discovery::{RestaurantDiscovery, StaticNearby};
use crate::menu::{MenuDirectory, StaticMenu};
use crate::router::{CommandRouter, Intent};
use crate::session::Session;
use crate::slots::{SlotExtractor, VocabularyExtractor};

/// Spoken at the start of a conversation
pub const WELCOME: &str =
    "Welcome to Voice Food Ordering! How can I help you today? Say 'help' for options.";

/// Spoken when the conversation ends
pub const FAREWELL: &str = "Goodbye! Happy eating!";

/// Spoken when no intent matched
pub const FALLBACK: &str =
    "I'm not sure how to help with that. Say 'help' for available commands.";

/// Example phrases listed by the help intent
const HELP_PHRASES: &[&str] = &[
    "Search for nearby restaurants",
    "Search for italian restaurants",
    "Search the Empire menu",
    "Order pizza from Domino's",
    "Add fries to my order",
    "What's in my cart?",
    "Checkout",
    "What's my status?",
];

/// What a turn was handled as
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// Routed to an intent handler
    Routed(Intent),
    /// Consumed by a pending checkout
    Confirmation(CheckoutOutcome),
}

/// Result of handling one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// How the utterance was handled
    pub handled: Handled,
    /// Replies to emit, in order
    pub replies: Vec<String>,
}

impl Turn {
    fn routed(intent: Intent, replies: Vec<String>) -> Self {
        Self {
            handled: Handled::Routed(intent),
            replies,
        }
    }

    /// Whether this turn ends the conversation
    #[must_use]
    pub fn is_exit(&self) -> bool {
        self.handled == Handled::Routed(Intent::Exit)
    }

    /// The routed intent, if the turn was routed
    #[must_use]
    pub const fn intent(&self) -> Option<Intent> {
        match self.handled {
            Handled::Routed(intent) => Some(intent),
            Handled::Confirmation(_) => None,
        }
    }
}

/// Handles utterances for one conversation
pub struct Assistant<S = VocabularyExtractor> {
    router: CommandRouter,
    slots: S,
    session: Session,
    checkout: CheckoutFlow,
    directory: Box<dyn MenuDirectory>,
    discovery: Box<dyn RestaurantDiscovery>,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new(VocabularyExtractor)
    }
}

impl<S: SlotExtractor> Assistant<S> {
    /// Create an assistant with a fresh session and the built-in directories
    #[must_use]
    pub fn new(slots: S) -> Self {
        Self {
            router: CommandRouter::new(),
            slots,
            session: Session::new(),
            checkout: CheckoutFlow::new(),
            directory: Box::new(StaticMenu::default()),
            discovery: Box::new(StaticNearby::default()),
        }
    }

    /// Use a different router
    #[must_use]
    pub fn with_router(mut self, router: CommandRouter) -> Self {
        self.router = router;
        self
    }

    /// Use a different menu directory
    #[must_use]
    pub fn with_directory(mut self, directory: impl MenuDirectory + 'static) -> Self {
        self.directory = Box::new(directory);
        self
    }

    /// Use a different nearby-restaurant source
    #[must_use]
    pub fn with_discovery(mut self, discovery: impl RestaurantDiscovery + 'static) -> Self {
        self.discovery = Box::new(discovery);
        self
    }

    /// Session state
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Whether a checkout is waiting for confirmation
    #[must_use]
    pub const fn awaiting_confirmation(&self) -> bool {
        self.checkout.is_pending()
    }

    /// Handle one lowercased utterance
    ///
    /// While a checkout is pending the utterance resolves it instead of
    /// being routed.
    pub async fn handle(&mut self, utterance: &str) -> Turn {
        if let Some(outcome) = self
            .checkout
            .resolve_checkout(&mut self.session, Some(utterance))
        {
            return confirmation_turn(outcome);
        }

        let intent = self.router.route(utterance);
        tracing::info!(%intent, "handling utterance");

        let replies = match intent {
            Intent::Exit => vec![FAREWELL.to_string()],
            Intent::Search => self.search(utterance).await,
            Intent::Order => vec![self.order(utterance)],
            Intent::Cart => vec![self.session.view_cart().message()],
            Intent::Checkout => vec![self.begin_checkout()],
            Intent::Status => {
                vec!["Your order is being prepared and will arrive in about 25 minutes".to_string()]
            }
            Intent::Help => vec![help_text()],
            Intent::Preferences => vec![self.preferences(utterance)],
            Intent::Unknown => vec![FALLBACK.to_string()],
        };

        Turn::routed(intent, replies)
    }

    /// Handle a turn where nothing was heard
    ///
    /// Cancels a pending checkout; otherwise nothing happens.
    pub fn handle_silence(&mut self) -> Option<Turn> {
        self.checkout
            .resolve_checkout(&mut self.session, None)
            .map(confirmation_turn)
    }

    async fn search(&self, utterance: &str) -> Vec<String> {
        if utterance.contains("nearby") || utterance.contains("near me") {
            return vec![self.search_nearby().await];
        }

        if utterance.contains("restaurant") {
            return match self.slots.extract_cuisine(utterance) {
                Some(cuisine) => self.search_by_cuisine(&cuisine),
                None => vec!["What type of cuisine are you looking for?".to_string()],
            };
        }

        if utterance.contains("menu") {
            return vec![self.show_menu(utterance)];
        }

        vec!["What would you like to search for? Restaurants or menu items?".to_string()]
    }

    async fn search_nearby(&self) -> String {
        match self.discovery.discover(None).await {
            Ok(names) if !names.is_empty() => {
                format!("Here are some nearby restaurants: {}", numbered(&names))
            }
            Ok(_) => "Sorry, I could not find any restaurants nearby.".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "restaurant discovery failed");
                "Sorry, I could not find any restaurants nearby.".to_string()
            }
        }
    }

    fn search_by_cuisine(&self, cuisine: &str) -> Vec<String> {
        let searching = format!("Searching for {cuisine} restaurants...");
        let restaurants = self.directory.restaurants_serving(cuisine);

        let found = if restaurants.is_empty() {
            format!("Sorry, I couldn't find any {cuisine} restaurants.")
        } else {
            format!("Found these {cuisine} restaurants: {}", numbered(&restaurants))
        };

        vec![searching, found]
    }

    fn show_menu(&self, utterance: &str) -> String {
        let Some(restaurant) = self.slots.extract_restaurant(utterance) else {
            return "Which restaurant's menu would you like to hear?".to_string();
        };

        match self.directory.menu(&restaurant) {
            Some(items) => format!("Menu for {restaurant}: {}", items.join(", ")),
            None => format!("Sorry, I couldn't find {restaurant}"),
        }
    }

    fn order(&mut self, utterance: &str) -> String {
        if utterance.contains("add") {
            let item = self.slots.extract_food_item(utterance);
            return self.session.add_to_cart(item.as_deref()).message();
        }

        if utterance.contains("remove") {
            let item = self.slots.extract_food_item(utterance);
            return self.session.remove_from_cart(item.as_deref()).message();
        }

        if utterance.contains("from") {
            let (restaurant, item) = self.slots.extract_restaurant_and_item(utterance);
            return self.order_specific_item(restaurant.as_deref(), item.as_deref());
        }

        "What would you like to order?".to_string()
    }

    fn order_specific_item(&mut self, restaurant: Option<&str>, item: Option<&str>) -> String {
        match (restaurant, item) {
            (Some(restaurant), Some(item)) => {
                self.session.set_current_restaurant(restaurant);
                self.session.add_to_cart(Some(item));
                format!(
                    "Ordering {item} from {restaurant}. Current cart: {}",
                    self.session.cart().join(", ")
                )
            }
            (Some(restaurant), None) => {
                self.session.set_current_restaurant(restaurant);
                format!("What would you like to order from {restaurant}?")
            }
            (None, Some(item)) => format!("Which restaurant would you like to order {item} from?"),
            (None, None) => "What would you like to order?".to_string(),
        }
    }

    fn begin_checkout(&mut self) -> String {
        match self.checkout.begin_checkout(&self.session) {
            Ok(start) => start.message(),
            Err(e) => {
                // Pending turns are consumed by resolve_checkout before routing
                tracing::warn!(error = %e, "checkout already pending");
                "You already have a checkout waiting for confirmation.".to_string()
            }
        }
    }

    fn preferences(&mut self, utterance: &str) -> String {
        if utterance.contains("vegetarian") {
            let on = self.session.set_vegetarian(utterance);
            let status = if on { "on" } else { "off" };
            return format!("Vegetarian preference turned {status}");
        }

        if utterance.contains("cuisine") {
            return match self.slots.extract_cuisine(utterance) {
                Some(cuisine) => {
                    self.session.set_cuisine_preference(&cuisine);
                    format!("Preferred cuisine set to {cuisine}")
                }
                None => "Which cuisine do you prefer?".to_string(),
            };
        }

        "You can set a vegetarian or cuisine preference.".to_string()
    }
}

impl<S> std::fmt::Debug for Assistant<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("session", &self.session)
            .field("checkout", &self.checkout)
            .finish_non_exhaustive()
    }
}

fn confirmation_turn(outcome: CheckoutOutcome) -> Turn {
    Turn {
        replies: vec![outcome.message()],
        handled: Handled::Confirmation(outcome),
    }
}

fn help_text() -> String {
    format!("You can say things like: {}", HELP_PHRASES.join(", "))
}

/// Format names as "1. a 2. b"
fn numbered(names: &[String]) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {name}", i + 1))
        .collect::<Vec<_>>()
        .join(" ")
}
