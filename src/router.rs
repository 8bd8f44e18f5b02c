//! Intent routing
//!
//! Maps an utterance to an [`Intent`] by keyword containment. Exit keywords
//! are checked first; after that [`ROUTES`] is scanned in declared order and
//! the first keyword present wins. Routing never touches session state.

use std::fmt;

/// What the user wants this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Look up restaurants or menus
    Search,
    /// Add, remove or directly order items
    Order,
    /// Show the cart
    Cart,
    /// Start checkout
    Checkout,
    /// Ask about an order in progress
    Status,
    /// List what can be said
    Help,
    /// Change vegetarian or cuisine preferences
    Preferences,
    /// End the conversation
    Exit,
    /// Nothing matched
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Search => "search",
            Self::Order => "order",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Status => "status",
            Self::Help => "help",
            Self::Preferences => "preferences",
            Self::Exit => "exit",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Keywords that end the conversation, checked before anything else
pub const EXIT_KEYWORDS: &[&str] = &["exit", "quit", "stop"];

/// Keyword table, scanned in order; the first keyword found wins
pub const ROUTES: &[(&str, Intent)] = &[
    ("search", Intent::Search),
    ("order", Intent::Order),
    ("cart", Intent::Cart),
    ("checkout", Intent::Checkout),
    ("status", Intent::Status),
    ("help", Intent::Help),
    ("preferences", Intent::Preferences),
];

/// Classifies utterances into intents
#[derive(Debug, Clone, Copy)]
pub struct CommandRouter {
    exit_keywords: &'static [&'static str],
    routes: &'static [(&'static str, Intent)],
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self {
            exit_keywords: EXIT_KEYWORDS,
            routes: ROUTES,
        }
    }
}

impl CommandRouter {
    /// Router over the built-in keyword tables
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Router over custom keyword tables
    #[must_use]
    pub const fn with_tables(
        exit_keywords: &'static [&'static str],
        routes: &'static [(&'static str, Intent)],
    ) -> Self {
        Self {
            exit_keywords,
            routes,
        }
    }

    /// Classify a lowercased utterance
    #[must_use]
    pub fn route(&self, utterance: &str) -> Intent {
        if self.exit_keywords.iter().any(|k| utterance.contains(k)) {
            return Intent::Exit;
        }

        let intent = self
            .routes
            .iter()
            .find(|(keyword, _)| utterance.contains(keyword))
            .map_or(Intent::Unknown, |&(_, intent)| intent);

        tracing::debug!(utterance, %intent, "routed utterance");
        intent
    }
}
