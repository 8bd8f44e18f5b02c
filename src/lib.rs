//! Dinebell - Voice food-ordering assistant
//!
//! This library provides the conversational core and its collaborators:
//! - Keyword command routing and slot extraction
//! - Cart, preferences and two-step checkout
//! - Menu directory and nearby restaurant discovery
//! - Console and voice (STT/TTS) input and output
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Interfaces                       │
//! │        Console (stdin/stdout)  │  Voice (mic/TTS)   │
//! └────────────────────┬────────────────────────────────┘
//!                      │ SpeechInput / SpeechOutput
//! ┌────────────────────▼────────────────────────────────┐
//! │                    TurnLoop                         │
//! │   listen → Assistant::handle → say, until exit      │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                   Assistant                         │
//! │  Router │ Slots │ Session │ Checkout │ Menus │ Nearby│
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod assistant;
pub mod checkout;
pub mod config;
pub mod console;
pub mod discovery;
pub mod error;
pub mod menu;
pub mod router;
pub mod session;
pub mod slots;
pub mod turn;
pub mod voice;

pub use assistant::{Assistant, Handled, Turn};
pub use checkout::{CheckoutFlow, CheckoutOutcome, CheckoutStart, CheckoutState, PendingCheckout};
pub use config::Config;
pub use console::{ConsoleInput, ConsoleOutput};
pub use discovery::{RestaurantDiscovery, ScrapeDiscovery, StaticNearby};
pub use error::{Error, Result};
pub use menu::{MenuDirectory, StaticMenu};
pub use router::{CommandRouter, Intent};
pub use session::{CartUpdate, CartView, Preferences, Session};
pub use slots::{SlotExtractor, VocabularyExtractor};
pub use turn::{Flow, ListenError, LoopSummary, SpeechInput, SpeechOutput, TurnLoop};
