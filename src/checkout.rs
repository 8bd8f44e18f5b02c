//! Checkout confirmation flow
//!
//! A two-call protocol: [`CheckoutFlow::begin_checkout`] records a pending
//! confirmation, and [`CheckoutFlow::resolve_checkout`] consumes the next
//! turn's text. The pending token is taken on every resolution path, so the
//! flow can never stay suspended.

use crate::session::Session;
use crate::{Error, Result};

/// Words that commit a pending checkout
const AFFIRMATIONS: &[&str] = &["yes", "proceed"];

/// State of the checkout flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    /// No confirmation outstanding
    Idle,
    /// Waiting for the next utterance to confirm or cancel
    AwaitingConfirmation,
}

/// Snapshot of the cart taken when checkout started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCheckout {
    /// Items shown to the user in the summary
    pub items: Vec<String>,
}

/// Result of starting a checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStart {
    /// Summary emitted; now awaiting confirmation
    AwaitingConfirmation(PendingCheckout),
    /// Cart was empty; nothing pending
    EmptyCart,
}

impl CheckoutStart {
    /// Reply text for the user
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::AwaitingConfirmation(pending) => format!(
                "Ready to checkout with: {}. Proceed with payment?",
                pending.items.join(", ")
            ),
            Self::EmptyCart => "Your cart is empty. Add some items first.".to_string(),
        }
    }
}

/// How a pending checkout was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Order placed; carries the items that were ordered
    Confirmed { items: Vec<String> },
    /// Order abandoned; cart untouched
    Cancelled,
}

impl CheckoutOutcome {
    /// Reply text for the user
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Confirmed { .. } => {
                "Processing payment... Order confirmed! Your food will arrive in 30-40 minutes."
                    .to_string()
            }
            Self::Cancelled => "Checkout cancelled".to_string(),
        }
    }
}

/// Owns the single outstanding checkout confirmation
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    pending: Option<PendingCheckout>,
}

impl CheckoutFlow {
    /// Create an idle flow
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> CheckoutState {
        if self.pending.is_some() {
            CheckoutState::AwaitingConfirmation
        } else {
            CheckoutState::Idle
        }
    }

    /// Whether a confirmation is outstanding
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a checkout
    ///
    /// Enters `AwaitingConfirmation` only when the cart is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::CheckoutPending` if a confirmation is already outstanding
    pub fn begin_checkout(&mut self, session: &Session) -> Result<CheckoutStart> {
        if self.pending.is_some() {
            return Err(Error::CheckoutPending);
        }

        if session.cart().is_empty() {
            tracing::debug!("checkout attempted with empty cart");
            return Ok(CheckoutStart::EmptyCart);
        }

        let pending = PendingCheckout {
            items: session.cart().to_vec(),
        };
        tracing::info!(items = pending.items.len(), "awaiting checkout confirmation");
        self.pending = Some(pending.clone());

        Ok(CheckoutStart::AwaitingConfirmation(pending))
    }

    /// Resolve the outstanding checkout with the next turn's text
    ///
    /// `None` stands for a turn where nothing was heard and cancels the
    /// checkout. Returns `None` if no checkout was pending.
    pub fn resolve_checkout(
        &mut self,
        session: &mut Session,
        utterance: Option<&str>,
    ) -> Option<CheckoutOutcome> {
        self.pending.take()?;

        let affirmed = utterance.is_some_and(|text| {
            let text = text.to_lowercase();
            AFFIRMATIONS.iter().any(|word| text.contains(word))
        });

        let outcome = if affirmed {
            let items = session.drain_cart();
            tracing::info!(items = items.len(), "order confirmed");
            CheckoutOutcome::Confirmed { items }
        } else {
            tracing::info!(?utterance, "checkout cancelled");
            CheckoutOutcome::Cancelled
        };

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(items: &[&str]) -> Session {
        let mut session = Session::new();
        for item in items {
            session.add_to_cart(Some(item));
        }
        session
    }

    #[test]
    fn test_confirm_clears_cart() {
        let mut session = session_with(&["pizza"]);
        let mut flow = CheckoutFlow::new();

        let start = flow.begin_checkout(&session).unwrap();
        assert_eq!(
            start.message(),
            "Ready to checkout with: pizza. Proceed with payment?"
        );
        assert_eq!(flow.state(), CheckoutState::AwaitingConfirmation);

        let outcome = flow.resolve_checkout(&mut session, Some("yes please")).unwrap();
        assert_eq!(
            outcome,
            CheckoutOutcome::Confirmed {
                items: vec!["pizza".to_string()]
            }
        );
        assert!(session.cart().is_empty());
        assert_eq!(flow.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_proceed_confirms() {
        let mut session = session_with(&["pasta"]);
        let mut flow = CheckoutFlow::new();
        flow.begin_checkout(&session).unwrap();

        let outcome = flow.resolve_checkout(&mut session, Some("proceed")).unwrap();
        assert!(matches!(outcome, CheckoutOutcome::Confirmed { .. }));
    }

    #[test]
    fn test_decline_keeps_cart() {
        let mut session = session_with(&["pizza"]);
        let mut flow = CheckoutFlow::new();
        flow.begin_checkout(&session).unwrap();

        let outcome = flow.resolve_checkout(&mut session, Some("no thanks")).unwrap();
        assert_eq!(outcome, CheckoutOutcome::Cancelled);
        assert_eq!(outcome.message(), "Checkout cancelled");
        assert_eq!(session.cart(), ["pizza"]);
        assert_eq!(flow.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_silence_cancels() {
        let mut session = session_with(&["pizza"]);
        let mut flow = CheckoutFlow::new();
        flow.begin_checkout(&session).unwrap();

        let outcome = flow.resolve_checkout(&mut session, None).unwrap();
        assert_eq!(outcome, CheckoutOutcome::Cancelled);
        assert!(!flow.is_pending());
    }

    #[test]
    fn test_empty_cart_stays_idle() {
        let session = Session::new();
        let mut flow = CheckoutFlow::new();

        let start = flow.begin_checkout(&session).unwrap();
        assert_eq!(start, CheckoutStart::EmptyCart);
        assert_eq!(start.message(), "Your cart is empty. Add some items first.");
        assert_eq!(flow.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_no_second_pending() {
        let session = session_with(&["fries"]);
        let mut flow = CheckoutFlow::new();
        flow.begin_checkout(&session).unwrap();

        assert!(matches!(
            flow.begin_checkout(&session),
            Err(Error::CheckoutPending)
        ));
        assert!(flow.is_pending());
    }

    #[test]
    fn test_resolve_when_idle() {
        let mut session = session_with(&["fries"]);
        let mut flow = CheckoutFlow::new();

        assert!(flow.resolve_checkout(&mut session, Some("yes")).is_none());
        assert_eq!(session.cart(), ["fries"]);
    }
}
