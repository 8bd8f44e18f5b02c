//! Slot extraction
//!
//! Pulls cuisine, restaurant and food item values out of an utterance by
//! fixed-vocabulary substring matching. The first vocabulary entry (in
//! declared order) contained anywhere in the text wins, so short entries can
//! over-match inside longer phrases.

/// Cuisines, in match order
pub const CUISINES: &[&str] = &["indian", "chinese", "italian", "mexican", "thai", "american"];

/// Restaurants, in match order
pub const RESTAURANTS: &[&str] = &["empire", "mcdonalds", "dominos", "mainland china"];

/// Food items, in match order
pub const FOOD_ITEMS: &[&str] = &["biryani", "pizza", "burger", "fries", "pasta"];

/// Separator between the item and restaurant halves of an order
const FROM_SEPARATOR: &str = " from ";

/// Extracts structured values from free text
///
/// `None` means the slot was not found.
pub trait SlotExtractor {
    /// Extract a cuisine
    fn extract_cuisine(&self, text: &str) -> Option<String>;

    /// Extract a restaurant name (display-cased)
    fn extract_restaurant(&self, text: &str) -> Option<String>;

    /// Extract a food item
    fn extract_food_item(&self, text: &str) -> Option<String>;

    /// Extract `(restaurant, item)` from "<item> from <restaurant>"
    ///
    /// Both are `None` unless the text splits into exactly two segments.
    fn extract_restaurant_and_item(&self, text: &str) -> (Option<String>, Option<String>) {
        let folded = fold(text);
        let parts: Vec<&str> = folded.split(FROM_SEPARATOR).collect();

        match parts.as_slice() {
            [item, restaurant] => (
                self.extract_restaurant(restaurant),
                self.extract_food_item(item),
            ),
            _ => (None, None),
        }
    }
}

/// Default extractor over the built-in vocabularies
#[derive(Debug, Clone, Copy, Default)]
pub struct VocabularyExtractor;

impl SlotExtractor for VocabularyExtractor {
    fn extract_cuisine(&self, text: &str) -> Option<String> {
        first_match(CUISINES, text).map(ToString::to_string)
    }

    fn extract_restaurant(&self, text: &str) -> Option<String> {
        first_match(RESTAURANTS, text).map(title_case)
    }

    fn extract_food_item(&self, text: &str) -> Option<String> {
        first_match(FOOD_ITEMS, text).map(ToString::to_string)
    }
}

/// Find the first vocabulary term contained in `text`
fn first_match(vocabulary: &'static [&'static str], text: &str) -> Option<&'static str> {
    let folded = fold(text);
    let found = vocabulary.iter().copied().find(|term| folded.contains(term));
    tracing::trace!(text, ?found, "vocabulary match");
    found
}

/// Lowercase and drop apostrophes so "Domino's" matches "dominos"
pub(crate) fn fold(text: &str) -> String {
    text.to_lowercase().replace(['\'', '\u{2019}'], "")
}

/// Uppercase the first letter of each whitespace-separated word
fn title_case(term: &str) -> String {
    term.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_cuisine() {
        let slots = VocabularyExtractor;
        assert_eq!(
            slots.extract_cuisine("I want chinese food").as_deref(),
            Some("chinese")
        );
        assert_eq!(slots.extract_cuisine("I want sushi"), None);
    }

    #[test]
    fn test_declared_order_wins() {
        let slots = VocabularyExtractor;
        // "pizza" precedes "fries" in the vocabulary regardless of position in text
        assert_eq!(
            slots.extract_food_item("fries and a pizza").as_deref(),
            Some("pizza")
        );
    }

    #[test]
    fn test_substring_over_match() {
        let slots = VocabularyExtractor;
        assert_eq!(
            slots.extract_restaurant("show the mainland china menu").as_deref(),
            Some("Mainland China")
        );
        assert_eq!(
            slots.extract_cuisine("any indiana specials").as_deref(),
            Some("indian")
        );
    }

    #[test]
    fn test_extract_restaurant_is_case_insensitive() {
        let slots = VocabularyExtractor;
        assert_eq!(
            slots.extract_restaurant("Menu for EMPIRE").as_deref(),
            Some("Empire")
        );
        assert_eq!(
            slots.extract_restaurant("order from mcdonald's").as_deref(),
            Some("Mcdonalds")
        );
    }

    #[test]
    fn test_extract_restaurant_and_item() {
        let slots = VocabularyExtractor;
        assert_eq!(
            slots.extract_restaurant_and_item("order pizza from Dominos"),
            (Some("Dominos".to_string()), Some("pizza".to_string()))
        );
        assert_eq!(slots.extract_restaurant_and_item("order pizza"), (None, None));
    }

    #[test]
    fn test_extract_restaurant_and_item_no_partial() {
        let slots = VocabularyExtractor;
        // Three segments: nothing is extracted, not even the item
        assert_eq!(
            slots.extract_restaurant_and_item("pizza from empire from dominos"),
            (None, None)
        );
        // Two segments with an unknown restaurant still yields the item
        assert_eq!(
            slots.extract_restaurant_and_item("order pasta from nowhere"),
            (None, Some("pasta".to_string()))
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("mainland china"), "Mainland China");
        assert_eq!(title_case("empire"), "Empire");
    }
}
