//! Property-based tests for domain types

use domain::{Sentence, SentenceTile, TileId, speech_text};
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[a-zA-ZäöüõÄÖÜÕšž ]{1,12}"
}

proptest! {
    #[test]
    fn conjugations_preserve_position(words in prop::collection::vec(word(), 0..8)) {
        let mut sentence = Sentence::new(words.iter().map(SentenceTile::new).collect());
        let normalized: Vec<String> = words.iter().map(|w| w.to_uppercase()).collect();

        prop_assert!(sentence.apply_conjugations(&normalized).is_ok());
        prop_assert_eq!(sentence.spoken_words(), normalized);
    }

    #[test]
    fn conjugations_with_wrong_count_are_rejected(
        words in prop::collection::vec(word(), 1..8),
        extra in 1usize..3,
    ) {
        let mut sentence = Sentence::new(words.iter().map(SentenceTile::new).collect());
        let mut normalized = words.clone();
        for _ in 0..extra {
            normalized.push("x".to_string());
        }
        prop_assert!(sentence.apply_conjugations(&normalized).is_err());
    }

    #[test]
    fn speech_text_contains_every_word_in_order(words in prop::collection::vec("[a-z]{1,8}", 1..8)) {
        let text = speech_text(&words);
        let split: Vec<&str> = text.split(", ").collect();
        prop_assert_eq!(split, words.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn tile_ids_parse_from_decimal(n in any::<i64>()) {
        prop_assert_eq!(n.to_string().parse::<TileId>().unwrap(), TileId::new(n));
    }
}
