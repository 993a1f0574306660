//! Stateless card generation.
//!
//! There is no finite pool to track: cards are produced on demand with a
//! fresh identity and two distinct letters drawn uniformly from the
//! alphabet. The generator keeps no shared mutable state and may be called
//! concurrently from any room's context.

use rand::seq::IndexedRandom;

use super::dictionary::ALPHABET;
use super::entities::Card;

/// Draw a single two-faced card with distinct letters.
pub fn draw_card() -> Card {
    let mut rng = rand::rng();
    let face_a = *ALPHABET.choose(&mut rng).expect("alphabet is non-empty");
    let face_b = loop {
        let c = *ALPHABET.choose(&mut rng).expect("alphabet is non-empty");
        if c != face_a {
            break c;
        }
    };
    Card::new(face_a, face_b)
}

/// Deal a fresh hand of `n` cards.
pub fn deal_hand(n: usize) -> Vec<Card> {
    (0..n).map(|_| draw_card()).collect()
}
