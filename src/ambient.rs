//! Ambient responder: the low-probability random heckle for messages
//! that match no trigger rule.
//!
//! Rolls a d100 per message and answers with one phrase from a fixed
//! table when the roll comes in under the configured percent (1 by
//! default). One process-wide generator, seeded once from the OS and
//! shared behind a lock, so rapid successive calls stay uncorrelated.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The fixed phrase table. Selection is uniform.
pub const AMBIENT_PHRASES: [&str; 16] = [
    "They aren’t half bad.",
    "What’s all the commotion about?",
    "You know, the opening is catchy.",
    "Yeah, whadya think?",
    "Have we ever said that this channel is for the birds?",
    "Do you think there's life in outer space?",
    "Well, this has been a day to remember.",
    ":one:",
    "More! More!",
    "You know, I'm really going to enjoy today!",
    ":tv: What's the name of this movie?",
    "How do they do it?",
    "Eh, this channel is good for what ails me.",
    "That seemed like something very different.",
    "Ohh...",
    "That was a funny comment.",
];

pub struct AmbientResponder {
    reply_percent: u8,
    rng: Mutex<StdRng>,
}

impl AmbientResponder {
    /// Create a responder with a freshly entropy-seeded generator.
    pub fn new(reply_percent: u8) -> Self {
        Self::with_rng(reply_percent, StdRng::from_entropy())
    }

    /// Create a responder around a caller-supplied generator.
    pub fn with_rng(reply_percent: u8, rng: StdRng) -> Self {
        Self {
            reply_percent,
            rng: Mutex::new(rng),
        }
    }

    /// Roll the dice; return a phrase on a hit, `None` otherwise.
    pub fn maybe_respond(&self) -> Option<&'static str> {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let roll: u8 = rng.gen_range(1..=100);
        if roll <= self.reply_percent {
            Some(AMBIENT_PHRASES[rng.gen_range(0..AMBIENT_PHRASES.len())])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(percent: u8) -> AmbientResponder {
        AmbientResponder::with_rng(percent, StdRng::seed_from_u64(0x57a7_1e2b))
    }

    #[test]
    fn zero_percent_never_responds() {
        let responder = seeded(0);
        for _ in 0..10_000 {
            assert!(responder.maybe_respond().is_none());
        }
    }

    #[test]
    fn hundred_percent_always_responds() {
        let responder = seeded(100);
        for _ in 0..1_000 {
            let phrase = responder.maybe_respond().unwrap();
            assert!(AMBIENT_PHRASES.contains(&phrase));
        }
    }

    #[test]
    fn one_percent_rate_is_statistically_close() {
        let responder = seeded(1);
        let hits = (0..100_000)
            .filter(|_| responder.maybe_respond().is_some())
            .count();
        // Expected 1,000; a fair generator stays well inside this band.
        assert!(
            (700..=1_300).contains(&hits),
            "hit count {} outside statistical bound",
            hits
        );
    }

    #[test]
    fn phrases_come_from_the_fixed_table() {
        let responder = seeded(100);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..5_000 {
            if let Some(phrase) = responder.maybe_respond() {
                assert!(AMBIENT_PHRASES.contains(&phrase));
                seen.insert(phrase);
            }
        }
        // Uniform selection over 5k draws should cover the whole table.
        assert_eq!(seen.len(), AMBIENT_PHRASES.len());
    }

    #[test]
    fn phrase_table_has_sixteen_entries() {
        assert_eq!(AMBIENT_PHRASES.len(), 16);
    }
}
