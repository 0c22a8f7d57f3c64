//! Fragment selection and composition rules.
//!
//! Everything here is a pure function of its inputs and the random source,
//! which keeps the rules testable without loading any table.

use rand::Rng;
use rand::seq::IndexedRandom;

/// Upper bound (exclusive) of the neutral-override draw.
pub const NEUTRAL_DRAW_RANGE: u32 = 100;

/// A draw strictly above this value hands out a neutral first name.
///
/// With draws in `[0, 100)` that is 96..=99, a 4% chance.
pub const NEUTRAL_THRESHOLD: u32 = 95;

/// Picks one fragment uniformly at random.
///
/// Every index in `[0, len)` can be chosen, the last one included.
/// An empty list yields an empty string.
pub fn choose_one<R: Rng + ?Sized>(rng: &mut R, fragments: &[String]) -> String {
	fragments.choose(rng).cloned().unwrap_or_default()
}

/// Glues town fragments together, dropping repeated syllables.
///
/// The middle is dropped when it equals the prefix or the suffix; the
/// suffix is dropped when it equals the prefix. Both checks run against
/// the original fragments.
pub fn compose_town(prefix: &str, middle: &str, suffix: &str) -> String {
	let middle = if middle == prefix || middle == suffix { "" } else { middle };
	let suffix = if suffix == prefix { "" } else { suffix };

	let mut town = String::with_capacity(prefix.len() + middle.len() + suffix.len());
	town.push_str(prefix);
	town.push_str(middle);
	town.push_str(suffix);
	town
}

/// Whether a neutral-override draw replaces the gendered first name.
pub fn is_neutral_override(draw: u32) -> bool {
	draw > NEUTRAL_THRESHOLD
}

/// Draws the neutral-override value.
pub(crate) fn neutral_draw<R: Rng + ?Sized>(rng: &mut R) -> u32 {
	rng.random_range(0..NEUTRAL_DRAW_RANGE)
}
