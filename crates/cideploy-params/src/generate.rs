//! Value generators for randomized parameters.
//!
//! Randomness comes from the thread-local generator and is not suitable
//! for key material; results are not reproducible.

use std::collections::HashSet;

use cideploy_common::constants::STRONG_PASSWORD_SYMBOLS;
use cideploy_common::error::{DeployError, Result};
use rand::Rng;
use rand::seq::SliceRandom;

const DIGITS: &[u8] = b"0123456789";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Generates a string of exactly `length` characters.
///
/// Each character first picks a bucket uniformly (digits, uppercase,
/// lowercase, and `symbols` when non-empty) and then a character uniformly
/// within that bucket.
#[must_use]
pub fn generate_random_string(length: usize, symbols: &str) -> String {
    let symbols: Vec<char> = symbols.chars().collect();
    let buckets = if symbols.is_empty() { 3 } else { 4 };
    let mut rng = rand::rng();

    (0..length)
        .map(|_| match rng.random_range(0..buckets) {
            0 => pick_ascii(&mut rng, DIGITS),
            1 => pick_ascii(&mut rng, UPPERCASE),
            2 => pick_ascii(&mut rng, LOWERCASE),
            _ => symbols[rng.random_range(0..symbols.len())],
        })
        .collect()
}

fn pick_ascii<R: Rng + ?Sized>(rng: &mut R, set: &[u8]) -> char {
    char::from(set[rng.random_range(0..set.len())])
}

/// Generates a password of `length` characters, mixing in
/// [`STRONG_PASSWORD_SYMBOLS`] when `strong` is set.
#[must_use]
pub fn generate_password(length: usize, strong: bool) -> String {
    let symbols = if strong { STRONG_PASSWORD_SYMBOLS } else { "" };
    generate_random_string(length, symbols)
}

/// Picks `count` distinct zones at random from `available` and joins them
/// with commas.
///
/// Duplicate names in `available` count once.
///
/// # Errors
///
/// Returns [`DeployError::InsufficientCapacity`] if fewer than `count`
/// distinct zones are available.
pub fn select_availability_zones(count: usize, available: &[String], region: &str) -> Result<String> {
    let mut seen = HashSet::new();
    let mut zones: Vec<&str> = available
        .iter()
        .map(String::as_str)
        .filter(|zone| seen.insert(*zone))
        .collect();

    if zones.len() < count {
        return Err(DeployError::InsufficientCapacity {
            requested: count,
            available: zones.len(),
            region: region.to_string(),
        });
    }

    zones.shuffle(&mut rand::rng());
    zones.truncate(count);
    Ok(zones.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_base_alphabet(c: char) -> bool {
        c.is_ascii_alphanumeric()
    }

    #[test]
    fn random_string_has_requested_length() {
        for length in [0, 1, 7, 64, 512] {
            assert_eq!(generate_random_string(length, "").chars().count(), length);
        }
    }

    #[test]
    fn random_string_zero_length_is_empty() {
        assert_eq!(generate_random_string(0, "!@#"), "");
    }

    #[test]
    fn random_string_without_symbols_is_alphanumeric() {
        let value = generate_random_string(2000, "");
        assert!(value.chars().all(in_base_alphabet));
    }

    #[test]
    fn random_string_with_symbols_stays_in_alphabet() {
        let value = generate_random_string(2000, "~");
        assert!(value.chars().all(|c| in_base_alphabet(c) || c == '~'));
        // A quarter of the picks land in the symbol bucket on average.
        assert!(value.contains('~'));
    }

    #[test]
    fn weak_password_has_no_symbols() {
        let value = generate_password(300, false);
        assert_eq!(value.len(), 300);
        assert!(value.chars().all(in_base_alphabet));
    }

    #[test]
    fn strong_password_uses_declared_symbols() {
        let value = generate_password(300, true);
        assert_eq!(value.chars().count(), 300);
        assert!(
            value
                .chars()
                .all(|c| in_base_alphabet(c) || STRONG_PASSWORD_SYMBOLS.contains(c))
        );
    }

    fn zones(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn select_returns_distinct_members() {
        let available = zones(&["a", "b", "c", "d"]);
        for count in 0..=available.len() {
            let joined = select_availability_zones(count, &available, "r").expect("select");
            let picked: Vec<&str> = if joined.is_empty() {
                Vec::new()
            } else {
                joined.split(',').collect()
            };
            assert_eq!(picked.len(), count);
            let unique: HashSet<&str> = picked.iter().copied().collect();
            assert_eq!(unique.len(), count);
            assert!(picked.iter().all(|z| available.iter().any(|a| a == z)));
        }
    }

    #[test]
    fn select_more_than_available_fails() {
        let err = select_availability_zones(3, &zones(&["a", "b"]), "ap-south-1")
            .expect_err("should fail");
        match err {
            DeployError::InsufficientCapacity {
                requested,
                available,
                region,
            } => {
                assert_eq!(requested, 3);
                assert_eq!(available, 2);
                assert_eq!(region, "ap-south-1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn select_counts_duplicate_zones_once() {
        let available = zones(&["a", "a", "b"]);
        assert!(select_availability_zones(3, &available, "r").is_err());
        let joined = select_availability_zones(2, &available, "r").expect("select");
        let mut picked: Vec<&str> = joined.split(',').collect();
        picked.sort_unstable();
        assert_eq!(picked, vec!["a", "b"]);
    }

    #[test]
    fn select_randomizes_which_zones_are_chosen() {
        let available = zones(&["a", "b", "c", "d", "e", "f"]);
        let mut chosen = HashSet::new();
        for _ in 0..200 {
            let joined = select_availability_zones(1, &available, "r").expect("select");
            let _ = chosen.insert(joined);
        }
        assert!(chosen.len() > 1);
    }
}
