//! Fallback nickname generator.
//!
//! Used when the config file does not name the bot. Produces names like
//! `mbot4k7qz`: a fixed `mbot` stem and five random characters, nine in all.

use rand::RngExt;

const STEM: &str = "mbot";
const SUFFIX_LEN: usize = 5;
const ALPHABET: &[u8] = b"abcdefghijkmnpqrstuvwxyz23456789";

pub fn generate_nickname() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}{}", STEM, suffix)
}
