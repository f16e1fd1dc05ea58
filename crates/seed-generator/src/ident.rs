//! Slug, username and email generation.
//!
//! Slugs are sampled from a fixed alphabet per [`SlugKind`]. Nothing here
//! checks uniqueness; collisions are left to database constraints.

use crate::random::{count_between, pick_weighted};
use rand::seq::IndexedRandom;
use rand::Rng;

const LOWER_ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER_ALPHA: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";

/// Special characters that keep a username a valid identifier.
const USERNAME_SPECIALS: &[u8] = b"-_.";

const IDENTITY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const THREAD_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ARTICLE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-";

/// Username length bounds, `[min, max)`.
pub const USERNAME_LENGTH: (usize, usize) = (6, 16);

/// Email domains and their relative popularity.
pub const EMAIL_DOMAINS: &[(&str, u32)] = &[
    ("gmail.com", 40),
    ("yahoo.com", 15),
    ("outlook.com", 15),
    ("hotmail.com", 10),
    ("protonmail.com", 8),
    ("icloud.com", 7),
    ("aol.com", 5),
];

/// Slug classes, each with its own alphabet and length range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugKind {
    /// Display name of a per-thread identity
    Identity,
    Thread,
    Article,
}

impl SlugKind {
    pub fn alphabet(&self) -> &'static [u8] {
        match self {
            SlugKind::Identity => IDENTITY_ALPHABET,
            SlugKind::Thread => THREAD_ALPHABET,
            SlugKind::Article => ARTICLE_ALPHABET,
        }
    }

    /// Length bounds, `[min, max)`.
    pub fn length_range(&self) -> (usize, usize) {
        match self {
            SlugKind::Identity => (10, 16),
            SlugKind::Thread => (8, 13),
            SlugKind::Article => (12, 21),
        }
    }
}

/// Generate a slug of the given kind.
pub fn new_slug<R: Rng + ?Sized>(rng: &mut R, kind: SlugKind) -> String {
    let (min, max) = kind.length_range();
    let len = count_between(rng, min, max);
    sample(rng, kind.alphabet(), len)
}

pub fn new_identity_slug<R: Rng + ?Sized>(rng: &mut R) -> String {
    new_slug(rng, SlugKind::Identity)
}

pub fn new_thread_slug<R: Rng + ?Sized>(rng: &mut R) -> String {
    new_slug(rng, SlugKind::Thread)
}

pub fn new_article_slug<R: Rng + ?Sized>(rng: &mut R) -> String {
    new_slug(rng, SlugKind::Article)
}

fn sample<R: Rng + ?Sized>(rng: &mut R, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .filter_map(|_| alphabet.choose(rng).map(|b| *b as char))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Lower,
    Upper,
    Digit,
    Special,
}

impl CharClass {
    fn alphabet(&self) -> &'static [u8] {
        match self {
            CharClass::Lower => LOWER_ALPHA,
            CharClass::Upper => UPPER_ALPHA,
            CharClass::Digit => DIGITS,
            CharClass::Special => USERNAME_SPECIALS,
        }
    }
}

const USERNAME_CLASS_WEIGHTS: &[(CharClass, u32)] = &[
    (CharClass::Lower, 80),
    (CharClass::Upper, 6),
    (CharClass::Digit, 10),
    (CharClass::Special, 4),
];

/// Generate a username one character at a time, each step drawing a
/// character class by weight.
pub fn new_username<R: Rng + ?Sized>(rng: &mut R) -> String {
    let (min, max) = USERNAME_LENGTH;
    let len = count_between(rng, min, max);
    let mut username = String::with_capacity(len);

    for _ in 0..len {
        let class = pick_weighted(rng, USERNAME_CLASS_WEIGHTS).copied().unwrap_or(CharClass::Lower);
        if let Some(b) = class.alphabet().choose(rng) {
            username.push(*b as char);
        }
    }

    username
}

/// Append `@` and a popularity-weighted domain to `username`.
pub fn add_domain_suffix<R: Rng + ?Sized>(rng: &mut R, username: &str) -> String {
    let domain = pick_weighted(rng, EMAIL_DOMAINS).copied().unwrap_or(EMAIL_DOMAINS[0].0);
    format!("{username}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_slug_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);

        for kind in [SlugKind::Identity, SlugKind::Thread, SlugKind::Article] {
            let (min, max) = kind.length_range();
            for _ in 0..200 {
                let slug = new_slug(&mut rng, kind);
                assert!((min..max).contains(&slug.len()), "{kind:?}: {slug}");
                assert!(slug.bytes().all(|b| kind.alphabet().contains(&b)));
            }
        }
    }

    #[test]
    fn test_thread_slug_is_lowercase() {
        let mut rng = StdRng::seed_from_u64(42);
        let slug = new_thread_slug(&mut rng);
        assert_eq!(slug, slug.to_lowercase());
    }

    #[test]
    fn test_username_characters() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let username = new_username(&mut rng);
            assert!((USERNAME_LENGTH.0..USERNAME_LENGTH.1).contains(&username.len()));
            assert!(username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "-_.".contains(c)));
        }
    }

    #[test]
    fn test_username_mostly_lowercase() {
        let mut rng = StdRng::seed_from_u64(42);
        let text: String = (0..500).map(|_| new_username(&mut rng)).collect();

        let lower = text.chars().filter(|c| c.is_ascii_lowercase()).count();
        assert!(lower as f64 / text.len() as f64 > 0.7);
    }

    #[test]
    fn test_email_uses_known_domain() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let email = add_domain_suffix(&mut rng, "someone");
            let (user, domain) = email.split_once('@').unwrap();
            assert_eq!(user, "someone");
            assert!(EMAIL_DOMAINS.iter().any(|(d, _)| *d == domain));
        }
    }

    #[test]
    fn test_deterministic_identifiers() {
        let mut rng1 = StdRng::seed_from_u64(5);
        let mut rng2 = StdRng::seed_from_u64(5);

        assert_eq!(new_username(&mut rng1), new_username(&mut rng2));
        assert_eq!(new_article_slug(&mut rng1), new_article_slug(&mut rng2));
        assert_eq!(new_identity_slug(&mut rng1), new_identity_slug(&mut rng2));
    }
}
