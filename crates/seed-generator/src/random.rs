//! Weighted and uniform random selection primitives.
//!
//! All helpers take the RNG explicitly so a seeded [`rand::rngs::StdRng`]
//! reproduces the same picks run after run. Weighted tables are ordered lists
//! of `(item, weight)` pairs; iteration order is therefore fixed and the
//! cumulative-weight walk is deterministic for a given seed.

use crate::error::GeneratorError;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Random integer in the half-open range `[min, max)`.
pub fn random_between<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> Result<i64, GeneratorError> {
    if max <= min {
        return Err(GeneratorError::EmptyRange { min, max });
    }
    Ok(rng.random_range(min..max))
}

/// Random character in the half-open range `[start, end)`.
pub fn random_char_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: char,
    end: char,
) -> Result<char, GeneratorError> {
    if end <= start {
        return Err(GeneratorError::EmptyRange {
            min: start as i64,
            max: end as i64,
        });
    }
    Ok(rng.random_range(start..end))
}

/// Random count in `[min, max)`, or exactly `min` when the range is empty.
///
/// Used for configured bounds where `min == max` means "exactly this many".
pub fn count_between<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    if max <= min {
        min
    } else {
        rng.random_range(min..max)
    }
}

/// Uniform pick over every element of `items`.
pub fn random_from_list<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
    what: &'static str,
) -> Result<&'a T, GeneratorError> {
    items.choose(rng).ok_or(GeneratorError::EmptyChoice(what))
}

/// Uniform pick among a small fixed set of copyable choices.
pub fn random_from_choice<T: Copy, R: Rng + ?Sized>(
    rng: &mut R,
    choices: &[T],
) -> Result<T, GeneratorError> {
    random_from_list(rng, choices, "choices").copied()
}

/// Pick an index from an ordered `(item, weight)` table.
///
/// Draws `r` uniformly in `[0, total)` and returns the first entry whose
/// cumulative weight exceeds `r`, so entry `i` is chosen with probability
/// `weight(i) / total`. Returns `None` only for an empty table; a table whose
/// weights are all zero falls back to the first entry.
pub fn pick_weighted_index<T, R: Rng + ?Sized>(rng: &mut R, entries: &[(T, u32)]) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }

    let total: u64 = entries.iter().map(|(_, w)| u64::from(*w)).sum();
    if total == 0 {
        return Some(0);
    }

    let draw = rng.random_range(0..total);
    let mut cumulative = 0u64;
    for (index, (_, weight)) in entries.iter().enumerate() {
        cumulative += u64::from(*weight);
        if draw < cumulative {
            return Some(index);
        }
    }

    // Unreachable with a correct cumulative walk
    Some(0)
}

/// Pick an item from an ordered `(item, weight)` table.
pub fn pick_weighted<'a, T, R: Rng + ?Sized>(rng: &mut R, entries: &'a [(T, u32)]) -> Option<&'a T> {
    pick_weighted_index(rng, entries).map(|i| &entries[i].0)
}

/// Ordered, mutable weight table.
///
/// Used where weights shift during a run, e.g. the board and thread selection
/// tables that lose weight each time they are picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedList<T> {
    entries: Vec<(T, u32)>,
}

impl<T> WeightedList<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from `(item, weight)` pairs, preserving their order.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (T, u32)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    pub fn push(&mut self, item: T, weight: u32) {
        self.entries.push((item, weight));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(T, u32)] {
        &self.entries
    }

    /// Pick an entry index proportionally to weight.
    pub fn pick_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        pick_weighted_index(rng, &self.entries)
    }

    /// Pick an item proportionally to weight.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        pick_weighted(rng, &self.entries)
    }

    /// Lower the weight at `index` by `amount`, never going below `floor`.
    pub fn decrease_at(&mut self, index: usize, amount: u32, floor: u32) {
        if let Some((_, weight)) = self.entries.get_mut(index) {
            *weight = weight.saturating_sub(amount).max(floor);
        }
    }

    /// Drop every entry for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|(item, _)| keep(item));
    }
}

impl<T> Default for WeightedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_between_stays_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let value = random_between(&mut rng, 3, 10).unwrap();
            assert!((3..10).contains(&value));
        }
    }

    #[test]
    fn test_random_between_rejects_empty_range() {
        let mut rng = StdRng::seed_from_u64(42);

        assert!(matches!(
            random_between(&mut rng, 5, 5),
            Err(GeneratorError::EmptyRange { min: 5, max: 5 })
        ));
        assert!(random_between(&mut rng, 6, 5).is_err());
    }

    #[test]
    fn test_random_char_between() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let c = random_char_between(&mut rng, 'a', 'e').unwrap();
            assert!(('a'..'e').contains(&c));
        }
        assert!(random_char_between(&mut rng, 'z', 'a').is_err());
    }

    #[test]
    fn test_count_between_guards_empty_range() {
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(count_between(&mut rng, 10, 10), 10);
        assert_eq!(count_between(&mut rng, 0, 0), 0);
        assert_eq!(count_between(&mut rng, 7, 2), 7);
        for _ in 0..100 {
            assert!((2..5).contains(&count_between(&mut rng, 2, 5)));
        }
    }

    #[test]
    fn test_random_from_list_reaches_last_element() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = ["a", "b", "c"];

        let mut seen = [false; 3];
        for _ in 0..300 {
            let item = random_from_list(&mut rng, &items, "letters").unwrap();
            let pos = items.iter().position(|i| i == item).unwrap();
            seen[pos] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_random_from_list_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let items: [u8; 0] = [];

        assert!(matches!(
            random_from_list(&mut rng, &items, "admins"),
            Err(GeneratorError::EmptyChoice("admins"))
        ));
    }

    #[test]
    fn test_random_from_choice_covers_both() {
        let mut rng = StdRng::seed_from_u64(7);
        let picks: Vec<bool> = (0..100)
            .map(|_| random_from_choice(&mut rng, &[true, false]).unwrap())
            .collect();

        assert!(picks.contains(&true));
        assert!(picks.contains(&false));
    }

    #[test]
    fn test_weighted_pick_converges_to_proportions() {
        let mut rng = StdRng::seed_from_u64(42);
        let table = [('.', 85u32), ('!', 10), ('?', 5)];
        let draws = 100_000;

        let mut counts = [0usize; 3];
        for _ in 0..draws {
            counts[pick_weighted_index(&mut rng, &table).unwrap()] += 1;
        }

        for (i, (_, weight)) in table.iter().enumerate() {
            let expected = f64::from(*weight) / 100.0;
            let observed = counts[i] as f64 / draws as f64;
            assert!(
                (expected - observed).abs() < 0.01,
                "entry {i}: expected {expected}, observed {observed}"
            );
        }
    }

    #[test]
    fn test_weighted_pick_only_returns_known_items() {
        let mut rng = StdRng::seed_from_u64(3);
        let table = [("x", 1u32), ("y", 2), ("z", 3)];

        for _ in 0..1000 {
            let item = pick_weighted(&mut rng, &table).unwrap();
            assert!(["x", "y", "z"].contains(item));
        }
    }

    #[test]
    fn test_weighted_pick_skips_zero_weight() {
        let mut rng = StdRng::seed_from_u64(42);
        let table = [("never", 0u32), ("always", 4)];

        for _ in 0..500 {
            assert_eq!(pick_weighted(&mut rng, &table), Some(&"always"));
        }
    }

    #[test]
    fn test_weighted_pick_degenerate_tables() {
        let mut rng = StdRng::seed_from_u64(42);
        let empty: [(u8, u32); 0] = [];
        let all_zero = [("first", 0u32), ("second", 0)];

        assert_eq!(pick_weighted(&mut rng, &empty), None);
        assert_eq!(pick_weighted(&mut rng, &all_zero), Some(&"first"));
    }

    #[test]
    fn test_weighted_pick_is_deterministic() {
        let table = [(1, 5u32), (2, 5), (3, 5), (4, 5)];

        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        let a: Vec<_> = (0..50).map(|_| pick_weighted_index(&mut rng1, &table)).collect();
        let b: Vec<_> = (0..50).map(|_| pick_weighted_index(&mut rng2, &table)).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn test_weighted_list_decrease_respects_floor() {
        let mut list = WeightedList::from_pairs([("a", 10u32), ("b", 3)]);

        list.decrease_at(0, 4, 1);
        list.decrease_at(1, 100, 1);
        assert_eq!(list.entries(), &[("a", 6), ("b", 1)]);

        // Out of range is a no-op
        list.decrease_at(5, 1, 1);
        assert_eq!(list.entries(), &[("a", 6), ("b", 1)]);
    }

    #[test]
    fn test_weighted_list_retain() {
        let mut list = WeightedList::new();
        list.push(0usize, 10);
        list.push(1, 10);
        list.push(2, 10);

        list.retain(|i| *i != 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries(), &[(0, 10), (2, 10)]);
    }
}
