//! Lorem-style text generator.
//!
//! Text is built bottom-up: words are runs of lowercase letters, sentences are
//! space-joined words with optional capitalisation and weighted terminal
//! punctuation, paragraphs are indented sentence runs followed by a blank
//! line. Every length is drawn from a half-open `[min, max)` range configured
//! on [`LoremConfig`]; a range with `min == max` yields exactly `min`.

use crate::error::GeneratorError;
use crate::random::{count_between, WeightedList};
use rand::Rng;

/// Characters available for words.
const WORD_ALPHABET: std::ops::RangeInclusive<char> = 'a'..='z';

/// Default punctuation weights. They don't need to add up to 100.
pub const DEFAULT_PUNCTUATION_WEIGHTS: &[(char, u32)] = &[('.', 85), ('!', 10), ('?', 5)];

/// Text generation settings.
///
/// Word lengths are counted in letters, sentence lengths in words, paragraph
/// lengths in sentences.
#[derive(Debug, Clone, PartialEq)]
pub struct LoremConfig {
    pub min_word_length: usize,
    pub max_word_length: usize,
    pub min_sentence_length: usize,
    pub max_sentence_length: usize,
    pub min_paragraph_length: usize,
    pub max_paragraph_length: usize,
    pub min_paragraphs: usize,
    pub max_paragraphs: usize,
    pub capitalize_first: bool,
    pub punctuation: bool,
    /// Characters that may terminate a sentence.
    pub punctuation_chars: Vec<char>,
    /// Relative likelihood of each terminal character.
    pub punctuation_weights: Vec<(char, u32)>,
}

impl Default for LoremConfig {
    fn default() -> Self {
        Self {
            min_word_length: 3,
            max_word_length: 10,
            min_sentence_length: 8,
            max_sentence_length: 18,
            min_paragraph_length: 3,
            max_paragraph_length: 7,
            min_paragraphs: 1,
            max_paragraphs: 6,
            capitalize_first: true,
            punctuation: true,
            punctuation_chars: DEFAULT_PUNCTUATION_WEIGHTS.iter().map(|(c, _)| *c).collect(),
            punctuation_weights: DEFAULT_PUNCTUATION_WEIGHTS.to_vec(),
        }
    }
}

impl LoremConfig {
    /// Settings for titles: a single short sentence with no punctuation.
    pub fn title() -> Self {
        Self::default()
            .with_punctuation(false)
            .with_max_sentence_length(10)
    }

    pub fn with_min_word_length(mut self, n: usize) -> Self {
        self.min_word_length = n;
        self
    }

    pub fn with_max_word_length(mut self, n: usize) -> Self {
        self.max_word_length = n;
        self
    }

    pub fn with_min_sentence_length(mut self, n: usize) -> Self {
        self.min_sentence_length = n;
        self
    }

    pub fn with_max_sentence_length(mut self, n: usize) -> Self {
        self.max_sentence_length = n;
        self
    }

    pub fn with_min_paragraph_length(mut self, n: usize) -> Self {
        self.min_paragraph_length = n;
        self
    }

    pub fn with_max_paragraph_length(mut self, n: usize) -> Self {
        self.max_paragraph_length = n;
        self
    }

    pub fn with_min_paragraphs(mut self, n: usize) -> Self {
        self.min_paragraphs = n;
        self
    }

    pub fn with_max_paragraphs(mut self, n: usize) -> Self {
        self.max_paragraphs = n;
        self
    }

    pub fn with_capitalize_first(mut self, enabled: bool) -> Self {
        self.capitalize_first = enabled;
        self
    }

    pub fn with_punctuation(mut self, enabled: bool) -> Self {
        self.punctuation = enabled;
        self
    }

    /// Make `c` available as a terminal character.
    pub fn with_punctuation_char(mut self, c: char) -> Self {
        if !self.punctuation_chars.contains(&c) {
            self.punctuation_chars.push(c);
        }
        self
    }

    /// Stop using `c` as a terminal character.
    pub fn without_punctuation_char(mut self, c: char) -> Self {
        self.punctuation_chars.retain(|p| *p != c);
        self
    }

    /// Replace the set of terminal characters.
    pub fn with_punctuation_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.punctuation_chars = chars.into_iter().collect();
        self
    }

    /// Set the weight of `c`, replacing any existing weight.
    pub fn with_punctuation_weight(mut self, c: char, weight: u32) -> Self {
        match self.punctuation_weights.iter_mut().find(|(p, _)| *p == c) {
            Some(entry) => entry.1 = weight,
            None => self.punctuation_weights.push((c, weight)),
        }
        self
    }

    /// Check bounds and build the punctuation table.
    ///
    /// Only characters present in `punctuation_chars` with a positive weight
    /// are eligible.
    fn punctuation_table(&self) -> Result<WeightedList<char>, GeneratorError> {
        let bounds = [
            ("word length", self.min_word_length, self.max_word_length),
            ("sentence length", self.min_sentence_length, self.max_sentence_length),
            ("paragraph length", self.min_paragraph_length, self.max_paragraph_length),
            ("paragraph count", self.min_paragraphs, self.max_paragraphs),
        ];
        for (name, min, max) in bounds {
            if min > max {
                return Err(GeneratorError::Config(format!(
                    "lorem {name}: min ({min}) is greater than max ({max})"
                )));
            }
        }
        if self.min_word_length == 0 {
            return Err(GeneratorError::Config(
                "lorem word length must be at least 1".to_string(),
            ));
        }

        let table = WeightedList::from_pairs(
            self.punctuation_weights
                .iter()
                .filter(|(c, w)| *w > 0 && self.punctuation_chars.contains(c))
                .copied(),
        );
        if self.punctuation && table.is_empty() {
            return Err(GeneratorError::EmptyWeights("lorem punctuation"));
        }
        Ok(table)
    }
}

/// Text generator bound to one configuration.
#[derive(Debug, Clone)]
pub struct Lorem {
    config: LoremConfig,
    punctuation: WeightedList<char>,
}

impl Lorem {
    /// Create a generator, validating the configuration.
    pub fn new(config: LoremConfig) -> Result<Self, GeneratorError> {
        let punctuation = config.punctuation_table()?;
        Ok(Self {
            config,
            punctuation,
        })
    }

    pub fn config(&self) -> &LoremConfig {
        &self.config
    }

    /// Generate a full body of text: `[min_paragraphs, max_paragraphs)` paragraphs.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let count = count_between(rng, self.config.min_paragraphs, self.config.max_paragraphs);
        (0..count).map(|_| self.generate_paragraph(rng)).collect()
    }

    /// A single lowercase word.
    pub fn generate_word<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let len = count_between(rng, self.config.min_word_length, self.config.max_word_length);
        (0..len).map(|_| rng.random_range(WORD_ALPHABET)).collect()
    }

    /// A single sentence, capitalised and punctuated per the configuration.
    pub fn generate_sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let count = count_between(
            rng,
            self.config.min_sentence_length,
            self.config.max_sentence_length,
        );
        let mut sentence = (0..count)
            .map(|_| self.generate_word(rng))
            .collect::<Vec<_>>()
            .join(" ");

        if sentence.is_empty() {
            return sentence;
        }

        if self.config.capitalize_first {
            sentence = capitalize(&sentence);
        }

        if self.config.punctuation {
            if let Some(c) = self.punctuation.pick(rng) {
                sentence.push(*c);
            }
        }

        sentence
    }

    /// An indented paragraph followed by a blank line.
    pub fn generate_paragraph<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let count = count_between(
            rng,
            self.config.min_paragraph_length,
            self.config.max_paragraph_length,
        );
        let sentences = (0..count)
            .map(|_| self.generate_sentence(rng))
            .collect::<Vec<_>>()
            .join(" ");

        format!("  {sentences}\n\n")
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strip_punctuation(s: &str) -> &str {
        s.trim_end_matches(['.', '!', '?'])
    }

    #[test]
    fn test_word_length_within_bounds() {
        let lorem = Lorem::new(LoremConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let word = lorem.generate_word(&mut rng);
            assert!((3..10).contains(&word.len()), "word {word:?}");
            assert!(word.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_sentence_word_count_within_bounds() {
        let config = LoremConfig::default()
            .with_min_sentence_length(4)
            .with_max_sentence_length(7);
        let lorem = Lorem::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..300 {
            let sentence = lorem.generate_sentence(&mut rng);
            let words = sentence.split(' ').count();
            assert!((4..7).contains(&words), "sentence {sentence:?}");
        }
    }

    #[test]
    fn test_sentence_capitalized_and_punctuated() {
        let lorem = Lorem::new(LoremConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let sentence = lorem.generate_sentence(&mut rng);
            let first = sentence.chars().next().unwrap();
            let last = sentence.chars().last().unwrap();
            assert!(first.is_ascii_uppercase(), "sentence {sentence:?}");
            assert!(['.', '!', '?'].contains(&last), "sentence {sentence:?}");
            // Only the first letter changes case
            assert!(strip_punctuation(&sentence)[1..]
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == ' '));
        }
    }

    #[test]
    fn test_flags_disable_capitalization_and_punctuation() {
        let config = LoremConfig::default()
            .with_capitalize_first(false)
            .with_punctuation(false);
        let lorem = Lorem::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let sentence = lorem.generate_sentence(&mut rng);
            assert!(sentence.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
        }
    }

    #[test]
    fn test_title_config() {
        let lorem = Lorem::new(LoremConfig::title()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            let title = lorem.generate_sentence(&mut rng);
            assert!((8..10).contains(&title.split(' ').count()));
            assert!(title.chars().last().unwrap().is_ascii_lowercase());
        }
    }

    #[test]
    fn test_single_punctuation_char() {
        let config = LoremConfig::default()
            .with_punctuation_chars(['!'])
            .with_punctuation_weight('!', 1);
        let lorem = Lorem::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            assert!(lorem.generate_sentence(&mut rng).ends_with('!'));
        }
    }

    #[test]
    fn test_added_char_needs_weight() {
        let config = LoremConfig::default()
            .without_punctuation_char('.')
            .without_punctuation_char('!')
            .without_punctuation_char('?')
            .with_punctuation_char(';');
        assert!(matches!(
            Lorem::new(config.clone()),
            Err(GeneratorError::EmptyWeights(_))
        ));

        let lorem = Lorem::new(config.with_punctuation_weight(';', 3)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(lorem.generate_sentence(&mut rng).ends_with(';'));
    }

    #[test]
    fn test_paragraph_shape() {
        let config = LoremConfig::default()
            .with_min_paragraph_length(2)
            .with_max_paragraph_length(2);
        let lorem = Lorem::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let paragraph = lorem.generate_paragraph(&mut rng);
        assert!(paragraph.starts_with("  "));
        assert!(!paragraph.starts_with("   "));
        assert!(paragraph.ends_with("\n\n"));

        let terminals = paragraph
            .chars()
            .filter(|c| ['.', '!', '?'].contains(c))
            .count();
        assert_eq!(terminals, 2);
    }

    #[test]
    fn test_generate_paragraph_count() {
        let config = LoremConfig::default()
            .with_min_paragraphs(2)
            .with_max_paragraphs(4);
        let lorem = Lorem::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let text = lorem.generate(&mut rng);
            let paragraphs = text.matches("\n\n").count();
            assert!((2..4).contains(&paragraphs));
        }
    }

    #[test]
    fn test_zero_paragraphs_yields_empty_text() {
        let config = LoremConfig::default()
            .with_min_paragraphs(0)
            .with_max_paragraphs(0);
        let lorem = Lorem::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(lorem.generate(&mut rng), "");
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let config = LoremConfig::default()
            .with_min_word_length(12)
            .with_max_word_length(4);
        assert!(matches!(Lorem::new(config), Err(GeneratorError::Config(_))));

        let config = LoremConfig::default()
            .with_min_word_length(0)
            .with_max_word_length(4);
        assert!(Lorem::new(config).is_err());
    }

    #[test]
    fn test_deterministic_text() {
        let lorem = Lorem::new(LoremConfig::default()).unwrap();
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        assert_eq!(lorem.generate(&mut rng1), lorem.generate(&mut rng2));
    }
}
