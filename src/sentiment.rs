//! Sentiment scoring for review text.
//!
//! [`SentimentAnalyzer`] is the seam the request pipeline scores through.
//! The bundled [`LexiconAnalyzer`] is a rule-based valence scorer: each word
//! found in the [`Lexicon`] contributes its valence, adjusted by nearby
//! boosters ("very", "slightly"), negations ("not", "didn't"), ALL-CAPS
//! emphasis and a contrastive "but". Punctuation emphasis ("!!", "??")
//! amplifies the total, which is then normalized into a `compound` score in
//! `[-1, 1]`.
//!
//! ```rust
//! use review_analyzer::sentiment::{LexiconAnalyzer, SentimentAnalyzer};
//!
//! let analyzer = LexiconAnalyzer::default();
//! let scores = analyzer.polarity_scores("The pasta was great!");
//! assert!(scores.compound > 0.0);
//! assert!((scores.neg + scores.neu + scores.pos - 1.0).abs() < 1e-6);
//! ```

mod lexicon;

pub use lexicon::Lexicon;

use anyhow::Result;
use std::path::Path;

use crate::models::SentimentScores;
use lexicon::{booster, is_negator, CAPS_INCR, NEGATION_SCALAR};

/// Normalization constant: approximates the maximum expected valence sum.
const ALPHA: f64 = 15.0;

const EXCLAMATION_INCR: f64 = 0.292;
const QUESTION_INCR_SMALL: f64 = 0.18;
const QUESTION_INCR_LARGE: f64 = 0.96;

/// Maps text to polarity scores.
///
/// Implementations must be deterministic, never fail, and never panic on
/// empty or non-ASCII input.
pub trait SentimentAnalyzer: Send + Sync {
    fn polarity_scores(&self, text: &str) -> SentimentScores;
}

/// Rule-based analyzer over a valence [`Lexicon`].
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer {
    lexicon: Lexicon,
}

impl LexiconAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Builds an analyzer from the built-in lexicon, extended (and
    /// overridden) by the entries of `path` when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut lexicon = Lexicon::default();
        if let Some(path) = path {
            let extra = Lexicon::from_tsv(path)?;
            tracing::info!(entries = extra.len(), path = %path.display(), "loaded lexicon");
            lexicon.merge(extra);
        }
        Ok(Self::new(lexicon))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn word_valence(&self, words: &[Word], i: usize, caps_differ: bool) -> f64 {
        let word = &words[i];
        if booster(&word.lower).is_some() {
            return 0.0;
        }
        let mut valence = match self.lexicon.valence(&word.lower) {
            Some(v) => v,
            None => return 0.0,
        };

        if word.is_caps && caps_differ {
            valence += CAPS_INCR.copysign(valence);
        }

        for distance in 1..=3 {
            if i < distance {
                break;
            }
            let prev = &words[i - distance];
            if self.lexicon.contains(&prev.lower) {
                continue;
            }
            if let Some(base) = booster(&prev.lower) {
                let mut shift = base.copysign(valence) * base.signum();
                if prev.is_caps && caps_differ {
                    shift += CAPS_INCR.copysign(shift);
                }
                valence += shift * distance_damping(distance);
            }
            if is_negator(&prev.lower) {
                valence *= NEGATION_SCALAR;
            }
        }
        valence
    }
}

fn distance_damping(distance: usize) -> f64 {
    match distance {
        1 => 1.0,
        2 => 0.95,
        _ => 0.9,
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn polarity_scores(&self, text: &str) -> SentimentScores {
        let words = tokenize(text);
        if words.is_empty() {
            return SentimentScores::neutral();
        }

        let caps_differ = caps_differential(&words);
        let mut valences: Vec<f64> = (0..words.len())
            .map(|i| self.word_valence(&words, i, caps_differ))
            .collect();

        if let Some(but) = words.iter().position(|w| w.lower == "but") {
            for (i, v) in valences.iter_mut().enumerate() {
                if i < but {
                    *v *= 0.5;
                } else if i > but {
                    *v *= 1.5;
                }
            }
        }

        let emphasis = punctuation_emphasis(text);
        let sum: f64 = valences.iter().sum();
        let compound = normalize(if sum > 0.0 {
            sum + emphasis
        } else if sum < 0.0 {
            sum - emphasis
        } else {
            sum
        });

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for v in &valences {
            if *v > 0.0 {
                pos_sum += v + 1.0;
            } else if *v < 0.0 {
                neg_sum += v - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        SentimentScores {
            neg: neg_sum.abs() / total,
            neu: neu_count / total,
            pos: pos_sum / total,
            compound,
        }
    }
}

/// A token with its lowercased form and caps flag precomputed.
struct Word {
    lower: String,
    is_caps: bool,
}

/// Splits on whitespace and strips surrounding punctuation. Interior
/// apostrophes survive so contractions stay recognizable.
fn tokenize(text: &str) -> Vec<Word> {
    text.split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| !t.is_empty())
        .map(|raw| Word {
            lower: raw.to_lowercase(),
            is_caps: is_all_caps(raw),
        })
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(|c| c.is_uppercase())
}

/// True when some, but not all, words are written in capitals.
fn caps_differential(words: &[Word]) -> bool {
    let caps = words.iter().filter(|w| w.is_caps).count();
    caps > 0 && caps < words.len()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(4) as f64;
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCR_SMALL,
        _ => QUESTION_INCR_LARGE,
    };
    exclamations * EXCLAMATION_INCR + question_amp
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(text: &str) -> SentimentScores {
        LexiconAnalyzer::default().polarity_scores(text)
    }

    fn assert_well_formed(s: &SentimentScores) {
        assert!((s.neg + s.neu + s.pos - 1.0).abs() < 1e-6, "{:?}", s);
        assert!((-1.0..=1.0).contains(&s.compound), "{:?}", s);
        for p in [s.neg, s.neu, s.pos] {
            assert!((0.0..=1.0).contains(&p), "{:?}", s);
        }
    }

    #[test]
    fn test_empty_text_is_neutral() {
        assert_eq!(scores(""), SentimentScores::neutral());
        assert_eq!(scores("   \n\t "), SentimentScores::neutral());
        assert_eq!(scores("?!..."), SentimentScores::neutral());
    }

    #[test]
    fn test_no_sentiment_words_is_neutral() {
        let s = scores("We ordered the soup and a sandwich.");
        assert_eq!(s.compound, 0.0);
        assert_eq!(s.neu, 1.0);
    }

    #[test]
    fn test_polarity() {
        assert!(scores("The staff were friendly and the food was great").compound > 0.5);
        assert!(scores("Terrible service, rude waiter, dirty tables").compound < -0.5);
    }

    #[test]
    fn test_negation_flips() {
        let plain = scores("The food was good");
        let negated = scores("The food was not good");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
        assert!(scores("The food wasn't good").compound < 0.0);
    }

    #[test]
    fn test_booster_intensifies() {
        let plain = scores("The room was clean");
        let boosted = scores("The room was very clean");
        let damped = scores("The room was slightly clean");
        assert!(boosted.compound > plain.compound);
        assert!(damped.compound < plain.compound);

        let neg = scores("The room was dirty");
        let neg_boosted = scores("The room was very dirty");
        assert!(neg_boosted.compound < neg.compound);
    }

    #[test]
    fn test_caps_and_exclamation_emphasis() {
        let plain = scores("the view was great");
        assert!(scores("the view was GREAT").compound > plain.compound);
        assert!(scores("the view was great!!").compound > plain.compound);
    }

    #[test]
    fn test_but_shifts_weight_to_second_clause() {
        let s = scores("The decor is nice but the food is awful");
        assert!(s.compound < 0.0);
    }

    #[test]
    fn test_non_ascii_text() {
        let s = scores("Très bon café, GREAT croissants 🥐🥐 naïve décor");
        assert_well_formed(&s);
        assert!(s.compound > 0.0);
        assert_well_formed(&scores("美味しい ラーメン"));
    }

    #[test]
    fn test_scores_are_well_formed() {
        for text in [
            "",
            "good",
            "bad bad bad bad bad bad bad bad bad bad!!!!!",
            "love love love love love love love love love love!!!!????",
            "It was not bad, but not great either?",
            "WORST. MEAL. EVER.",
            "the",
        ] {
            assert_well_formed(&scores(text));
        }
    }

    #[test]
    fn test_deterministic() {
        let text = "Really enjoyed it, but the dessert was stale.";
        assert_eq!(scores(text), scores(text));
    }

    #[test]
    fn test_custom_lexicon_overrides() {
        let mut lexicon = Lexicon::empty();
        lexicon.insert("zesty", 2.0);
        let analyzer = LexiconAnalyzer::new(lexicon);
        assert!(analyzer.polarity_scores("zesty sauce").compound > 0.0);
        assert_eq!(analyzer.polarity_scores("great sauce").compound, 0.0);
    }
}
