//! Valence lexicon and modifier word lists.
//!
//! Valences are on a `[-4, 4]` scale. The built-in list covers the
//! vocabulary that shows up most often in short customer reviews; a larger
//! list in the tab-separated `token<TAB>valence[<TAB>...]` layout can be
//! loaded at startup with [`Lexicon::from_tsv`].

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

/// Boosters raise or damp the word that follows them by this much.
pub const BOOSTER_INCR: f64 = 0.293;
pub const BOOSTER_DECR: f64 = -0.293;

/// Extra emphasis for an ALL-CAPS sentiment word in mixed-case text.
pub const CAPS_INCR: f64 = 0.733;

/// Multiplier applied to a negated sentiment word.
pub const NEGATION_SCALAR: f64 = -0.74;

const NEGATORS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "none", "nope", "nor",
    "not", "nothing", "nowhere", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
    "no", "rarely", "seldom", "despite",
];

const BOOSTERS_INCR: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously", "fully",
    "greatly", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "truly", "unbelievably", "unusually", "utterly",
    "very", "super", "way",
];

const BOOSTERS_DECR: &[&str] = &[
    "almost", "barely", "hardly", "kinda", "less", "little", "marginally", "occasionally",
    "partly", "scarcely", "slightly", "somewhat", "sorta",
];

const VALENCES: &[(&str, f64)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("charming", 2.2),
    ("clean", 1.7),
    ("comfortable", 2.3),
    ("cozy", 1.9),
    ("decent", 1.6),
    ("delicious", 2.7),
    ("delightful", 2.9),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("exceptional", 2.6),
    ("fabulous", 2.4),
    ("fantastic", 2.6),
    ("fast", 1.0),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("incredible", 2.6),
    ("kind", 2.4),
    ("like", 1.5),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("polite", 1.5),
    ("recommend", 1.5),
    ("recommended", 1.8),
    ("satisfied", 1.8),
    ("superb", 3.1),
    ("tasty", 1.9),
    ("thanks", 1.9),
    ("welcoming", 1.9),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("wow", 2.8),
    ("yummy", 2.4),
    // negative
    ("angry", -2.3),
    ("annoying", -1.7),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bland", -1.2),
    ("boring", -1.3),
    ("broken", -2.1),
    ("cold", -0.3),
    ("complaint", -1.5),
    ("confused", -1.3),
    ("dirty", -1.9),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("dreadful", -2.6),
    ("expensive", -0.9),
    ("fail", -2.5),
    ("failed", -2.3),
    ("filthy", -2.4),
    ("frustrated", -2.4),
    ("frustrating", -1.9),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("inedible", -1.8),
    ("lousy", -2.5),
    ("mediocre", -0.3),
    ("mess", -1.5),
    ("nasty", -2.6),
    ("noisy", -0.7),
    ("overpriced", -1.5),
    ("pathetic", -2.2),
    ("poor", -2.1),
    ("problem", -1.7),
    ("rude", -2.0),
    ("sad", -2.1),
    ("slow", -0.7),
    ("sorry", -0.3),
    ("stale", -1.5),
    ("terrible", -2.1),
    ("unfriendly", -1.5),
    ("unhappy", -1.8),
    ("unpleasant", -2.1),
    ("upset", -1.6),
    ("waste", -1.8),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Word-level valences keyed by lowercased token.
///
/// Negators and boosters are fixed lists; see [`is_negator`] and [`booster`].
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    pub fn empty() -> Self {
        Self {
            valences: HashMap::new(),
        }
    }

    /// Reads a tab-separated lexicon: the first column is the token, the
    /// second its valence. Blank lines and `#` comments are skipped.
    pub fn from_tsv(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file: {}", path.display()))?;
        Self::parse_tsv(&content)
            .with_context(|| format!("Failed to parse lexicon file: {}", path.display()))
    }

    pub fn parse_tsv(content: &str) -> Result<Self> {
        let mut lexicon = Self::empty();
        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split('\t');
            let token = cols.next().unwrap_or_default();
            let valence = cols
                .next()
                .with_context(|| format!("line {}: missing valence column", line_no + 1))?;
            let valence: f64 = valence
                .trim()
                .parse()
                .with_context(|| format!("line {}: invalid valence '{}'", line_no + 1, valence))?;
            if !valence.is_finite() {
                bail!("line {}: valence must be a finite number, got '{}'", line_no + 1, valence);
            }
            lexicon.insert(token, valence);
        }
        Ok(lexicon)
    }

    pub fn insert(&mut self, token: &str, valence: f64) {
        self.valences
            .insert(token.to_lowercase(), valence.clamp(-4.0, 4.0));
    }

    /// Adds every entry of `other`, replacing existing valences.
    pub fn merge(&mut self, other: Lexicon) {
        self.valences.extend(other.valences);
    }

    /// Valence of a lowercased token, if it carries sentiment.
    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        let mut lexicon = Self::empty();
        for (token, valence) in VALENCES {
            lexicon.insert(token, *valence);
        }
        lexicon
    }
}

/// True for negating words, including any `n't` contraction.
pub fn is_negator(token: &str) -> bool {
    let bare: String = token.chars().filter(|c| *c != '\'').collect();
    NEGATORS.contains(&bare.as_str()) || token.ends_with("n't")
}

/// Booster adjustment for `token`, before sign correction.
pub fn booster(token: &str) -> Option<f64> {
    if BOOSTERS_INCR.contains(&token) {
        Some(BOOSTER_INCR)
    } else if BOOSTERS_DECR.contains(&token) {
        Some(BOOSTER_DECR)
    } else {
        None
    }
}
