use std::collections::{HashMap, HashSet};

use anyhow::Result;
use ndarray::Array1;
use regex::Regex;
use serde::Deserialize;

use super::utils::{l1_normalize, l2_normalize};

/// Numeric representation of one input text, one column per vocabulary term.
pub type FeatureVector = Array1<f64>;

/// Turns raw text into a [`FeatureVector`].
///
/// Implementations receive the text exactly as submitted; any case folding or
/// tokenization is the vectorizer's own business. They must be immutable after
/// construction so a single instance can serve every request.
pub trait TextVectorizer: Send + Sync {
    fn transform(&self, text: &str) -> Result<FeatureVector>;
}

const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Row normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// On-disk shape of a fitted TF-IDF vectorizer.
#[derive(Debug, Deserialize)]
struct TfidfDocument {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default = "default_token_pattern")]
    token_pattern: String,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    #[serde(default)]
    stop_words: Option<Vec<String>>,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_norm")]
    norm: Option<Norm>,
}

fn default_lowercase() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// A fitted word-level TF-IDF vectorizer.
///
/// Deserializing validates the document, so a loaded instance always has one
/// IDF weight per vocabulary column and a compiled token pattern.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "TfidfDocument")]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Array1<f64>,
    lowercase: bool,
    token_regex: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    sublinear_tf: bool,
    norm: Option<Norm>,
}

impl TryFrom<TfidfDocument> for TfidfVectorizer {
    type Error = String;

    fn try_from(doc: TfidfDocument) -> Result<Self, Self::Error> {
        if doc.idf.len() != doc.vocabulary.len() {
            return Err(format!(
                "idf has {} weights but the vocabulary has {} terms",
                doc.idf.len(),
                doc.vocabulary.len()
            ));
        }
        if let Some((term, &column)) = doc.vocabulary.iter().find(|(_, &c)| c >= doc.idf.len()) {
            return Err(format!(
                "term '{}' maps to column {} (only {} columns)",
                term, column, doc.idf.len()
            ));
        }
        let (min_n, max_n) = doc.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({}, {})", min_n, max_n));
        }
        let token_regex = Regex::new(&doc.token_pattern)
            .map_err(|e| format!("invalid token_pattern: {}", e))?;
        // Group 0 is the whole match; at most one explicit group may select the token
        if token_regex.captures_len() > 2 {
            return Err(format!(
                "token_pattern '{}' has {} capture groups, at most one is allowed",
                doc.token_pattern,
                token_regex.captures_len() - 1
            ));
        }

        Ok(Self {
            vocabulary: doc.vocabulary,
            idf: Array1::from(doc.idf),
            lowercase: doc.lowercase,
            token_regex,
            ngram_range: doc.ngram_range,
            stop_words: doc.stop_words.unwrap_or_default().into_iter().collect(),
            sublinear_tf: doc.sublinear_tf,
            norm: doc.norm,
        })
    }
}

impl TfidfVectorizer {
    /// Builds a vectorizer with default settings (lowercase, unigrams, L2 norm).
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Result<Self> {
        let doc = TfidfDocument {
            vocabulary,
            idf,
            lowercase: default_lowercase(),
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            stop_words: None,
            sublinear_tf: false,
            norm: default_norm(),
        };
        Self::try_from(doc).map_err(anyhow::Error::msg)
    }

    /// Width of every vector this vectorizer produces.
    pub fn num_features(&self) -> usize {
        self.idf.len()
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        // A single capture group selects the token, as in scikit-learn
        let use_group = self.token_regex.captures_len() == 2;
        self.token_regex
            .captures_iter(&text)
            .filter_map(|caps| {
                let m = if use_group { caps.get(1) } else { caps.get(0) };
                m.map(|m| m.as_str().to_string())
            })
            .filter(|token| !self.stop_words.contains(token))
            .collect()
    }

    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut grams = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            grams.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        grams
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        let tokens = self.tokenize(text);
        let mut counts: FeatureVector = Array1::zeros(self.num_features());
        for gram in self.ngrams(&tokens) {
            if let Some(&column) = self.vocabulary.get(&gram) {
                counts[column] += 1.0;
            }
        }

        if self.sublinear_tf {
            counts.mapv_inplace(|tf| if tf > 0.0 { 1.0 + tf.ln() } else { 0.0 });
        }
        let weighted = counts * &self.idf;

        Ok(match self.norm {
            Some(Norm::L2) => l2_normalize(&weighted),
            Some(Norm::L1) => l1_normalize(&weighted),
            None => weighted,
        })
    }
}
