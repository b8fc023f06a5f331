//! TF-IDF encoding of post titles over unigrams and bigrams.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use crate::error::ModelError;

/// Tokens are runs of two or more word characters.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Sparse row: `(vocabulary index, weight)` pairs in ascending index order.
pub type SparseRow = Vec<(usize, f64)>;

/// A vocabulary and smoothed inverse document frequencies fit on a corpus.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token_re: Regex,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn the vocabulary (sorted alphabetically) and idf weights.
    ///
    /// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DegenerateInput`] if the corpus yields no terms.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self, ModelError> {
        let token_re = Regex::new(TOKEN_PATTERN)?;

        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let terms: BTreeSet<String> = analyze(&token_re, doc.as_ref()).into_iter().collect();
            for term in terms {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(ModelError::DegenerateInput(
                "title corpus produced an empty vocabulary".to_string(),
            ));
        }

        #[allow(clippy::cast_precision_loss)]
        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (index, (term, df)) in doc_freq.into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Ok(Self {
            token_re,
            vocabulary,
            idf,
        })
    }

    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }

    #[must_use]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Encode one document as an L2-normalized sparse row. Terms outside the
    /// fitted vocabulary are dropped; a document with no known terms encodes
    /// as an empty row.
    #[must_use]
    pub fn transform(&self, document: &str) -> SparseRow {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in analyze(&self.token_re, document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseRow = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut row {
                *w /= norm;
            }
        }
        row
    }
}

/// Lowercase, tokenize, then emit unigrams followed by space-joined bigrams.
fn analyze(token_re: &Regex, document: &str) -> Vec<String> {
    let lowered = document.to_lowercase();
    let tokens: Vec<&str> = token_re.find_iter(&lowered).map(|m| m.as_str()).collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| (*t).to_string()).collect();
    terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    terms
}
