//! Document encoding into hashed TF-IDF feature vectors.
//!
//! Encoding runs in two passes over the whole collection:
//!
//! 1. Every document is tokenized and each token is hashed into one of
//!    `num_features` buckets, producing a [`RawHistogram`].
//! 2. The inverse document frequency of every bucket is computed across the
//!    corpus, and each histogram is consumed into a [`FeatureVector`]
//!    (max-normalized term frequency times IDF, with its L2 norm cached).
//!
//! Buckets touched by no document get an IDF of `+inf`. That value is only
//! ever multiplied against zero histogram entries, which the zero-propagating
//! product turns into zero.

use crate::document::DocumentCollection;
use crate::vector::Vector;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Default width of the hashed feature space.
pub const DEFAULT_NUM_FEATURES: usize = 10_000;

/// Runs of characters outside `[A-Za-z0-9_]` separate tokens.
static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("Invalid regex"));

/// Hashed term counts of one document. Consumed by
/// [`RawHistogram::into_feature_vector`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawHistogram {
    counts: Vector,
}

impl RawHistogram {
    #[must_use]
    pub fn new(num_features: usize) -> Self {
        Self {
            counts: Vector::zeros(num_features),
        }
    }

    pub fn increment(&mut self, bucket: usize) {
        self.counts.increment(bucket);
    }

    #[must_use]
    pub fn counts(&self) -> &Vector {
        &self.counts
    }

    /// Number of tokens that were counted.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.counts.as_slice().iter().sum()
    }

    /// Converts the histogram into a TF-IDF feature vector.
    ///
    /// Term frequencies are divided by the largest count, then weighted by
    /// `idf`. A histogram with no tokens divides by zero and yields `NaN`s.
    #[must_use]
    pub fn into_feature_vector(self, idf: &Vector) -> FeatureVector {
        let mut vector = self.counts;
        let max = vector.max();
        vector.divide_scalar(max);
        vector.multiply_elementwise(idf);
        FeatureVector::new(vector)
    }
}

/// Encoded document vector with its precomputed L2 norm.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    vector: Vector,
    norm: f64,
}

impl FeatureVector {
    #[must_use]
    pub fn new(vector: Vector) -> Self {
        let norm = vector.norm();
        Self { vector, norm }
    }

    #[must_use]
    pub fn vector(&self) -> &Vector {
        &self.vector
    }

    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm
    }
}

/// Encodes every document of a collection into a feature vector.
pub trait Encoder {
    /// Encodes all documents in place. Any previous encoding is replaced.
    fn encode(&mut self, documents: &mut DocumentCollection);

    /// Width of the produced feature vectors.
    fn num_features(&self) -> usize;
}

/// Term frequency / inverse document frequency encoder over hashed buckets.
#[derive(Debug, Clone)]
pub struct TfIdfEncoder {
    num_features: usize,
    inverse_document_frequency: Option<Vector>,
}

impl TfIdfEncoder {
    /// Creates an encoder producing vectors of `num_features` elements.
    ///
    /// # Panics
    /// Panics if `num_features` is zero.
    #[must_use]
    pub fn new(num_features: usize) -> Self {
        assert!(num_features > 0, "TfIdfEncoder needs at least one feature");
        Self {
            num_features,
            inverse_document_frequency: None,
        }
    }

    /// Corpus IDF from the most recent [`Encoder::encode`] call.
    #[must_use]
    pub fn inverse_document_frequency(&self) -> Option<&Vector> {
        self.inverse_document_frequency.as_ref()
    }

    /// Maps a token to its bucket in `0..num_features`.
    #[must_use]
    pub fn bucket(&self, token: &str) -> usize {
        let hash = string_hash(token);
        (hash.unsigned_abs() as usize) % self.num_features
    }

    /// Counts the hashed tokens of `text`.
    #[must_use]
    pub fn histogram(&self, text: &str) -> RawHistogram {
        let mut histogram = RawHistogram::new(self.num_features);
        for token in tokenize(text) {
            histogram.increment(self.bucket(token));
        }
        histogram
    }

    /// `idf[j] = ln(N / df[j])` where `df[j]` counts documents with a
    /// positive count in bucket `j`.
    fn calc_inverse_document_frequency(&self, histograms: &[RawHistogram]) -> Vector {
        let mut idf = Vector::zeros(self.num_features);
        for histogram in histograms {
            for (bucket, &count) in histogram.counts().as_slice().iter().enumerate() {
                if count > 0.0 {
                    idf.increment(bucket);
                }
            }
        }
        idf.invert_elementwise();
        idf.multiply_scalar(histograms.len() as f64);
        idf.log_elementwise();
        idf
    }
}

impl Default for TfIdfEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_FEATURES)
    }
}

impl Encoder for TfIdfEncoder {
    fn encode(&mut self, documents: &mut DocumentCollection) {
        let histograms: Vec<RawHistogram> = documents
            .iter()
            .map(|document| self.histogram(document.text()))
            .collect();

        let idf = self.calc_inverse_document_frequency(&histograms);

        for (document, histogram) in documents.iter_mut().zip(histograms) {
            if histogram.total() == 0.0 {
                warn!(
                    id = document.id().get(),
                    "document produced no tokens, its feature vector is undefined"
                );
            }
            document.set_features(histogram.into_feature_vector(&idf));
        }

        debug!(
            documents = documents.size(),
            num_features = self.num_features,
            "encoded collection"
        );
        self.inverse_document_frequency = Some(idf);
    }

    fn num_features(&self) -> usize {
        self.num_features
    }
}

/// Splits text on runs of non-word characters.
///
/// A leading separator yields a leading empty token; trailing empty tokens
/// are dropped. Text containing no separator at all is a single token, even
/// when it is empty.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    // Trailing separators would only produce trailing empty tokens
    let trimmed = text.trim_end_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '_'));
    let pieces = (!trimmed.is_empty() || text.is_empty()).then(|| TOKEN_SEPARATOR.split(trimmed));
    pieces.into_iter().flatten()
}

/// Polynomial string hash (`h = 31 * h + unit`) over UTF-16 code units with
/// wrapping 32-bit arithmetic. Stable across runs and platforms.
#[must_use]
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}
