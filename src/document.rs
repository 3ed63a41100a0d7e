//! Documents and the ordered collection they live in.
//!
//! A [`DocumentCollection`] is built once from already-parsed `(id, text)`
//! pairs and never reordered or resized afterwards. Documents start without a
//! feature vector; an [`Encoder`](crate::vector::Encoder) fills it in.

use crate::error::{DocumentError, DocumentResult};
use crate::vector::FeatureVector;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Stable identifier of a document within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(i64);

impl DocumentId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single text item and, once encoded, its feature vector.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    title: Option<String>,
    text: String,
    features: Option<FeatureVector>,
}

impl Document {
    pub fn new(id: DocumentId, text: impl Into<String>) -> Self {
        Self {
            id,
            title: None,
            text: text.into(),
            features: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Encoded feature vector, `None` until the collection has been encoded.
    #[must_use]
    pub fn features(&self) -> Option<&FeatureVector> {
        self.features.as_ref()
    }

    pub(crate) fn set_features(&mut self, features: FeatureVector) {
        self.features = Some(features);
    }

    #[must_use]
    pub fn is_encoded(&self) -> bool {
        self.features.is_some()
    }
}

/// Ordered set of documents in input order.
#[derive(Debug, Clone)]
pub struct DocumentCollection {
    documents: Vec<Document>,
}

impl DocumentCollection {
    /// Builds a collection from parsed documents.
    ///
    /// Rejects an empty input and duplicate identifiers.
    pub fn new(documents: Vec<Document>) -> DocumentResult<Self> {
        if documents.is_empty() {
            return Err(DocumentError::Empty);
        }

        let mut seen = HashSet::with_capacity(documents.len());
        for document in &documents {
            if !seen.insert(document.id) {
                return Err(DocumentError::DuplicateId(document.id));
            }
        }

        Ok(Self { documents })
    }

    /// Builds a collection from `(id, text)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> DocumentResult<Self>
    where
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, text)| Document::new(DocumentId::new(id), text))
                .collect(),
        )
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Document> {
        self.documents.iter_mut()
    }

    /// True once every document carries a feature vector.
    #[must_use]
    pub fn is_encoded(&self) -> bool {
        self.documents.iter().all(Document::is_encoded)
    }
}

impl std::ops::Index<usize> for DocumentCollection {
    type Output = Document;

    fn index(&self, index: usize) -> &Document {
        &self.documents[index]
    }
}

impl<'a> IntoIterator for &'a DocumentCollection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
