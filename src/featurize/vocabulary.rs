use ahash::{AHashMap, AHashSet};

use crate::error::{PolarityError, Result};

/// Term → feature index mapping built from a training corpus.
///
/// Indices are assigned in first-seen order and never change afterwards.
/// Document frequencies are kept alongside so TF-IDF weighting can be
/// derived without revisiting the corpus.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Terms ordered by index.
    terms: Vec<String>,
    /// Reverse lookup.
    index: AHashMap<String, usize>,
    /// Number of training documents containing each term.
    document_frequency: Vec<u32>,
    /// Total number of documents seen while building.
    n_documents: usize,
}

impl Vocabulary {
    /// Build a vocabulary from per-document term lists.
    pub fn from_documents<I, D>(documents: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: AsRef<[String]>,
    {
        let mut vocabulary = Self::default();

        for document in documents {
            vocabulary.n_documents += 1;
            let mut seen: AHashSet<usize> = AHashSet::new();
            for term in document.as_ref() {
                let idx = vocabulary.intern(term);
                if seen.insert(idx) {
                    vocabulary.document_frequency[idx] += 1;
                }
            }
        }

        vocabulary
    }

    /// Rebuild a vocabulary from persisted parts.
    pub fn from_parts(
        terms: Vec<String>,
        document_frequency: Vec<u32>,
        n_documents: usize,
    ) -> Result<Self> {
        if terms.len() != document_frequency.len() {
            return Err(PolarityError::schema_mismatch(format!(
                "vocabulary has {} terms but {} document frequencies",
                terms.len(),
                document_frequency.len()
            )));
        }

        let mut index = AHashMap::with_capacity(terms.len());
        for (idx, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), idx).is_some() {
                return Err(PolarityError::schema_mismatch(format!(
                    "duplicate vocabulary term {term:?}"
                )));
            }
        }

        Ok(Self {
            terms,
            index,
            document_frequency,
            n_documents,
        })
    }

    fn intern(&mut self, term: &str) -> usize {
        if let Some(&idx) = self.index.get(term) {
            return idx;
        }
        let idx = self.terms.len();
        self.terms.push(term.to_string());
        self.index.insert(term.to_string(), idx);
        self.document_frequency.push(0);
        idx
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Feature index of a term, if known.
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Term at a feature index.
    pub fn term(&self, idx: usize) -> Option<&str> {
        self.terms.get(idx).map(String::as_str)
    }

    /// All terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Document frequencies in index order.
    pub fn document_frequencies(&self) -> &[u32] {
        &self.document_frequency
    }

    /// Number of documents the vocabulary was built from.
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    /// Smoothed inverse document frequency for every term:
    /// `ln((N + 1) / (df + 1)) + 1`.
    pub fn idf(&self) -> Vec<f64> {
        let n = self.n_documents as f64;
        self.document_frequency
            .iter()
            .map(|&df| ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|d| d.iter().map(|t| t.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_first_seen_order_and_frequencies() {
        let vocabulary = Vocabulary::from_documents(docs(&[
            &["great", "food", "great"],
            &["bad", "food"],
        ]));

        assert_eq!(vocabulary.terms(), &["great", "food", "bad"]);
        assert_eq!(vocabulary.get("food"), Some(1));
        assert_eq!(vocabulary.get("pizza"), None);
        assert_eq!(vocabulary.term(2), Some("bad"));
        // "great" appears twice in one document: df counts documents.
        assert_eq!(vocabulary.document_frequencies(), &[1, 2, 1]);
        assert_eq!(vocabulary.n_documents(), 2);
    }

    #[test]
    fn test_idf_is_smoothed() {
        let vocabulary = Vocabulary::from_documents(docs(&[&["a"], &["a", "b"], &["c"]]));
        let idf = vocabulary.idf();

        assert!((idf[0] - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((idf[1] - (2.0f64.ln() + 1.0)).abs() < 1e-12);
        assert!(idf[1] > idf[0]);
    }

    #[test]
    fn test_from_parts_round_trip() {
        let original = Vocabulary::from_documents(docs(&[&["love", "it"], &["hate", "it"]]));
        let rebuilt = Vocabulary::from_parts(
            original.terms().to_vec(),
            original.document_frequencies().to_vec(),
            original.n_documents(),
        )
        .unwrap();

        assert_eq!(rebuilt.terms(), original.terms());
        assert_eq!(rebuilt.get("hate"), original.get("hate"));
    }

    #[test]
    fn test_from_parts_rejects_inconsistent_input() {
        let err = Vocabulary::from_parts(vec!["a".into()], vec![], 1).unwrap_err();
        assert!(matches!(err, PolarityError::SchemaMismatch(_)));

        let err = Vocabulary::from_parts(vec!["a".into(), "a".into()], vec![1, 1], 1).unwrap_err();
        assert!(matches!(err, PolarityError::SchemaMismatch(_)));
    }
}
