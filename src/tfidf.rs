// src/tfidf.rs
use std::collections::{HashMap, HashSet};

pub struct TfIdf {
    vocab: HashMap<String, usize>,
    idf: Vec<f32>,
}

#[derive(Default)]
pub struct TfIdfBuilder {
    documents: Vec<String>,
}

/// Lower-cased whitespace tokens with surrounding punctuation trimmed.
pub fn tokenize(document: &str) -> impl Iterator<Item = String> + '_ {
    document
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|word| !word.is_empty())
}

impl TfIdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, document: &str) {
        self.documents.push(document.to_owned());
    }

    pub fn build(self) -> TfIdf {
        let mut vocab = HashMap::new();
        let mut doc_count: Vec<usize> = Vec::new();

        // Build vocabulary and count document frequency
        for doc in &self.documents {
            let mut seen_words = HashSet::new();
            for word in tokenize(doc) {
                let next_id = vocab.len();
                let id = *vocab.entry(word).or_insert(next_id);
                if id == doc_count.len() {
                    doc_count.push(0);
                }
                if seen_words.insert(id) {
                    doc_count[id] += 1;
                }
            }
        }

        // Smoothed IDF so terms shared by every document still carry weight
        let total_docs = self.documents.len() as f32;
        let idf = doc_count
            .into_iter()
            .map(|count| ((1.0 + total_docs) / (1.0 + count as f32)).ln() + 1.0)
            .collect();

        TfIdf { vocab, idf }
    }
}

impl TfIdf {
    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    /// TF-IDF weights of `document` over the fitted vocabulary; unseen terms are ignored.
    pub fn vectorize(&self, document: &str) -> Vec<f32> {
        let mut counts = vec![0.0_f32; self.vocab.len()];
        let mut total = 0usize;
        for word in tokenize(document) {
            total += 1;
            if let Some(&id) = self.vocab.get(&word) {
                counts[id] += 1.0;
            }
        }
        if total == 0 {
            return counts;
        }

        counts
            .iter()
            .zip(&self.idf)
            .map(|(count, idf)| count / total as f32 * idf)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(docs: &[&str]) -> TfIdf {
        let mut builder = TfIdfBuilder::new();
        for doc in docs {
            builder.add(doc);
        }
        builder.build()
    }

    #[test]
    fn tokenizer_trims_punctuation_and_case() {
        let tokens: Vec<String> = tokenize("Python, SQL; (pandas) -- ").collect();
        assert_eq!(tokens, vec!["python", "sql", "pandas"]);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let tfidf = model(&["python sql", "python pandas"]);
        assert_eq!(tfidf.vocab_len(), 3);
        let weights = tfidf.vectorize("python sql");
        let shared = weights[tfidf.vocab["python"]];
        let rare = weights[tfidf.vocab["sql"]];
        assert!(rare > shared);
        assert!(shared > 0.0);
    }

    #[test]
    fn unknown_terms_have_no_weight() {
        let tfidf = model(&["python sql"]);
        assert!(!tfidf.vocab.contains_key("rust"));
        assert!(tfidf.vectorize("rust only").iter().all(|w| *w == 0.0));
    }

    #[test]
    fn empty_document_vectorizes_to_zeros() {
        let tfidf = model(&["python sql"]);
        assert_eq!(tfidf.vectorize(""), vec![0.0, 0.0]);
    }
}
