use crate::error::Result;
use crate::tfidf::TfIdfBuilder;
use crate::utils::compute_cosine_similarity;

/// Symmetric similarity in `[-1, 1]`.
pub trait Similarity {
    fn similarity(&self, a: &str, b: &str) -> Result<f64>;
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        Ok(self(a, b))
    }
}

/// TF-IDF cosine, fitted on just the pair of texts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfSimilarity;

impl Similarity for TfIdfSimilarity {
    fn similarity(&self, a: &str, b: &str) -> Result<f64> {
        let mut builder = TfIdfBuilder::new();
        builder.add(a);
        builder.add(b);
        let model = builder.build();
        if model.vocab_len() == 0 {
            return Ok(0.0);
        }
        let cos = compute_cosine_similarity(&model.vectorize(a), &model.vectorize(b));
        Ok(f64::from(cos).clamp(0.0, 1.0))
    }
}

#[cfg(feature = "bert")]
pub use bert::BertSimilarity;

#[cfg(feature = "bert")]
mod bert {
    use rust_bert::pipelines::sentence_embeddings::{
        SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
    };
    use tracing::info;

    use super::Similarity;
    use crate::error::{RankError, Result};
    use crate::utils::compute_cosine_similarity;

    /// Sentence-embedding cosine similarity with `all-MiniLM-L6-v2`.
    pub struct BertSimilarity {
        model: SentenceEmbeddingsModel,
    }

    impl BertSimilarity {
        pub fn new() -> Result<Self> {
            info!("loading all-MiniLM-L6-v2 sentence embeddings");
            let model = SentenceEmbeddingsBuilder::remote(SentenceEmbeddingsModelType::AllMiniLmL6V2)
                .with_device(tch::Device::cuda_if_available())
                .create_model()
                .map_err(|e| RankError::Similarity(e.to_string()))?;
            Ok(Self { model })
        }
    }

    impl Similarity for BertSimilarity {
        fn similarity(&self, a: &str, b: &str) -> Result<f64> {
            let embeddings = self
                .model
                .encode(&[a, b])
                .map_err(|e| RankError::Similarity(e.to_string()))?;
            match embeddings.as_slice() {
                [ea, eb] => Ok(f64::from(compute_cosine_similarity(ea, eb))),
                _ => Err(RankError::Similarity(format!(
                    "expected 2 embeddings, got {}",
                    embeddings.len()
                ))),
            }
        }
    }
}
