//! Embedding Encoder — pluggable, trait-based text → vector encoder.
//!
//! Default: `FastEmbedEncoder` (local ONNX sentence-embedding model via fastembed).
//!
//! `AppState` holds an `Arc<dyn Encoder>`, constructed once in `main` before the
//! listener binds and shared read-only afterwards. Tests swap in a stub.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use tracing::{debug, info};

use crate::errors::AppError;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Maps a text to a fixed-dimension embedding. Implementations must be
/// deterministic for a given model and input.
#[async_trait]
pub trait Encoder: Send + Sync {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, AppError>;

    /// Model identifier, surfaced by `/health`.
    fn model_name(&self) -> &str;

    fn dimension(&self) -> usize;
}

// ────────────────────────────────────────────────────────────────────────────
// FastEmbedEncoder
// ────────────────────────────────────────────────────────────────────────────

pub struct FastEmbedEncoder {
    // The ONNX session is not shareable across threads, so inference is serialized.
    model: Arc<Mutex<TextEmbedding>>,
    model_code: String,
    dimension: usize,
}

impl FastEmbedEncoder {
    /// Loads `model_code` from `cache_dir`, downloading weights on first use.
    /// Blocks for the duration of the load; call before serving traffic.
    pub fn load(model_code: &str, cache_dir: PathBuf) -> Result<Self> {
        let (model, dimension) = resolve_model(model_code)?;
        let started = Instant::now();

        let embedding = TextEmbedding::try_new(
            InitOptions::new(model)
                .with_cache_dir(cache_dir)
                .with_show_download_progress(false),
        )
        .with_context(|| format!("Failed to load embedding model '{model_code}'"))?;

        info!(
            "Embedding model {model_code} ({dimension} dims) loaded in {:.2?}",
            started.elapsed()
        );

        Ok(Self {
            model: Arc::new(Mutex::new(embedding)),
            model_code: model_code.to_string(),
            dimension,
        })
    }
}

#[async_trait]
impl Encoder for FastEmbedEncoder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let model = Arc::clone(&self.model);
        let text = text.to_string();

        let embeddings = tokio::task::spawn_blocking(move || {
            let model = model
                .lock()
                .map_err(|_| AppError::Encoding("embedding model lock poisoned".to_string()))?;
            model
                .embed(vec![text], None)
                .map_err(|e| AppError::Encoding(e.to_string()))
        })
        .await
        .map_err(|e| AppError::Internal(anyhow!("embedding task failed: {e}")))??;

        let vector = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Encoding("model returned no embedding".to_string()))?;
        debug!("Encoded text into {} dims", vector.len());
        Ok(vector)
    }

    fn model_name(&self) -> &str {
        &self.model_code
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Looks up a fastembed model by its Hugging Face code, e.g.
/// `Xenova/paraphrase-multilingual-MiniLM-L12-v2`.
fn resolve_model(model_code: &str) -> Result<(EmbeddingModel, usize)> {
    let supported = TextEmbedding::list_supported_models();
    supported
        .iter()
        .find(|info| info.model_code.eq_ignore_ascii_case(model_code))
        .map(|info| (info.model.clone(), info.dim))
        .ok_or_else(|| {
            let codes: Vec<&str> = supported.iter().map(|i| i.model_code.as_str()).collect();
            anyhow!(
                "Unsupported embedding model '{model_code}'. Supported: {}",
                codes.join(", ")
            )
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Test doubles
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Bag-of-words encoder: each token bumps one of `DIM` buckets chosen by FNV-1a hash.
    /// Texts sharing words point in similar directions, identical texts score 1.0.
    pub struct HashingEncoder;

    const DIM: usize = 64;

    fn fnv1a(word: &str) -> u64 {
        word.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, b| {
            (hash ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
        })
    }

    #[async_trait]
    impl Encoder for HashingEncoder {
        async fn encode(&self, text: &str) -> Result<Vec<f32>, AppError> {
            let mut vector = vec![0.0_f32; DIM];
            for word in text.split_whitespace() {
                vector[(fnv1a(word) % DIM as u64) as usize] += 1.0;
            }
            Ok(vector)
        }

        fn model_name(&self) -> &str {
            "test/hashing-bow"
        }

        fn dimension(&self) -> usize {
            DIM
        }
    }

    /// Always fails, for exercising the encoding error path.
    pub struct FailingEncoder;

    #[async_trait]
    impl Encoder for FailingEncoder {
        async fn encode(&self, _text: &str) -> Result<Vec<f32>, AppError> {
            Err(AppError::Encoding("model offline".to_string()))
        }

        fn model_name(&self) -> &str {
            "test/failing"
        }

        fn dimension(&self) -> usize {
            0
        }
    }
}
