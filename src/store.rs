use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::VizError;

/// Capability contract the pipeline needs from an embedding store: exact
/// vector lookup and top-k similarity search.
pub trait WordEmbeddings {
    /// The vector for `word`, or `UnknownWord` if it is out of vocabulary.
    fn vector_of(&self, word: &str) -> Result<&[f32], VizError>;

    /// The `k` most similar words to `word` by cosine similarity, in
    /// descending similarity order, never containing `word` itself.
    fn nearest(&self, word: &str, k: usize) -> Result<Vec<(String, f32)>, VizError>;
}

/// In-memory word-vector store in the word2vec text format: first line
/// `<vocab_size> <dim>`, then one `<word> <f_1> ... <f_dim>` line per word.
/// Loaded fully at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct KeyedVectors {
    words: Vec<String>,
    index: HashMap<String, usize>,
    vectors: Vec<Vec<f32>>,
    norms: Vec<f32>,
    dim: usize,
}

impl KeyedVectors {
    /// Load a word2vec text-format file.
    pub fn load_word2vec_format<P: AsRef<Path>>(path: P) -> Result<Self, VizError> {
        let file = File::open(path.as_ref())?;
        let mut lines = BufReader::new(file).lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(VizError::Malformed {
                    line: 1,
                    reason: "empty file".into(),
                })
            }
        };
        let (vocab_size, dim) = parse_header(&header)?;

        let mut store = Self {
            words: Vec::with_capacity(vocab_size),
            index: HashMap::with_capacity(vocab_size),
            vectors: Vec::with_capacity(vocab_size),
            norms: Vec::with_capacity(vocab_size),
            dim,
        };

        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line_no = idx + 2;
            if line.trim().is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let word = parts.next().ok_or_else(|| VizError::Malformed {
                line: line_no,
                reason: "missing word".into(),
            })?;
            let vector = parts
                .map(|t| t.parse::<f32>())
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| VizError::Malformed {
                    line: line_no,
                    reason: format!("bad float: {e}"),
                })?;
            store.push(word, vector, line_no)?;
        }

        if store.words.len() != vocab_size {
            return Err(VizError::Malformed {
                line: 1,
                reason: format!(
                    "header declares {} words, file has {}",
                    vocab_size,
                    store.words.len()
                ),
            });
        }
        Ok(store)
    }

    /// Build a store directly from (word, vector) pairs. The dimension is
    /// taken from the first entry.
    pub fn from_pairs(pairs: Vec<(String, Vec<f32>)>) -> Result<Self, VizError> {
        let dim = pairs.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut store = Self {
            words: Vec::with_capacity(pairs.len()),
            index: HashMap::with_capacity(pairs.len()),
            vectors: Vec::with_capacity(pairs.len()),
            norms: Vec::with_capacity(pairs.len()),
            dim,
        };
        for (entry, (word, vector)) in pairs.into_iter().enumerate() {
            store.push(&word, vector, entry + 1)?;
        }
        Ok(store)
    }

    fn push(&mut self, word: &str, vector: Vec<f32>, line_no: usize) -> Result<(), VizError> {
        if vector.len() != self.dim {
            return Err(VizError::Malformed {
                line: line_no,
                reason: format!("expected {} components, got {}", self.dim, vector.len()),
            });
        }
        if self.index.contains_key(word) {
            return Err(VizError::Malformed {
                line: line_no,
                reason: format!("duplicate word `{word}`"),
            });
        }
        self.index.insert(word.to_string(), self.words.len());
        self.norms.push(norm(&vector));
        self.words.push(word.to_string());
        self.vectors.push(vector);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Vocabulary membership; the caller layer uses this to pre-filter
    /// out-of-vocabulary input before invoking the pipeline.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }
}

impl WordEmbeddings for KeyedVectors {
    fn vector_of(&self, word: &str) -> Result<&[f32], VizError> {
        let idx = self
            .index
            .get(word)
            .ok_or_else(|| VizError::UnknownWord(word.to_string()))?;
        Ok(&self.vectors[*idx])
    }

    fn nearest(&self, word: &str, k: usize) -> Result<Vec<(String, f32)>, VizError> {
        let query = *self
            .index
            .get(word)
            .ok_or_else(|| VizError::UnknownWord(word.to_string()))?;

        let mut scored: Vec<(usize, f32)> = (0..self.words.len())
            .filter(|&i| i != query)
            .map(|i| {
                let sim = cosine(
                    &self.vectors[query],
                    self.norms[query],
                    &self.vectors[i],
                    self.norms[i],
                );
                (i, sim)
            })
            .collect();

        // Descending by similarity; equal scores fall back to vocabulary
        // order so results are stable for a fixed store.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(k);

        Ok(scored
            .into_iter()
            .map(|(i, sim)| (self.words[i].clone(), sim))
            .collect())
    }
}

fn parse_header(header: &str) -> Result<(usize, usize), VizError> {
    let bad_header = || VizError::Malformed {
        line: 1,
        reason: format!("header must be `<vocab_size> <dim>`, got `{header}`"),
    };
    let mut parts = header.split_whitespace();
    let vocab_size = parts
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(bad_header)?;
    let dim = parts
        .next()
        .and_then(|t| t.parse::<usize>().ok())
        .ok_or_else(bad_header)?;
    if parts.next().is_some() {
        return Err(bad_header());
    }
    Ok((vocab_size, dim))
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine(a: &[f32], norm_a: f32, b: &[f32], norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}
