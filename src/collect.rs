use tracing::debug;

use crate::error::VizError;
use crate::store::WordEmbeddings;

/// One plotted word: a query word or one of its neighbours.
#[derive(Debug, Clone)]
pub struct VizPoint {
    pub word: String,
    pub is_query: bool,
    /// Index of the owning query word; a query and its neighbours share it.
    /// Increments once per query word, in input order.
    pub group: usize,
    pub vector: Vec<f32>,
    /// 2-D position, assigned once after projection.
    pub position: (f64, f64),
}

impl VizPoint {
    fn new(word: String, is_query: bool, group: usize, vector: Vec<f32>) -> Self {
        Self {
            word,
            is_query,
            group,
            vector,
            position: (0.0, 0.0),
        }
    }
}

/// Gather one `VizPoint` per query word plus one per retrieved neighbour,
/// query first, neighbours in descending similarity order. Query words are
/// assumed to be pre-validated against the vocabulary; a miss fails the
/// whole call rather than silently dropping the word, which would corrupt
/// the query/neighbour grouping.
pub fn collect_neighbourhoods(
    store: &impl WordEmbeddings,
    query_words: &[String],
    k: usize,
) -> Result<Vec<VizPoint>, VizError> {
    let mut points = Vec::with_capacity(query_words.len() * (k + 1));
    for (group, word) in query_words.iter().enumerate() {
        let vector = store.vector_of(word)?.to_vec();
        points.push(VizPoint::new(word.clone(), true, group, vector));

        if k == 0 {
            continue;
        }
        for (neighbour, score) in store.nearest(word, k)? {
            debug!(query = %word, %neighbour, score, "collected neighbour");
            let vector = store.vector_of(&neighbour)?.to_vec();
            points.push(VizPoint::new(neighbour, false, group, vector));
        }
    }
    Ok(points)
}
