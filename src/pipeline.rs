use tracing::info;

use crate::collect::collect_neighbourhoods;
use crate::config::PlotConfig;
use crate::error::VizError;
use crate::export::Layout;
use crate::fonts::LabelFont;
use crate::render::{render, save_figure};
use crate::store::WordEmbeddings;
use crate::tsne::project;

/// Title drawn on fallback figures.
pub const DUMMY_TITLE: &str = "Word embeddings";

/// Plot embeddings for a set of words and their neighbours. First obtain
/// the neighbours, then apply t-SNE, finally render and save the figure;
/// returns `save_path` on success.
///
/// Callers are expected to have validated the input (every base word in
/// vocabulary) before invoking; an unknown word fails the whole call.
pub fn plot_embs(
    store: &impl WordEmbeddings,
    base_words: &[String],
    num_neighbours: usize,
    title: &str,
    random_seed: u64,
    font: &LabelFont,
    save_path: &str,
) -> Result<String, VizError> {
    plot_embs_with_layout(
        store,
        base_words,
        num_neighbours,
        title,
        random_seed,
        font,
        save_path,
    )
    .map(|(path, _)| path)
}

/// Same as [`plot_embs`], additionally returning the projected layout for
/// callers that persist it next to the image.
pub fn plot_embs_with_layout(
    store: &impl WordEmbeddings,
    base_words: &[String],
    num_neighbours: usize,
    title: &str,
    random_seed: u64,
    font: &LabelFont,
    save_path: &str,
) -> Result<(String, Layout), VizError> {
    let mut points = collect_neighbourhoods(store, base_words, num_neighbours)?;
    info!(
        queries = base_words.len(),
        points = points.len(),
        "collected neighbourhoods"
    );

    let vectors: Vec<Vec<f32>> = points.iter().map(|p| p.vector.clone()).collect();
    let positions = project(&vectors, random_seed)?;
    for (point, position) in points.iter_mut().zip(positions) {
        point.position = position;
    }

    let figure = render(&points, title, font, &PlotConfig::default());
    let path = save_figure(&figure, save_path)?;
    Ok((path, Layout::from_points(title, &points)))
}

/// Create a fallback figure: an empty titled plot written to `save_path`.
/// The caller layer uses this when input validation fails upstream, so the
/// user-facing flow always receives an image path.
pub fn plot_dummy(font: &LabelFont, save_path: &str) -> Result<String, VizError> {
    let figure = render(&[], DUMMY_TITLE, font, &PlotConfig::default());
    save_figure(&figure, save_path)
}
