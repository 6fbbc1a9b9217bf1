//! Word-embedding neighbourhood visualization.
//!
//! Given a handful of query words, look up each one's nearest neighbours
//! in a pretrained embedding space, project the collected vectors into
//! 2-D with seeded t-SNE, and render a labeled scatter plot where opacity
//! separates query words from neighbours and label color separates the
//! per-query groups.
//!
//! The pipeline is a synchronous one-shot computation: the store is
//! loaded once at startup, shared read-only, and every invocation of
//! [`pipeline::plot_embs`] is independent of the last.

pub mod collect;
pub mod config;
pub mod error;
pub mod export;
pub mod fonts;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod tsne;

pub use collect::{collect_neighbourhoods, VizPoint};
pub use config::PlotConfig;
pub use error::VizError;
pub use export::Layout;
pub use fonts::{find_system_font, LabelFont};
pub use pipeline::{plot_dummy, plot_embs, plot_embs_with_layout};
pub use store::{KeyedVectors, WordEmbeddings};
