//! End-to-end tests for the neighbourhood plotting pipeline
//!
//! These run the full collect → project → render → save path against a
//! real word-vector file written into a temp directory. Tests that have
//! to rasterize text resolve a system font first and skip when the
//! machine has none.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use embviz::{
    collect_neighbourhoods, find_system_font, plot_dummy, plot_embs, plot_embs_with_layout,
    KeyedVectors, LabelFont, VizError,
};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// A small store where `tree`'s nearest neighbour is `forest` and
/// `music`'s is `song`.
fn write_store(dir: &Path) -> PathBuf {
    let path = dir.join("embeddings.txt");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "5 4").unwrap();
    writeln!(file, "tree 1.0 0.05 0.0 0.0").unwrap();
    writeln!(file, "forest 0.95 0.05 0.0 0.0").unwrap();
    writeln!(file, "music 0.0 1.0 0.05 0.0").unwrap();
    writeln!(file, "song 0.0 0.95 0.05 0.0").unwrap();
    writeln!(file, "film 0.0 0.0 1.0 0.0").unwrap();
    path
}

fn load_store(dir: &Path) -> KeyedVectors {
    KeyedVectors::load_word2vec_format(write_store(dir)).unwrap()
}

fn system_font() -> Option<LabelFont> {
    let Some(path) = find_system_font() else {
        eprintln!("no system font found; skipping");
        return None;
    };
    Some(LabelFont::from_file(path).unwrap())
}

fn assert_is_png(path: &str) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.len() > PNG_MAGIC.len());
    assert_eq!(&bytes[..PNG_MAGIC.len()], &PNG_MAGIC);
}

#[test]
fn test_single_query_with_one_neighbour() {
    let dir = TempDir::new().unwrap();
    let store = load_store(dir.path());
    let words = vec!["tree".to_string()];

    let points = collect_neighbourhoods(&store, &words, 1).unwrap();
    assert_eq!(points.len(), 2);
    assert!(points[0].is_query && points[0].word == "tree");
    assert!(!points[1].is_query && points[1].word == "forest");
    assert!(points.iter().all(|p| p.group == 0));

    let Some(font) = system_font() else { return };
    let out = dir.path().join("out.png");
    let out = out.to_str().unwrap();
    let returned = plot_embs(&store, &words, 1, "T", 123, &font, out).unwrap();
    assert_eq!(returned, out);
    assert_is_png(out);
}

#[test]
fn test_two_words_zero_neighbours() {
    let dir = TempDir::new().unwrap();
    let store = load_store(dir.path());
    let words = vec!["tree".to_string(), "music".to_string()];

    let points = collect_neighbourhoods(&store, &words, 0).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].group, 0);
    assert_eq!(points[1].group, 1);
    assert!(points.iter().all(|p| p.is_query));

    let Some(font) = system_font() else { return };
    let out = dir.path().join("pair.png");
    plot_embs(&store, &words, 0, "Word embeddings", 1, &font, out.to_str().unwrap()).unwrap();
    assert_is_png(out.to_str().unwrap());
}

#[test]
fn test_point_count_per_query_word() {
    let dir = TempDir::new().unwrap();
    let store = load_store(dir.path());
    let words = vec!["tree".to_string(), "music".to_string(), "film".to_string()];

    // the store has 4 candidates per query, so each word contributes 1 + k
    for k in 0..=3 {
        let points = collect_neighbourhoods(&store, &words, k).unwrap();
        assert_eq!(points.len(), words.len() * (1 + k));
        for block in points.chunks(1 + k) {
            assert!(block[0].is_query);
            assert!(block[1..].iter().all(|p| !p.is_query));
        }
    }
}

#[test]
fn test_plot_dummy_always_succeeds() {
    let Some(font) = system_font() else { return };
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("err.png");
    let out = out.to_str().unwrap();

    // independent of any prior pipeline state, including overwrites
    for _ in 0..2 {
        let returned = plot_dummy(&font, out).unwrap();
        assert_eq!(returned, out);
    }
    assert_is_png(out);
}

#[test]
fn test_single_point_is_rejected_before_projection() {
    let Some(font) = system_font() else { return };
    let dir = TempDir::new().unwrap();
    let store = load_store(dir.path());
    let words = vec!["tree".to_string()];
    let out = dir.path().join("out.png");

    let err = plot_embs(&store, &words, 0, "T", 123, &font, out.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, VizError::InsufficientPoints(1)));
    assert!(!out.exists(), "nothing must be written on failure");
}

#[test]
fn test_unknown_word_fails_loudly() {
    let Some(font) = system_font() else { return };
    let dir = TempDir::new().unwrap();
    let store = load_store(dir.path());
    let words = vec!["tree".to_string(), "zebra".to_string()];
    let out = dir.path().join("out.png");

    let err = plot_embs(&store, &words, 1, "T", 123, &font, out.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, VizError::UnknownWord(w) if w == "zebra"));
}

#[test]
fn test_same_seed_reproduces_the_layout() {
    let Some(font) = system_font() else { return };
    let dir = TempDir::new().unwrap();
    let store = load_store(dir.path());
    let words = vec!["tree".to_string(), "music".to_string()];

    let first = dir.path().join("a.png");
    let second = dir.path().join("b.png");
    let (_, layout_a) =
        plot_embs_with_layout(&store, &words, 2, "T", 99, &font, first.to_str().unwrap()).unwrap();
    let (_, layout_b) =
        plot_embs_with_layout(&store, &words, 2, "T", 99, &font, second.to_str().unwrap()).unwrap();

    assert_eq!(layout_a.points, layout_b.points);
}

#[test]
fn test_missing_parent_directory_is_a_write_error() {
    let Some(font) = system_font() else { return };
    let dir = TempDir::new().unwrap();
    let store = load_store(dir.path());
    let words = vec!["tree".to_string(), "music".to_string()];
    let out = dir.path().join("no_such_dir").join("out.png");

    let err = plot_embs(&store, &words, 1, "T", 123, &font, out.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, VizError::Write { .. }));
}
