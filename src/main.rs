use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::EnvFilter;

use embviz::{
    find_system_font, plot_dummy, plot_embs_with_layout, KeyedVectors, LabelFont, VizError,
};

const DEFAULT_NEIGHBOURS: i64 = 5;
const DEFAULT_SEED: u64 = 123;
const DEFAULT_TITLE: &str = "Word embeddings";
const PLOTS_DIR: &str = "plots";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: embviz <embeddings.txt> <word,word,...> [num_neighbours] [save_path]");
        eprintln!("       EMBVIZ_FONT=<glyphs.ttf> selects the label font");
        std::process::exit(1);
    }

    let store = KeyedVectors::load_word2vec_format(&args[1])?;
    println!(
        "📚 Loaded {} word vectors of dimension {}",
        store.len(),
        store.dim()
    );

    let words: Vec<String> = args[2]
        .split(',')
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() {
        eprintln!("No words given");
        std::process::exit(1);
    }

    let num_neighbours: i64 = match args.get(3) {
        Some(raw) => raw.parse()?,
        None => DEFAULT_NEIGHBOURS,
    };

    let save_path = match args.get(4) {
        Some(path) => path.clone(),
        None => {
            // one timestamped file per run; concurrent runs never collide
            std::fs::create_dir_all(PLOTS_DIR)?;
            let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
            format!("{PLOTS_DIR}/{stamp}.png")
        }
    };

    let font = load_font()?;
    println!("🔤 Label font: {}", font.path().display());

    // Validation happens here, before the pipeline: the core assumes
    // in-vocabulary words and falls over loudly otherwise.
    let oov_words: Vec<&String> = words.iter().filter(|w| !store.contains(w)).collect();
    let image_path = if !oov_words.is_empty() {
        let missing: Vec<&str> = oov_words.iter().map(|w| w.as_str()).collect();
        println!(
            "🙈 Word embeddings for [{}] do not exist. Choose different words..",
            missing.join(", ")
        );
        plot_dummy(&font, &save_path)?
    } else if num_neighbours < 0 {
        println!("🙈 Set number of neighbours to a value >= 0.");
        plot_dummy(&font, &save_path)?
    } else {
        let (path, layout) = plot_embs_with_layout(
            &store,
            &words,
            num_neighbours as usize,
            DEFAULT_TITLE,
            DEFAULT_SEED,
            &font,
            &save_path,
        )?;
        let layout_path = Path::new(&path).with_extension("layout.json");
        layout.save_json(&layout_path)?;
        println!("🗺️  Layout saved to: {}", layout_path.display());
        path
    };

    println!("📊 Figure saved to: {image_path}");
    Ok(())
}

fn load_font() -> Result<LabelFont, VizError> {
    if let Ok(path) = std::env::var("EMBVIZ_FONT") {
        return LabelFont::from_file(path);
    }
    let path = find_system_font().ok_or_else(|| VizError::Font {
        path: "<system>".into(),
        reason: "no EMBVIZ_FONT set and no system font found".into(),
    })?;
    LabelFont::from_file(path)
}
