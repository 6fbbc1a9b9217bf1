/// Inspect a word-vector store: vocabulary stats and neighbour lists
/// Usage: cargo run --bin inspect_store -- <embeddings.txt> [word ...]
use embviz::{KeyedVectors, WordEmbeddings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: inspect_store <embeddings.txt> [word ...]");
        std::process::exit(1);
    }

    let store = KeyedVectors::load_word2vec_format(&args[1])?;
    println!(
        "📚 {} words, dimension {}",
        store.len(),
        store.dim()
    );

    for word in &args[2..] {
        if !store.contains(word) {
            println!("  ⚠️  `{}` not in vocabulary", word);
            continue;
        }
        println!("  {} →", word);
        for (neighbour, score) in store.nearest(word, 5)? {
            println!("     {:<24} {:.4}", neighbour, score);
        }
    }

    Ok(())
}
