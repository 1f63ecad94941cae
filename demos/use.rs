use setwise::{AvlTreeSet, ChainedHashSet, Set};
use tracing_subscriber::EnvFilter;

// Lists dictionary words one adjacent swap away from `word`.
fn swap_suggestions(words: &dyn Set<String>, word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    (1..chars.len())
        .filter_map(|i| {
            let mut candidate = chars.clone();
            candidate.swap(i - 1, i);
            let candidate: String = candidate.into_iter().collect();
            words.contains(&candidate).then_some(candidate)
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dictionary = ["CAT", "DOG", "BIRD", "ACT", "GOD", "BRID"];

    let mut tree = AvlTreeSet::new();
    let mut table = ChainedHashSet::<String>::default();
    for word in dictionary {
        tree.insert(word.to_string());
        table.insert(word.to_string());
    }

    println!("Tree of height {} holding {} words:", tree.height(), tree.len());
    tree.preorder(|word| print!("{word} "));
    println!();

    println!("Hash table with {} buckets:", table.capacity());
    for index in 0..table.capacity() {
        println!("  bucket {index}: {} word(s)", table.elements_at_index(index));
    }

    let sets: [(&str, &dyn Set<String>); 2] = [("tree", &tree), ("hash", &table)];
    for (name, words) in sets {
        for word in ["CAT", "BIDR", "FISH"] {
            println!(
                "{name}: {word} known = {}, suggestions = {:?}",
                words.contains(&word.to_string()),
                swap_suggestions(words, word)
            );
        }
    }
}
