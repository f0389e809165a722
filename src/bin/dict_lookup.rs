//! Looks up one or more words in a dictd dictionary and prints their articles.
//!
//! Usage: `dict-lookup <.index> <word> [<word>...]`
//!
//! The data file path is derived from the index path by dropping its final extension and
//! appending `.dict.dz`.
use std::path::Path;
use std::process::exit;

use dictd::{Dictionary, FindMode, SortMode};

fn data_path_for(index_path: &str) -> String {
    let stem = match index_path.rfind('.') {
        Some(dot) => &index_path[..dot],
        None => index_path,
    };
    format!("{}.dict.dz", stem)
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: dict-lookup <.index> <word> [<word>...]");
        exit(1);
    }

    let index_path = &args[1];
    let data_path = data_path_for(index_path);

    let dict = match Dictionary::open(Path::new(index_path), Path::new(&data_path), SortMode::Alphabetic) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("failed to open dictionary: {}", e);
            exit(1);
        }
    };

    println!("'{}'\n", dict.name().unwrap_or_default());

    for word in &args[2..] {
        println!("{}", word);

        let mut cursor = dict.find(word.as_bytes(), FindMode::StartsWith);
        while let Some(c) = cursor {
            if let Some(article) = c.article() {
                println!("{}\n----------------------------------------", String::from_utf8_lossy(&article));
            }
            cursor = c.next();
        }
    }
}
