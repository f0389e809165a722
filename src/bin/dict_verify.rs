//! Validates a dictd dictionary's index and data files, printing the detected sort mode.
//!
//! Usage: `dict-verify <.index>`
//!
//! The data file path is derived from the index path by dropping its final extension and
//! appending `.dict.dz`.
use std::path::Path;
use std::process::exit;

use dictd::validate;

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
    if args.len() < 2 {
        eprintln!("Usage: dict-verify <.index>");
        exit(1);
    }

    let index_path = &args[1];
    let data_path = data_path_for(index_path);

    let mode = validate(Path::new(index_path), Path::new(&data_path));
    println!("{}", mode.as_i8());
}
