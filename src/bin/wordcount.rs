//! Count words in a file (or stdin) and print `(word, count)` lines.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::ExitCode;

use chained_hashmap::wordcount::count_words;
use chained_hashmap::Error;
use tracing::{error, info, Level};

fn run() -> Result<(), Error> {
    let counts = match env::args_os().nth(1) {
        Some(path) => {
            info!(path = %path.to_string_lossy(), "counting words");
            count_words(BufReader::new(File::open(&path)?))?
        }
        None => count_words(io::stdin().lock())?,
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for (word, n) in &counts {
        writeln!(out, "({word}, {n})")?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
