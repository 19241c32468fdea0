use crate::args::{Args, KeywordPair};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Location of a single performed replacement
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    /// 1-based line number
    pub line: usize,

    /// 0-based byte column within the line at the time of the replacement
    pub column: usize,

    /// Index of the keyword pair that matched
    pub pair: usize,
}

/// Rewrite a single file in place
///
/// Reads the file as UTF-8 text, applies every keyword pair to every line
/// and writes the result back to the same path. The file is truncated and
/// rewritten even when nothing matched.
///
/// # Arguments
/// * `path` - File to rewrite
/// * `args` - Command line arguments
///
/// # Returns
/// * `Result<()>` - Result of the operation
pub fn rewrite_file(path: &Path, args: &Args) -> Result<()> {
    let content = read_text(path)?;

    let (rewritten, replacements) = rewrite_content(&content, &args.pairs);

    if args.log {
        for replacement in &replacements {
            println!("{}", log_record(path, replacement, &args.pairs));
        }
    }

    fs::write(path, rewritten)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

/// Apply every keyword pair to every line of the content
///
/// Pairs are applied in sequence order, so the first pair in the list wins
/// when more than one could match at the same position.
///
/// # Arguments
/// * `content` - The content to replace in
/// * `pairs` - Keyword pairs in precedence order
///
/// # Returns
/// * `(String, Vec<Replacement>)` - The rewritten content and the location
///   of every replacement in the order it was performed
pub fn rewrite_content(content: &str, pairs: &[KeywordPair]) -> (String, Vec<Replacement>) {
    let mut output = String::with_capacity(content.len());
    let mut replacements = Vec::new();

    // Terminators stay attached to their lines so a final line without a
    // trailing newline survives the rewrite unchanged
    for (index, raw) in content.split_inclusive('\n').enumerate() {
        let mut line = raw.to_string();

        for (pair_index, pair) in pairs.iter().enumerate() {
            let (rewritten, columns) = apply_pair(&line, pair);
            line = rewritten;

            for column in columns {
                replacements.push(Replacement {
                    line: index + 1,
                    column,
                    pair: pair_index,
                });
            }
        }

        output.push_str(&line);
    }

    (output, replacements)
}

/// Apply a single keyword pair to one line, left to right
///
/// The scan cursor resumes just past the inserted replacement, so text the
/// replacement itself introduced is never matched again in the same pass.
/// This is a single left-to-right pass, not a fixed-point expansion.
///
/// # Arguments
/// * `line` - The line to replace in
/// * `pair` - The keyword pair to apply
///
/// # Returns
/// * `(String, Vec<usize>)` - The rewritten line and the 0-based column of
///   every replacement
pub fn apply_pair(line: &str, pair: &KeywordPair) -> (String, Vec<usize>) {
    // A zero-width keyword would match without consuming input; treat it
    // as no match so the pass always terminates
    if pair.old.is_empty() {
        return (line.to_string(), Vec::new());
    }

    let mut line = line.to_string();
    let mut columns = Vec::new();
    let mut cursor = 0;

    while let Some(found) = line[cursor..].find(pair.old.as_str()) {
        let start = cursor + found;
        line.replace_range(start..start + pair.old.len(), &pair.new);
        columns.push(start);
        cursor = start + pair.new.len();
    }

    (line, columns)
}

/// Format one replacement for the --log output stream
fn log_record(path: &Path, replacement: &Replacement, pairs: &[KeywordPair]) -> String {
    let pair = &pairs[replacement.pair];

    format!(
        "{}:{}:{}: replaced \"{}\" with \"{}\".",
        path.display(),
        replacement.line,
        replacement.column,
        pair.old,
        pair.new
    )
}

/// Read a file as UTF-8 text, separating decode failures from I/O failures
fn read_text(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::InvalidData => Err(anyhow!(
            "File is not valid UTF-8: {}",
            path.display()
        )),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read file: {}", path.display()))
        }
    }
}
