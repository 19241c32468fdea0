use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;

/// Execution mode of the application
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Mode {
    #[default]
    File,      // Rewrite a single file
    Directory, // Rewrite every file under a directory
}

/// Keyword replacement rule
#[derive(Debug, Clone)]
pub struct KeywordPair {
    /// Literal text to search for
    pub old: String,

    /// Literal text to insert in its place
    pub new: String,
}

/// Command line arguments parser
#[derive(Parser, Debug)]
#[command(author, version, about = "Replace keywords in files within a directory or a single file")]
#[command(name = "kwdrepl")]
pub struct Args {
    /// The file or directory to search
    pub path: PathBuf,

    /// Keywords to replace, separated by ~ (tilde)
    pub keywords: String,

    /// Replacements, separated by ~ (tilde)
    pub replacements: String,

    /// Log each replacement to standard output
    #[arg(long = "log")]
    pub log: bool,

    /// Skip files that fail to read, decode or write instead of aborting
    #[arg(long = "skip-errors")]
    pub skip_errors: bool,

    /// Execution mode derived from the target path
    #[arg(skip)]
    pub mode: Mode,

    /// Compiled list of keyword pairs
    #[arg(skip)]
    pub pairs: Vec<KeywordPair>,
}

/// Parse command line arguments and validate them
///
/// # Returns
/// * `Result<Args>` - Parsed and validated arguments
pub fn parse() -> Result<Args> {
    compile(Args::parse())
}

/// Compile raw command line arguments into their runtime form
///
/// Splits the keyword and replacement lists, zips them into pairs and
/// resolves the target path to an execution mode.
///
/// # Arguments
/// * `args` - Arguments as parsed from the command line
///
/// # Returns
/// * `Result<Args>` - Compiled and validated arguments
fn compile(mut args: Args) -> Result<Args> {
    args.pairs = compile_pairs(&args.keywords, &args.replacements)?;

    // Resolve the target path once; it is immutable afterwards
    if args.path.is_file() {
        args.mode = Mode::File;
    } else if args.path.is_dir() {
        args.mode = Mode::Directory;
    } else {
        return Err(anyhow!(
            "Invalid target: expected file or directory: {}",
            args.path.display()
        ));
    }

    Ok(args)
}

/// Split the two tilde-delimited lists and zip them into keyword pairs
///
/// Input order is preserved; the resulting order decides which pair wins
/// when more than one could match at the same position. Empty keyword or
/// replacement strings are accepted as-is.
///
/// # Arguments
/// * `keywords` - Tilde-separated list of search strings
/// * `replacements` - Tilde-separated list of replacement strings
///
/// # Returns
/// * `Result<Vec<KeywordPair>>` - Pairs in input order
fn compile_pairs(keywords: &str, replacements: &str) -> Result<Vec<KeywordPair>> {
    let keywords: Vec<&str> = keywords.split('~').collect();
    let replacements: Vec<&str> = replacements.split('~').collect();

    if keywords.len() != replacements.len() {
        return Err(anyhow!(
            "Invalid number of keywords and replacements (should be equal)"
        ));
    }

    let pairs = keywords
        .into_iter()
        .zip(replacements)
        .map(|(old, new)| KeywordPair {
            old: old.to_string(),
            new: new.to_string(),
        })
        .collect();

    Ok(pairs)
}

// Add Default implementation for Args
impl Default for Args {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            keywords: String::new(),
            replacements: String::new(),
            log: false,
            skip_errors: false,
            mode: Mode::default(),
            pairs: Vec::new(),
        }
    }
}
