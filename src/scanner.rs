use crate::args::Args;
use crate::replacer;
use anyhow::{anyhow, Result};
use ignore::WalkBuilder;
use std::path::Path;

/// Rewrite every regular file under a directory tree
///
/// Descends into all subdirectories and invokes the file rewriter on each
/// regular file with the same keyword pairs and flags. Nothing is filtered
/// by extension or content type.
///
/// # Arguments
/// * `root` - Directory to traverse
/// * `args` - Command line arguments
///
/// # Returns
/// * `Result<()>` - Result of the operation
pub fn rewrite_directory(root: &Path, args: &Args) -> Result<()> {
    // Visit everything: hidden files and ignore-listed files included.
    // Entries are sorted by path so the --log output is stable across runs.
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let mut skipped = Vec::new();

    for result in walker {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                if args.skip_errors {
                    skipped.push(err.to_string());
                    continue;
                }
                return Err(anyhow!("Error walking directory: {}", err));
            }
        };

        // Directories are only descended into; anything that is not a
        // regular file is left alone
        if !entry.file_type().map_or(false, |kind| kind.is_file()) {
            continue;
        }

        if let Err(err) = replacer::rewrite_file(entry.path(), args) {
            if args.skip_errors {
                skipped.push(format!("{:#}", err));
                continue;
            }
            return Err(err);
        }
    }

    // Report every skipped file once the walk is complete
    if !skipped.is_empty() {
        for message in &skipped {
            eprintln!("Warning: skipped: {}", message);
        }
        eprintln!("Skipped {} file(s) with errors.", skipped.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::KeywordPair;
    use std::fs;
    use tempfile::tempdir;

    fn args_with(pairs: Vec<(&str, &str)>, skip_errors: bool) -> Args {
        Args {
            pairs: pairs
                .into_iter()
                .map(|(old, new)| KeywordPair {
                    old: old.to_string(),
                    new: new.to_string(),
                })
                .collect(),
            skip_errors,
            ..Args::default()
        }
    }

    #[test]
    fn test_rewrite_directory_visits_nested_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub/deep")).unwrap();
        fs::write(dir.path().join("a.txt"), "old\n").unwrap();
        fs::write(dir.path().join("sub/b.txt"), "old old\n").unwrap();
        fs::write(dir.path().join("sub/deep/c.txt"), "keep old\n").unwrap();

        let args = args_with(vec![("old", "new")], false);
        rewrite_directory(dir.path(), &args).unwrap();

        assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "new\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("sub/b.txt")).unwrap(),
            "new new\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("sub/deep/c.txt")).unwrap(),
            "keep new\n"
        );
    }

    #[test]
    fn test_rewrite_directory_visits_hidden_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden"), "old\n").unwrap();

        let args = args_with(vec![("old", "new")], false);
        rewrite_directory(dir.path(), &args).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join(".hidden")).unwrap(),
            "new\n"
        );
    }

    #[test]
    fn test_rewrite_directory_aborts_on_undecodable_file_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blob.bin"), [0xffu8, 0xfe]).unwrap();
        fs::write(dir.path().join("good.txt"), "old\n").unwrap();

        let args = args_with(vec![("old", "new")], false);

        assert!(rewrite_directory(dir.path(), &args).is_err());
    }

    #[test]
    fn test_rewrite_directory_skip_errors_continues_past_bad_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("blob.bin"), [0xffu8, 0xfe]).unwrap();
        fs::write(dir.path().join("good.txt"), "old\n").unwrap();

        let args = args_with(vec![("old", "new")], true);
        rewrite_directory(dir.path(), &args).unwrap();

        // The good file was rewritten, the bad one was left untouched
        assert_eq!(
            fs::read_to_string(dir.path().join("good.txt")).unwrap(),
            "new\n"
        );
        assert_eq!(fs::read(dir.path().join("blob.bin")).unwrap(), vec![0xffu8, 0xfe]);
    }
}
