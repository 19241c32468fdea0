mod args;
mod replacer;
mod scanner;

use anyhow::Result;
use std::process;

/// Main entry point of the application
/// Handles argument parsing and executes the program with error handling
fn main() {
    // Parse command line arguments
    let args = match args::parse() {
        Ok(args) => args,
        Err(e) => {
            println!("Error: {}", e);
            process::exit(1);
        }
    };

    // Execute the program
    if let Err(e) = run(&args) {
        println!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Runs the main functionality based on the provided arguments
///
/// # Arguments
/// * `args` - Parsed command line arguments
fn run(args: &args::Args) -> Result<()> {
    // Execute appropriate action based on the target mode
    match args.mode {
        args::Mode::File => {
            // Rewrite a single file
            replacer::rewrite_file(&args.path, args)?;
        }
        args::Mode::Directory => {
            // Rewrite every file under the directory
            scanner::rewrite_directory(&args.path, args)?;
        }
    }

    Ok(())
}
