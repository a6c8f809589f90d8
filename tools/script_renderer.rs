/// Script Renderer: converts an exported dialogue database into a script.
///
/// Usage: script_renderer <database.json> [--style <style.ron>] [--output <file>]
///        [--conversation <n>]

use dialogue_script::{DialogueDatabase, ScriptDocument, ScriptStyle};
use log::info;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    pretty_env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(0);
    }

    let input = PathBuf::from(&args[1]);
    let mut style_path = None;
    let mut output = None;
    let mut conversation = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--style" if i + 1 < args.len() => {
                i += 1;
                style_path = Some(PathBuf::from(&args[i]));
            }
            "--output" if i + 1 < args.len() => {
                i += 1;
                output = Some(PathBuf::from(&args[i]));
            }
            "--conversation" if i + 1 < args.len() => {
                i += 1;
                conversation = Some(args[i].parse::<usize>().unwrap_or_else(|_| {
                    eprintln!("Error: --conversation must be a positive number");
                    process::exit(1);
                }));
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let style = match style_path {
        Some(ref path) => ScriptStyle::load_from_ron(path).unwrap_or_else(|e| {
            eprintln!("Error loading style '{}': {}", path.display(), e);
            process::exit(1);
        }),
        None => ScriptStyle::default(),
    };

    println!("Reading: {}", input.display());
    let database = DialogueDatabase::load_from_json(&input).unwrap_or_else(|e| {
        eprintln!("Error reading database '{}': {}", input.display(), e);
        process::exit(1);
    });
    info!(
        "loaded {} actors, {} variables, {} conversations",
        database.actors.len(),
        database.variables.len(),
        database.conversations.len()
    );

    println!("Rendering script...");
    let document = ScriptDocument::new(&database, &style);
    let script = match conversation {
        Some(index) => match document.conversation(index) {
            Some(rendered) => rendered.to_string(),
            None => {
                eprintln!(
                    "Error: conversation {} out of range (1..={})",
                    index,
                    database.conversations.len()
                );
                process::exit(1);
            }
        },
        None => document.render(),
    };

    let output_path = output.unwrap_or_else(|| default_output(&input));
    println!("Saving: {}", output_path.display());
    if let Err(e) = std::fs::write(&output_path, &script) {
        eprintln!("Error writing '{}': {}", output_path.display(), e);
        process::exit(1);
    }

    println!("Done! Script saved to: {}", output_path.display());
    println!("{} lines", script.lines().count());
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("md")
}

fn print_usage() {
    println!(
        "Usage: script_renderer <database.json> [--style <style.ron>] [--output <file>] [--conversation <n>]"
    );
}
