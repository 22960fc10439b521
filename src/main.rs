use cpmaker::codepage::SERIALIZED_LEN;
use cpmaker::{parse_best_fit, parse_plain, LookupTables};
use std::env;
use std::fs;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <mapping-file> [--plain <codepage>] [--output <file>]",
            args[0]
        );
        eprintln!();
        eprintln!("Reads a WindowsBestFit mapping file (or, with --plain <codepage>, a");
        eprintln!("plain two-column mapping file) and writes the binary lookup table.");
        std::process::exit(1);
    }

    let mapping_path = &args[1];
    let mut plain_codepage: Option<u32> = None;
    let mut output_path: Option<String> = None;

    // Parse --plain argument
    if let Some(idx) = args.iter().position(|arg| arg == "--plain") {
        match args.get(idx + 1).map(|s| s.parse::<u32>()) {
            Some(Ok(cp)) => plain_codepage = Some(cp),
            _ => {
                eprintln!("ERROR: --plain requires a decimal code page number.");
                std::process::exit(1);
            }
        }
    }

    // Parse --output argument
    if let Some(idx) = args.iter().position(|arg| arg == "--output") {
        match args.get(idx + 1) {
            Some(path) => output_path = Some(path.clone()),
            None => {
                eprintln!("ERROR: --output flag requires an argument.");
                std::process::exit(1);
            }
        }
    }

    println!("Reading mapping file: {}", mapping_path);

    let input = match fs::read_to_string(mapping_path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("\nERROR: Failed to read mapping file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let tables: LookupTables = match plain_codepage {
        Some(cp) => parse_plain(&input, cp),
        None => match parse_best_fit(&input) {
            Ok(tables) => tables,
            Err(e) => {
                eprintln!("\nERROR: Failed to parse mapping file");
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        },
    };

    let output_path =
        output_path.unwrap_or_else(|| format!("LookupTableCP{}.bin", tables.codepage()));

    let bytes = tables.to_bytes();
    if let Err(e) = fs::write(&output_path, &bytes) {
        eprintln!("\nERROR: Failed to write {}", output_path);
        eprintln!("  {}", e);
        std::process::exit(1);
    }

    println!("\n{}", "=".repeat(60));
    println!("SUCCESS! Table generation completed.");
    println!("{}", "=".repeat(60));
    println!("\nArtifact:");
    println!("  Code page: {}", tables.codepage());
    println!("  Output: {}", output_path);
    println!(
        "  Size: {} bytes ({} 16-bit entries)",
        bytes.len(),
        SERIALIZED_LEN / 2
    );
}
