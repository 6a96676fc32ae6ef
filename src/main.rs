use std::{env, fs, io, process};

use kula::{
    bytecode::{self, CompiledUnit, fingerprint, listing},
    runtime::VM,
};

fn main() {
    let mut args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|arg| arg == "--verbose");
    let trace = args.iter().any(|arg| arg == "--trace");
    let json = args.iter().any(|arg| arg == "--json");
    if verbose {
        args.retain(|arg| arg != "--verbose");
    }
    if trace {
        args.retain(|arg| arg != "--trace");
    }
    if json {
        args.retain(|arg| arg != "--json");
    }

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => print_help(),
        "run" | "-r" | "--run" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: kula run <file.kulac>");
                process::exit(1);
            };
            run_file(path, verbose, trace);
        }
        "show" | "-s" | "--show" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: kula show <file.kulac>");
                process::exit(1);
            };
            show_file(path, json);
        }
        other => {
            eprintln!("Error: unknown command `{}`", other);
            print_help();
            process::exit(1);
        }
    }
}

fn print_help() {
    println!(
        "\
Kula VM

Usage:
  kula run <file.kulac>
  kula show <file.kulac>

Commands:
  run, -r, --run     Execute a compiled unit
  show, -s, --show   Print the symbols, literals and instructions of a unit

Flags:
  --trace            Print VM instruction trace (run)
  --verbose          Print a load summary to stderr (run)
  --json             Print the unit as JSON (show)
  -h, --help         Show this help message
"
    );
}

fn read_artifact(path: &str) -> (Vec<u8>, CompiledUnit) {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Error reading {}: {}", path, err);
            process::exit(1);
        }
    };
    match bytecode::load_bytes(&bytes) {
        Ok(unit) => (bytes, unit),
        Err(err) => {
            eprintln!("Error loading {}: {}", path, err);
            process::exit(1);
        }
    }
}

fn run_file(path: &str, verbose: bool, trace: bool) {
    let (_, unit) = read_artifact(path);
    if verbose {
        eprintln!("loaded {}: {}", path, listing::summary(&unit));
    }

    let mut vm = VM::new(unit);
    vm.set_trace(trace);
    if let Err(err) = vm.run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn show_file(path: &str, json: bool) {
    let (bytes, unit) = read_artifact(path);

    if json {
        let stdout = io::stdout();
        if let Err(err) = serde_json::to_writer_pretty(stdout.lock(), &unit) {
            eprintln!("Error writing JSON: {}", err);
            process::exit(1);
        }
        println!();
        return;
    }

    println!("sha256 {}", fingerprint::sha256_hex(&bytes));
    println!();
    print!("{}", listing::render(&unit));
}
