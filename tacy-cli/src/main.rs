//! tacy CLI: load, check and execute three-address-code programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Console I/O failure
//! - 3: Program file missing or malformed
//! - 5: Semantic error
//! - 10-15, 20: Runtime errors (see `tacy_vm::RuntimeError::exit_code`)
//! - 20: Missing program argument

mod commands;

use std::process;

/// Exit code for a missing program argument.
const USAGE_EXIT_CODE: i32 = 20;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(USAGE_EXIT_CODE);
    }

    let result = match args[1].as_str() {
        "--check" => commands::check(&args[2..]),
        "--dump" => commands::dump(&args[2..]),
        "--help" | "-h" => {
            print_usage();
            process::exit(0);
        }
        path => commands::run(path),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Install a stderr subscriber when `RUST_LOG` is set; otherwise log nothing.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

pub(crate) fn print_usage() {
    eprintln!("Usage: tacy <program.xml>");
    eprintln!("       tacy --check <program.xml>");
    eprintln!("       tacy --dump <program.xml>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --check   Load and validate the program without running it");
    eprintln!("  --dump    Print the program as a text listing");
    eprintln!("  -h, --help  Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=tacy_vm=trace) for diagnostics on stderr.");
}
