//! CLI command implementations.

use tacy_common::Program;

use crate::{print_usage, USAGE_EXIT_CODE};

/// Load a program file, reporting failures as exit codes.
fn load(path: &str) -> Result<Program, i32> {
    tacy_loader::load_file(path).map_err(|e| {
        eprintln!("error: {e}");
        e.exit_code()
    })
}

/// First argument of a subcommand, or a usage error.
fn required_path<'a>(args: &'a [String], flag: &str) -> Result<&'a str, i32> {
    match args.first() {
        Some(path) => Ok(path),
        None => {
            eprintln!("error: {flag} requires a program file");
            print_usage();
            Err(USAGE_EXIT_CODE)
        }
    }
}

/// Load, validate and execute a program against stdin/stdout.
pub fn run(path: &str) -> Result<(), i32> {
    let program = load(path)?;

    tacy_vm::run(&program).map_err(|e| {
        eprintln!("error: {e}");
        e.exit_code()
    })
}

/// Load and validate a program without executing it.
pub fn check(args: &[String]) -> Result<(), i32> {
    let path = required_path(args, "--check")?;
    let program = load(path)?;

    match tacy_verifier::verify(&program) {
        Ok(labels) => {
            println!(
                "OK: {path} ({} instructions, {} labels)",
                program.len(),
                labels.len()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("error: {e}");
            Err(e.exit_code())
        }
    }
}

/// Print a program as a text listing.
pub fn dump(args: &[String]) -> Result<(), i32> {
    let path = required_path(args, "--dump")?;
    let program = load(path)?;
    print!("{}", tacy_loader::disassemble(&program));
    Ok(())
}
