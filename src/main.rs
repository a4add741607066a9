//! CLI tool to lint and auto-fix Puppet manifest files.

use std::fs;
use std::process::ExitCode;

use puppetlint_rs::{Linter, checks};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: puppetlint <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  check     Lint manifest(s) and report problems");
        eprintln!("  fix       Lint manifest(s) and repair them in place");
        eprintln!("  checks    List available check ids");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  puppetlint check manifests/init.pp");
        eprintln!("  puppetlint fix manifests/init.pp");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if command == "checks" {
        for id in checks::ids() {
            println!("{id}");
        }
        return ExitCode::SUCCESS;
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let fix = match command {
        "check" => false,
        "fix" => true,
        _ => {
            eprintln!("Unknown command: {command}");
            return ExitCode::from(2);
        }
    };

    let linter = Linter::new();
    let mut had_problem = false;
    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let outcome = linter.run(&content, fix);

        for problem in &outcome.problems {
            let state = if problem.fixed { "fixed: " } else { "" };
            println!(
                "{path}:{line}:{column}: {state}{severity}: {message} ({check})",
                line = problem.line,
                column = problem.column,
                severity = problem.severity,
                message = problem.message,
                check = problem.check,
            );
        }

        if outcome.has_unfixed() {
            had_problem = true;
        }

        if fix && outcome.output != content {
            if let Err(e) = fs::write(path, &outcome.output) {
                eprintln!("{path}: {e}");
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::from(2)
    } else if had_problem {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
