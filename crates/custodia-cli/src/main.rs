use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod logging;
mod run_command;
mod validate_command;

const EXIT_OK: u8 = 0;
const EXIT_FATAL: u8 = 1;
const EXIT_VALIDATION: u8 = 2;
const EXIT_USAGE: u8 = 3;

fn main() -> ExitCode {
    let mut args = std::env::args().collect::<Vec<String>>();
    let exe = args
        .first()
        .cloned()
        .unwrap_or_else(|| "custodia".to_string());
    args.remove(0);

    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        print_root_help(&exe);
        return ExitCode::from(EXIT_OK);
    }

    match args[0].as_str() {
        "run" => run_command::cmd_run(&exe, &args[1..]),
        "validate" => validate_command::cmd_validate(&exe, &args[1..]),
        _ => {
            eprintln!("error: unknown command");
            eprintln!();
            print_root_help(&exe);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn exit_usage(exe: &str, message: &str, help: fn(&str)) -> ExitCode {
    eprintln!("error: {message}");
    eprintln!();
    help(exe);
    ExitCode::from(EXIT_USAGE)
}

fn require_value(args: &[String], i: usize, flag: &'static str) -> Result<PathBuf, String> {
    let value = args
        .get(i)
        .ok_or_else(|| format!("missing value for {flag}"))?;
    if value.starts_with("--") {
        return Err(format!("missing value for {flag}"));
    }
    Ok(PathBuf::from(value))
}

fn parse_bool_flag(flag: &str, value: &str) -> Result<bool, String> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("{flag} must be 'true' or 'false'")),
    }
}

fn ensure_file_exists(path: &Path, kind: &str) -> Result<(), String> {
    let meta = std::fs::metadata(path)
        .map_err(|_| format!("{kind} path does not exist or is not accessible"))?;
    if !meta.is_file() {
        return Err(format!("{kind} path must be a file"));
    }
    Ok(())
}

fn print_root_help(exe: &str) {
    println!("Custodia (aquisição certificada de evidência digital)");
    println!();
    println!("USAGE:");
    println!("  {exe} <COMMAND> [FLAGS]");
    println!();
    println!("COMMANDS:");
    println!("  run        Acquire files into an evidence bundle and emit the certificate");
    println!("  validate   Check an input record without starting a run");
    println!();
    println!("Run '{exe} <COMMAND> --help' for command-specific help.");
}

fn print_run_help(exe: &str) {
    println!("USAGE:");
    println!("  {exe} run --record <PATH> --output <PATH> [FLAGS]");
    println!();
    println!("REQUIRED:");
    println!("  --record <PATH>    Input record (JSON: custodian, owner, files)");
    println!("  --output <PATH>    Directory the evidence bundle is created under");
    println!();
    println!("OPTIONAL:");
    println!("  --crest <PATH>           JPEG coat of arms for the certificate header");
    println!("  --reveal true|false      Open the bundle folder on success (default: false)");
}

fn print_validate_help(exe: &str) {
    println!("USAGE:");
    println!("  {exe} validate --record <PATH>");
    println!();
    println!("REQUIRED:");
    println!("  --record <PATH>    Input record (JSON: custodian, owner, files)");
}
