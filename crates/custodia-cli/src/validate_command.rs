use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde_json::json;

use custodia_domain::{validate_record, InputRecord};

use crate::logging::{log_error, LogContext, UNKNOWN_ORDER};

pub(super) fn cmd_validate(exe: &str, args: &[String]) -> ExitCode {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        super::print_validate_help(exe);
        return ExitCode::from(super::EXIT_OK);
    }

    let record_path = match parse_validate_args(args) {
        Ok(p) => p,
        Err(msg) => return super::exit_usage(exe, &msg, super::print_validate_help),
    };
    if let Err(msg) = super::ensure_file_exists(&record_path, "record") {
        return super::exit_usage(exe, &msg, super::print_validate_help);
    }

    let record = match load_record(&record_path) {
        Ok(r) => r,
        Err(detail) => {
            log_error(
                LogContext::new(UNKNOWN_ORDER),
                "record_unreadable",
                "RECORD_PARSE_ERROR",
                Some(&detail),
            );
            return ExitCode::from(super::EXIT_FATAL);
        }
    };

    let ctx = LogContext::new(&record.custodian.order_number);
    match validate_record(&record) {
        Ok(()) => {
            println!("{}", json!({ "ok": true, "files": record.files.len() }));
            ExitCode::from(super::EXIT_OK)
        }
        Err(err) => {
            log_error(ctx, "record_invalid", err.as_str(), Some(err.message()));
            println!(
                "{}",
                json!({ "ok": false, "code": err.as_str(), "message": err.message() })
            );
            ExitCode::from(super::EXIT_VALIDATION)
        }
    }
}

fn parse_validate_args(args: &[String]) -> Result<PathBuf, String> {
    let mut record = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--record" => {
                i += 1;
                record = Some(super::require_value(args, i, "--record")?);
            }
            unknown if unknown.starts_with("--") => {
                return Err(format!("unknown flag: {unknown}"));
            }
            other => {
                return Err(format!("unexpected argument: {other}"));
            }
        }
        i += 1;
    }

    record.ok_or_else(|| "missing required flag: --record".to_string())
}

pub(super) fn load_record(path: &Path) -> Result<InputRecord, String> {
    let raw = std::fs::read_to_string(path).map_err(|e| format!("record unreadable: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("record is not a valid input record: {e}"))
}
