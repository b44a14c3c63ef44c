use core::fmt;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc;

use custodia_domain::{validate_record, AcquiredFile, InputRecord};
use custodia_evidence::{copy_into, prepare_bundle, BundleError, CopyError, EvidenceBundle};
use custodia_hash::{hash_files, HashError};
use custodia_layout::CrestImage;
use custodia_report::{
    write_artifacts, CertificateArtifacts, CertificateInput, ComposeError, RunStamp,
};

use crate::logging::{log_error, log_info, log_status, log_warn, LogContext, UNKNOWN_ORDER};

#[derive(Debug)]
struct RunArgs {
    record: PathBuf,
    output: PathBuf,
    crest: Option<PathBuf>,
    reveal: bool,
}

/// Events the background worker delivers to the presentation side.
/// Sending is fire-and-forget; a disappeared observer never blocks the
/// worker.
enum ProgressEvent {
    Status(&'static str),
    Percent(u8),
}

struct RunOutcome {
    bundle: EvidenceBundle,
    artifacts: CertificateArtifacts,
    files_acquired: usize,
}

enum RunFailure {
    Bundle(BundleError),
    Copy(CopyError),
    Hash(HashError),
    FileMeta { path: PathBuf, source: std::io::Error },
    Compose(ComposeError),
}

impl RunFailure {
    const fn code(&self) -> &'static str {
        match self {
            Self::Bundle(_) => "BUNDLE_CREATE_FAILED",
            Self::Copy(_) => "EVIDENCE_COPY_FAILED",
            Self::Hash(_) => "HASH_FAILED",
            Self::FileMeta { .. } => "EVIDENCE_STAT_FAILED",
            Self::Compose(_) => "CERTIFICATE_WRITE_FAILED",
        }
    }
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundle(e) => fmt::Display::fmt(e, f),
            Self::Copy(e) => fmt::Display::fmt(e, f),
            Self::Hash(e) => fmt::Display::fmt(e, f),
            Self::FileMeta { path, source } => {
                write!(f, "could not stat {}: {}", path.display(), source)
            }
            Self::Compose(e) => fmt::Display::fmt(e, f),
        }
    }
}

pub(super) fn cmd_run(exe: &str, args: &[String]) -> ExitCode {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        super::print_run_help(exe);
        return ExitCode::from(super::EXIT_OK);
    }

    let parsed = match parse_run_args(args) {
        Ok(p) => p,
        Err(msg) => return super::exit_usage(exe, &msg, super::print_run_help),
    };
    if let Err(msg) = super::ensure_file_exists(&parsed.record, "record") {
        return super::exit_usage(exe, &msg, super::print_run_help);
    }
    if let Some(crest) = &parsed.crest {
        if let Err(msg) = super::ensure_file_exists(crest, "crest") {
            return super::exit_usage(exe, &msg, super::print_run_help);
        }
    }

    let record = match super::validate_command::load_record(&parsed.record) {
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

    let order = record.custodian.order_number.clone();
    let ctx = LogContext::new(&order);

    if let Err(err) = validate_record(&record) {
        log_error(ctx, "record_invalid", err.as_str(), Some(err.message()));
        return ExitCode::from(super::EXIT_VALIDATION);
    }

    // The crest is decorative: anything unreadable or non-JPEG downgrades
    // to a certificate without it.
    let crest = parsed.crest.as_ref().and_then(|path| {
        let loaded = std::fs::read(path).ok().and_then(CrestImage::from_jpeg);
        if loaded.is_none() {
            log_warn(
                ctx,
                "crest_skipped",
                "CREST_UNUSABLE",
                "crest is not a readable JPEG; continuing without it",
            );
        }
        loaded
    });

    let mut counters = BTreeMap::<&str, u64>::new();
    counters.insert("files_selected", record.files.len() as u64);
    log_info(ctx, "run_started", Some(counters));

    // One background worker performs the whole pipeline; this thread only
    // drains progress events. At most one run is ever in flight.
    let (tx, rx) = mpsc::channel::<ProgressEvent>();
    let worker_record = record.clone();
    let output_root = parsed.output.clone();
    let handle = std::thread::spawn(move || {
        let result = run_pipeline(&worker_record, &output_root, crest.as_ref(), &tx);
        if result.is_ok() {
            let _ = tx.send(ProgressEvent::Status("done"));
        }
        result
    });

    let mut last_percent = None;
    for event in rx {
        match event {
            ProgressEvent::Status(status) => log_status(ctx, status),
            ProgressEvent::Percent(percent) => {
                if last_percent != Some(percent) {
                    let mut counters = BTreeMap::<&str, u64>::new();
                    counters.insert("percent", u64::from(percent));
                    log_info(ctx, "hash_progress", Some(counters));
                    last_percent = Some(percent);
                }
            }
        }
    }

    let outcome = match handle.join() {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(failure)) => {
            log_status(ctx, &format!("error: {failure}"));
            log_error(ctx, "run_failed", failure.code(), Some(&failure.to_string()));
            return ExitCode::from(super::EXIT_FATAL);
        }
        Err(_) => {
            log_error(ctx, "run_worker_panicked", "INTERNAL_ERROR", None);
            return ExitCode::from(super::EXIT_FATAL);
        }
    };

    let mut counters = BTreeMap::<&str, u64>::new();
    counters.insert("files_acquired", outcome.files_acquired as u64);
    log_info(ctx, "run_completed", Some(counters));
    println!("{}", outcome.artifacts.certificate.display());
    println!("{}", outcome.artifacts.minute.display());

    if parsed.reveal {
        reveal_folder(ctx, &outcome.bundle.base);
    }

    ExitCode::from(super::EXIT_OK)
}

/// validate → prepare bundle → copy → hash → render. Strictly sequential;
/// the first failing step aborts and already-produced side effects stay
/// on disk.
fn run_pipeline(
    record: &InputRecord,
    output_root: &Path,
    crest: Option<&CrestImage>,
    tx: &mpsc::Sender<ProgressEvent>,
) -> Result<RunOutcome, RunFailure> {
    let bundle = prepare_bundle(output_root, &record.custodian.order_number)
        .map_err(RunFailure::Bundle)?;

    let copied = copy_into(&bundle, &record.files).map_err(RunFailure::Copy)?;

    let _ = tx.send(ProgressEvent::Status("hashing"));
    let digests = hash_files(&copied, |percent| {
        let _ = tx.send(ProgressEvent::Percent(percent));
    })
    .map_err(RunFailure::Hash)?;

    let mut files = Vec::with_capacity(copied.len());
    for (source, copied_path) in record.files.iter().zip(&copied) {
        let size_bytes = std::fs::metadata(copied_path)
            .map_err(|e| RunFailure::FileMeta {
                path: copied_path.clone(),
                source: e,
            })?
            .len();
        // The digest map is keyed by the copied path; every copied path
        // was hashed, so the lookup is total.
        let digest = digests[copied_path];
        files.push(AcquiredFile {
            source: source.clone(),
            copied: copied_path.clone(),
            size_bytes,
            digest,
        });
    }

    let _ = tx.send(ProgressEvent::Status("rendering"));
    let stamp = RunStamp::now();
    let input = CertificateInput {
        custodian: &record.custodian,
        owner: &record.owner,
        files: &files,
        stamp: &stamp,
    };
    let artifacts =
        write_artifacts(&input, crest, &bundle.certificates_dir).map_err(RunFailure::Compose)?;

    Ok(RunOutcome {
        bundle,
        artifacts,
        files_acquired: files.len(),
    })
}

fn parse_run_args(args: &[String]) -> Result<RunArgs, String> {
    let mut record = None;
    let mut output = None;
    let mut crest = None;
    let mut reveal = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--record" => {
                i += 1;
                record = Some(super::require_value(args, i, "--record")?);
            }
            "--output" => {
                i += 1;
                output = Some(super::require_value(args, i, "--output")?);
            }
            "--crest" => {
                i += 1;
                crest = Some(super::require_value(args, i, "--crest")?);
            }
            "--reveal" => {
                i += 1;
                let raw = super::require_value(args, i, "--reveal")?;
                let raw = raw
                    .to_str()
                    .ok_or_else(|| "--reveal must be 'true' or 'false'".to_string())?;
                reveal = super::parse_bool_flag("--reveal", raw)?;
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

    Ok(RunArgs {
        record: record.ok_or_else(|| "missing required flag: --record".to_string())?,
        output: output.ok_or_else(|| "missing required flag: --output".to_string())?,
        crest,
        reveal,
    })
}

/// Asks the host file manager to open the bundle folder. Failures are
/// logged and ignored; the run already succeeded.
fn reveal_folder(ctx: LogContext<'_>, path: &Path) {
    let command = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    if std::process::Command::new(command).arg(path).spawn().is_err() {
        log_warn(
            ctx,
            "reveal_folder_failed",
            "REVEAL_UNAVAILABLE",
            "could not open the bundle folder in the host file manager",
        );
    }
}
