use std::collections::BTreeMap;

use serde_json::json;

pub(super) const UNKNOWN_ORDER: &str = "unknown";

/// Context attached to every log line: the order number the run is keyed
/// on, or "unknown" before the record has been read.
#[derive(Clone, Copy)]
pub(super) struct LogContext<'a> {
    order: &'a str,
}

impl<'a> LogContext<'a> {
    pub(super) fn new(order: &'a str) -> Self {
        Self { order }
    }
}

fn emit(value: serde_json::Value) {
    eprintln!("{value}");
}

pub(super) fn log_info(ctx: LogContext<'_>, event: &str, counters: Option<BTreeMap<&str, u64>>) {
    let mut line = json!({
        "level": "INFO",
        "event": event,
        "order": ctx.order,
    });
    if let Some(counters) = counters {
        line["counters"] = json!(counters);
    }
    emit(line);
}

/// Phase boundary notifications: "hashing", "rendering", "done",
/// "error: ...".
pub(super) fn log_status(ctx: LogContext<'_>, status: &str) {
    emit(json!({
        "level": "INFO",
        "event": "status",
        "order": ctx.order,
        "status": status,
    }));
}

pub(super) fn log_warn(ctx: LogContext<'_>, event: &str, code: &str, detail: &str) {
    emit(json!({
        "level": "WARN",
        "event": event,
        "order": ctx.order,
        "code": code,
        "detail": detail,
    }));
}

pub(super) fn log_error(ctx: LogContext<'_>, event: &str, code: &str, detail: Option<&str>) {
    let mut line = json!({
        "level": "ERROR",
        "event": event,
        "order": ctx.order,
        "code": code,
    });
    if let Some(detail) = detail {
        line["detail"] = json!(detail);
    }
    emit(line);
}
