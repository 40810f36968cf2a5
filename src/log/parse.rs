use crate::log::row::OperationLog;
use anyhow::Context;
use regex::Regex;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read the whole log into memory, from `path` if given, else from stdin.
///
/// Invalid UTF-8 is replaced rather than rejected; the parser only cares about
/// lines that match its pattern.
pub fn read_log_input(path: Option<&Path>) -> anyhow::Result<String> {
    let bytes = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("cannot read input file {}", path.display()))?
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut buf)
                .context("cannot read input from stdin")?;
            buf
        }
    };

    tracing::debug!(
        source = %path.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string()),
        bytes = bytes.len(),
        "read log input"
    );

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse WIC log text into an operation->durations index.
///
/// Recognized lines contain:
/// Completed: <operation> in <duration>ms
///
/// Example:
/// [12:00:01] INFO Completed: enumerate windows in 12.5ms
///
/// Everything else is noise and is ignored. A duration that is not a finite
/// number (e.g. "1.2.3") drops that line only, as does one that would push
/// the total of all kept durations past `f64::MAX`.
pub fn parse_log_text(text: &str) -> anyhow::Result<OperationLog> {
    // Capture:
    // 1) operation name: shortest run before " in "
    // 2) duration: digits and dots, validated by f64 parsing below
    let re = Regex::new(r"Completed: (.*?) in ([0-9.]+)ms")?;

    let mut out = OperationLog::new();
    let mut records = 0usize;
    let mut total_ms = 0.0f64;
    for (lineno, line) in text.lines().enumerate() {
        let Some(caps) = re.captures(line) else {
            continue;
        };

        let op_name = &caps[1];
        let raw_ms = &caps[2];
        let time_ms = match raw_ms.parse::<f64>() {
            Ok(ms) if ms.is_finite() => ms,
            _ => {
                tracing::debug!(
                    line = lineno + 1,
                    operation = op_name,
                    duration = raw_ms,
                    "skipping line with unparseable duration"
                );
                continue;
            }
        };

        if !(total_ms + time_ms).is_finite() {
            tracing::warn!(
                line = lineno + 1,
                operation = op_name,
                "skipping duration that overflows the log total"
            );
            continue;
        }
        total_ms += time_ms;

        out.entry(op_name.to_string()).or_default().push(time_ms);
        records += 1;
    }

    tracing::debug!(records, operations = out.len(), "parsed log");
    Ok(out)
}
