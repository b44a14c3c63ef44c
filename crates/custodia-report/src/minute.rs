use std::path::Path;

use custodia_domain::AcquiredFile;

use crate::stamp::RunStamp;

/// Renders the minute-of-filing text: title line, timestamp line, blank
/// line, then one numbered entry per acquired file.
pub fn minute_text(files: &[AcquiredFile], stamp: &RunStamp) -> String {
    let mut out = String::new();
    out.push_str("MINUTA DE JUNTADA\n");
    out.push_str(&format!("Data: {}\n", stamp.display_full()));
    out.push('\n');
    for (i, file) in files.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, file.file_name()));
    }
    out
}

pub fn write_minute(
    path: &Path,
    files: &[AcquiredFile],
    stamp: &RunStamp,
) -> std::io::Result<()> {
    std::fs::write(path, minute_text(files, stamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use custodia_domain::Digest32;
    use std::path::PathBuf;
    use time::macros::datetime;

    fn acquired(name: &str) -> AcquiredFile {
        AcquiredFile {
            source: PathBuf::from(format!("/src/{name}")),
            copied: PathBuf::from(format!("/bundle/Files/{name}")),
            size_bytes: 10,
            digest: Digest32::from_bytes([0; 32]),
        }
    }

    #[test]
    fn minute_format_is_exact() {
        let stamp = RunStamp::from_datetime(datetime!(2026-08-06 09:15:00 UTC));
        let files = vec![acquired("a.bin"), acquired("relatório final.pdf")];

        let text = minute_text(&files, &stamp);
        assert_eq!(
            text,
            "MINUTA DE JUNTADA\n\
             Data: 06/08/2026 09:15:00\n\
             \n\
             1. a.bin\n\
             2. relatório final.pdf\n"
        );
    }

    #[test]
    fn empty_list_still_produces_header() {
        let stamp = RunStamp::from_datetime(datetime!(2026-01-01 00:00:00 UTC));
        let text = minute_text(&[], &stamp);
        assert!(text.ends_with("00:00:00\n\n"));
    }
}
