use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

const SHORT: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]");
const FULL: &[FormatItem<'static>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");
const SUFFIX: &[FormatItem<'static>] =
    format_description!("[year][month][day]_[hour][minute][second]");

/// The moment a run was started. Captured once per run so the
/// certificate, the minute and the artifact names all agree; injectable
/// for deterministic rendering under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStamp(OffsetDateTime);

impl RunStamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()))
    }

    pub const fn from_datetime(moment: OffsetDateTime) -> Self {
        Self(moment)
    }

    /// "DD/MM/YYYY HH:MM" — declaration text and footer.
    pub fn display_short(&self) -> String {
        // Safety: the format descriptions are static and total.
        self.0.format(SHORT).expect("valid timestamp format")
    }

    /// "DD/MM/YYYY HH:MM:SS" — custodian block and minute of filing.
    pub fn display_full(&self) -> String {
        self.0.format(FULL).expect("valid timestamp format")
    }

    /// "YYYYMMDD_HHMMSS" — artifact file names.
    pub fn file_suffix(&self) -> String {
        self.0.format(SUFFIX).expect("valid timestamp format")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn fixed_stamp_formats() {
        let stamp = RunStamp::from_datetime(datetime!(2026-08-06 14:30:05 UTC));
        assert_eq!(stamp.display_short(), "06/08/2026 14:30");
        assert_eq!(stamp.display_full(), "06/08/2026 14:30:05");
        assert_eq!(stamp.file_suffix(), "20260806_143005");
    }
}
