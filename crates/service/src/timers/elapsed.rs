use serde::Serialize;

pub const NEVER_CLICKED: &str = "Never clicked yet.";

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Hours are unbounded; minutes and seconds fall in `0..60` for non-negative input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedParts {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl ElapsedParts {
    /// Floor-divide into each unit, then take the remainder of the minute and
    /// second counts. A negative span yields negative components.
    pub fn from_millis(elapsed_ms: i64) -> Self {
        Self {
            hours: elapsed_ms.div_euclid(MS_PER_HOUR),
            minutes: elapsed_ms.div_euclid(MS_PER_MINUTE) % 60,
            seconds: elapsed_ms.div_euclid(MS_PER_SECOND) % 60,
        }
    }
}

impl std::fmt::Display for ElapsedParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h {}m {}s since last click.", self.hours, self.minutes, self.seconds)
    }
}

/// Response body of an elapsed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElapsedView {
    pub elapsed_text: String,
    pub timestamp: Option<i64>,
}

impl ElapsedView {
    pub fn never_clicked() -> Self {
        Self { elapsed_text: NEVER_CLICKED.to_string(), timestamp: None }
    }

    pub fn since(timestamp: i64, now_ms: i64) -> Self {
        let parts = ElapsedParts::from_millis(now_ms.saturating_sub(timestamp));
        Self { elapsed_text: parts.to_string(), timestamp: Some(timestamp) }
    }
}
