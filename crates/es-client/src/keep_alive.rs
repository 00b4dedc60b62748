use std::fmt;
use std::time::Duration;

/// How long the store keeps a scroll cursor alive between fetches.
///
/// Renders in the store's time-unit syntax using the largest whole unit,
/// e.g. `90s`, `1m`, `2h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAlive(Duration);

impl KeepAlive {
    pub const fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl Default for KeepAlive {
    fn default() -> Self {
        Self::from_secs(60)
    }
}

impl fmt::Display for KeepAlive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        if secs != 0 && secs % 3600 == 0 {
            write!(f, "{}h", secs / 3600)
        } else if secs != 0 && secs % 60 == 0 {
            write!(f, "{}m", secs / 60)
        } else {
            write!(f, "{secs}s")
        }
    }
}
