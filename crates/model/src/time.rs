use std::time::{SystemTime, UNIX_EPOCH};

/// Largest timestamp with at most ten decimal digits. Anything above is
/// assumed to be expressed in milliseconds rather than seconds.
pub const MAX_SECONDS_TIMESTAMP: u64 = 9_999_999_999;

pub fn now_in_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}

/// Whether the timestamp looks like seconds since the unix epoch.
pub fn is_in_seconds(timestamp: u64) -> bool {
    timestamp <= MAX_SECONDS_TIMESTAMP
}
