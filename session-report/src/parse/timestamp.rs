//! Timestamp normalization
//!
//! LTTng prints wall-clock time as `[seconds.nanoseconds]`. Output events
//! carry microseconds, either relative to system boot or, when no trusted
//! boot time is known, folded to the low six digits of the seconds part.

use crate::domain::{ParseError, Timestamp};

const MICROS_PER_SEC: u64 = 1_000_000;
const FRACTION_DIGITS: usize = 6;

/// Converts raw timestamp tokens to [`Timestamp`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    boot_time: Option<u64>,
}

impl Clock {
    /// `boot_time` is the system boot time in epoch seconds, only passed
    /// when the trace was recorded on this machine.
    pub fn new(boot_time: Option<u64>) -> Self {
        Self { boot_time }
    }

    /// Parse `[sec.frac]` into microseconds.
    ///
    /// The fraction is truncated (or zero-padded) to six digits.
    pub fn normalize(&self, raw: &str) -> Result<Timestamp, ParseError> {
        let bad = || ParseError::BadTimestamp(raw.to_string());

        let inner = raw
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .ok_or_else(bad)?;
        let (sec, frac) = inner.split_once('.').ok_or_else(bad)?;
        if sec.is_empty() || frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let sec: u64 = sec.parse().map_err(|_| bad())?;
        let micros = fraction_micros(frac);

        let whole = match self.boot_time {
            Some(boot) if boot <= sec => sec - boot,
            _ => sec % MICROS_PER_SEC,
        };
        whole
            .checked_mul(MICROS_PER_SEC)
            .and_then(|us| us.checked_add(micros))
            .map(Timestamp)
            .ok_or_else(bad)
    }
}

fn fraction_micros(frac: &str) -> u64 {
    let digits = &frac[..frac.len().min(FRACTION_DIGITS)];
    let value: u64 = digits.parse().unwrap_or(0);
    let missing = u32::try_from(FRACTION_DIGITS - digits.len()).unwrap_or(0);
    value * 10u64.pow(missing)
}
