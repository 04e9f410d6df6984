// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable labels for elapsed and remaining time.

const SECOND_MS: u64 = 1_000;
const MINUTE_MS: u64 = 60 * SECOND_MS;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;
const WEEK_MS: u64 = 7 * DAY_MS;
const MONTH_MS: u64 = 30 * DAY_MS;
const YEAR_MS: u64 = 365 * DAY_MS;

/// Below this magnitude the long form reads "just now".
const JUST_NOW_MS: u64 = 30 * SECOND_MS;

/// Long-form units, coarsest first: (threshold, unit size, name).
const LONG_UNITS: [(u64, u64, &str); 6] = [
    (YEAR_MS, YEAR_MS, "year"),
    (MONTH_MS, MONTH_MS, "month"),
    (WEEK_MS, WEEK_MS, "week"),
    (DAY_MS, DAY_MS, "day"),
    (HOUR_MS, HOUR_MS, "hour"),
    (JUST_NOW_MS, MINUTE_MS, "minute"),
];

const SHORT_UNITS: [(u64, &str); 5] = [
    (WEEK_MS, "w"),
    (DAY_MS, "d"),
    (HOUR_MS, "h"),
    (MINUTE_MS, "m"),
    (SECOND_MS, "s"),
];

/// Round-to-nearest division, halves rounding up.
fn div_round(value: u64, unit: u64) -> u64 {
    let whole = value / unit;
    if (value % unit) * 2 >= unit {
        whole + 1
    } else {
        whole
    }
}

/// Relative label for a signed interval `delta_ms = now - then`.
///
/// Positive deltas lie in the past ("5 days ago"), negative ones in the
/// future ("in 3 hours"). Anything under 30 seconds either way is
/// "just now".
pub fn relative_label(delta_ms: i64) -> String {
    let magnitude = delta_ms.unsigned_abs();
    let Some((count, name)) = LONG_UNITS
        .iter()
        .find(|(threshold, _, _)| magnitude >= *threshold)
        .map(|(_, size, name)| (div_round(magnitude, *size), *name))
    else {
        return "just now".to_string();
    };
    let plural = if count == 1 { "" } else { "s" };
    if delta_ms >= 0 {
        format!("{count} {name}{plural} ago")
    } else {
        format!("in {count} {name}{plural}")
    }
}

/// Compact label for a remaining duration: `3w`, `5d`, `2h`, `12m`, `40s`,
/// or `now` below one second.
pub fn short_remaining_label(duration_ms: u64) -> String {
    SHORT_UNITS
        .iter()
        .find(|(size, _)| duration_ms >= *size)
        .map(|(size, suffix)| format!("{}{suffix}", div_round(duration_ms, *size)))
        .unwrap_or_else(|| "now".to_string())
}

/// [`relative_label`] for the interval from `then` to `now`.
///
/// Both readings are epoch milliseconds; the signed difference is taken
/// without wrapping and saturates at the `i64` range.
pub fn relative_label_between(now: u64, then: u64) -> String {
    let delta = i128::from(now) - i128::from(then);
    let delta = i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX });
    relative_label(delta)
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
