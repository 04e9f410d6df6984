// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

fn u64_var(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|s| s.parse::<u64>().ok())
}

/// Run loop interval override (`BELT_TICK_MS`)
pub fn tick_ms() -> Option<u64> {
    u64_var("BELT_TICK_MS")
}

/// Visual deferral override (`BELT_RENDER_DELAY_MS`)
pub fn render_delay_ms() -> Option<u64> {
    u64_var("BELT_RENDER_DELAY_MS")
}

/// Auto-advance override (`BELT_AUTO_ADVANCE=1|true|0|false`)
pub fn auto_advance() -> Option<bool> {
    match std::env::var("BELT_AUTO_ADVANCE").ok()?.to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
