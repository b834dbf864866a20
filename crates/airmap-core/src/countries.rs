// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

/// Human-readable name for the handful of codes we have names for.
/// Everything else is shown as the raw code.
pub fn display_name(code: &str) -> &str {
    match code {
        "PL" => "Poland",
        "US" => "United States",
        "GB" => "United Kingdom",
        "BR" => "Brazil",
        "CA" => "Canada",
        "CN" => "China",
        "IN" => "India",
        "JP" => "Japan",
        "IT" => "Italy",
        "RU" => "Russia",
        "TR" => "Turkey",
        other => other,
    }
}
