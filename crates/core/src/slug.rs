// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slugify job descriptions into scheduler-safe job names.

/// Derive a job name from a free-text description.
///
/// Lowercases, replaces every character outside `[a-z0-9]` with a hyphen,
/// collapses consecutive hyphens, and trims leading/trailing hyphens.
///
/// The function is pure and idempotent: slugifying an already-slugified
/// string returns it unchanged, so `remove <name>` and `remove <description>`
/// resolve to the same identity without a lookup table.
pub fn slugify(input: &str) -> String {
    let lower = input.to_lowercase();

    let mut slug = String::with_capacity(lower.len());
    let mut last_was_hyphen = false;
    for ch in lower.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    slug.trim_matches('-').to_string()
}

#[cfg(test)]
#[path = "slug_tests.rs"]
mod tests;
