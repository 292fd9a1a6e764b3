/*
 * This file is part of Hyperfan.
 *
 * Copyright (C) 2025 Hyperfan contributors
 *
 * Hyperfan is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Hyperfan is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Hyperfan. If not, see <https://www.gnu.org/licenses/>.
 */

//! Tokenizers for sysfs device and attribute names
//!
//! Each helper consumes one leading token and hands back the rest of the
//! string, so name grammars read as a chain of `?` steps.

/// Leading decimal integer with an optional sign
pub(crate) fn scan_dec(s: &str) -> Option<(i64, &str)> {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let end = sign + digits;
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// Leading hexadecimal integer with an optional `0x` prefix
pub(crate) fn scan_hex(s: &str) -> Option<(u64, &str)> {
    let body = match s.get(..2) {
        Some("0x" | "0X") if s[2..].starts_with(|c: char| c.is_ascii_hexdigit()) => &s[2..],
        _ => s,
    };
    let digits = body.bytes().take_while(u8::is_ascii_hexdigit).count();
    if digits == 0 {
        return None;
    }
    let value = u64::from_str_radix(&body[..digits], 16).ok()?;
    Some((value, &body[digits..]))
}

/// Leading run of `[a-z0-9_]`, at least one character long
pub(crate) fn scan_ident(s: &str) -> Option<&str> {
    let len = s
        .bytes()
        .take_while(|&b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        .count();
    (len > 0).then(|| &s[len..])
}
