// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/search/cpu.rs
// Version: 1.0.0
//
// This file provides the CPU search candidates: a byte-by-byte scan, the
// standard library's string search and memchr's SIMD-accelerated memmem.
// Single-result functions return the first match index or NOT_FOUND;
// multi-result functions return every match start (overlapping matches
// included) in ascending order.
//
// Tree Location:
// - src/search/cpu.rs (CPU search candidates)
// - Depends on: memchr

use memchr::memmem;

/// Single-result value when the marker is absent
pub const NOT_FOUND: i64 = -1;

/// Every start position; what all multi-result candidates report for an empty marker
fn every_position(text: &[u8]) -> Vec<i64> {
    (0..=text.len()).map(|i| i as i64).collect()
}

/// First match by comparing the marker at every start position
pub fn naive_find(text: &[u8], marker: &[u8]) -> i64 {
    if marker.is_empty() {
        return 0;
    }
    if marker.len() > text.len() {
        return NOT_FOUND;
    }

    for i in 0..=text.len() - marker.len() {
        let mut j = 0;
        while j < marker.len() && text[i + j] == marker[j] {
            j += 1;
        }
        if j == marker.len() {
            return i as i64;
        }
    }
    NOT_FOUND
}

/// First match via `str::find`, falling back to `windows` for non-UTF-8 input
pub fn std_find(text: &[u8], marker: &[u8]) -> i64 {
    if marker.is_empty() {
        return 0;
    }
    match (std::str::from_utf8(text), std::str::from_utf8(marker)) {
        (Ok(text), Ok(marker)) => text.find(marker).map_or(NOT_FOUND, |i| i as i64),
        _ => text
            .windows(marker.len())
            .position(|window| window == marker)
            .map_or(NOT_FOUND, |i| i as i64),
    }
}

/// First match via memchr's memmem
pub fn memchr_find(text: &[u8], marker: &[u8]) -> i64 {
    memmem::find(text, marker).map_or(NOT_FOUND, |i| i as i64)
}

/// All matches by comparing the marker at every start position
pub fn naive_find_all(text: &[u8], marker: &[u8]) -> Vec<i64> {
    if marker.is_empty() {
        return every_position(text);
    }
    if marker.len() > text.len() {
        return Vec::new();
    }

    (0..=text.len() - marker.len())
        .filter(|&i| &text[i..i + marker.len()] == marker)
        .map(|i| i as i64)
        .collect()
}

/// All matches via repeated `str::find`
pub fn std_find_all(text: &[u8], marker: &[u8]) -> Vec<i64> {
    if marker.is_empty() {
        return every_position(text);
    }
    let (Ok(text_str), Ok(marker_str)) = (std::str::from_utf8(text), std::str::from_utf8(marker))
    else {
        return text
            .windows(marker.len())
            .enumerate()
            .filter(|(_, window)| *window == marker)
            .map(|(i, _)| i as i64)
            .collect();
    };

    let mut matches = Vec::new();
    let mut start = 0;
    while let Some(offset) = text_str[start..].find(marker_str) {
        let pos = start + offset;
        matches.push(pos as i64);
        // Step one character so overlapping matches are found; a UTF-8 match
        // can only begin on a character boundary
        start = pos + text_str[pos..].chars().next().map_or(1, char::len_utf8);
    }
    matches
}

/// All matches via a prebuilt memmem finder
pub fn memchr_find_all(text: &[u8], marker: &[u8]) -> Vec<i64> {
    if marker.is_empty() {
        return every_position(text);
    }

    let finder = memmem::Finder::new(marker);
    let mut matches = Vec::new();
    let mut start = 0;
    while let Some(offset) = finder.find(&text[start..]) {
        let pos = start + offset;
        matches.push(pos as i64);
        start = pos + 1;
    }
    matches
}
