// Search Bench - Free and Open Source Software Statement
//
// This project, search-bench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: tests/search_test.rs
// Version: 1.0.0
//
// This file contains tests for the CPU search candidates and the default
// candidate groups. Every candidate of a result shape must report the same
// value for the same input, including at the edges of the text.

#[cfg(test)]
mod tests {
    use search_bench::benchmark::candidates::GroupKind;
    use search_bench::search::cpu::{
        NOT_FOUND, memchr_find, memchr_find_all, naive_find, naive_find_all, std_find, std_find_all,
    };
    use search_bench::search::{default_multi_result_group, default_single_result_group};

    type SingleFn = fn(&[u8], &[u8]) -> i64;
    type MultiFn = fn(&[u8], &[u8]) -> Vec<i64>;

    const SINGLE: [(&str, SingleFn); 3] = [
        ("naive_find", naive_find),
        ("std_find", std_find),
        ("memchr_find", memchr_find),
    ];

    const MULTI: [(&str, MultiFn); 3] = [
        ("naive_find_all", naive_find_all),
        ("std_find_all", std_find_all),
        ("memchr_find_all", memchr_find_all),
    ];

    fn assert_single(text: &[u8], marker: &[u8], expected: i64) {
        for (name, search) in SINGLE {
            assert_eq!(
                search(text, marker),
                expected,
                "{} on {:?} / {:?}",
                name,
                String::from_utf8_lossy(text),
                String::from_utf8_lossy(marker)
            );
        }
    }

    fn assert_multi(text: &[u8], marker: &[u8], expected: &[i64]) {
        for (name, search) in MULTI {
            assert_eq!(
                search(text, marker),
                expected,
                "{} on {:?} / {:?}",
                name,
                String::from_utf8_lossy(text),
                String::from_utf8_lossy(marker)
            );
        }
    }

    #[test]
    fn test_first_index_basic() {
        assert_single(b"hello world", b"world", 6);
        assert_single(b"hello world", b"hello", 0);
        assert_single(b"hello world", b"o", 4);
        assert_single(b"hello world", b"planet", NOT_FOUND);
    }

    #[test]
    fn test_first_index_match_at_end() {
        // A marker ending on the last byte of the text is found
        assert_single(b"xxab", b"ab", 2);
        assert_single(b"ab", b"ab", 0);
    }

    #[test]
    fn test_first_index_edge_cases() {
        assert_single(b"ab", b"abc", NOT_FOUND);
        assert_single(b"", b"abc", NOT_FOUND);
        assert_single(b"abc", b"", 0);
        assert_single(b"", b"", 0);
    }

    #[test]
    fn test_first_index_non_utf8_text() {
        let text = [0xff, 0xfe, b'a', b'k', 0xff, b'a', b'k'];
        assert_single(&text, b"ak", 2);
        assert_single(&text, &[0xff, b'a'], 4);
    }

    #[test]
    fn test_find_all_basic() {
        assert_multi(b"abc abc abc", b"abc", &[0, 4, 8]);
        assert_multi(b"abc", b"zz", &[]);
        assert_multi(b"ab", b"abc", &[]);
    }

    #[test]
    fn test_find_all_overlapping() {
        assert_multi(b"aaaa", b"aa", &[0, 1, 2]);
        assert_multi(b"abababa", b"aba", &[0, 2, 4]);
    }

    #[test]
    fn test_find_all_empty_marker_reports_every_position() {
        assert_multi(b"abc", b"", &[0, 1, 2, 3]);
        assert_multi(b"", b"", &[0]);
    }

    #[test]
    fn test_find_all_multibyte_utf8() {
        let text = "é a é a".as_bytes();
        assert_multi(text, b"a", &[3, 8]);
        assert_multi(text, "é".as_bytes(), &[0, 5]);
    }

    #[test]
    fn test_find_all_non_utf8_text() {
        let text = [0xff, b'x', b'y', 0xfe, b'x', b'y'];
        assert_multi(&text, b"xy", &[1, 4]);
    }

    #[test]
    fn test_default_single_result_group() {
        let group = default_single_result_group();
        assert_eq!(group.kind(), GroupKind::SingleResult);
        assert_eq!(group.names(), vec!["naive_scan", "std_find", "memchr_find"]);
        assert_eq!(group.reference().map(|c| c.name()), Some("naive_scan"));

        for candidate in group.iter() {
            assert_eq!(candidate.invoke(b"xxakdl;jfksjft", b"akdl;jfksjft"), 2);
        }
    }

    #[test]
    fn test_default_multi_result_group() {
        let group = default_multi_result_group();
        assert_eq!(group.kind(), GroupKind::MultiResult);
        assert_eq!(
            group.names(),
            vec!["naive_find_all", "std_find_all", "memchr_find_all"]
        );

        for candidate in group.iter() {
            assert_eq!(candidate.invoke(b"ab-ab-ab", b"ab"), vec![0, 3, 6]);
        }
    }

    #[test]
    fn test_group_kind_labels() {
        assert_eq!(GroupKind::SingleResult.as_str(), "single_result");
        assert_eq!(GroupKind::MultiResult.to_string(), "multi_result");
    }
}
