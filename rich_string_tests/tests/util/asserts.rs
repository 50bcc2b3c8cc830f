// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Various helper functions to assert truths during testing.

use rich_string::RichString;
use text_props::{TextProps, WritingSystem};

/// Assert that the runs of `s` partition its text with no equal neighbours.
pub(crate) fn assert_well_formed(s: &RichString) {
    assert!(s.run_count() >= 1, "a string always has a run");
    let mut expected_start = 0;
    let mut prev: Option<&TextProps> = None;
    for (i, run) in s.runs().enumerate() {
        assert_eq!(run.range.start, expected_start, "run {i} is not contiguous");
        assert!(
            !run.range.is_empty() || s.is_empty(),
            "run {i} is empty in {s:?}"
        );
        assert!(
            s.as_str().is_char_boundary(run.range.end),
            "run {i} ends inside a character"
        );
        if let Some(prev) = prev {
            assert_ne!(prev, run.props, "run {i} has the props of its predecessor");
        }
        expected_start = run.range.end;
        prev = Some(run.props);
    }
    assert_eq!(expected_start, s.len(), "runs do not cover the text");
}

/// Returns the text and writing system of each run.
pub(crate) fn run_shape(s: &RichString) -> Vec<(&str, Option<WritingSystem>)> {
    s.runs()
        .map(|run| (&s.as_str()[run.range], run.props.writing_system()))
        .collect()
}
