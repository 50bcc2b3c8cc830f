// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contiguous property runs over a text buffer.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use text_props::TextProps;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RunEntry {
    /// Exclusive end byte offset; the start is the previous run's end.
    pub(crate) end: usize,
    pub(crate) props: TextProps,
}

/// An ordered partition of `0..len` into runs.
///
/// Invariants:
/// - there is at least one run; only the sole run of an empty table is empty;
/// - ends are strictly increasing and the last one equals the text length;
/// - adjacent runs never carry equal props.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RunTable {
    runs: Vec<RunEntry>,
}

impl RunTable {
    /// A table with one run covering `0..len`.
    pub(crate) fn new(len: usize, props: TextProps) -> Self {
        Self {
            runs: vec![RunEntry { end: len, props }],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.runs.last().map_or(0, |run| run.end)
    }

    pub(crate) fn count(&self) -> usize {
        self.runs.len()
    }

    pub(crate) fn bounds(&self, run: usize) -> Option<Range<usize>> {
        let end = self.runs.get(run)?.end;
        let start = match run {
            0 => 0,
            _ => self.runs[run - 1].end,
        };
        Some(start..end)
    }

    pub(crate) fn props(&self, run: usize) -> Option<&TextProps> {
        self.runs.get(run).map(|run| &run.props)
    }

    /// Index of the run containing byte `index`.
    ///
    /// An index on a boundary belongs to the run starting there, and `len`
    /// belongs to the last run.
    pub(crate) fn run_at(&self, index: usize) -> usize {
        let ix = self.runs.partition_point(|run| run.end <= index);
        ix.min(self.runs.len() - 1)
    }

    pub(crate) fn props_at(&self, index: usize) -> &TextProps {
        &self.runs[self.run_at(index)].props
    }

    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = (Range<usize>, &TextProps)> + '_ {
        let mut start = 0;
        self.runs.iter().map(move |run| {
            let range = start..run.end;
            start = run.end;
            (range, &run.props)
        })
    }

    /// The runs of `range`, rebased to start at zero.
    ///
    /// An empty range yields an empty table carrying the props at `range.start`.
    pub(crate) fn slice(&self, range: Range<usize>) -> Self {
        if range.is_empty() {
            return Self::new(0, self.props_at(range.start).clone());
        }
        let mut out = RunCoalescer::default();
        for (bounds, props) in self.iter() {
            if bounds.start < range.end && bounds.end > range.start {
                out.push(bounds.end.min(range.end) - range.start, props);
            }
        }
        out.finish(self.props_at(range.start))
    }

    /// Replaces the runs over `range` with `inserted`, given as `(len, props)`
    /// pieces, shifting everything after `range`.
    ///
    /// `fallback` becomes the props of the table if the result is empty.
    pub(crate) fn splice<'p>(
        &mut self,
        range: Range<usize>,
        inserted: impl IntoIterator<Item = (usize, &'p TextProps)>,
        fallback: &TextProps,
    ) {
        debug_assert!(
            range.start <= range.end && range.end <= self.len(),
            "splice range {range:?} out of bounds for len {}",
            self.len()
        );
        let mut out = RunCoalescer::with_capacity(self.runs.len() + 2);
        for (bounds, props) in self.iter() {
            if bounds.start >= range.start {
                break;
            }
            out.push(bounds.end.min(range.start), props);
        }
        let mut cursor = range.start;
        for (len, props) in inserted {
            cursor += len;
            out.push(cursor, props);
        }
        for (bounds, props) in self.iter() {
            if bounds.end > range.end {
                out.push(cursor + bounds.end - range.end, props);
            }
        }
        *self = out.finish(fallback);
    }

    /// Assigns `props` to `range` without changing the text length.
    pub(crate) fn set_props(&mut self, range: Range<usize>, props: &TextProps) {
        if range.is_empty() {
            return;
        }
        let len = range.len();
        self.splice(range, [(len, props)], props);
    }

    /// Replaces the props of every run overlapping `range`, clipped to `range`,
    /// with `f(old_props)`.
    ///
    /// On an empty table the sole run is updated even though `range` is empty.
    pub(crate) fn map_props(
        &mut self,
        range: Range<usize>,
        mut f: impl FnMut(&TextProps) -> TextProps,
    ) {
        if self.len() == 0 {
            let props = f(&self.runs[0].props);
            self.runs[0].props = props;
            return;
        }
        if range.is_empty() {
            return;
        }
        let pieces: Vec<(usize, TextProps)> = self
            .iter()
            .filter(|(bounds, _)| bounds.start < range.end && bounds.end > range.start)
            .map(|(bounds, props)| {
                let len = bounds.end.min(range.end) - bounds.start.max(range.start);
                (len, f(props))
            })
            .collect();
        let fallback = pieces[0].1.clone();
        self.splice(
            range,
            pieces.iter().map(|(len, props)| (*len, props)),
            &fallback,
        );
    }
}

/// Accumulates runs by end offset, merging neighbours with equal props.
#[derive(Debug, Default)]
pub(crate) struct RunCoalescer {
    runs: Vec<RunEntry>,
}

impl RunCoalescer {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: Vec::with_capacity(capacity),
        }
    }

    /// Extends the table to `end` with `props`. Empty extensions are ignored.
    pub(crate) fn push(&mut self, end: usize, props: &TextProps) {
        if let Some(last) = self.runs.last_mut() {
            if end <= last.end {
                return;
            }
            if last.props == *props {
                last.end = end;
                return;
            }
        } else if end == 0 {
            return;
        }
        self.runs.push(RunEntry {
            end,
            props: props.clone(),
        });
    }

    pub(crate) fn finish(self, fallback: &TextProps) -> RunTable {
        if self.runs.is_empty() {
            return RunTable::new(0, fallback.clone());
        }
        RunTable { runs: self.runs }
    }
}
