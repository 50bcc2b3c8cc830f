// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;
use core::ops::Range;
use core::sync::atomic::{AtomicU8, Ordering};

use text_props::{PropsFactory, TextProps, WritingSystem};

use crate::run_table::RunTable;
use crate::text_range::validate_range;
use crate::{Error, NormalizationForm, RichStringBuilder};

/// An immutable string of text with formatting properties applied in runs.
///
/// The text is partitioned into contiguous runs, each sharing one
/// [`TextProps`]. Adjacent runs always have different props, and there is
/// always at least one run: an empty string still carries props (usually its
/// writing system).
///
/// `RichString` is a cheap handle. Clones share the same contents, which are
/// never modified; edit a copy through a [`RichStringBuilder`] instead.
///
/// All offsets are byte offsets into the UTF-8 text and must be on character
/// boundaries.
#[derive(Clone)]
pub struct RichString {
    inner: Arc<Inner>,
}

struct Inner {
    text: Box<str>,
    runs: RunTable,
    /// Bit set of the normalization forms this string is known to be in.
    normalized: AtomicU8,
}

/// One run of a [`RichString`].
#[derive(Clone, Debug, PartialEq)]
pub struct Run<'a> {
    /// The byte range of the run in the text.
    pub range: Range<usize>,
    /// The props shared by the run.
    pub props: &'a TextProps,
}

impl RichString {
    /// Creates a string with a single run of `props`.
    pub fn new(text: &str, props: TextProps) -> Self {
        Self::from_parts(text.into(), RunTable::new(text.len(), props))
    }

    /// Creates an empty string carrying `props`.
    pub fn empty(props: TextProps) -> Self {
        Self::new("", props)
    }

    pub(crate) fn from_parts(text: String, runs: RunTable) -> Self {
        debug_assert_eq!(text.len(), runs.len(), "run table must cover the text");
        Self {
            inner: Arc::new(Inner {
                text: text.into_boxed_str(),
                runs,
                normalized: AtomicU8::new(0),
            }),
        }
    }

    pub(crate) fn run_table(&self) -> &RunTable {
        &self.inner.runs
    }

    /// Returns the text.
    ///
    /// The borrow keeps the text accessible for as long as it is held.
    pub fn as_str(&self) -> &str {
        &self.inner.text
    }

    /// Returns the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.inner.text.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.text.is_empty()
    }

    /// Returns the number of runs. This is at least one.
    pub fn run_count(&self) -> usize {
        self.inner.runs.count()
    }

    /// Returns the byte range of run `run`, or `None` if there is no such run.
    pub fn run_bounds(&self, run: usize) -> Option<Range<usize>> {
        self.inner.runs.bounds(run)
    }

    /// Returns the props of run `run`, or `None` if there is no such run.
    pub fn run_props(&self, run: usize) -> Option<&TextProps> {
        self.inner.runs.props(run)
    }

    /// Returns the index of the run containing byte `index`.
    ///
    /// An index on a run boundary belongs to the run starting there; the end
    /// of the text belongs to the last run. Returns `None` past the end.
    pub fn run_at(&self, index: usize) -> Option<usize> {
        (index <= self.len()).then(|| self.inner.runs.run_at(index))
    }

    /// Returns the props at byte `index`, with the same conventions as
    /// [`RichString::run_at`].
    pub fn props_at(&self, index: usize) -> Option<&TextProps> {
        (index <= self.len()).then(|| self.inner.runs.props_at(index))
    }

    /// Iterates over the runs in text order.
    pub fn runs(&self) -> impl ExactSizeIterator<Item = Run<'_>> + '_ {
        self.inner
            .runs
            .iter()
            .map(|(range, props)| Run { range, props })
    }

    /// Returns the writing system of run `run`.
    ///
    /// The outer `None` means there is no such run; the inner one that the
    /// run has no writing system.
    pub fn writing_system(&self, run: usize) -> Option<Option<WritingSystem>> {
        self.run_props(run).map(TextProps::writing_system)
    }

    /// Returns the writing system at byte `index`.
    pub fn writing_system_at(&self, index: usize) -> Option<Option<WritingSystem>> {
        self.props_at(index).map(TextProps::writing_system)
    }

    /// Returns the text in `range`.
    pub fn chars(&self, range: Range<usize>) -> Result<&str, Error> {
        validate_range(self.as_str(), &range)?;
        Ok(&self.as_str()[range])
    }

    /// Appends the text in `range` to `buf`.
    pub fn fetch_chars(&self, range: Range<usize>, buf: &mut String) -> Result<(), Error> {
        buf.push_str(self.chars(range)?);
        Ok(())
    }

    /// Returns a new string holding `range` of this one, with its runs.
    ///
    /// An empty `range` yields an empty string whose props are those at
    /// `range.start`.
    pub fn substring(&self, range: Range<usize>) -> Result<Self, Error> {
        validate_range(self.as_str(), &range)?;
        if range.start == 0 && range.end == self.len() {
            return Ok(self.clone());
        }
        let runs = self.inner.runs.slice(range.clone());
        Ok(Self::from_parts(self.as_str()[range].into(), runs))
    }

    /// Returns a builder initialized with a copy of this string.
    pub fn to_builder(&self, factory: &PropsFactory) -> RichStringBuilder {
        RichStringBuilder::from_string(factory.clone(), self)
    }

    /// Returns `true` if both handles refer to the same instance.
    ///
    /// This is stricter than `==`, which compares contents.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn is_known_normalized(&self, form: NormalizationForm) -> bool {
        self.inner.normalized.load(Ordering::Relaxed) & form.bit() != 0
    }

    pub(crate) fn mark_normalized(&self, form: NormalizationForm) {
        self.inner.normalized.fetch_or(form.bit(), Ordering::Relaxed);
    }
}

impl PartialEq for RichString {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.inner.text == other.inner.text && self.inner.runs == other.inner.runs)
    }
}

impl Eq for RichString {}

impl fmt::Debug for RichString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for run in self.runs() {
            list.entry(&(&self.as_str()[run.range], run.props));
        }
        list.finish()
    }
}

impl fmt::Display for RichString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
