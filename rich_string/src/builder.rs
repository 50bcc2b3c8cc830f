// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::ops::Range;

use text_props::{IntProp, IntPropId, PropVariant, PropsFactory, StrPropId, TextProps};

use crate::run_table::RunTable;
use crate::text_range::validate_range;
use crate::{Error, RichString};

/// A mutable staging area for building a [`RichString`].
///
/// Edits work on a private copy of the text and runs. [`RichStringBuilder::string`]
/// takes a snapshot; the builder stays usable afterwards and later edits do
/// not affect snapshots already taken.
///
/// Single-property edits intern their new props through the builder's
/// [`PropsFactory`].
#[derive(Clone, Debug)]
pub struct RichStringBuilder {
    factory: PropsFactory,
    text: String,
    runs: RunTable,
}

impl RichStringBuilder {
    /// Creates an empty builder whose text will carry `props`.
    pub fn new(factory: PropsFactory, props: TextProps) -> Self {
        Self {
            factory,
            text: String::new(),
            runs: RunTable::new(0, props),
        }
    }

    /// Creates a builder holding a copy of `string`.
    pub fn from_string(factory: PropsFactory, string: &RichString) -> Self {
        Self {
            factory,
            text: string.as_str().into(),
            runs: string.run_table().clone(),
        }
    }

    /// Returns the current text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the length of the current text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the current text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.count()
    }

    /// Returns the byte range of run `run`.
    pub fn run_bounds(&self, run: usize) -> Option<Range<usize>> {
        self.runs.bounds(run)
    }

    /// Returns the props at byte `index`; see [`RichString::props_at`].
    pub fn props_at(&self, index: usize) -> Option<&TextProps> {
        (index <= self.len()).then(|| self.runs.props_at(index))
    }

    /// Replaces `range` with `text`.
    ///
    /// The new text takes `props` if given. Otherwise it takes the props of
    /// the first replaced character or, when inserting, of the character
    /// before the insertion point (the first character at offset zero).
    ///
    /// An empty `text` deletes `range`.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        text: &str,
        props: Option<&TextProps>,
    ) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        let props = match props {
            Some(props) => props.clone(),
            None => self.inherited_props(&range).clone(),
        };
        self.runs.splice(range.clone(), [(text.len(), &props)], &props);
        self.text.replace_range(range, text);
        Ok(())
    }

    /// Replaces `range` with the text and runs of `string`.
    pub fn replace_rich(&mut self, range: Range<usize>, string: &RichString) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        let fallback = match string.run_props(0) {
            Some(props) if string.is_empty() => props.clone(),
            _ => self.inherited_props(&range).clone(),
        };
        self.runs.splice(
            range.clone(),
            string.runs().map(|run| (run.range.len(), run.props)),
            &fallback,
        );
        self.text.replace_range(range, string.as_str());
        Ok(())
    }

    /// Appends `text` with `props`, or with the props at the end when `None`.
    pub fn append(&mut self, text: &str, props: Option<&TextProps>) {
        let end = self.len();
        if self.is_empty() {
            // An empty builder adopts the props of its first text.
            if let Some(props) = props {
                self.runs = RunTable::new(0, props.clone());
            }
        }
        let props = props.unwrap_or_else(|| self.runs.props_at(end)).clone();
        self.runs.splice(end..end, [(text.len(), &props)], &props);
        self.text.push_str(text);
    }

    /// Appends the text and runs of `string`.
    pub fn append_rich(&mut self, string: &RichString) {
        if self.is_empty() {
            self.text.push_str(string.as_str());
            self.runs = string.run_table().clone();
            return;
        }
        let end = self.len();
        let fallback = self.runs.props_at(end).clone();
        self.runs.splice(
            end..end,
            string.runs().map(|run| (run.range.len(), run.props)),
            &fallback,
        );
        self.text.push_str(string.as_str());
    }

    /// Assigns `props` to `range` without changing the text.
    ///
    /// Runs are split at the ends of `range` and neighbours that end up with
    /// equal props are merged.
    pub fn set_properties(&mut self, range: Range<usize>, props: &TextProps) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        if self.is_empty() {
            self.runs = RunTable::new(0, props.clone());
        } else {
            self.runs.set_props(range, props);
        }
        Ok(())
    }

    /// Sets the integer property `id` over `range`, keeping every other
    /// property of the affected runs.
    pub fn set_int_prop_values(
        &mut self,
        range: Range<usize>,
        id: IntPropId,
        variant: PropVariant,
        value: i32,
    ) -> Result<(), Error> {
        self.update_int_prop(range, id, Some(IntProp::new(variant, value)))
    }

    /// Removes the integer property `id` over `range`.
    pub fn clear_int_prop(&mut self, range: Range<usize>, id: IntPropId) -> Result<(), Error> {
        self.update_int_prop(range, id, None)
    }

    /// Sets the string property `id` over `range`. An empty `value` removes it.
    pub fn set_str_prop_value(
        &mut self,
        range: Range<usize>,
        id: StrPropId,
        value: &str,
    ) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        let value = (!value.is_empty()).then_some(value);
        let factory = &self.factory;
        self.runs.map_props(range, |props| factory.with_str_prop(props, id, value));
        Ok(())
    }

    /// Removes all text. The props at the start are kept for the empty text.
    pub fn clear(&mut self) {
        let props = self.runs.props_at(0).clone();
        self.text.clear();
        self.runs = RunTable::new(0, props);
    }

    /// Returns an immutable snapshot of the current contents.
    pub fn string(&self) -> RichString {
        RichString::from_parts(self.text.clone(), self.runs.clone())
    }

    fn update_int_prop(
        &mut self,
        range: Range<usize>,
        id: IntPropId,
        value: Option<IntProp>,
    ) -> Result<(), Error> {
        validate_range(&self.text, &range)?;
        let factory = &self.factory;
        self.runs.map_props(range, |props| factory.with_int_prop(props, id, value));
        Ok(())
    }

    fn inherited_props(&self, range: &Range<usize>) -> &TextProps {
        if range.is_empty() && range.start > 0 {
            self.runs.props_at(range.start - 1)
        } else {
            self.runs.props_at(range.start)
        }
    }
}
