// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use text_props::{IntPropId, PropVariant, PropsBuilder, PropsFactory, StrPropId, TextProps};

use crate::run_table::RunTable;
use crate::RichString;

/// An append-only builder with a current set of props.
///
/// Text appended with [`IncrementalBuilder::append`] takes the current props;
/// the property setters change the current props for subsequent appends.
#[derive(Clone, Debug)]
pub struct IncrementalBuilder {
    factory: PropsFactory,
    pending: PropsBuilder,
    /// `pending` interned, until it changes.
    current: Option<TextProps>,
    text: String,
    runs: RunTable,
}

impl IncrementalBuilder {
    /// Creates a builder whose current props are empty.
    pub fn new(factory: PropsFactory) -> Self {
        let props = factory.empty();
        Self::with_props(factory, &props)
    }

    /// Creates a builder whose current props are `props`.
    pub fn with_props(factory: PropsFactory, props: &TextProps) -> Self {
        Self {
            factory,
            pending: PropsBuilder::from(props),
            current: Some(props.clone()),
            text: String::new(),
            runs: RunTable::new(0, props.clone()),
        }
    }

    /// Returns the text appended so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Appends `text` with the current props.
    pub fn append(&mut self, text: &str) {
        let props = self.current_props();
        let end = self.text.len();
        self.runs.splice(end..end, [(text.len(), &props)], &props);
        self.text.push_str(text);
    }

    /// Appends the text and runs of `string`. The current props are unchanged.
    pub fn append_rich(&mut self, string: &RichString) {
        let end = self.text.len();
        let fallback = self.runs.props_at(end).clone();
        self.runs.splice(
            end..end,
            string.runs().map(|run| (run.range.len(), run.props)),
            &fallback,
        );
        self.text.push_str(string.as_str());
    }

    /// Sets an integer property of the current props.
    pub fn set_int_prop_values(&mut self, id: IntPropId, variant: PropVariant, value: i32) {
        self.pending.set_int_prop(id, variant, value);
        self.current = None;
    }

    /// Removes an integer property from the current props.
    pub fn clear_int_prop(&mut self, id: IntPropId) {
        self.pending.clear_int_prop(id);
        self.current = None;
    }

    /// Sets a string property of the current props. An empty `value` removes it.
    pub fn set_str_prop_value(&mut self, id: StrPropId, value: &str) {
        if value.is_empty() {
            self.pending.clear_str_prop(id);
        } else {
            self.pending.set_str_prop(id, value);
        }
        self.current = None;
    }

    /// Removes all text and resets the current props to empty.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.current = None;
        self.text.clear();
        let props = self.current_props();
        self.runs = RunTable::new(0, props);
    }

    /// Returns an immutable snapshot of the text appended so far.
    ///
    /// With no text, the snapshot is an empty string carrying the current props.
    pub fn string(&mut self) -> RichString {
        if self.text.is_empty() {
            return RichString::empty(self.current_props());
        }
        RichString::from_parts(self.text.clone(), self.runs.clone())
    }

    fn current_props(&mut self) -> TextProps {
        match &self.current {
            Some(props) => props.clone(),
            None => {
                let props = self.factory.intern(&self.pending);
                self.current = Some(props.clone());
                props
            }
        }
    }
}
