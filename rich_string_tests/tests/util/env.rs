// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rich_string::{RichString, RichStringBuilder};
use text_props::{PropsFactory, TextProps, WritingSystem};

pub(crate) const EN: WritingSystem = WritingSystem(1);
pub(crate) const FR: WritingSystem = WritingSystem(2);
pub(crate) const DE: WritingSystem = WritingSystem(3);

/// Identifiers of the test writing systems, for XML output.
pub(crate) const NAMES: [(WritingSystem, &str); 3] = [(EN, "en"), (FR, "fr"), (DE, "de")];

/// A props factory plus shortcuts for building test strings.
#[derive(Debug, Default)]
pub(crate) struct TestEnv {
    pub(crate) factory: PropsFactory,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn ws(&self, ws: WritingSystem) -> TextProps {
        self.factory.ws_props(ws)
    }

    /// A single-run string.
    pub(crate) fn string(&self, text: &str, ws: WritingSystem) -> RichString {
        RichString::new(text, self.ws(ws))
    }

    /// An empty builder whose text will be in `ws`.
    pub(crate) fn builder(&self, ws: WritingSystem) -> RichStringBuilder {
        RichStringBuilder::new(self.factory.clone(), self.ws(ws))
    }

    /// A string made of one piece of text per writing system.
    ///
    /// Adjacent pieces with the same writing system end up in the same run.
    pub(crate) fn runs(&self, pieces: &[(&str, WritingSystem)]) -> RichString {
        let first = pieces.first().map_or(EN, |(_, ws)| *ws);
        let mut builder = self.builder(first);
        for (text, ws) in pieces {
            builder.append(text, Some(&self.ws(*ws)));
        }
        builder.string()
    }
}
