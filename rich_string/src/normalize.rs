// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unicode normalization of rich strings.
//!
//! Normalization works on characters tagged with the run they came from:
//!
//! 1. every character is fully decomposed, and each resulting character
//!    keeps the props of its source;
//! 2. combining marks are put in canonical order across the whole text,
//!    regardless of runs, carrying their props with them;
//! 3. for the composing forms, starters and following marks are recomposed.
//!    The composite keeps the starter's props. [`NormalizationForm::Nfsc`]
//!    only joins characters whose props are equal;
//! 4. runs are rebuilt from the per-character props.

use alloc::string::String;
use alloc::vec::Vec;

use icu_normalizer::properties::{
    CanonicalCombiningClassMap, CanonicalCombiningClassMapBorrowed, CanonicalComposition,
    CanonicalCompositionBorrowed,
};
use icu_normalizer::{
    ComposingNormalizer, ComposingNormalizerBorrowed, DecomposingNormalizer,
    DecomposingNormalizerBorrowed,
};
use text_props::TextProps;

use crate::run_table::RunCoalescer;
use crate::RichString;

/// A Unicode normalization form.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NormalizationForm {
    /// Canonical decomposition.
    Nfd,
    /// Compatibility decomposition.
    Nfkd,
    /// Canonical decomposition followed by canonical composition.
    ///
    /// Composition ignores runs: a composite made from characters of two runs
    /// takes the props of the first one.
    Nfc,
    /// Compatibility decomposition followed by canonical composition.
    Nfkc,
    /// Run-safe composition.
    ///
    /// Like [`NormalizationForm::Nfc`], except that two characters are only
    /// composed if they carry equal props, so no composite straddles a run
    /// boundary. This is the form rich strings are serialized in.
    Nfsc,
}

impl NormalizationForm {
    /// Every form, in declaration order.
    pub const ALL: [Self; 5] = [Self::Nfd, Self::Nfkd, Self::Nfc, Self::Nfkc, Self::Nfsc];

    pub(crate) fn bit(self) -> u8 {
        match self {
            Self::Nfd => 1 << 0,
            Self::Nfkd => 1 << 1,
            Self::Nfc => 1 << 2,
            Self::Nfkc => 1 << 3,
            Self::Nfsc => 1 << 4,
        }
    }

    fn is_compatibility(self) -> bool {
        matches!(self, Self::Nfkd | Self::Nfkc)
    }

    fn composes(self) -> bool {
        matches!(self, Self::Nfc | Self::Nfkc | Self::Nfsc)
    }
}

impl RichString {
    /// Returns `true` if this string is in normalization form `form`.
    pub fn is_normalized(&self, form: NormalizationForm) -> bool {
        self.normalized(form).ptr_eq(self)
    }

    /// Returns this string in normalization form `form`.
    ///
    /// If the string is already in that form, the result is this same
    /// instance (see [`RichString::ptr_eq`]), not merely an equal copy.
    pub fn normalized(&self, form: NormalizationForm) -> Self {
        if self.is_known_normalized(form) {
            return self.clone();
        }
        let data = UnicodeData::new();
        if data.text_is_normalized(self, form) {
            log::trace!("{form:?}: text of {} bytes already normalized", self.len());
            self.mark_normalized(form);
            return self.clone();
        }

        let result = normalize(self, form, &data);
        if result == *self {
            self.mark_normalized(form);
            return self.clone();
        }
        result.mark_normalized(form);
        result
    }
}

#[derive(Clone, Copy, Debug)]
struct Unit {
    ch: char,
    /// Canonical combining class of `ch`.
    class: u8,
    /// Index of the source run.
    run: usize,
}

struct UnicodeData {
    nfd: DecomposingNormalizerBorrowed<'static>,
    nfkd: DecomposingNormalizerBorrowed<'static>,
    nfc: ComposingNormalizerBorrowed<'static>,
    nfkc: ComposingNormalizerBorrowed<'static>,
    classes: CanonicalCombiningClassMapBorrowed<'static>,
    composition: CanonicalCompositionBorrowed<'static>,
}

impl UnicodeData {
    fn new() -> Self {
        Self {
            nfd: DecomposingNormalizer::new_nfd(),
            nfkd: DecomposingNormalizer::new_nfkd(),
            nfc: ComposingNormalizer::new_nfc(),
            nfkc: ComposingNormalizer::new_nfkc(),
            classes: CanonicalCombiningClassMap::new(),
            composition: CanonicalComposition::new(),
        }
    }

    /// Checks the text alone, when that is enough to decide.
    fn text_is_normalized(&self, string: &RichString, form: NormalizationForm) -> bool {
        let text = string.as_str();
        match form {
            NormalizationForm::Nfd => self.nfd.is_normalized(text),
            NormalizationForm::Nfkd => self.nfkd.is_normalized(text),
            NormalizationForm::Nfc => self.nfc.is_normalized(text),
            NormalizationForm::Nfkc => self.nfkc.is_normalized(text),
            // With one run every pair may compose, which is plain NFC.
            NormalizationForm::Nfsc => string.run_count() == 1 && self.nfc.is_normalized(text),
        }
    }

    /// Writes the full decomposition of `ch` to `out`, replacing its contents.
    fn decompose(&self, ch: char, compatibility: bool, out: &mut String) {
        out.clear();
        if ch.is_ascii() {
            out.push(ch);
            return;
        }
        let normalizer = if compatibility { &self.nfkd } else { &self.nfd };
        let mut buf = [0; 4];
        // Writing into a `String` cannot fail.
        normalizer.normalize_to(ch.encode_utf8(&mut buf), out).ok();
    }

    /// Sorts every stretch of non-starters by combining class, stably.
    fn reorder(units: &mut [Unit]) {
        let mut ix = 0;
        while ix < units.len() {
            if units[ix].class == 0 {
                ix += 1;
                continue;
            }
            let start = ix;
            while ix < units.len() && units[ix].class != 0 {
                ix += 1;
            }
            units[start..ix].sort_by_key(|unit| unit.class);
        }
    }

    /// Canonical composition; `may_join` vetoes individual pairs.
    fn compose(
        &self,
        units: Vec<Unit>,
        mut may_join: impl FnMut(&Unit, &Unit) -> bool,
    ) -> Vec<Unit> {
        let mut out: Vec<Unit> = Vec::with_capacity(units.len());
        let mut starter: Option<usize> = None;
        let mut last_class = 0;
        for unit in units {
            if let Some(ix) = starter {
                // Anything between the starter and `unit` has a class below
                // `unit`'s, or `unit` is blocked.
                let unblocked = ix + 1 == out.len() || last_class < unit.class;
                if unblocked && may_join(&out[ix], &unit) {
                    if let Some(composed) = self.composition.compose(out[ix].ch, unit.ch) {
                        out[ix].ch = composed;
                        continue;
                    }
                }
            }
            if unit.class == 0 {
                starter = Some(out.len());
            }
            last_class = unit.class;
            out.push(unit);
        }
        out
    }
}

fn normalize(string: &RichString, form: NormalizationForm, data: &UnicodeData) -> RichString {
    let props: Vec<&TextProps> = string.runs().map(|run| run.props).collect();
    let text = string.as_str();

    let mut units = Vec::with_capacity(text.len());
    let mut scratch = String::new();
    for (run_ix, run) in string.runs().enumerate() {
        for ch in text[run.range].chars() {
            data.decompose(ch, form.is_compatibility(), &mut scratch);
            units.extend(scratch.chars().map(|ch| Unit {
                ch,
                class: data.classes.get_u8(ch),
                run: run_ix,
            }));
        }
    }
    UnicodeData::reorder(&mut units);
    if form.composes() {
        let run_safe = form == NormalizationForm::Nfsc;
        units = data.compose(units, |first, second| {
            !run_safe || props[first.run] == props[second.run]
        });
    }

    let mut out = String::with_capacity(text.len());
    let mut runs = RunCoalescer::with_capacity(props.len());
    for unit in &units {
        out.push(unit.ch);
        runs.push(out.len(), props[unit.run]);
    }
    RichString::from_parts(out, runs.finish(props[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RichStringBuilder;
    use alloc::vec;
    use text_props::{PropsFactory, WritingSystem};

    fn two_runs(factory: &PropsFactory, first: &str, second: &str) -> RichString {
        let one = factory.ws_props(WritingSystem(1));
        let mut builder = RichStringBuilder::new(factory.clone(), one);
        builder.append(first, None);
        builder.append(second, Some(&factory.ws_props(WritingSystem(2))));
        builder.string()
    }

    #[test]
    fn reorder_is_stable_within_classes() {
        let unit = |ch, class, run| Unit { ch, class, run };
        let mut units = vec![
            unit('a', 0, 0),
            unit('\u{0308}', 230, 0),
            unit('\u{0301}', 230, 1),
            unit('\u{0323}', 220, 2),
            unit('b', 0, 0),
            unit('\u{0301}', 230, 0),
        ];
        UnicodeData::reorder(&mut units);
        let order: Vec<_> = units.iter().map(|unit| (unit.ch, unit.run)).collect();
        assert_eq!(
            order,
            [
                ('a', 0),
                ('\u{0323}', 2),
                ('\u{0308}', 0),
                ('\u{0301}', 1),
                ('b', 0),
                ('\u{0301}', 0),
            ]
        );
    }

    #[test]
    fn decompose_is_full() {
        let data = UnicodeData::new();
        let mut out = String::new();
        // U+1E69 LATIN SMALL LETTER S WITH DOT BELOW AND DOT ABOVE
        data.decompose('\u{1E69}', false, &mut out);
        assert_eq!(out, "s\u{0323}\u{0307}");
        data.decompose('\u{FB01}', false, &mut out);
        assert_eq!(out, "\u{FB01}");
        data.decompose('\u{FB01}', true, &mut out);
        assert_eq!(out, "fi");
    }

    #[test]
    fn nfc_joins_across_runs_with_first_props() {
        let factory = PropsFactory::new();
        let s = two_runs(&factory, "A", "\u{0308}");
        let nfc = s.normalized(NormalizationForm::Nfc);
        assert_eq!(nfc.as_str(), "\u{00C4}");
        assert_eq!(nfc.run_count(), 1);
        assert_eq!(nfc.writing_system_at(0), Some(Some(WritingSystem(1))));
    }

    #[test]
    fn nfsc_does_not_join_across_runs() {
        let factory = PropsFactory::new();
        let s = two_runs(&factory, "A", "\u{0308}");
        let nfsc = s.normalized(NormalizationForm::Nfsc);
        assert!(nfsc.ptr_eq(&s));
        assert!(s.is_normalized(NormalizationForm::Nfsc));
        assert!(!s.is_normalized(NormalizationForm::Nfc));
    }

    #[test]
    fn hangul_round_trip() {
        let factory = PropsFactory::new();
        let s = RichString::new("\u{D55C}\u{AE00}", factory.ws_props(WritingSystem(1)));
        let nfd = s.normalized(NormalizationForm::Nfd);
        assert_eq!(nfd.as_str(), "\u{1112}\u{1161}\u{11AB}\u{1100}\u{1173}\u{11AF}");
        assert_eq!(nfd.normalized(NormalizationForm::Nfc), s);
    }

    #[test]
    fn empty_string_is_normalized() {
        let factory = PropsFactory::new();
        let s = RichString::empty(factory.ws_props(WritingSystem(1)));
        for form in NormalizationForm::ALL {
            assert!(s.normalized(form).ptr_eq(&s), "{form:?}");
        }
    }

    #[test]
    fn result_is_cached_as_normalized() {
        let factory = PropsFactory::new();
        let s = two_runs(&factory, "e\u{0301}", "x");
        let nfc = s.normalized(NormalizationForm::Nfc);
        assert_eq!(nfc.as_str(), "\u{00E9}x");
        assert!(nfc.is_known_normalized(NormalizationForm::Nfc));
        assert!(!s.is_known_normalized(NormalizationForm::Nfc));
        assert!(nfc.normalized(NormalizationForm::Nfc).ptr_eq(&nfc));
    }
}
