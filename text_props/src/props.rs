// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

/// Identifier of an integer-valued text property.
///
/// The id space is open: any value may be stored and queried. The associated
/// constants name the properties with a fixed meaning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntPropId(pub u16);

impl IntPropId {
    /// The writing system of the text, see [`WritingSystem`].
    pub const WS: Self = Self(1);
    /// Italic toggle (`0` off, `1` on, `2` invert).
    pub const ITALIC: Self = Self(2);
    /// Bold toggle (`0` off, `1` on, `2` invert).
    pub const BOLD: Self = Self(3);
    /// Superscript mode (`0` off, `1` superscript, `2` subscript).
    pub const SUPERSCRIPT: Self = Self(4);
    /// Underline style.
    pub const UNDERLINE: Self = Self(5);
    /// Font size, usually in millipoints.
    pub const FONT_SIZE: Self = Self(6);
    /// Baseline offset, usually in millipoints.
    pub const OFFSET: Self = Self(7);
    /// Foreground color as `0x00bbggrr`.
    pub const FORE_COLOR: Self = Self(8);
    /// Background color as `0x00bbggrr`.
    pub const BACK_COLOR: Self = Self(9);
    /// Underline color as `0x00bbggrr`.
    pub const UNDER_COLOR: Self = Self(10);
}

/// Identifier of a string-valued text property.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrPropId(pub u16);

impl StrPropId {
    /// Font family name.
    pub const FONT_FAMILY: Self = Self(1);
    /// Opaque embedded-object data (links, footnote anchors).
    pub const OBJ_DATA: Self = Self(6);
    /// Name of the character style applied to the text.
    pub const NAMED_STYLE: Self = Self(133);
}

/// How the value of an integer property is to be interpreted.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropVariant {
    /// A plain value.
    #[default]
    Default,
    /// A length in thousandths of a point.
    MilliPoint,
    /// A value relative to the inherited one, in ten-thousandths.
    Relative,
    /// One member of an enumeration.
    Enum,
}

/// The value of an integer property together with its variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntProp {
    /// Interpretation of `value`.
    pub variant: PropVariant,
    /// The raw value.
    pub value: i32,
}

impl IntProp {
    /// Creates a property value.
    pub const fn new(variant: PropVariant, value: i32) -> Self {
        Self { variant, value }
    }
}

/// Opaque identifier of a writing system.
///
/// Ids are minted by an external writing-system registry. The text model only
/// stores and compares them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WritingSystem(pub i32);

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct PropsData {
    // Both tables are sorted by id with no duplicates.
    pub(crate) ints: Box<[(IntPropId, IntProp)]>,
    pub(crate) strs: Box<[(StrPropId, Arc<str>)]>,
}

/// An immutable set of character formatting properties.
///
/// `TextProps` is a cheap handle; clones share the same allocation. Instances
/// obtained from one [`PropsFactory`](crate::PropsFactory) are interned, so two
/// equal property sets from the same factory are the same instance and compare
/// in constant time. Comparison falls back to the contents otherwise.
#[derive(Clone)]
pub struct TextProps(pub(crate) Arc<PropsData>);

impl TextProps {
    /// Returns the value of the integer property `id`, or `None` if it is not set.
    pub fn int_prop(&self, id: IntPropId) -> Option<IntProp> {
        let ints = &self.0.ints;
        ints.binary_search_by_key(&id, |(id, _)| *id)
            .ok()
            .map(|ix| ints[ix].1)
    }

    /// Returns the value of the string property `id`, or `None` if it is not set.
    pub fn str_prop(&self, id: StrPropId) -> Option<&str> {
        let strs = &self.0.strs;
        strs.binary_search_by_key(&id, |(id, _)| *id)
            .ok()
            .map(|ix| &*strs[ix].1)
    }

    /// Returns the writing system, if one is set.
    pub fn writing_system(&self) -> Option<WritingSystem> {
        self.int_prop(IntPropId::WS).map(|prop| WritingSystem(prop.value))
    }

    /// Iterates over the integer properties in ascending id order.
    pub fn int_props(&self) -> impl ExactSizeIterator<Item = (IntPropId, IntProp)> + '_ {
        self.0.ints.iter().copied()
    }

    /// Iterates over the string properties in ascending id order.
    pub fn str_props(&self) -> impl ExactSizeIterator<Item = (StrPropId, &str)> + '_ {
        self.0.strs.iter().map(|(id, value)| (*id, &**value))
    }

    /// Returns `true` if no property is set.
    pub fn is_empty(&self) -> bool {
        self.0.ints.is_empty() && self.0.strs.is_empty()
    }

    /// Returns `true` if both handles refer to the same interned instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for TextProps {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for TextProps {}

impl fmt::Debug for TextProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (id, prop) in self.int_props() {
            map.entry(&id, &prop);
        }
        for (id, value) in self.str_props() {
            map.entry(&id, &value);
        }
        map.finish()
    }
}
