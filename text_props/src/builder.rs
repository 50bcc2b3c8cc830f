// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::props::PropsData;
use crate::{IntProp, IntPropId, PropVariant, StrPropId, TextProps, WritingSystem};

/// Mutable accumulator for a property set.
///
/// Turn it into an interned [`TextProps`] with
/// [`PropsFactory::intern`](crate::PropsFactory::intern).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropsBuilder {
    ints: Vec<(IntPropId, IntProp)>,
    strs: Vec<(StrPropId, Arc<str>)>,
}

impl PropsBuilder {
    /// Creates a builder with no properties set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the integer property `id`, replacing any previous value.
    pub fn set_int_prop(&mut self, id: IntPropId, variant: PropVariant, value: i32) -> &mut Self {
        let prop = IntProp::new(variant, value);
        match self.ints.binary_search_by_key(&id, |(id, _)| *id) {
            Ok(ix) => self.ints[ix].1 = prop,
            Err(ix) => self.ints.insert(ix, (id, prop)),
        }
        self
    }

    /// Removes the integer property `id`.
    pub fn clear_int_prop(&mut self, id: IntPropId) -> &mut Self {
        if let Ok(ix) = self.ints.binary_search_by_key(&id, |(id, _)| *id) {
            self.ints.remove(ix);
        }
        self
    }

    /// Sets the string property `id`, replacing any previous value.
    pub fn set_str_prop(&mut self, id: StrPropId, value: &str) -> &mut Self {
        let value = Arc::<str>::from(value);
        match self.strs.binary_search_by_key(&id, |(id, _)| *id) {
            Ok(ix) => self.strs[ix].1 = value,
            Err(ix) => self.strs.insert(ix, (id, value)),
        }
        self
    }

    /// Removes the string property `id`.
    pub fn clear_str_prop(&mut self, id: StrPropId) -> &mut Self {
        if let Ok(ix) = self.strs.binary_search_by_key(&id, |(id, _)| *id) {
            self.strs.remove(ix);
        }
        self
    }

    /// Sets the writing system.
    pub fn set_writing_system(&mut self, ws: WritingSystem) -> &mut Self {
        self.set_int_prop(IntPropId::WS, PropVariant::Default, ws.0)
    }

    /// Returns the value of the integer property `id`, if set.
    pub fn int_prop(&self, id: IntPropId) -> Option<IntProp> {
        self.ints
            .binary_search_by_key(&id, |(id, _)| *id)
            .ok()
            .map(|ix| self.ints[ix].1)
    }

    /// Returns the value of the string property `id`, if set.
    pub fn str_prop(&self, id: StrPropId) -> Option<&str> {
        self.strs
            .binary_search_by_key(&id, |(id, _)| *id)
            .ok()
            .map(|ix| &*self.strs[ix].1)
    }

    /// Removes every property.
    pub fn clear(&mut self) {
        self.ints.clear();
        self.strs.clear();
    }

    pub(crate) fn to_data(&self) -> PropsData {
        PropsData {
            ints: self.ints.as_slice().into(),
            strs: self.strs.as_slice().into(),
        }
    }
}

impl From<&TextProps> for PropsBuilder {
    fn from(props: &TextProps) -> Self {
        Self {
            ints: props.0.ints.to_vec(),
            strs: props.0.strs.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_and_clear_removes() {
        let mut builder = PropsBuilder::new();
        builder
            .set_int_prop(IntPropId::BOLD, PropVariant::Enum, 1)
            .set_int_prop(IntPropId::BOLD, PropVariant::Enum, 0);
        assert_eq!(
            builder.int_prop(IntPropId::BOLD),
            Some(IntProp::new(PropVariant::Enum, 0))
        );

        builder.set_str_prop(StrPropId::NAMED_STYLE, "Strong");
        assert_eq!(builder.str_prop(StrPropId::NAMED_STYLE), Some("Strong"));
        builder.clear_str_prop(StrPropId::NAMED_STYLE);
        assert_eq!(builder.str_prop(StrPropId::NAMED_STYLE), None);

        builder.clear_int_prop(IntPropId::BOLD);
        assert_eq!(builder, PropsBuilder::new());
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut a = PropsBuilder::new();
        a.set_writing_system(WritingSystem(3))
            .set_int_prop(IntPropId::ITALIC, PropVariant::Enum, 1);
        let mut b = PropsBuilder::new();
        b.set_int_prop(IntPropId::ITALIC, PropVariant::Enum, 1)
            .set_writing_system(WritingSystem(3));
        assert_eq!(a, b);
        assert_eq!(a.to_data(), b.to_data());
    }
}
