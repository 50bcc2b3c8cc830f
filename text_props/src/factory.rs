// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interning arena for property sets.

use core::hash::BuildHasher;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use foldhash::fast::RandomState;
use hashbrown::HashTable;

use crate::props::PropsData;
use crate::{IntProp, IntPropId, PropsBuilder, StrPropId, TextProps, WritingSystem};

/// Table size below which dead entries are never swept eagerly.
const MIN_SWEEP_LEN: usize = 64;

/// Interns property sets so that equal sets share one [`TextProps`] instance.
///
/// Clones of a factory share the same table, and the table is synchronized,
/// so one factory can serve every thread that builds strings. Independent
/// factories do not share anything.
///
/// The table only holds weak references. A property set is freed when the last
/// `TextProps` referring to it is dropped; its slot is reclaimed on the next
/// sweep (see [`PropsFactory::prune`]).
#[derive(Clone, Default)]
pub struct PropsFactory {
    shared: Arc<Mutex<Interner>>,
}

impl PropsFactory {
    /// Creates a factory with an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the interned property set holding the contents of `builder`.
    pub fn intern(&self, builder: &PropsBuilder) -> TextProps {
        self.lock().intern(builder.to_data())
    }

    /// Returns the interned empty property set.
    pub fn empty(&self) -> TextProps {
        self.lock().intern(PropsData::default())
    }

    /// Returns the interned property set holding only the writing system `ws`.
    pub fn ws_props(&self, ws: WritingSystem) -> TextProps {
        let mut builder = PropsBuilder::new();
        builder.set_writing_system(ws);
        self.intern(&builder)
    }

    /// Returns `props` with the integer property `id` set to `value`, or removed
    /// when `value` is `None`.
    pub fn with_int_prop(
        &self,
        props: &TextProps,
        id: IntPropId,
        value: Option<IntProp>,
    ) -> TextProps {
        if props.int_prop(id) == value {
            return props.clone();
        }
        let mut builder = PropsBuilder::from(props);
        match value {
            Some(prop) => builder.set_int_prop(id, prop.variant, prop.value),
            None => builder.clear_int_prop(id),
        };
        self.intern(&builder)
    }

    /// Returns `props` with the string property `id` set to `value`, or removed
    /// when `value` is `None`.
    pub fn with_str_prop(
        &self,
        props: &TextProps,
        id: StrPropId,
        value: Option<&str>,
    ) -> TextProps {
        if props.str_prop(id) == value {
            return props.clone();
        }
        let mut builder = PropsBuilder::from(props);
        match value {
            Some(value) => builder.set_str_prop(id, value),
            None => builder.clear_str_prop(id),
        };
        self.intern(&builder)
    }

    /// Returns the number of live property sets in the table.
    pub fn len(&self) -> usize {
        self.lock()
            .table
            .iter()
            .filter(|entry| entry.props.strong_count() > 0)
            .count()
    }

    /// Returns `true` if the table holds no live property set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes the slots of property sets that are no longer referenced.
    pub fn prune(&self) {
        self.lock().sweep();
    }

    fn lock(&self) -> MutexGuard<'_, Interner> {
        // Every mutation of the table is a single insert or retain, so a
        // panicking holder cannot leave it half-updated.
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PropsFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropsFactory")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
struct Interner {
    table: HashTable<Entry>,
    hasher: RandomState,
    /// Table length after the last sweep.
    swept_len: usize,
}

struct Entry {
    hash: u64,
    props: Weak<PropsData>,
}

impl Interner {
    fn intern(&mut self, data: PropsData) -> TextProps {
        let hash = self.hasher.hash_one(&data);
        let existing = self
            .table
            .find(hash, |entry| {
                entry.hash == hash && entry.props.upgrade().is_some_and(|props| *props == data)
            })
            .and_then(|entry| entry.props.upgrade());
        if let Some(props) = existing {
            return TextProps(props);
        }

        if self.table.len() >= MIN_SWEEP_LEN.max(self.swept_len * 2) {
            self.sweep();
        }
        let props = Arc::new(data);
        self.table.insert_unique(
            hash,
            Entry {
                hash,
                props: Arc::downgrade(&props),
            },
            |entry| entry.hash,
        );
        TextProps(props)
    }

    fn sweep(&mut self) {
        let before = self.table.len();
        self.table.retain(|entry| entry.props.strong_count() > 0);
        self.swept_len = self.table.len();
        log::debug!("swept property table: {before} -> {} entries", self.swept_len);
    }
}
