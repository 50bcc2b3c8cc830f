// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sharing strings and factories between threads.

use std::thread;

use rich_string::{IncrementalBuilder, NormalizationForm, RichString};
use text_props::{IntPropId, PropVariant, PropsFactory, TextProps};

use crate::util::{TestEnv, EN, FR};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn threads_types_are_shareable() {
    assert_send_sync::<RichString>();
    assert_send_sync::<TextProps>();
    assert_send_sync::<PropsFactory>();
}

#[test]
fn threads_build_with_shared_factory() {
    let env = TestEnv::new();
    let strings: Vec<RichString> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let factory = env.factory.clone();
                scope.spawn(move || {
                    let mut builder = IncrementalBuilder::new(factory);
                    for _ in 0..50 {
                        builder.set_int_prop_values(IntPropId::WS, PropVariant::Default, EN.0);
                        builder.append("plain ");
                        builder.set_int_prop_values(IntPropId::BOLD, PropVariant::Enum, 1);
                        builder.append("bold ");
                        builder.clear_int_prop(IntPropId::BOLD);
                    }
                    builder.string()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let first = &strings[0];
    assert_eq!(first.run_count(), 100);
    for s in &strings[1..] {
        assert_eq!(s, first);
        for (a, b) in s.runs().zip(first.runs()) {
            assert!(a.props.ptr_eq(b.props), "props were interned twice");
        }
    }
}

#[test]
fn threads_normalize_shared_string() {
    let env = TestEnv::new();
    let s = env.runs(&[("Cafe\u{0301} A", EN), ("\u{0308}", FR)]);
    let results: Vec<RichString> = thread::scope(|scope| {
        let handles: Vec<_> = NormalizationForm::ALL
            .into_iter()
            .map(|form| {
                let s = &s;
                scope.spawn(move || s.normalized(form))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for (form, n) in NormalizationForm::ALL.into_iter().zip(&results) {
        assert_eq!(*n, s.normalized(form), "{form:?}");
        assert!(n.is_normalized(form), "{form:?}");
    }
}
