// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interned property sets for run-based rich text.
//!
//! A [`TextProps`] is an immutable bag of integer properties (writing system,
//! font size, toggles, colors) and string properties (named style, font
//! family). Property sets are built with a [`PropsBuilder`] and interned by a
//! [`PropsFactory`], so that equal sets are shared and compare by identity.
//!
//! ```
//! use text_props::{IntPropId, PropVariant, PropsBuilder, PropsFactory, WritingSystem};
//!
//! let factory = PropsFactory::new();
//! let mut builder = PropsBuilder::new();
//! builder
//!     .set_writing_system(WritingSystem(1))
//!     .set_int_prop(IntPropId::BOLD, PropVariant::Enum, 1);
//!
//! let a = factory.intern(&builder);
//! let b = factory.intern(&builder);
//! assert!(a.ptr_eq(&b));
//! assert_eq!(a.writing_system(), Some(WritingSystem(1)));
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod factory;
mod props;

pub use crate::builder::PropsBuilder;
pub use crate::factory::PropsFactory;
pub use crate::props::{IntProp, IntPropId, PropVariant, StrPropId, TextProps, WritingSystem};
