// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable rich text strings made of property runs.
//!
//! A [`RichString`] is text plus a partition of that text into runs, each
//! carrying one interned [`TextProps`](text_props::TextProps). Strings are
//! built with a [`RichStringBuilder`] (arbitrary edits) or an
//! [`IncrementalBuilder`] (append-only), can be normalized to any of the
//! Unicode normalization forms while keeping props aligned with the moved
//! characters, and can be written as XML.
//!
//! ```
//! use rich_string::{NormalizationForm, RichStringBuilder};
//! use rich_string::text_props::{PropsFactory, WritingSystem};
//!
//! let factory = PropsFactory::new();
//! let mut builder = RichStringBuilder::new(factory.clone(), factory.ws_props(WritingSystem(1)));
//! builder.append("A", None);
//! builder.append("\u{0308}", Some(&factory.ws_props(WritingSystem(2))));
//! let s = builder.string();
//!
//! // Run-safe composition leaves the two runs apart.
//! assert!(s.is_normalized(NormalizationForm::Nfsc));
//! // Plain composition joins them.
//! let nfc = s.normalized(NormalizationForm::Nfc);
//! assert_eq!(nfc.as_str(), "\u{00C4}");
//! assert_eq!(nfc.run_count(), 1);
//! ```
//!
//! All offsets are byte offsets into UTF-8 text and must fall on character
//! boundaries, so a character outside the Basic Multilingual Plane is always
//! addressed as a whole.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
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
#![no_std]

extern crate alloc;

mod builder;
mod error;
mod inc_builder;
mod normalize;
mod run_table;
mod string;
mod text_range;
mod xml;

pub use text_props;

pub use crate::builder::RichStringBuilder;
pub use crate::error::{BoundaryInfo, Endpoint, Error, ErrorKind, WriteXmlError};
pub use crate::inc_builder::IncrementalBuilder;
pub use crate::normalize::NormalizationForm;
pub use crate::string::{RichString, Run};
pub use crate::xml::{WritingSystemNames, XmlOptions};
