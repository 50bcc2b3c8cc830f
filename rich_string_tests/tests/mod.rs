// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `rich_string`.
//!
//! - The `util` module contains shared utility functions that are needed by different
//!   test methods.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that the helpers in `util` are compiled once.
//! - If you want to add new tests, put them into the module of their topic (builder,
//!   normalize, substring, threads, xml), or create a new one in case it doesn't exist yet.
//! - For test naming, put the topic of the test at the start of the name, e.g.
//!   `nfsc_partial_composition` rather than `partial_composition_nfsc`.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod threads;
mod util;
