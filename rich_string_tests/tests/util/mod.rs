// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod asserts;
mod env;

pub(crate) use asserts::{assert_well_formed, run_shape};
pub(crate) use env::{TestEnv, DE, EN, FR, NAMES};
