// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Endpoint, Error, ErrorKind};

/// Checks that `range` is ordered, within `text`, and does not cut a character.
#[inline]
pub(crate) fn validate_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    if range.start > range.end {
        return Err(Error::new(ErrorKind::Reversed, range, text.len()));
    }
    if range.end > text.len() {
        return Err(Error::new(ErrorKind::OutOfBounds, range, text.len()));
    }
    for (which, offset) in [(Endpoint::Start, range.start), (Endpoint::End, range.end)] {
        if !text.is_char_boundary(offset) {
            return Err(Error::inside_char(text, range, which));
        }
    }
    Ok(())
}
