// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The ways a carve request can be refused.
//!
//! Everything here is a configuration error: the request can never
//! succeed as given, and nothing is retried.  Broken internal
//! invariants (a seam of the wrong length, a mask that doesn't flag
//! exactly one pixel per row) are bugs, and they panic instead.

use crate::seamcarver::Carve;
use failure::Fail;

#[derive(Debug, Fail, Clone, PartialEq, Eq)]
pub enum CarveError {
    /// Energy is undefined for an image less than two pixels on a side.
    #[fail(
        display = "a {}x{} image is too small to carve; at least 2x2 is required",
        width, height
    )]
    TooSmall { width: u32, height: u32 },

    #[fail(
        display = "cannot resize to {}x{}; both dimensions must be positive",
        width, height
    )]
    EmptyTarget { width: u32, height: u32 },

    #[fail(
        display = "cannot remove {} seams from the {}: only {} available",
        requested, axis, available
    )]
    TooManyRemovals {
        axis: Carve,
        requested: u32,
        available: u32,
    },

    /// Insertion first discovers its seams by removing them from a
    /// copy, so it is bounded the same way removal is.
    #[fail(
        display = "cannot insert {} seams into the {}: at most {} can be found",
        requested, axis, available
    )]
    TooManyInsertions {
        axis: Carve,
        requested: u32,
        available: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_dimensions() {
        let err = CarveError::TooSmall {
            width: 1,
            height: 7,
        };
        assert_eq!(
            err.to_string(),
            "a 1x7 image is too small to carve; at least 2x2 is required"
        );

        let err = CarveError::TooManyRemovals {
            axis: Carve::Height,
            requested: 12,
            available: 9,
        };
        assert_eq!(
            err.to_string(),
            "cannot remove 12 seams from the height: only 9 available"
        );
    }
}
