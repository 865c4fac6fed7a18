// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Conditional expression shorthand.
//!
//! Rust's `if` is already an expression, but `cargo fmt` spreads every
//! one of them over five lines.  The border rules for energy and seam
//! calculation are tables of small conditionals, and they read far
//! better one-per-line.

/// `cq!(condition, when_true, when_false)`
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
