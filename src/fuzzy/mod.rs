// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Distance kernels: the only place symbols are compared.
//!
//! | Kernel                   | Distance | Used for                          |
//! |--------------------------|----------|-----------------------------------|
//! | `bounded_edit_distance`  | ed       | one-off checks, linear scan       |
//! | `EditMatrix`             | ed, ext  | verification with prefix reuse    |
//! | `extension_distance`     | ext      | one-off completion checks         |
//! | `IncrementalExtension`   | ext      | as-you-type completion            |
//! | `MyersPattern`           | ed, osa  | verification in word matching     |
//! | `short_query_distance`   | ed, ext  | queries of three symbols or less  |
//!
//! Every kernel caps its answer at `k + 1` and is exact below the cap.

mod extension;
mod levenshtein;
mod matrix;
mod myers;
mod short;

pub use extension::{
    extension_distance, extension_distance_with_position, IncrementalExtension, PrefixMatch,
};
pub use levenshtein::{bounded_edit_distance, edit_distance, levenshtein_within};
pub use matrix::EditMatrix;
pub use myers::{bit_parallel_distance, MyersPattern, MAX_PATTERN_LEN};
pub use short::{is_short_query, short_query_distance, SHORT_QUERY_MAX};

/// Length of the longest common prefix of two words.
#[inline]
pub fn common_prefix_len<S: PartialEq>(a: &[S], b: &[S]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
