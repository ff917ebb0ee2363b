//! Two-way set difference over ordered sequences
//!
//! The building block of every comparison step: given two sequences, which
//! elements appear on only one side.

use std::collections::HashSet;
use std::hash::Hash;

/// Compute the elements unique to each side of two sequences
///
/// Returns `(only_left, only_right)`:
/// - `only_left`: elements of `left` with no equal element in `right`, in
///   `left`'s original order, duplicates preserved as encountered
/// - `only_right`: the symmetric result for `right`
///
/// Membership is exact equality. Pure function: no mutation of inputs,
/// deterministic. Hashed lookup keeps it O(n + m).
pub fn diff<T>(left: &[T], right: &[T]) -> (Vec<T>, Vec<T>)
where
    T: Eq + Hash + Clone,
{
    let left_set: HashSet<&T> = left.iter().collect();
    let right_set: HashSet<&T> = right.iter().collect();

    let only_left = left
        .iter()
        .filter(|item| !right_set.contains(*item))
        .cloned()
        .collect();

    let only_right = right
        .iter()
        .filter(|item| !left_set.contains(*item))
        .cloned()
        .collect();

    (only_left, only_right)
}
