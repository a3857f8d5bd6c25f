// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This module contains the [SubsetList] struct.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::fmt::{Display, Error, Formatter};

use common::{Id, UVec};

#[cfg(test)]
mod test_gen;

/// This struct contains a list of fixed-size ascending index tuples, stored densely.
///
/// It holds both the j-subset universe and the k-candidate pool of a solve.
/// Tuples are stored back to back in one flat vector; tuple `i` occupies
/// `items[i * size..(i + 1) * size]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubsetList<SampleId: Id> {
    size: usize,
    items: UVec<SampleId>,
}

impl<SampleId: Id> SubsetList<SampleId> {
    /// Create an empty list for tuples of the given size.
    pub fn new(size: usize) -> Self {
        debug_assert_ne!(size, 0);
        Self { size, items: UVec::new() }
    }

    /// Create an empty list with room for `count` tuples of the given size.
    pub fn with_capacity(size: usize, count: usize) -> Self {
        debug_assert_ne!(size, 0);
        Self { size, items: UVec::with_capacity(size * count) }
    }

    /// The tuple size of this list.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The number of tuples in this list.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len() / self.size
    }

    /// Returns `true` if the list holds no tuples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow tuple `index`.
    #[inline]
    pub fn subset(&self, index: usize) -> &[SampleId] {
        &self.items[index * self.size..(index + 1) * self.size]
    }

    /// Iterate over all tuples in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::ChunksExact<SampleId> {
        self.items.chunks_exact(self.size)
    }

    /// Append a tuple. The tuple must be strictly ascending and of the list's size.
    pub fn push(&mut self, subset: &[SampleId]) {
        debug_assert_eq!(subset.len(), self.size);
        debug_assert!(subset.windows(2).all(|w| w[0] < w[1]));
        self.items.extend_from_slice(subset);
    }

    /// Enumerate all `C(n, size)` ascending tuples of `0..n` in lexicographic order.
    ///
    /// Fails with [SizeLimit] before producing anything if the number of tuples exceeds `ceiling`.
    /// The output is deterministic and order-stable for a given `(n, size)`.
    pub fn enumerate(n: usize, size: usize, ceiling: u128) -> Result<Self, SizeLimit> {
        debug_assert!(0 < size && size <= n);
        let count = combination_count(n, size);
        if count > ceiling {
            return Err(SizeLimit { subsets: count, ceiling });
        }

        let mut list = Self::with_capacity(size, count as usize);
        let mut current: Vec<SampleId> = (0..size).map(SampleId::from_usize).collect();

        loop {
            list.push(&current);

            // Find the rightmost element that has not reached its final value.
            let mut index = size;
            while 0 < index && current[index - 1].as_usize() == n - size + index - 1 {
                index -= 1;
            }
            if index == 0 {
                break;
            }

            current[index - 1] += SampleId::from_usize(1);
            for reset in index..size {
                current[reset] = current[reset - 1] + SampleId::from_usize(1);
            }
        }

        debug_assert_eq!(list.len() as u128, count);
        Ok(list)
    }
}

/// Returned by [SubsetList::enumerate] when the combination space exceeds the configured ceiling.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SizeLimit {
    /// The number of subsets that enumeration would have produced.
    pub subsets: u128,
    /// The ceiling that was exceeded.
    pub ceiling: u128,
}

impl Display for SizeLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "enumeration of {} subsets exceeds the ceiling of {}", self.subsets, self.ceiling)
    }
}

impl std::error::Error for SizeLimit {}

/// Calculate the binomial coefficient `C(n, r)`, saturating at [u128::MAX].
pub fn combination_count(n: usize, mut r: usize) -> u128 {
    if n < r {
        return 0;
    }
    if r > n - r {
        r = n - r;
    }

    let mut result: u128 = 1;
    for i in 0..r {
        result = match result.checked_mul((n - i) as u128) {
            Some(next) => next / (i + 1) as u128,
            None => return u128::MAX,
        };
    }
    result
}

/// The number of elements two ascending tuples share, computed by a sorted-array merge.
///
/// This is the hot primitive of the coverage relation; both inputs must be strictly ascending.
#[inline]
pub fn overlap<SampleId: Id>(a: &[SampleId], b: &[SampleId]) -> usize {
    debug_assert!(a.windows(2).all(|w| w[0] < w[1]));
    debug_assert!(b.windows(2).all(|w| w[0] < w[1]));

    let mut index_a = 0;
    let mut index_b = 0;
    let mut shared = 0;

    while index_a < a.len() && index_b < b.len() {
        match a[index_a].cmp(&b[index_b]) {
            std::cmp::Ordering::Less => index_a += 1,
            std::cmp::Ordering::Greater => index_b += 1,
            std::cmp::Ordering::Equal => {
                shared += 1;
                index_a += 1;
                index_b += 1;
            }
        }
    }

    shared
}
