// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// This allows for dynamic switching between different types to use for the sample indices.
///
/// A sample index is an ordinal in `0..n` assigned to a sample label for the duration of one solve.
/// All subsets handled by the engine are ascending tuples of these indices.
pub trait Id:
'static + Default + Copy + Clone + Send + Sync +
Display + Debug + Hash +
Eq + Ord +
Add<Output=Self> + Sub<Output=Self> +
AddAssign + SubAssign
{
    /// Convert to [usize].
    fn as_usize(self) -> usize;

    /// Convert from [usize].
    fn from_usize(other: usize) -> Self;
}

macro_rules! as_id {
    ($t:ident, $($ts:ident),+) => { as_id!($t); as_id!($($ts),+); };
    ($t:ident) => {
        impl Id for $t {
            #[inline(always)]
            fn as_usize(self) -> usize { self as usize }
            #[inline(always)]
            fn from_usize(other: usize) -> Self { other as $t }
        }
    };
}

as_id!(u8, u16, u32, u64, usize);
