// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! How two profiles are merged pointwise.
//!
//! A [`BinaryOperation`] is consulted for every stretch of time the merge
//! engine produces: `combine` when both sides carry a value, `left` or
//! `right` when only one does. Returning `None` leaves a gap. When neither
//! side is present the operation is not consulted at all and the result is
//! always a gap.

pub trait BinaryOperation<L, R, O> {
    fn combine(&self, left: &L, right: &R) -> Option<O>;
    fn left(&self, left: &L) -> Option<O>;
    fn right(&self, right: &R) -> Option<O>;
}

impl<L, R, O, T: BinaryOperation<L, R, O> + ?Sized> BinaryOperation<L, R, O> for &T {
    #[inline]
    fn combine(&self, left: &L, right: &R) -> Option<O> {
        (**self).combine(left, right)
    }

    #[inline]
    fn left(&self, left: &L) -> Option<O> {
        (**self).left(left)
    }

    #[inline]
    fn right(&self, right: &R) -> Option<O> {
        (**self).right(right)
    }
}

/// A binary operation assembled from three closures.
#[derive(Clone, Copy)]
pub struct FromCases<FL, FR, FC> {
    left: FL,
    right: FR,
    combine: FC,
}

impl<L, R, O, FL, FR, FC> BinaryOperation<L, R, O> for FromCases<FL, FR, FC>
where
    FL: Fn(&L) -> Option<O>,
    FR: Fn(&R) -> Option<O>,
    FC: Fn(&L, &R) -> Option<O>,
{
    #[inline]
    fn combine(&self, left: &L, right: &R) -> Option<O> {
        (self.combine)(left, right)
    }

    #[inline]
    fn left(&self, left: &L) -> Option<O> {
        (self.left)(left)
    }

    #[inline]
    fn right(&self, right: &R) -> Option<O> {
        (self.right)(right)
    }
}

/// Builds an operation from one closure per case.
///
/// # Examples
///
/// ```
/// use horizon_profile::binary_op::{BinaryOperation, from_cases};
///
/// let and = from_cases(
///     |l: &bool| (!*l).then_some(false),
///     |r: &bool| (!*r).then_some(false),
///     |l: &bool, r: &bool| Some(*l && *r),
/// );
/// assert_eq!(and.combine(&true, &false), Some(false));
/// assert_eq!(and.left(&false), Some(false));
/// assert_eq!(and.right(&true), None);
/// ```
#[inline]
pub fn from_cases<FL, FR, FC>(left: FL, right: FR, combine: FC) -> FromCases<FL, FR, FC> {
    FromCases {
        left,
        right,
        combine,
    }
}

/// Combines where both sides are present; a gap wherever either is missing.
#[derive(Clone, Copy)]
pub struct CombineOrNone<F> {
    combine: F,
}

impl<L, R, O, F> BinaryOperation<L, R, O> for CombineOrNone<F>
where
    F: Fn(&L, &R) -> O,
{
    #[inline]
    fn combine(&self, left: &L, right: &R) -> Option<O> {
        Some((self.combine)(left, right))
    }

    #[inline]
    fn left(&self, _left: &L) -> Option<O> {
        None
    }

    #[inline]
    fn right(&self, _right: &R) -> Option<O> {
        None
    }
}

#[inline]
pub fn combine_or_none<F>(combine: F) -> CombineOrNone<F> {
    CombineOrNone { combine }
}

/// Combines where both sides are present; a lone side passes through unchanged.
#[derive(Clone, Copy)]
pub struct CombineOrIdentity<F> {
    combine: F,
}

impl<V, F> BinaryOperation<V, V, V> for CombineOrIdentity<F>
where
    V: Clone,
    F: Fn(&V, &V) -> V,
{
    #[inline]
    fn combine(&self, left: &V, right: &V) -> Option<V> {
        Some((self.combine)(left, right))
    }

    #[inline]
    fn left(&self, left: &V) -> Option<V> {
        Some(left.clone())
    }

    #[inline]
    fn right(&self, right: &V) -> Option<V> {
        Some(right.clone())
    }
}

#[inline]
pub fn combine_or_identity<F>(combine: F) -> CombineOrIdentity<F> {
    CombineOrIdentity { combine }
}
