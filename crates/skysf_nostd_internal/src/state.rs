//! Introduces the [`AccumStateView`], [`AccumStateViewMut`] and
//! [`StatePackViewMut`] types
//!
//! Currently these simply wrap `ndarray` views. Wrapping them keeps every
//! reference to the ndarray package in the accumulator machinery contained
//! within this file.
//!
//! We use separate types for immutable and mutable views of a single
//! `accum_state` for the same reason the standard library distinguishes
//! `&[f64]` from `&mut [f64]`: a statepack hands out views that it constructs
//! on the fly, so a single view type couldn't properly model lifetimes.

use core::ops::{Index, IndexMut};
use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Axis};

/// read-only view of the state of a single accumulator
pub struct AccumStateView<'a> {
    data: ArrayView1<'a, f64>,
}

impl<'a> AccumStateView<'a> {
    pub fn from_array_view(data: ArrayView1<'a, f64>) -> Self {
        Self { data }
    }
}

impl Index<usize> for AccumStateView<'_> {
    type Output = f64;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

/// mutable view of the state of a single accumulator
pub struct AccumStateViewMut<'a> {
    data: ArrayViewMut1<'a, f64>,
}

impl<'a> AccumStateViewMut<'a> {
    pub fn from_array_view(data: ArrayViewMut1<'a, f64>) -> Self {
        Self { data }
    }
}

impl Index<usize> for AccumStateViewMut<'_> {
    type Output = f64;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for AccumStateViewMut<'_> {
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// Represents a collection of accumulator states (one per bin)
///
/// The wrapped array has the shape `(state_size, n_states)`. In other words,
/// each column holds a single `accum_state`.
pub struct StatePackViewMut<'a> {
    data: ArrayViewMut2<'a, f64>,
}

impl<'a> StatePackViewMut<'a> {
    pub fn from_array_view(array_view: ArrayViewMut2<'a, f64>) -> Self {
        Self { data: array_view }
    }

    pub fn get_state_mut(&mut self, i: usize) -> AccumStateViewMut<'_> {
        AccumStateViewMut::from_array_view(self.data.index_axis_mut(Axis(1), i))
    }

    pub fn n_states(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    pub fn as_array_view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}
