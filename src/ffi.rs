//! C-API of the library.

use std::{fmt::Debug, marker::PhantomData, ops::Deref};

use paste::paste;

use crate::{neighbourhood::NeighbourhoodIterator, volume::VolumeCursor};

/// C compatible slice type.
#[repr(C)]
pub struct CSlice<'a, T> {
    ptr: *const T,
    len: usize,
    _phantom: PhantomData<&'a [T]>,
}

impl<'a, T> Deref for CSlice<'a, T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        if self.len == 0 {
            &[]
        } else {
            unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
        }
    }
}

impl<'a, T> Copy for CSlice<'a, T> {}

impl<'a, T> Clone for CSlice<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T: Debug> Debug for CSlice<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&**self, f)
    }
}

impl<'a, T> From<&'a [T]> for CSlice<'a, T> {
    fn from(x: &'a [T]) -> Self {
        CSlice {
            ptr: x.as_ptr(),
            len: x.len(),
            _phantom: PhantomData,
        }
    }
}

/// C compatible option type.
#[repr(C, i8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum COption<T> {
    /// Empty variant.
    None,
    /// Filled variant.
    Some(T),
}

impl<T> From<Option<T>> for COption<T> {
    fn from(x: Option<T>) -> Self {
        match x {
            None => Self::None,
            Some(x) => Self::Some(x),
        }
    }
}

impl<T> From<COption<T>> for Option<T> {
    fn from(x: COption<T>) -> Self {
        match x {
            COption::None => None,
            COption::Some(x) => Some(x),
        }
    }
}

/// Constructs the neighbourhood of size `extent` around `index` inside a
/// volume with dimensions `dims`.
///
/// Returns `None` if `index` does not lie inside the volume. Aborts if
/// `extent` does not contain one entry per axis.
#[no_mangle]
pub unsafe extern "C" fn neighbourhood_rs_iter_new(
    dims: *const CSlice<'_, usize>,
    index: *const CSlice<'_, usize>,
    extent: *const CSlice<'_, usize>,
) -> COption<Box<NeighbourhoodIterator>> {
    VolumeCursor::new(&*dims, &*index)
        .ok()
        .map(|cursor| Box::new(NeighbourhoodIterator::new(&cursor, &*extent)))
        .into()
}

/// Deallocates and destructs a neighbourhood iterator.
#[no_mangle]
pub extern "C" fn neighbourhood_rs_iter_free(_: Box<NeighbourhoodIterator>) {}

/// Advances the iterator. Returns `1` while a valid position is available.
#[no_mangle]
pub unsafe extern "C" fn neighbourhood_rs_iter_step(iter: *mut NeighbourhoodIterator) -> u8 {
    (*iter).step() as u8
}

/// Returns the number of axes of the iterator.
#[no_mangle]
pub unsafe extern "C" fn neighbourhood_rs_iter_ndim(iter: *const NeighbourhoodIterator) -> usize {
    (*iter).ndim()
}

/// Returns the number of positions visited by one cycle.
#[no_mangle]
pub unsafe extern "C" fn neighbourhood_rs_iter_len(iter: *const NeighbourhoodIterator) -> usize {
    (*iter).len()
}

/// Moves the cursor back to the lower bound along `axis`.
#[no_mangle]
pub unsafe extern "C" fn neighbourhood_rs_iter_reset(iter: *mut NeighbourhoodIterator, axis: usize) {
    (*iter).reset(axis)
}

/// Moves the cursor along `axis` without stepping.
#[no_mangle]
pub unsafe extern "C" fn neighbourhood_rs_iter_set_index(
    iter: *mut NeighbourhoodIterator,
    axis: usize,
    value: isize,
) {
    (*iter).set_index(axis, value)
}

/// Copies the cursor into `out`, which must hold `ndim` elements.
#[no_mangle]
pub unsafe extern "C" fn neighbourhood_rs_iter_get_pos(
    iter: *const NeighbourhoodIterator,
    out: *mut isize,
) {
    let pos = (*iter).position();
    std::ptr::copy_nonoverlapping(pos.as_ptr(), out, pos.len());
}

macro_rules! axis_getter_def {
    ($($name:ident: $T:ty);*) => {
        paste! {
            $(
                #[doc = "Returns the `" $name "` of the iterator along `axis`."]
                #[no_mangle]
                pub unsafe extern "C" fn [<neighbourhood_rs_iter_ $name>](
                    iter: *const NeighbourhoodIterator,
                    axis: usize,
                ) -> $T {
                    (*iter).$name(axis)
                }
            )*
        }
    };
}

axis_getter_def! {
    index: isize; extent: usize; size: usize; centre: isize; lower: isize; half_width: usize
}
