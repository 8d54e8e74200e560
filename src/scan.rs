//! Scans visiting the neighbourhood of every voxel of a volume.
//!
//! Every voxel gets its own [`NeighbourhoodIterator`], so the parallel
//! scans never share enumerator state between workers.

use log::{debug, trace};
use num_traits::{Float, NumCast};
use rayon::prelude::*;

use crate::{
    neighbourhood::NeighbourhoodIterator,
    range::for_each_range,
    utilities::unflatten_idx,
    volume::{VolumeBlock, VolumeCursor, VolumeError},
};

/// Calls `f` with the neighbourhood of every position of a volume with
/// dimensions `dims`, visiting the centres in row-major order.
///
/// # Panics
///
/// Panics if `extent` does not contain exactly one entry per axis.
///
/// # Examples
///
/// ```
/// use neighbourhood_rs::scan::for_each_neighbourhood;
///
/// let mut total = 0;
/// for_each_neighbourhood(&[3, 3], &[3, 3], |_, iter| {
///     while iter.step() {
///         total += 1;
///     }
/// });
///
/// assert_eq!(total, 49);
/// ```
pub fn for_each_neighbourhood(
    dims: &[usize],
    extent: &[usize],
    mut f: impl FnMut(&[usize], &mut NeighbourhoodIterator),
) {
    assert_eq!(dims.len(), extent.len());
    debug!("Scanning neighbourhoods of extent {extent:?} in volume {dims:?}");

    for_each_range(dims.iter().map(|&d| 0..d), |centre| {
        let index = centre.iter().map(|&c| c as isize).collect();
        let cursor = VolumeCursor::new_unchecked(dims, index);
        let mut iter = NeighbourhoodIterator::new(&cursor, extent);
        trace!("{iter}");

        f(centre, &mut iter)
    });
}

/// Computes one value per voxel of `block` from its neighbourhood, in
/// parallel.
///
/// The result has the same dimensions and layout as `block`.
///
/// # Panics
///
/// Panics if `extent` does not contain exactly one entry per axis.
///
/// # Examples
///
/// ```
/// use neighbourhood_rs::{scan::map_neighbourhoods, volume::VolumeBlock};
///
/// let block = VolumeBlock::new_zero(&[3, 3]).unwrap();
/// let sizes = map_neighbourhoods(&block, &[3, 3], |_: &VolumeBlock<f32>, iter| iter.len()).unwrap();
///
/// assert_eq!(sizes.flatten(), &[4, 6, 4, 6, 9, 6, 4, 6, 4]);
/// ```
pub fn map_neighbourhoods<T, U, F>(
    block: &VolumeBlock<T>,
    extent: &[usize],
    f: F,
) -> Result<VolumeBlock<U>, VolumeError>
where
    T: Sync,
    U: Send,
    F: Fn(&VolumeBlock<T>, &mut NeighbourhoodIterator) -> U + Sync,
{
    let dims = block.dims();
    assert_eq!(dims.len(), extent.len());
    debug!(
        "Mapping {} neighbourhoods of extent {extent:?} in volume {dims:?}",
        block.len()
    );

    let data: Vec<U> = (0..block.len())
        .into_par_iter()
        .map(|i| {
            let index = unflatten_idx(dims, i)
                .into_iter()
                .map(|c| c as isize)
                .collect();
            let cursor = VolumeCursor::new_unchecked(dims, index);
            let mut iter = NeighbourhoodIterator::new(&cursor, extent);
            trace!("{iter}");

            f(block, &mut iter)
        })
        .collect();

    VolumeBlock::new_with_data(dims, data)
}

/// Replaces every voxel with the mean of its clamped neighbourhood.
///
/// # Examples
///
/// ```
/// use neighbourhood_rs::{scan::mean_filter, volume::VolumeBlock};
///
/// let block = VolumeBlock::new_with_data(&[5], vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let filtered = mean_filter(&block, &[3]).unwrap();
///
/// assert_eq!(filtered.flatten(), &[1.5, 2.0, 3.0, 4.0, 4.5]);
/// ```
pub fn mean_filter<T>(block: &VolumeBlock<T>, extent: &[usize]) -> Result<VolumeBlock<T>, VolumeError>
where
    T: Float + Send + Sync,
{
    map_neighbourhoods(block, extent, |block, iter| {
        let mut sum = T::zero();
        let mut count = 0usize;
        while iter.step() {
            if let Some(&v) = block.get_at(iter.position()) {
                sum = sum + v;
                count += 1;
            }
        }

        let count = <T as NumCast>::from(count).unwrap_or_else(T::one);
        sum / count
    })
}
