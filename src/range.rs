//! Row-major traversal of products of ranges.

use std::ops::{AddAssign, Range};

use num_traits::One;

/// Calls `f` with every tuple of the cartesian product of `range`, in
/// row-major order (last range varying fastest).
///
/// # Examples
///
/// ```
/// use neighbourhood_rs::range::for_each_range;
///
/// let mut visited = Vec::new();
/// for_each_range([0..2, 5..7].into_iter(), |idx| visited.push(idx.to_vec()));
///
/// assert_eq!(visited, [[0, 5], [0, 6], [1, 5], [1, 6]]);
/// ```
pub fn for_each_range<T>(range: impl Iterator<Item = Range<T>>, mut f: impl FnMut(&[T]))
where
    T: One + AddAssign + PartialOrd + Clone,
{
    for_each_range_enumerate(range, move |_, e| f(e))
}

/// Like [`for_each_range`], additionally passing the running count of
/// visited tuples.
pub fn for_each_range_enumerate<T>(
    range: impl Iterator<Item = Range<T>>,
    mut f: impl FnMut(usize, &[T]),
) where
    T: One + AddAssign + PartialOrd + Clone,
{
    let ranges: Vec<_> = range.collect();
    if ranges.iter().any(|r| r.start >= r.end) {
        return;
    }

    let mut idx: Vec<_> = ranges.iter().map(|r| r.start.clone()).collect();
    for i in 0.. {
        f(i, &idx);

        let mut exhausted = true;
        for (idx, range) in idx.iter_mut().zip(&ranges).rev() {
            *idx += T::one();
            if *idx < range.end {
                exhausted = false;
                break;
            }
            *idx = range.start.clone();
        }

        if exhausted {
            break;
        }
    }
}
