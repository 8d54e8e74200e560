//! Enumeration of the neighbourhood around a position.

use std::fmt::Display;

use crate::position::{Position, PositionSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// The next step starts a new cycle at the lower bound.
    Idle,
    /// The cursor points at a valid tuple of the current cycle.
    Iterating,
}

/// Restartable odometer over the clamped window around a centre position.
///
/// The window spans `(extent - 1) / 2` positions on either side of the
/// centre along each axis and is clamped independently at each array
/// boundary, so windows touching an edge shrink instead of shifting.
/// Tuples are visited in row-major order, with the last axis varying
/// fastest.
///
/// The position source is only read during construction.
///
/// # Examples
///
/// ```
/// use neighbourhood_rs::{neighbourhood::NeighbourhoodIterator, volume::VolumeCursor};
///
/// let cursor = VolumeCursor::new(&[10, 10], &[5, 5]).unwrap();
/// let mut iter = NeighbourhoodIterator::new(&cursor, &[3, 3]);
///
/// let mut visited = Vec::new();
/// while iter.step() {
///     visited.push((iter.index(0), iter.index(1)));
/// }
///
/// assert_eq!(visited.len(), 9);
/// assert_eq!(visited[0], (4, 4));
/// assert_eq!(visited[1], (4, 5));
/// assert_eq!(visited[8], (6, 6));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighbourhoodIterator {
    dims: Vec<usize>,
    centre: Vec<isize>,
    lower: Vec<isize>,
    half_width: Vec<usize>,
    pos: Position,
    state: State,
}

impl NeighbourhoodIterator {
    /// Constructs the window of size `extent` around the current position
    /// of `source`.
    ///
    /// A requested extent of `0` is treated like `1`. Even extents are
    /// rounded down to the next odd window.
    ///
    /// # Panics
    ///
    /// Panics if `extent` does not contain exactly one entry per axis
    /// of `source`.
    pub fn new<S: PositionSource + ?Sized>(source: &S, extent: &[usize]) -> Self {
        let ndim = source.ndim();
        assert_eq!(
            ndim,
            extent.len(),
            "requested extent must have one entry per axis"
        );

        let mut dims = Vec::with_capacity(ndim);
        let mut centre = Vec::with_capacity(ndim);
        let mut lower = Vec::with_capacity(ndim);
        let mut half_width = Vec::with_capacity(ndim);

        for (axis, &ext) in extent.iter().enumerate() {
            let half = ext.saturating_sub(1) / 2;
            let offset = source.index(axis);
            let last = match source.size(axis) {
                0 => -1,
                size => to_signed(size - 1),
            };

            let low = offset.saturating_sub(to_signed(half)).max(0);
            let high = offset.saturating_add(to_signed(half)).min(last);

            dims.push(usize::try_from(high - low).map_or(0, |d| d + 1));
            centre.push(offset);
            lower.push(low);
            half_width.push(half);
        }

        let pos = Position::from(&*lower);
        Self {
            dims,
            centre,
            lower,
            half_width,
            pos,
            state: State::Idle,
        }
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Width of the clamped window along `axis`.
    #[inline]
    pub fn size(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    /// Width of the clamped window along `axis`.
    ///
    /// Same as [`size`](Self::size).
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.dims[axis]
    }

    /// Widths of the clamped window.
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Coordinate of the centre the window was built around.
    #[inline]
    pub fn centre(&self, axis: usize) -> isize {
        self.centre[axis]
    }

    /// Requested one-sided radius of the window along `axis`, before
    /// clamping.
    #[inline]
    pub fn half_width(&self, axis: usize) -> usize {
        self.half_width[axis]
    }

    /// First coordinate of the window along `axis`.
    #[inline]
    pub fn lower(&self, axis: usize) -> isize {
        self.lower[axis]
    }

    /// Current cursor coordinate along `axis`.
    #[inline]
    pub fn index(&self, axis: usize) -> isize {
        self.pos[axis]
    }

    /// Mutable access to the cursor coordinate along `axis`.
    #[inline]
    pub fn index_mut(&mut self, axis: usize) -> &mut isize {
        &mut self.pos[axis]
    }

    /// Moves the cursor along `axis` without stepping.
    #[inline]
    pub fn set_index(&mut self, axis: usize, value: isize) {
        self.pos[axis] = value;
    }

    /// Borrows the cursor.
    #[inline]
    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Returns a copy of the cursor.
    pub fn get_pos(&self) -> Position {
        self.pos.clone()
    }

    /// Moves the cursor back to the lower bound along `axis`.
    ///
    /// The other axes and the iteration state are left untouched.
    #[inline]
    pub fn reset(&mut self, axis: usize) {
        self.pos[axis] = self.lower[axis];
    }

    /// Number of tuples visited by one cycle.
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    /// Checks whether the window contains no tuples.
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|&d| d == 0)
    }

    /// Checks whether a cycle is in progress.
    #[inline]
    pub fn is_iterating(&self) -> bool {
        self.state == State::Iterating
    }

    /// Advances the cursor to the next tuple of the window.
    ///
    /// Returns `true` while the cursor points at a valid tuple. After the
    /// last tuple it returns `false` once and the following call starts
    /// the same cycle again from the lower bound.
    pub fn step(&mut self) -> bool {
        match self.state {
            State::Idle => {
                if self.is_empty() {
                    return false;
                }

                self.state = State::Iterating;
                for axis in (0..self.ndim()).rev() {
                    self.reset(axis);
                }
                true
            }
            State::Iterating => {
                for axis in (0..self.ndim()).rev() {
                    match self.pos[axis].checked_add(1) {
                        Some(next) if next <= self.last(axis) => {
                            self.pos[axis] = next;
                            return true;
                        }
                        _ => self.reset(axis),
                    }
                }

                self.state = State::Idle;
                false
            }
        }
    }

    /// Iterates over the remaining tuples of the current cycle, or over a
    /// whole new cycle if none is in progress.
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbourhood_rs::{neighbourhood::NeighbourhoodIterator, volume::VolumeCursor};
    ///
    /// let cursor = VolumeCursor::new(&[4], &[0]).unwrap();
    /// let mut iter = NeighbourhoodIterator::new(&cursor, &[5]);
    ///
    /// let first: Vec<_> = iter.positions().map(|p| p[0]).collect();
    /// let second: Vec<_> = iter.positions().map(|p| p[0]).collect();
    ///
    /// assert_eq!(first, [0, 1, 2]);
    /// assert_eq!(first, second);
    /// ```
    pub fn positions(&mut self) -> Positions<'_> {
        Positions { iter: self }
    }

    fn last(&self, axis: usize) -> isize {
        self.lower[axis] + (self.dims[axis] - 1) as isize
    }
}

impl Display for NeighbourhoodIterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "neighbourhood iterator, position {}, extent [ ", self.pos)?;
        for d in &self.dims {
            write!(f, "{d} ")?;
        }
        write!(f, "], centre [ ")?;
        for c in &self.centre {
            write!(f, "{c} ")?;
        }
        write!(f, "]")
    }
}

/// Iterator over the tuples of a [`NeighbourhoodIterator`].
#[derive(Debug)]
pub struct Positions<'a> {
    iter: &'a mut NeighbourhoodIterator,
}

impl<'a> Iterator for Positions<'a> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        if self.iter.step() {
            Some(self.iter.get_pos())
        } else {
            None
        }
    }
}

fn to_signed(x: usize) -> isize {
    isize::try_from(x).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use crate::{
        position::{Position, PositionSource},
        volume::VolumeCursor,
    };

    use super::NeighbourhoodIterator;

    struct RawSource {
        index: Vec<isize>,
        size: Vec<usize>,
    }

    impl PositionSource for RawSource {
        fn ndim(&self) -> usize {
            self.index.len()
        }

        fn index(&self, axis: usize) -> isize {
            self.index[axis]
        }

        fn size(&self, axis: usize) -> usize {
            self.size[axis]
        }
    }

    fn window(dims: &[usize], centre: &[usize], extent: &[usize]) -> NeighbourhoodIterator {
        let cursor = VolumeCursor::new(dims, centre).unwrap();
        NeighbourhoodIterator::new(&cursor, extent)
    }

    fn collect(iter: &mut NeighbourhoodIterator) -> Vec<Vec<isize>> {
        let mut tuples = Vec::new();
        while iter.step() {
            tuples.push(iter.get_pos().into_vec());
        }
        tuples
    }

    #[test]
    fn interior() {
        let mut iter = window(&[10, 10], &[5, 5], &[3, 3]);
        assert_eq!(iter.dims(), &[3, 3]);
        assert_eq!((iter.lower(0), iter.lower(1)), (4, 4));
        assert_eq!(iter.len(), 9);

        let expected = vec![
            vec![4, 4],
            vec![4, 5],
            vec![4, 6],
            vec![5, 4],
            vec![5, 5],
            vec![5, 6],
            vec![6, 4],
            vec![6, 5],
            vec![6, 6],
        ];

        let mut steps = 0;
        let mut tuples = Vec::new();
        loop {
            steps += 1;
            if !iter.step() {
                break;
            }
            tuples.push(iter.get_pos().into_vec());
        }

        assert_eq!(tuples, expected);
        assert_eq!(steps, 10);
        assert!(!iter.is_iterating());
    }

    #[test]
    fn clamp_at_origin() {
        let mut iter = window(&[10, 10], &[0, 5], &[5, 5]);
        assert_eq!(iter.half_width(0), 2);
        assert_eq!(iter.size(0), 3);
        assert_eq!(iter.extent(1), 5);
        assert_eq!(iter.lower(0), 0);
        assert_eq!(iter.lower(1), 3);

        let tuples = collect(&mut iter);
        assert_eq!(tuples.len(), 15);
        assert_eq!(tuples.first(), Some(&vec![0, 3]));
        assert_eq!(tuples.last(), Some(&vec![2, 7]));
    }

    #[test]
    fn clamp_at_far_edge() {
        let mut iter = window(&[4, 6, 3], &[3, 5, 2], &[3, 5, 7]);
        assert_eq!(iter.dims(), &[2, 3, 3]);
        assert_eq!(
            (iter.lower(0), iter.lower(1), iter.lower(2)),
            (2, 3, 0)
        );

        let tuples = collect(&mut iter);
        assert_eq!(tuples.len(), 18);
        assert!(tuples.iter().all(|t| t[0] < 4 && t[1] < 6 && t[2] < 3));
        assert_eq!(tuples.last(), Some(&vec![3, 5, 2]));
    }

    #[test]
    fn single_voxel() {
        let mut iter = window(&[7, 3], &[6, 0], &[1, 1]);
        assert_eq!(iter.dims(), &[1, 1]);

        assert!(iter.step());
        assert_eq!(iter.get_pos(), Position::from([6, 0]));
        assert!(!iter.step());
    }

    #[test]
    fn zero_extent_behaves_like_one() {
        let mut iter = window(&[5], &[2], &[0]);
        assert_eq!(iter.half_width(0), 0);
        assert_eq!(collect(&mut iter), vec![vec![2]]);
    }

    #[test]
    fn even_extent_rounds_down() {
        let iter = window(&[10], &[5], &[4]);
        assert_eq!(iter.half_width(0), 1);
        assert_eq!(iter.size(0), 3);
        assert_eq!(iter.lower(0), 4);
    }

    #[test]
    fn restart() {
        let mut iter = window(&[3, 4, 5], &[1, 0, 4], &[3, 3, 3]);
        let first = collect(&mut iter);
        let second = collect(&mut iter);

        assert_eq!(first.len(), iter.len());
        assert_eq!(first, second);
    }

    #[test]
    fn reset_touches_one_axis() {
        let mut iter = window(&[10, 10, 10], &[5, 5, 5], &[3, 3, 3]);
        for _ in 0..14 {
            assert!(iter.step());
        }
        assert_eq!(iter.get_pos(), Position::from([5, 5, 5]));

        iter.reset(1);
        assert_eq!(iter.get_pos(), Position::from([5, 4, 5]));
        assert!(iter.is_iterating());

        assert!(iter.step());
        assert_eq!(iter.get_pos(), Position::from([5, 4, 6]));
    }

    #[test]
    fn jump_through_cursor() {
        let mut iter = window(&[10, 10], &[5, 5], &[3, 3]);
        assert!(iter.step());

        *iter.index_mut(0) = 6;
        iter.set_index(1, 5);
        assert!(iter.step());
        assert_eq!(iter.get_pos(), Position::from([6, 6]));
        assert!(!iter.step());
    }

    #[test]
    fn cursor_at_signed_limit_carries() {
        let mut iter = window(&[10, 10], &[5, 5], &[3, 3]);
        assert!(iter.step());

        iter.set_index(1, isize::MAX);
        assert!(iter.step());
        assert_eq!(iter.get_pos(), Position::from([5, 4]));

        iter.set_index(0, isize::MAX);
        iter.set_index(1, isize::MAX);
        assert!(!iter.step());
        assert_eq!(iter.get_pos(), Position::from([4, 4]));
        assert!(iter.step());
    }

    #[test]
    fn idle_step_resets_cursor() {
        let mut iter = window(&[10, 10], &[5, 5], &[3, 3]);
        iter.set_index(0, 9);
        iter.set_index(1, 0);

        assert!(iter.step());
        assert_eq!(iter.position(), &Position::from([4, 4]));
    }

    #[test]
    fn zero_dimensional() {
        let source = RawSource {
            index: vec![],
            size: vec![],
        };
        let mut iter = NeighbourhoodIterator::new(&source, &[]);
        assert_eq!(iter.len(), 1);
        assert!(iter.step());
        assert!(!iter.step());
        assert!(iter.step());
    }

    #[test]
    fn centre_outside_array() {
        let source = RawSource {
            index: vec![-3, 2],
            size: vec![5, 5],
        };
        let mut iter = NeighbourhoodIterator::new(&source, &[3, 3]);
        assert_eq!(iter.size(0), 0);
        assert!(iter.is_empty());
        assert!(!iter.step());
        assert!(!iter.is_iterating());
    }

    #[test]
    fn signed_lower_bound() {
        let source = RawSource {
            index: vec![1],
            size: vec![100],
        };
        let iter = NeighbourhoodIterator::new(&source, &[9]);
        assert_eq!(iter.lower(0), 0);
        assert_eq!(iter.size(0), 6);
        assert_eq!(iter.centre(0), 1);
    }

    #[test]
    fn centre_at_signed_limit() {
        let source = RawSource {
            index: vec![isize::MAX],
            size: vec![usize::MAX],
        };
        let mut iter = NeighbourhoodIterator::new(&source, &[3]);
        assert_eq!(iter.centre(0), isize::MAX);
        assert_eq!(iter.lower(0), isize::MAX - 1);
        assert_eq!(iter.size(0), 2);

        let tuples: Vec<_> = iter.positions().map(|p| p[0]).collect();
        assert_eq!(tuples, [isize::MAX - 1, isize::MAX]);
    }

    #[test]
    #[should_panic]
    fn extent_length_mismatch() {
        let cursor = VolumeCursor::new(&[4, 4], &[1, 1]).unwrap();
        NeighbourhoodIterator::new(&cursor, &[3]);
    }

    #[test]
    fn display() {
        let mut iter = window(&[10, 10], &[0, 5], &[5, 5]);
        assert!(iter.step());
        assert!(iter.step());

        assert_eq!(
            iter.to_string(),
            "neighbourhood iterator, position [ 0 4 ], extent [ 3 5 ], centre [ 0 5 ]"
        );
    }

    #[test]
    fn positions_resume_mid_cycle() {
        let mut iter = window(&[5, 5], &[2, 2], &[3, 3]);
        assert!(iter.step());
        assert!(iter.step());

        let rest: Vec<_> = iter.positions().collect();
        assert_eq!(rest.len(), 7);
        assert_eq!(rest[0], Position::from([1, 3]));
        assert_eq!(iter.positions().count(), 9);
    }
}
