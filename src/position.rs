//! Coordinate tuples and the sources they are read from.

use std::{
    fmt::Display,
    ops::{Deref, DerefMut, Index, IndexMut},
};

/// A position inside an n-dimensional array.
///
/// Anything exposing its dimensionality, its current coordinate and the
/// extent of the array along each axis can be used as the centre of a
/// [`NeighbourhoodIterator`](crate::neighbourhood::NeighbourhoodIterator).
pub trait PositionSource {
    /// Number of axes.
    fn ndim(&self) -> usize;

    /// Current coordinate along `axis`.
    fn index(&self, axis: usize) -> isize;

    /// Length of the array along `axis`.
    fn size(&self, axis: usize) -> usize;
}

impl<S: PositionSource + ?Sized> PositionSource for &S {
    fn ndim(&self) -> usize {
        (**self).ndim()
    }

    fn index(&self, axis: usize) -> isize {
        (**self).index(axis)
    }

    fn size(&self, axis: usize) -> usize {
        (**self).size(axis)
    }
}

/// Owned coordinate tuple.
///
/// Coordinates are signed so that offsets around a centre may be
/// expressed without wrapping at the array origin.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(Vec<isize>);

impl Position {
    /// Constructs a new `Position`.
    #[inline]
    pub fn new(coords: Vec<isize>) -> Self {
        Self(coords)
    }

    /// Constructs the origin of a `ndim`-dimensional space.
    #[inline]
    pub fn zeros(ndim: usize) -> Self {
        Self(vec![0; ndim])
    }

    /// Number of axes.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Deconstructs the `Position` into its coordinates.
    #[inline]
    pub fn into_vec(self) -> Vec<isize> {
        self.0
    }

    /// Converts the coordinates to unsigned array indices.
    ///
    /// Returns `None` if any coordinate is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbourhood_rs::position::Position;
    ///
    /// assert_eq!(Position::new(vec![1, 2]).to_indices(), Some(vec![1, 2]));
    /// assert_eq!(Position::new(vec![1, -2]).to_indices(), None);
    /// ```
    pub fn to_indices(&self) -> Option<Vec<usize>> {
        self.0.iter().map(|&c| usize::try_from(c).ok()).collect()
    }
}

impl Deref for Position {
    type Target = [isize];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Position {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Index<usize> for Position {
    type Output = isize;

    #[inline]
    fn index(&self, axis: usize) -> &Self::Output {
        &self.0[axis]
    }
}

impl IndexMut<usize> for Position {
    #[inline]
    fn index_mut(&mut self, axis: usize) -> &mut Self::Output {
        &mut self.0[axis]
    }
}

impl From<Vec<isize>> for Position {
    fn from(x: Vec<isize>) -> Self {
        Self(x)
    }
}

impl From<&[isize]> for Position {
    fn from(x: &[isize]) -> Self {
        Self(x.into())
    }
}

impl<const N: usize> From<[isize; N]> for Position {
    fn from(x: [isize; N]) -> Self {
        Self(x.into())
    }
}

impl FromIterator<isize> for Position {
    fn from_iter<I: IntoIterator<Item = isize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[ ")?;
        for c in &self.0 {
            write!(f, "{c} ")?;
        }
        write!(f, "]")
    }
}
