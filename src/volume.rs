//! Volume utilities.

use std::ops::{Index, IndexMut};

use num_traits::{Float, Zero};
use thiserror::Error;

use crate::{
    position::{Position, PositionSource},
    utilities::{flatten_idx, flatten_idx_unchecked, strides_for_dims},
};

/// Multi-dimensional volume.
///
/// Elements are stored with the first axis contiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VolumeBlock<T> {
    data: Vec<T>,
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl<T: Clone> VolumeBlock<T> {
    /// Constructs a new block filled with the provided value.
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbourhood_rs::volume::VolumeBlock;
    ///
    /// let dims = [2, 2];
    /// let block = VolumeBlock::<f32>::new_fill(&dims, 1.0).unwrap();
    ///
    /// assert_eq!(block[[0usize, 0usize].as_ref()], 1.0);
    /// assert_eq!(block[[1usize, 1usize].as_ref()], 1.0);
    /// ```
    pub fn new_fill(dims: &[usize], fill: T) -> Result<Self, VolumeError> {
        let num_elements = dims.iter().product();
        let data = vec![fill; num_elements];
        Self::new_with_data(dims, data)
    }
}

impl<T: Zero + Clone> VolumeBlock<T> {
    /// Constructs a new zeroed block.
    pub fn new_zero(dims: &[usize]) -> Result<Self, VolumeError> {
        Self::new_fill(dims, T::zero())
    }
}

impl<T: Default + Clone> VolumeBlock<T> {
    /// Constructs a new block filled with the default value.
    pub fn new_default(dims: &[usize]) -> Result<Self, VolumeError> {
        Self::new_fill(dims, Default::default())
    }
}

impl<T> VolumeBlock<T> {
    /// Constructs a new block.
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbourhood_rs::volume::VolumeBlock;
    ///
    /// let dims = [2, 2];
    /// let data = vec![1.0, 2.0, 3.0, 4.0];
    /// let block = VolumeBlock::new_with_data(&dims, data).unwrap();
    ///
    /// assert_eq!(block[[0usize, 0usize].as_ref()], 1.0);
    /// assert_eq!(block[[1usize, 0usize].as_ref()], 2.0);
    /// assert_eq!(block[[0usize, 1usize].as_ref()], 3.0);
    /// assert_eq!(block[[1usize, 1usize].as_ref()], 4.0);
    /// ```
    pub fn new_with_data(dims: &[usize], data: Vec<T>) -> Result<Self, VolumeError> {
        let num_elements = dims.iter().product();

        if dims.is_empty() {
            Err(VolumeError::ZeroBlockLength)
        } else if let Some(len) = dims.iter().find(|&&len| len == 0) {
            Err(VolumeError::InvalidDimensionLength { length: *len })
        } else if num_elements != data.len() {
            Err(VolumeError::InvalidNumberOfElements {
                got: data.len(),
                required: num_elements,
            })
        } else {
            let strides = strides_for_dims(dims);

            Ok(Self {
                data,
                dims: dims.into(),
                strides,
            })
        }
    }

    /// Returns the dimensions of the block.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Returns the number of elements in the block.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`, blocks hold at least one element.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks that the data contained inside the volumes is equal
    /// apart from a specified error value.
    pub fn is_equal(&self, other: &Self, eps: T) -> bool
    where
        T: Float,
    {
        self.dims == other.dims
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(this, other)| (*this - *other).abs() < eps)
    }

    /// Returns a slice to the flat representation of the volume.
    pub fn flatten(&self) -> &[T] {
        &self.data
    }

    /// Returns a reference to the element at a signed position, or `None`
    /// if it lies outside of the block.
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbourhood_rs::{position::Position, volume::VolumeBlock};
    ///
    /// let block = VolumeBlock::new_with_data(&[2, 2], vec![1, 2, 3, 4]).unwrap();
    ///
    /// assert_eq!(block.get_at(&Position::from([1, 1])), Some(&4));
    /// assert_eq!(block.get_at(&Position::from([-1, 1])), None);
    /// assert_eq!(block.get_at(&Position::from([2, 0])), None);
    /// ```
    pub fn get_at(&self, pos: &Position) -> Option<&T> {
        if pos.ndim() != self.dims.len() {
            return None;
        }

        let index = pos.to_indices()?;
        if index.iter().zip(&self.dims).any(|(&i, &d)| i >= d) {
            return None;
        }

        self.data.get(flatten_idx_unchecked(&self.strides, &index))
    }

    /// Constructs a cursor pointing at `index` inside the block.
    pub fn cursor(&self, index: &[usize]) -> Result<VolumeCursor<'_>, VolumeError> {
        VolumeCursor::new(&self.dims, index)
    }
}

impl<T> Index<usize> for VolumeBlock<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for VolumeBlock<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T> Index<&[usize]> for VolumeBlock<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        let idx = flatten_idx(&self.dims, &self.strides, index);
        &self[idx]
    }
}

impl<T> IndexMut<&[usize]> for VolumeBlock<T> {
    fn index_mut(&mut self, index: &[usize]) -> &mut Self::Output {
        let idx = flatten_idx(&self.dims, &self.strides, index);
        &mut self[idx]
    }
}

/// Errors that can occur when constructing a [`VolumeBlock`] or a
/// [`VolumeCursor`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// Tried to construct a [`VolumeBlock`] containing no elements.
    #[error("a block length of 0 is not supported")]
    ZeroBlockLength,

    /// Tried to construct a [`VolumeBlock`] with an invalid dimension length.
    #[error("invalid length for dimension (got {length})")]
    InvalidDimensionLength {
        /// Length of the axis.
        length: usize,
    },

    /// Number of provided elements does not match with the required length.
    #[error("invalid number of elements (got {got}, required {required})")]
    InvalidNumberOfElements {
        /// Number of provided elements.
        got: usize,
        /// Number of required elements.
        required: usize,
    },

    /// The index of a cursor has the wrong number of axes.
    #[error("index has {got} axes, volume has {required}")]
    IndexDimensionMismatch {
        /// Number of axes of the index.
        got: usize,
        /// Number of axes of the volume.
        required: usize,
    },

    /// The index of a cursor lies outside of the volume.
    #[error("index {index} out of bounds for axis {axis} of length {length}")]
    IndexOutOfBounds {
        /// Offending axis.
        axis: usize,
        /// Requested index.
        index: usize,
        /// Length of the axis.
        length: usize,
    },
}

/// A position inside a volume of known dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeCursor<'a> {
    dims: &'a [usize],
    index: Vec<isize>,
}

impl<'a> VolumeCursor<'a> {
    /// Constructs a new cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use neighbourhood_rs::{position::PositionSource, volume::VolumeCursor};
    ///
    /// let cursor = VolumeCursor::new(&[10, 20], &[3, 7]).unwrap();
    /// assert_eq!(cursor.ndim(), 2);
    /// assert_eq!(cursor.index(1), 7);
    /// assert_eq!(cursor.size(1), 20);
    ///
    /// assert!(VolumeCursor::new(&[10, 20], &[3, 20]).is_err());
    /// ```
    pub fn new(dims: &'a [usize], index: &[usize]) -> Result<Self, VolumeError> {
        if dims.len() != index.len() {
            return Err(VolumeError::IndexDimensionMismatch {
                got: index.len(),
                required: dims.len(),
            });
        }

        let index = index
            .iter()
            .zip(dims)
            .enumerate()
            .map(|(axis, (&i, &length))| match isize::try_from(i) {
                Ok(signed) if i < length => Ok(signed),
                _ => Err(VolumeError::IndexOutOfBounds {
                    axis,
                    index: i,
                    length,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new_unchecked(dims, index))
    }

    /// Constructs a new cursor without validating `index` against `dims`.
    pub(crate) fn new_unchecked(dims: &'a [usize], index: Vec<isize>) -> Self {
        Self { dims, index }
    }

    /// Returns the dimensions of the volume.
    pub fn dims(&self) -> &[usize] {
        self.dims
    }
}

impl<'a> PositionSource for VolumeCursor<'a> {
    fn ndim(&self) -> usize {
        self.dims.len()
    }

    fn index(&self, axis: usize) -> isize {
        self.index[axis]
    }

    fn size(&self, axis: usize) -> usize {
        self.dims[axis]
    }
}
