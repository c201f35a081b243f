//! Items stored in replay buffers.
//!
//! A buffer never interprets the content of its items; it only requires that
//! every item it stores has the shape established by the template passed to
//! init. Scalars cover the common case, and [`PaddedVec`] normalizes
//! variable-length data to a fixed width so it can live in fixed-shape
//! storage.
use crate::error::ReplayError;
use anyhow::Result;
use std::fmt;

/// Shape of an item, as the sizes of its dimensions.
///
/// Scalars have rank 0 and the empty shape `[]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemShape(Vec<usize>);

impl ItemShape {
    /// Creates a shape from dimension sizes.
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    /// The shape of a scalar item.
    pub fn scalar() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of dimensions.
    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// Returns the dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for ItemShape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl fmt::Display for ItemShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dim)?;
        }
        write!(f, "]")
    }
}

/// An experience item with a fixed shape.
///
/// Items are opaque to the buffers: they are cloned into storage on add and
/// cloned out on sample. The shape must be a pure function of the value so
/// that the shape established at init can be checked on every add.
pub trait Item: Clone + fmt::Debug {
    /// Returns the shape of the item.
    fn shape(&self) -> ItemShape;
}

macro_rules! scalar_item {
    ($ty:ty) => {
        impl Item for $ty {
            fn shape(&self) -> ItemShape {
                ItemShape::scalar()
            }
        }
    };
}

scalar_item!(f32);
scalar_item!(f64);
scalar_item!(i32);
scalar_item!(i64);

/// A rank-1 `f32` record normalized to a fixed width.
///
/// This is the codec for variable-length inputs: [`PaddedVec::padded`]
/// right-pads with zeros up to the width the buffer is initialized with, so
/// every stored record shares one shape. The conversion is pure and keeps no
/// state of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct PaddedVec {
    data: Vec<f32>,
}

impl PaddedVec {
    /// Creates a record holding `values` padded with zeros to `width` elements.
    ///
    /// Fails with [`ReplayError::ShapeMismatch`] if `values` has more than
    /// `width` elements; padding never drops data.
    pub fn padded(values: &[f32], width: usize) -> Result<Self> {
        if values.len() > width {
            return Err(ReplayError::ShapeMismatch {
                expected: ItemShape::new(vec![width]),
                found: ItemShape::new(vec![values.len()]),
            }
            .into());
        }
        let mut data = values.to_vec();
        data.resize(width, 0.0);
        Ok(Self { data })
    }

    /// Returns the elements, padding included.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Returns the fixed width of the record.
    pub fn width(&self) -> usize {
        self.data.len()
    }
}

impl From<Vec<f32>> for PaddedVec {
    fn from(data: Vec<f32>) -> Self {
        Self { data }
    }
}

impl Item for PaddedVec {
    fn shape(&self) -> ItemShape {
        ItemShape::new(vec![self.data.len()])
    }
}
