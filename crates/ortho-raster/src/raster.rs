use crate::error::RasterError;

/// Raster size in pixels
///
/// # Examples
///
/// ```
/// use ortho_raster::RasterSize;
///
/// let size = RasterSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterSize {
    /// Width of the raster in pixels
    pub width: usize,
    /// Height of the raster in pixels
    pub height: usize,
}

impl std::fmt::Display for RasterSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RasterSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for RasterSize {
    fn from(size: [usize; 2]) -> Self {
        RasterSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents a raster band stack with interleaved pixel data.
///
/// Data is stored row-major with shape (H, W, C), where C is the number of
/// bands known at compile time.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster<T, const C: usize> {
    size: RasterSize,
    data: Vec<T>,
}

impl<T, const C: usize> Raster<T, C>
where
    T: Copy + Send + Sync,
{
    /// Create a new raster from existing pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the raster in pixels.
    /// * `data` - The pixel data with length `width * height * C`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data length does not match the size, or the
    /// size is degenerate.
    pub fn new(size: RasterSize, data: Vec<T>) -> Result<Self, RasterError> {
        if size.width == 0 || size.height == 0 {
            return Err(RasterError::ZeroSize(size.width, size.height));
        }
        let expected = size.width * size.height * C;
        if data.len() != expected {
            return Err(RasterError::InvalidDataLength(data.len(), expected));
        }
        Ok(Self { size, data })
    }

    /// Create a raster of the given size filled with a constant value.
    pub fn from_size_val(size: RasterSize, val: T) -> Result<Self, RasterError> {
        if size.width == 0 || size.height == 0 {
            return Err(RasterError::ZeroSize(size.width, size.height));
        }
        let data = vec![val; size.width * size.height * C];
        Ok(Self { size, data })
    }

    /// The size of the raster in pixels.
    pub fn size(&self) -> RasterSize {
        self.size
    }

    /// The width of the raster in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// The height of the raster in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// The number of rows, alias of [`Raster::height`].
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// The number of columns, alias of [`Raster::width`].
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The number of bands.
    pub fn num_bands(&self) -> usize {
        C
    }

    /// The pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The pixel data as a mutable flat slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Read one pixel as a `[T; C]` band array.
    ///
    /// # Errors
    ///
    /// Returns an error if the coordinate is outside the raster.
    pub fn pixel(&self, row: usize, col: usize) -> Result<[T; C], RasterError>
    where
        T: Default,
    {
        if row >= self.size.height || col >= self.size.width {
            return Err(RasterError::PixelOutOfBounds(
                row,
                col,
                self.size.width,
                self.size.height,
            ));
        }
        let base = (row * self.size.width + col) * C;
        let mut px = [T::default(); C];
        px.copy_from_slice(&self.data[base..base + C]);
        Ok(px)
    }

    /// Consume the raster and return the underlying pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
