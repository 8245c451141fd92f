use super::*;

/// A row-major batch of coordinates, one point per row, with 2 or 3
/// columns: (longitude, latitude[, height]) for geographic coordinates,
/// (x, y[, z]) for projected or geocentric.
///
/// Integral input is converted to `f64` on construction, so integral
/// coordinates are never truncated by the computations.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateBatch {
    values: Vec<f64>,
    dim: usize,
}

impl CoordinateBatch {
    /// A batch from a flat, row-major, vector of `values`, with `dim` columns
    pub fn new(values: Vec<f64>, dim: usize) -> Result<CoordinateBatch, Error> {
        check_dim(dim)?;
        if values.len() % dim != 0 {
            return Err(Error::Shape {
                expected: "a whole number of rows",
                found: values.len(),
            });
        }
        Ok(CoordinateBatch { values, dim })
    }

    /// A batch from a slice of rows
    pub fn from_rows<T: CoordinateValue, const N: usize>(
        rows: &[[T; N]],
    ) -> Result<CoordinateBatch, Error> {
        check_dim(N)?;
        let values = rows.iter().flatten().map(|&v| v.to_f64()).collect();
        Ok(CoordinateBatch { values, dim: N })
    }

    /// A batch of a single point
    pub fn from_point<T: CoordinateValue>(point: &[T]) -> Result<CoordinateBatch, Error> {
        check_dim(point.len())?;
        let values = point.iter().map(|&v| v.to_f64()).collect();
        Ok(CoordinateBatch {
            values,
            dim: point.len(),
        })
    }

    /// The `index`th row
    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index * self.dim..(index + 1) * self.dim]
    }

    /// Iterate over the rows
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(self.dim)
    }

    /// The flat, row-major, vector of values
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

/// The numeric types accepted as input to a [CoordinateBatch]
pub trait CoordinateValue: Copy {
    fn to_f64(self) -> f64;
}

// Wide integers beyond 2⁵³ round to the nearest representable f64
macro_rules! coordinate_value {
    ($($type:ty),+) => {
        $(
            impl CoordinateValue for $type {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )+
    };
}

coordinate_value!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

fn check_dim(dim: usize) -> Result<(), Error> {
    if dim == 2 || dim == 3 {
        return Ok(());
    }
    Err(Error::Shape {
        expected: "2 or 3 columns",
        found: dim,
    })
}

impl CoordinateSet for CoordinateBatch {
    fn len(&self) -> usize {
        self.values.len() / self.dim
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn get_coord(&self, index: usize) -> Coor4D {
        let mut coord = Coor4D([0., 0., 0., f64::NAN]);
        coord.update(self.row(index));
        coord
    }

    fn set_coord(&mut self, index: usize, value: &Coor4D) {
        let dim = self.dim;
        self.values[index * dim..(index + 1) * dim].copy_from_slice(&value.0[..dim]);
    }

    fn xy(&self, index: usize) -> (f64, f64) {
        let i = index * self.dim;
        (self.values[i], self.values[i + 1])
    }

    fn set_xy(&mut self, index: usize, x: f64, y: f64) {
        let i = index * self.dim;
        self.values[i] = x;
        self.values[i + 1] = y;
    }
}

// ----- Tests ---------------------------------------------------------------------
