use super::*;
use std::ops::{Add, Div, Index, IndexMut, Mul, Sub};

// ---- Indexing for the CoorND types ----

macro_rules! coord_indexing {
    ($type:ty) => {
        impl Index<usize> for $type {
            type Output = f64;
            fn index(&self, i: usize) -> &Self::Output {
                &self.0[i]
            }
        }

        impl IndexMut<usize> for $type {
            fn index_mut(&mut self, i: usize) -> &mut Self::Output {
                &mut self.0[i]
            }
        }
    };
}

coord_indexing!(Coor2D);
coord_indexing!(Coor3D);
coord_indexing!(Coor4D);

// ---- Vector space operators for the CoorND types ----

// Generate the element-wise operator $op for $type
macro_rules! coord_operator {
    ($type:ident, $op:ident, $function:ident, $symbol:tt) => {
        impl $op for $type {
            type Output = Self;
            fn $function(self, other: Self) -> Self {
                let mut res = self;
                for (r, o) in res.0.iter_mut().zip(other.0.iter()) {
                    *r = *r $symbol *o;
                }
                res
            }
        }

        impl $op<&$type> for $type {
            type Output = Self;
            fn $function(self, other: &Self) -> Self {
                self $symbol *other
            }
        }
    };
}

macro_rules! all_coord_operators {
    ($type:ident) => {
        coord_operator!($type, Add, add, +);
        coord_operator!($type, Sub, sub, -);
        coord_operator!($type, Mul, mul, *);
        coord_operator!($type, Div, div, /);
    };
}

all_coord_operators!(Coor2D);
all_coord_operators!(Coor3D);
all_coord_operators!(Coor4D);

/// CoordinateTuple is the atomic spatial referencing element. So loosely
/// speaking, a [CoordinateSet] is a collection of CoordinateTuples.
///
/// All accessors have default implementations, except the 3 methods
/// [`nth_unchecked()`](Self::nth_unchecked()),
/// [`set_nth_unchecked()`](Self::set_nth_unchecked) and
/// [`dim()`](Self::dim()),
/// which must be provided by the implementer.
///
/// When accessing dimensions outside of the domain of the CoordinateTuple,
/// [NaN](f64::NAN) will be returned.
pub trait CoordinateTuple {
    /// Construct a new `CoordinateTuple`, with all elements set to `fill`
    fn new(fill: f64) -> Self;

    /// Access the n'th (0-based) element of the CoordinateTuple.
    /// May panic if n >= DIMENSION.
    fn nth_unchecked(&self, n: usize) -> f64;

    /// Replace the n'th (0-based) element of the `CoordinateTuple` with `value`.
    /// May panic if `n >=` [`dim()`](Self::dim()).
    fn set_nth_unchecked(&mut self, n: usize, value: f64);

    /// Native dimension of the coordinate tuple
    fn dim(&self) -> usize;

    /// Access the n'th (0-based) element of the CoordinateTuple.
    /// Returns NaN if `n >= DIMENSION`.
    fn nth(&self, n: usize) -> f64 {
        if n < self.dim() {
            self.nth_unchecked(n)
        } else {
            f64::NAN
        }
    }

    /// Pragmatically named accessor for the first element of the CoordinateTuple.
    fn x(&self) -> f64 {
        self.nth_unchecked(0)
    }

    /// Pragmatically named accessor for the second element of the CoordinateTuple.
    fn y(&self) -> f64 {
        self.nth(1)
    }

    /// Pragmatically named accessor for the third element of the CoordinateTuple.
    fn z(&self) -> f64 {
        self.nth(2)
    }

    /// Pragmatically named accessor for the fourth element of the CoordinateTuple.
    fn t(&self) -> f64 {
        self.nth(3)
    }

    /// A tuple containing the first two components of the CoordinateTuple.
    fn xy(&self) -> (f64, f64) {
        (self.x(), self.y())
    }

    /// A tuple containing the first three components of the CoordinateTuple.
    fn xyz(&self) -> (f64, f64, f64) {
        (self.x(), self.y(), self.z())
    }

    /// Fill all elements of `self` with `value`
    fn fill(&mut self, value: f64) {
        for n in 0..self.dim() {
            self.set_nth_unchecked(n, value);
        }
    }

    /// Replace the two first elements of the `CoordinateTuple` with `x` and `y`.
    fn set_xy(&mut self, x: f64, y: f64) {
        self.set_nth_unchecked(0, x);
        self.set_nth_unchecked(1, y);
    }

    /// Replace the `N` first (up to [`dim()`](Self::dim())) elements of `self` with the
    /// elements of `value`
    fn update(&mut self, value: &[f64]) {
        let n = value.len().min(self.dim());
        for (i, v) in value.iter().take(n).enumerate() {
            self.set_nth_unchecked(i, *v)
        }
    }

    /// Euclidean distance between two points in the 2D plane.
    ///
    /// Primarily used to compute the distance between two projected points
    /// in their projected plane. Typically, this distance will differ from
    /// the actual distance in the real world.
    ///
    /// ```
    /// use geotrans::prelude::*;
    /// let t = 1000 as f64;
    /// let p0 = Coor2D::origin();
    /// let p1 = Coor2D::raw(t, t);
    /// assert_eq!(p0.hypot2(&p1), t.hypot(t));
    /// ```
    #[must_use]
    fn hypot2(&self, other: &Self) -> f64
    where
        Self: Sized,
    {
        let (u, v) = self.xy();
        let (x, y) = other.xy();
        (u - x).hypot(v - y)
    }

    /// Euclidean distance between two points in the 3D space, e.g.
    /// geocentric cartesian coordinates. NaN for 2D tuples.
    #[must_use]
    fn hypot3(&self, other: &Self) -> f64
    where
        Self: Sized,
    {
        if self.dim() < 3 {
            return f64::NAN;
        }
        let (u, v, w) = self.xyz();
        let (x, y, z) = other.xyz();
        (u - x).hypot(v - y).hypot(w - z)
    }
}

macro_rules! coordinate_tuple {
    ($type:ident, $dim:expr) => {
        impl CoordinateTuple for $type {
            fn new(fill: f64) -> Self {
                $type([fill; $dim])
            }

            fn dim(&self) -> usize {
                $dim
            }

            fn nth_unchecked(&self, n: usize) -> f64 {
                self.0[n]
            }

            fn set_nth_unchecked(&mut self, n: usize, value: f64) {
                self.0[n] = value;
            }
        }
    };
}

coordinate_tuple!(Coor2D, 2);
coordinate_tuple!(Coor3D, 3);
coordinate_tuple!(Coor4D, 4);

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let c = Coor2D::raw(1., 2.);
        assert_eq!(c.xy(), (1., 2.));
        assert!(c.z().is_nan());
        assert!(c.hypot3(&c).is_nan());

        let mut d = Coor4D::new(0.);
        d.update(&[1., 2., 3.]);
        assert_eq!(d, Coor4D::raw(1., 2., 3., 0.));
        d.set_xy(5., 6.);
        assert_eq!(d.xyz(), (5., 6., 3.));
        assert!(d.nth(7).is_nan());
    }

    #[test]
    fn operators() {
        let a = Coor3D::raw(1., 2., 3.);
        let b = Coor3D::raw(4., 3., 2.);
        assert_eq!(a + b, Coor3D::raw(5., 5., 5.));
        assert_eq!(a - &b, Coor3D::raw(-3., -1., 1.));
        assert_eq!(a * b, Coor3D::raw(4., 6., 6.));
        assert_eq!(b / a, Coor3D::raw(4., 1.5, 2. / 3.));
        assert_eq!(a.hypot3(&b), 11_f64.sqrt());
    }
}
