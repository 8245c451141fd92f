use super::*;

/// `CoordinateSet` is the fundamental coordinate access interface of the
/// engine. Strictly speaking, it is not a set, but (in abstract terms) rather
/// an indexed list, or (in more concrete terms): An array.
///
/// Here it is implemented simply as an accessor trait, that allows us to
/// access any user provided data model by iterating over its elements,
/// represented as a `Coor4D`
pub trait CoordinateSet {
    /// Number of coordinate tuples in the set
    fn len(&self) -> usize;

    /// Native dimension of the underlying coordinates (they will always be
    /// returned by [`Self::get_coord()`] as converted to [`Coor4D`])
    fn dim(&self) -> usize;

    /// Access the `index`th coordinate tuple
    fn get_coord(&self, index: usize) -> Coor4D;

    /// Overwrite the `index`th coordinate tuple. Elements beyond the
    /// native dimension are ignored
    fn set_coord(&mut self, index: usize, value: &Coor4D);

    /// Companion to `len()`
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Access the two first elements of the `index`th `CoordinateTuple`.
    fn xy(&self, index: usize) -> (f64, f64) {
        self.get_coord(index).xy()
    }

    /// Replace the two first elements of the `index`th `CoordinateTuple`
    /// with `x` and `y`.
    fn set_xy(&mut self, index: usize, x: f64, y: f64) {
        let mut coord = self.get_coord(index);
        coord[0] = x;
        coord[1] = y;
        self.set_coord(index, &coord);
    }

    /// Set all coordinate tuples in the set to NaN
    fn stomp(&mut self) {
        let nanny = Coor4D::nan();
        for i in 0..self.len() {
            self.set_coord(i, &nanny);
        }
    }
}

// Some helper macros, simplifying the macros for the actual data types

// Produce the correct len() method for arrays, slices, and vecs
macro_rules! length {
    (array) => {
        fn len(&self) -> usize {
            N
        }
    };

    (slice) => {
        fn len(&self) -> usize {
            (**self).len()
        }
    };

    (vec) => {
        fn len(&self) -> usize {
            self.len()
        }
    };
}

// ----- CoordinateSet implementations for some Coor2D containers ------------

/// The CoordinateSet implementations for Coor2D return `0` and `f64::NAN`
/// as third and fourth coordinate value in `get_coord()`: The `0` as the
/// third coordinate will make transformations behave as if the points
/// are placed immediately on the reference ellipsoid, `h==0`.
macro_rules! coordinate_set_impl_for_coor2d {
    ($kind:ident) => {
        length!($kind);

        fn dim(&self) -> usize {
            2
        }

        fn get_coord(&self, index: usize) -> Coor4D {
            Coor4D([self[index][0], self[index][1], 0., f64::NAN])
        }

        fn set_coord(&mut self, index: usize, value: &Coor4D) {
            self[index] = Coor2D([value[0], value[1]]);
        }

        fn xy(&self, index: usize) -> (f64, f64) {
            self[index].xy()
        }

        fn set_xy(&mut self, index: usize, x: f64, y: f64) {
            self[index].set_xy(x, y);
        }
    };
}

impl<const N: usize> CoordinateSet for [Coor2D; N] {
    coordinate_set_impl_for_coor2d!(array);
}

impl CoordinateSet for &mut [Coor2D] {
    coordinate_set_impl_for_coor2d!(slice);
}

impl CoordinateSet for Vec<Coor2D> {
    coordinate_set_impl_for_coor2d!(vec);
}

// ----- CoordinateSet implementations for some Coor3D containers ------------

macro_rules! coordinate_set_impl_for_coor3d {
    ($kind:ident) => {
        length!($kind);

        fn dim(&self) -> usize {
            3
        }

        fn get_coord(&self, index: usize) -> Coor4D {
            Coor4D([self[index][0], self[index][1], self[index][2], f64::NAN])
        }

        fn set_coord(&mut self, index: usize, value: &Coor4D) {
            self[index] = Coor3D([value[0], value[1], value[2]]);
        }

        fn xy(&self, index: usize) -> (f64, f64) {
            self[index].xy()
        }

        fn set_xy(&mut self, index: usize, x: f64, y: f64) {
            self[index].set_xy(x, y);
        }
    };
}

impl<const N: usize> CoordinateSet for [Coor3D; N] {
    coordinate_set_impl_for_coor3d!(array);
}

impl CoordinateSet for &mut [Coor3D] {
    coordinate_set_impl_for_coor3d!(slice);
}

impl CoordinateSet for Vec<Coor3D> {
    coordinate_set_impl_for_coor3d!(vec);
}

// ----- CoordinateSet implementations for some Coor4D containers ------------

macro_rules! coordinate_set_impl_for_coor4d {
    ($kind:ident) => {
        length!($kind);

        fn dim(&self) -> usize {
            4
        }

        fn get_coord(&self, index: usize) -> Coor4D {
            self[index]
        }

        fn set_coord(&mut self, index: usize, value: &Coor4D) {
            self[index] = *value;
        }

        fn xy(&self, index: usize) -> (f64, f64) {
            self[index].xy()
        }

        fn set_xy(&mut self, index: usize, x: f64, y: f64) {
            self[index].set_xy(x, y);
        }
    };
}

impl<const N: usize> CoordinateSet for [Coor4D; N] {
    coordinate_set_impl_for_coor4d!(array);
}

impl CoordinateSet for &mut [Coor4D] {
    coordinate_set_impl_for_coor4d!(slice);
}

impl CoordinateSet for Vec<Coor4D> {
    coordinate_set_impl_for_coor4d!(vec);
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrays_slices_and_vecs() {
        let mut operands = [Coor2D::raw(1., 2.), Coor2D::raw(3., 4.)];
        assert_eq!(operands.len(), 2);
        assert_eq!(CoordinateSet::dim(&operands), 2);
        assert_eq!(operands.get_coord(1)[1], 4.);
        assert_eq!(operands.get_coord(1)[2], 0.);
        operands.set_coord(0, &Coor4D::raw(5., 6., 7., 8.));
        assert_eq!(operands[0], Coor2D::raw(5., 6.));

        let mut vec = vec![Coor3D::raw(1., 2., 3.)];
        vec.set_xy(0, 9., 8.);
        assert_eq!(vec[0], Coor3D::raw(9., 8., 3.));

        let mut slice = &mut vec[..];
        slice.stomp();
        assert!(vec[0][2].is_nan());

        let mut scratch = vec![Coor4D::raw(1., 2., 3., 4.)];
        assert_eq!(CoordinateSet::dim(&scratch), 4);
        scratch.set_coord(0, &Coor4D::raw(5., 6., 7., 8.));
        assert_eq!(scratch.get_coord(0)[3], 8.);
    }
}
