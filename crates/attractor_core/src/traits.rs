use nalgebra::Vector2;
use rand::Rng;

/// A point in the plane.
pub type Point = Vector2<f64>;

/// Represents an iterated function system: a finite family of planar maps.
pub trait IteratedFunctionSystem {
    /// Returns the number of maps in the family.
    fn map_count(&self) -> usize;

    /// Applies map `index` to `point`.
    /// index: must be below `map_count()`
    fn apply(&self, index: usize, point: &Point) -> Point;
}

/// A trait for sources that pick which map to apply next.
pub trait Selector {
    /// Returns the number of distinct indices this selector can produce.
    fn choice_count(&self) -> usize;

    /// Draws one index in `0..choice_count()`.
    fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize;
}

impl<T: IteratedFunctionSystem + ?Sized> IteratedFunctionSystem for &T {
    fn map_count(&self) -> usize {
        (**self).map_count()
    }

    fn apply(&self, index: usize, point: &Point) -> Point {
        (**self).apply(index, point)
    }
}

impl<T: Selector + ?Sized> Selector for &T {
    fn choice_count(&self) -> usize {
        (**self).choice_count()
    }

    fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        (**self).select(rng)
    }
}
