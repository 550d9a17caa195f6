#![forbid(unsafe_code)]

//! Geometric primitives in content-space points.
//!
//! All values are `f64`. Sizes and insets are expected to be non-negative and
//! finite; use [`Size::sanitized`] / [`EdgeInsets::sanitized`] on untrusted input.

use std::ops::{Add, AddAssign, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Replace NaN/infinite/negative values with zero.
#[inline]
fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Axis
// ---------------------------------------------------------------------------

/// One of the two scroll axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The other axis.
    #[inline]
    pub const fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position, e.g. a content offset (top-left of the visible rectangle).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[inline]
    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Replace the component along `axis`.
    #[inline]
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Horizontal => self.x = value,
            Axis::Vertical => self.y = value,
        }
    }

    /// Copy with the component along `axis` replaced.
    #[inline]
    #[must_use]
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        self.set(axis, value);
        self
    }

    /// Component-wise clamp into `[min, max]`.
    ///
    /// `max` is raised to `min` where it is smaller, so this never panics.
    #[must_use]
    pub fn clamp(self, min: Point, max: Point) -> Point {
        Point {
            x: self.x.clamp(min.x, max.x.max(min.x)),
            y: self.y.clamp(min.y, max.y.max(min.y)),
        }
    }

    /// Vector from `other` to `self`.
    #[inline]
    pub fn delta_from(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }

    /// Whether both components are within `epsilon` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<Vector> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Vector;

    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        self.delta_from(rhs)
    }
}

// ---------------------------------------------------------------------------
// Vector
// ---------------------------------------------------------------------------

/// A displacement in content-offset space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    /// No displacement.
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component along `axis`.
    #[inline]
    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Copy keeping only the component along `axis`.
    #[inline]
    #[must_use]
    pub fn only(self, axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Vector::new(self.x, 0.0),
            Axis::Vertical => Vector::new(0.0, self.y),
        }
    }

    /// Whether both components are exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Zero size.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent along `axis`.
    #[inline]
    pub const fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Copy with the extent along `axis` replaced.
    #[inline]
    #[must_use]
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::Horizontal => self.width = value,
            Axis::Vertical => self.height = value,
        }
        self
    }

    /// Whether either extent is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Replace negative or non-finite extents with zero.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Size::new(non_negative(self.width), non_negative(self.height))
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle: origin at top-left, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from its components.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rectangle from an origin and size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::from_origin_size(Point::ZERO, size)
    }

    /// Leading edge along `axis`.
    #[inline]
    pub const fn min(&self, axis: Axis) -> f64 {
        self.origin.get(axis)
    }

    /// Trailing edge along `axis`.
    #[inline]
    pub fn max(&self, axis: Axis) -> f64 {
        self.origin.get(axis) + self.size.get(axis)
    }

    /// Whether the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Whether `other` lies entirely within `self` (edges inclusive).
    pub fn contains_rect(&self, other: &Rect) -> bool {
        Axis::BOTH
            .iter()
            .all(|&axis| other.min(axis) >= self.min(axis) && other.max(axis) <= self.max(axis))
    }

    /// Compute the intersection with another rectangle, returning `None` if
    /// they don't overlap.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.origin.x.max(other.origin.x);
        let y = self.origin.y.max(other.origin.y);
        let right = self.max(Axis::Horizontal).min(other.max(Axis::Horizontal));
        let bottom = self.max(Axis::Vertical).min(other.max(Axis::Vertical));

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Non-overlapping rectangles yield an empty rectangle positioned at the
    /// clamped corner, so the origin stays meaningful for reporting.
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_else(|| {
            let x = self
                .origin
                .x
                .clamp(other.origin.x, other.max(Axis::Horizontal).max(other.origin.x));
            let y = self
                .origin
                .y
                .clamp(other.origin.y, other.max(Axis::Vertical).max(other.origin.y));
            Rect::new(x, y, 0.0, 0.0)
        })
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.origin.x.min(other.origin.x);
        let y = self.origin.y.min(other.origin.y);
        let right = self.max(Axis::Horizontal).max(other.max(Axis::Horizontal));
        let bottom = self.max(Axis::Vertical).max(other.max(Axis::Vertical));
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Shrink by the given insets. Extents never go negative.
    pub fn inset_by(&self, insets: EdgeInsets) -> Rect {
        Rect::new(
            self.origin.x + insets.left,
            self.origin.y + insets.top,
            (self.size.width - insets.left - insets.right).max(0.0),
            (self.size.height - insets.top - insets.bottom).max(0.0),
        )
    }
}

// ---------------------------------------------------------------------------
// EdgeInsets
// ---------------------------------------------------------------------------

/// Insets for content and indicator padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl EdgeInsets {
    /// No insets.
    pub const ZERO: EdgeInsets = EdgeInsets {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    /// Create insets with specific values.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Equal insets on every edge.
    pub const fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Leading inset along `axis` (left or top).
    #[inline]
    pub const fn leading(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }

    /// Trailing inset along `axis` (right or bottom).
    #[inline]
    pub const fn trailing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.right,
            Axis::Vertical => self.bottom,
        }
    }

    /// Sum of leading and trailing along `axis`.
    #[inline]
    pub fn sum(&self, axis: Axis) -> f64 {
        self.leading(axis) + self.trailing(axis)
    }

    /// Clamp every edge to a finite, non-negative value.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self::new(
            non_negative(self.top),
            non_negative(self.left),
            non_negative(self.bottom),
            non_negative(self.right),
        )
    }
}

impl From<f64> for EdgeInsets {
    fn from(value: f64) -> Self {
        Self::all(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_axis_accessors() {
        let mut p = Point::new(3.0, 4.0);
        assert_eq!(p.get(Axis::Horizontal), 3.0);
        assert_eq!(p.get(Axis::Vertical), 4.0);
        p.set(Axis::Vertical, 9.0);
        assert_eq!(p, Point::new(3.0, 9.0));
        assert_eq!(p.with(Axis::Horizontal, 1.0), Point::new(1.0, 9.0));
    }

    #[test]
    fn point_clamp_handles_inverted_bounds() {
        let p = Point::new(50.0, -10.0);
        let clamped = p.clamp(Point::new(0.0, 0.0), Point::new(-5.0, 100.0));
        // max.x < min.x collapses to min.x
        assert_eq!(clamped, Point::new(0.0, 0.0));
    }

    #[test]
    fn point_vector_arithmetic() {
        let p = Point::new(1.0, 2.0) + Vector::new(3.0, -1.0);
        assert_eq!(p, Point::new(4.0, 1.0));
        assert_eq!(p - Point::new(1.0, 1.0), Vector::new(3.0, 0.0));
        assert_eq!(-Vector::new(1.0, -2.0), Vector::new(-1.0, 2.0));
    }

    #[test]
    fn vector_only_keeps_one_axis() {
        let v = Vector::new(5.0, 7.0);
        assert_eq!(v.only(Axis::Horizontal), Vector::new(5.0, 0.0));
        assert_eq!(v.only(Axis::Vertical), Vector::new(0.0, 7.0));
    }

    #[test]
    fn size_sanitized_replaces_invalid() {
        let s = Size::new(-4.0, f64::NAN).sanitized();
        assert_eq!(s, Size::ZERO);
        assert!(s.is_empty());
        assert_eq!(Size::new(f64::INFINITY, 3.0).sanitized(), Size::new(0.0, 3.0));
    }

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.min(Axis::Horizontal), 10.0);
        assert_eq!(r.max(Axis::Horizontal), 40.0);
        assert_eq!(r.min(Axis::Vertical), 20.0);
        assert_eq!(r.max(Axis::Vertical), 60.0);
    }

    #[test]
    fn rect_contains_rect_inclusive_edges() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&outer));
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 90.0, 90.0)));
        assert!(!outer.contains_rect(&Rect::new(10.0, 10.0, 91.0, 10.0)));
        assert!(!outer.contains_rect(&Rect::new(-1.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn rect_intersection_overlaps() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert_eq!(a.intersection(&b), Rect::new(2.0, 2.0, 2.0, 2.0));
    }

    #[test]
    fn rect_intersection_no_overlap_is_empty() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(3.0, 3.0, 2.0, 2.0);
        assert_eq!(a.intersection_opt(&b), None);
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn rect_union_basic() {
        let a = Rect::new(0.0, 0.0, 5.0, 5.0);
        let b = Rect::new(3.0, 3.0, 5.0, 5.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 8.0, 8.0));
    }

    #[test]
    fn rect_inset_by_large_insets_clamps_to_zero() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = r.inset_by(EdgeInsets::all(20.0));
        assert_eq!(inner.size, Size::ZERO);
    }

    #[test]
    fn rect_inset_by_asymmetric() {
        let r = Rect::new(0.0, 0.0, 20.0, 20.0);
        let inner = r.inset_by(EdgeInsets::new(2.0, 5.0, 4.0, 3.0));
        assert_eq!(inner, Rect::new(5.0, 2.0, 12.0, 14.0));
    }

    #[test]
    fn insets_axis_accessors() {
        let insets = EdgeInsets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.leading(Axis::Vertical), 1.0);
        assert_eq!(insets.trailing(Axis::Vertical), 3.0);
        assert_eq!(insets.sum(Axis::Horizontal), 6.0);
    }

    #[test]
    fn insets_sanitized_clamps_negative() {
        let insets = EdgeInsets::new(-1.0, 2.0, f64::NAN, 4.0).sanitized();
        assert_eq!(insets, EdgeInsets::new(0.0, 2.0, 0.0, 4.0));
    }

    #[test]
    fn axis_cross() {
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
        assert_eq!(Axis::Vertical.cross(), Axis::Horizontal);
    }
}
