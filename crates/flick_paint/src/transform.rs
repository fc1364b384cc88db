//! 2D affine transforms

use flick_core::Point;

/// 2D affine transform
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            e: x,
            f: y,
            ..Self::identity()
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Rotation by `angle` radians (clockwise on a y-down surface)
    pub fn rotate(angle: f32) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Scale around a pivot point
    pub fn scale_about(sx: f32, sy: f32, pivot: Point) -> Self {
        Self::translate(pivot.x, pivot.y)
            .concat(&Self::scale(sx, sy))
            .concat(&Self::translate(-pivot.x, -pivot.y))
    }

    /// Rotate by `degrees` around a pivot point
    pub fn rotate_about(degrees: f32, pivot: Point) -> Self {
        Self::translate(pivot.x, pivot.y)
            .concat(&Self::rotate(degrees.to_radians()))
            .concat(&Self::translate(-pivot.x, -pivot.y))
    }

    /// `self * other`: the result applies `other` first, then `self`
    pub fn concat(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_scale_about_keeps_pivot_fixed() {
        let pivot = Point::new(50.0, 50.0);
        let t = Transform2D::scale_about(2.0, 3.0, pivot);
        assert!(close(t.apply(pivot), pivot));
        assert!(close(t.apply(Point::new(60.0, 50.0)), Point::new(70.0, 50.0)));
    }

    #[test]
    fn test_rotate_about() {
        let t = Transform2D::rotate_about(90.0, Point::new(10.0, 10.0));
        // y-down: +90 degrees turns +x into +y
        assert!(close(t.apply(Point::new(20.0, 10.0)), Point::new(10.0, 20.0)));
    }

    #[test]
    fn test_concat_order() {
        let t = Transform2D::translate(5.0, 0.0).concat(&Transform2D::scale(2.0, 2.0));
        // scale first, then translate
        assert!(close(t.apply(Point::new(1.0, 1.0)), Point::new(7.0, 2.0)));
        assert!(Transform2D::default().is_identity());
    }
}
