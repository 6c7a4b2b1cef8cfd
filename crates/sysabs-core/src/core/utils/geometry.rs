use crate::core::models::vector::LatticeVector;
use nalgebra::Vector3;

pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// `(a × b) · c`, i.e. the determinant of the matrix with rows `a`, `b`, `c`.
pub fn triple_product(a: &LatticeVector, b: &LatticeVector, c: &LatticeVector) -> i64 {
    a.cross(b)
        .iter()
        .zip(c.as_array())
        .map(|(x, y)| x * i64::from(y))
        .sum()
}

pub fn is_collinear(a: &LatticeVector, b: &LatticeVector) -> bool {
    a.cross(b) == [0; 3]
}

pub fn is_coplanar(a: &LatticeVector, b: &LatticeVector, c: &LatticeVector) -> bool {
    triple_product(a, b, c) == 0
}

pub fn angle_between_degrees(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    let cosine = u.dot(v) / (u.norm() * v.norm());
    cosine.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Distance of `x` from its nearest integer.
pub fn integer_deviation(x: f64) -> f64 {
    (x - x.round()).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(h: i32, k: i32, l: i32) -> LatticeVector {
        LatticeVector::new(h, k, l)
    }

    #[test]
    fn gcd_handles_signs_and_zero() {
        assert_eq!(gcd(12, -18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(-4, 0), 4);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn collinear_vectors_include_opposite_directions() {
        assert!(is_collinear(&v(1, 2, -1), &v(-2, -4, 2)));
        assert!(!is_collinear(&v(1, 0, 0), &v(0, 1, 0)));
        assert!(is_collinear(&v(0, 0, 0), &v(3, 1, 4)));
    }

    #[test]
    fn coplanar_detects_linear_dependence() {
        assert!(is_coplanar(&v(1, 0, -1), &v(1, -1, 0), &v(0, 1, -1)));
        assert!(!is_coplanar(&v(1, 0, -1), &v(1, -1, 0), &v(1, 1, 1)));
    }

    #[test]
    fn triple_product_matches_determinant_sign() {
        assert_eq!(triple_product(&v(1, 0, 0), &v(0, 1, 0), &v(0, 0, 1)), 1);
        assert_eq!(triple_product(&v(0, 1, 0), &v(1, 0, 0), &v(0, 0, 1)), -1);
        assert_eq!(triple_product(&v(0, 1, 0), &v(0, 0, 1), &v(2, 0, 0)), 2);
    }

    #[test]
    fn angle_between_orthogonal_axes_is_ninety() {
        let angle = angle_between_degrees(&Vector3::x(), &Vector3::y());
        assert!((angle - 90.0).abs() < 1e-12);
    }

    #[test]
    fn integer_deviation_is_distance_to_nearest_integer() {
        assert!((integer_deviation(2.1) - 0.1).abs() < 1e-12);
        assert!((integer_deviation(-0.85) - 0.15).abs() < 1e-12);
        assert_eq!(integer_deviation(3.0), 0.0);
    }
}
