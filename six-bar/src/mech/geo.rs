//! Planar geometry primitives shared by the position solvers.
use std::f64::consts::TAU;

/// Point on the plane.
pub type Coord = [f64; 2];

/// Polar offset from `p` with distance `d` and direction `a`.
#[inline]
pub(crate) fn polar(p: Coord, d: f64, a: f64) -> Coord {
    [p[0] + d * a.cos(), p[1] + d * a.sin()]
}

/// Distance between two points.
#[inline]
pub(crate) fn dist(p: Coord, q: Coord) -> f64 {
    (q[0] - p[0]).hypot(q[1] - p[1])
}

/// Direction from `p` to `q`.
#[inline]
pub(crate) fn dir(p: Coord, q: Coord) -> f64 {
    (q[1] - p[1]).atan2(q[0] - p[0])
}

/// Law of cosines: the angle between the sides `a` and `b`, opposite to `c`.
///
/// Return NaN if the triangle cannot be built.
#[inline]
pub(crate) fn law(a: f64, b: f64, c: f64) -> f64 {
    ((a * a + b * b - c * c) / (2. * a * b)).acos()
}

/// Wrap the angle into `[0, 2pi)`.
#[inline]
pub(crate) fn wrap(a: f64) -> f64 {
    a.rem_euclid(TAU)
}

/// Find a root of the scalar function `f` with the Levenberg-Marquardt
/// method, start from `x0`.
///
/// The Jacobian is taken by forward difference. Return `None` if the
/// iteration stalls before the residual vanishes.
pub(crate) fn lm_root<F>(f: F, x0: f64) -> Option<f64>
where
    F: Fn(f64) -> f64,
{
    const MAX_ITER: usize = 200;
    const TOL: f64 = 1e-12;
    const ACCEPT: f64 = 1e-7;
    let mut x = x0;
    let mut r = f(x);
    if !r.is_finite() {
        return None;
    }
    let mut damping = 1e-3;
    for _ in 0..MAX_ITER {
        if r.abs() < TOL {
            break;
        }
        let h = 1e-7 * x.abs().max(1.);
        let j = (f(x + h) - r) / h;
        if !j.is_finite() {
            break;
        }
        let step = -j * r / (j * j + damping);
        let x_new = x + step;
        let r_new = f(x_new);
        if r_new.is_finite() && r_new.abs() < r.abs() {
            x = x_new;
            r = r_new;
            damping *= 0.3;
            if step.abs() < f64::EPSILON * x.abs().max(1.) {
                break;
            }
        } else {
            damping *= 10.;
            if damping > 1e15 {
                break;
            }
        }
    }
    (r.abs() < ACCEPT).then_some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn law_of_cosines() {
        // 3-4-5 triangle
        assert_abs_diff_eq!(law(3., 4., 5.), std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert!(law(1., 1., 3.).is_nan());
    }

    #[test]
    fn root_of_cosine() {
        let x = lm_root(f64::cos, 1.).unwrap();
        assert_abs_diff_eq!(x, std::f64::consts::FRAC_PI_2, epsilon = 1e-7);
        // No root
        assert!(lm_root(|x| x * x + 1., 1.).is_none());
    }
}
