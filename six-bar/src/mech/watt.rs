//! Position solvers of the Watt chains.
use super::{geo::*, Pose, SixBar};

/// Watt I: the input crank `AC` drives the ternary coupler `CDE`, the
/// ternary output link `BDG` closes the first loop and the dyad `EFG` closes
/// the second one.
pub(crate) fn watt1(sb: &SixBar, t: f64) -> Option<Pose> {
    let SixBar { l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda, .. } = *sb;
    let a = [0.; 2];
    let b = polar(a, l1, phi);
    let c = polar(a, l2, t);
    let e1 = dist(c, b);
    let delta = dir(c, b) + law(l3, e1, l4);
    let d = polar(c, l3, delta);
    let e = polar(c, l5, delta + alpha);
    let theta_o = dir(b, d) - lambda;
    let g = polar(b, l6, theta_o);
    let e2 = dist(g, e);
    let f = polar(g, l9, dir(g, e) - law(l9, e2, l8));
    let mu = [law(l4, l3, e1), law(l8, l9, e2)];
    Pose::new([a, b, c, d, e, f, g], mu, theta_o)
}

/// Watt II: the input crank `AD` drives the dyad `DEC` pivoted on the
/// ternary ground `ABC`, then the ternary link `CEF` drives the output dyad
/// `FGB`.
pub(crate) fn watt2(sb: &SixBar, t: f64) -> Option<Pose> {
    let SixBar { l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda, .. } = *sb;
    let a = [0.; 2];
    let b = polar(a, l1, phi);
    let c = polar(a, l2, phi + alpha);
    let d = polar(a, l3, t);
    let x1 = dist(d, c);
    let e = polar(d, l4, dir(d, c) + law(l4, x1, l5));
    let f = polar(c, l6, dir(c, e) - lambda);
    let x2 = dist(b, f);
    let theta_o = dir(b, f) - law(x2, l9, l8);
    let g = polar(b, l9, theta_o);
    let mu = [law(l4, l5, x1), law(l8, l9, x2)];
    Pose::new([a, b, c, d, e, f, g], mu, theta_o)
}
