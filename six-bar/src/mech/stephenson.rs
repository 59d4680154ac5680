//! Position solvers of the Stephenson chains.
use super::{geo::*, Pose, SixBar};

/// Initial guess of the Stephenson II coupler angle.
pub const GAMMA_GUESS: f64 = 1.;

/// Stephenson I: the ternary input link `ACD` drives the dyad `DEB`, the
/// ternary output link `BEF` then closes the dyad `FGC`.
pub(crate) fn stephenson1(sb: &SixBar, t: f64) -> Option<Pose> {
    let SixBar { l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda, .. } = *sb;
    let a = [0.; 2];
    let b = polar(a, l1, phi);
    let c = polar(a, l2, t + alpha);
    let d = polar(a, l3, t);
    let e1 = dist(d, b);
    let e = polar(d, l5, dir(d, b) + law(e1, l5, l4));
    let theta_o = dir(b, e) - lambda;
    let f = polar(b, l6, theta_o);
    let e2 = dist(f, c);
    let g = polar(f, l9, dir(f, c) - law(e2, l9, l8));
    let mu = [law(l5, l4, e1), law(l9, l8, e2)];
    Pose::new([a, b, c, d, e, f, g], mu, theta_o)
}

/// Stephenson II: the ternary input link `ADC` carries two dyads that meet
/// on the ternary link `GEF`, whose joint `G` is bound to the ground pivot
/// `B` by the output link.
///
/// The loop has no dyadic decomposition, so the angle of `CE` is solved
/// numerically, starting from `guess`.
pub(crate) fn stephenson2(sb: &SixBar, t: f64, guess: f64) -> Option<Pose> {
    let SixBar { l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda, .. } = *sb;
    let a = [0.; 2];
    let b = polar(a, l1, phi);
    let c = polar(a, l3, t + alpha);
    let d = polar(a, l2, t);
    let chain = |gamma: f64| {
        let e = polar(c, l4, gamma);
        let e1 = dist(d, e);
        let f = polar(d, l5, dir(d, e) - law(e1, l5, l6));
        let g = polar(f, l8, dir(f, e) - lambda);
        [e, f, g]
    };
    let gamma = wrap(lm_root(|gamma| l9 - dist(b, chain(gamma)[2]), guess)?);
    let [e, f, g] = chain(gamma);
    let theta_o = dir(b, g);
    let mu = [law(l4, l6, dist(c, f)), law(l8, l9, dist(b, f))];
    Pose::new([a, b, c, d, e, f, g], mu, theta_o)
}

/// Stephenson III: the input crank `AD` drives the dyad `DFC` pivoted on the
/// ternary ground `ABC`, the ternary link `DEF` then drives the output dyad
/// `EGB`.
pub(crate) fn stephenson3(sb: &SixBar, t: f64) -> Option<Pose> {
    let SixBar { l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda, .. } = *sb;
    let a = [0.; 2];
    let b = polar(a, l1, phi);
    let c = polar(a, l2, phi + alpha);
    let d = polar(a, l3, t);
    let e1 = dist(c, d);
    let f = polar(c, l5, dir(c, d) - law(e1, l5, l4));
    let e = polar(f, l6, dir(f, d) - lambda);
    let e2 = dist(b, e);
    let theta_o = dir(b, e) - law(e2, l9, l8);
    let g = polar(b, l9, theta_o);
    let mu = [law(l5, l4, e1), law(l8, l9, e2)];
    Pose::new([a, b, c, d, e, f, g], mu, theta_o)
}
