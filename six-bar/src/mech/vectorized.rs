use super::{SixBar, SixBarTy};
use std::f64::consts::TAU;

/// Number of the design variables.
pub const DIM: usize = 11;

const LEN: [f64; 2] = [5., 100.];
const ANG: [f64; 2] = [0., TAU];
// 359 degrees
const ANG_S1: [f64; 2] = [0., TAU * 359. / 360.];

/// Default search bounds of Watt I, Watt II and Stephenson II.
pub const BOUND: [[f64; 2]; DIM] = [LEN, LEN, LEN, LEN, LEN, LEN, LEN, LEN, ANG, ANG, ANG];
/// Default search bounds of Stephenson I.
pub const BOUND_S1: [[f64; 2]; DIM] =
    [LEN, LEN, LEN, LEN, LEN, LEN, LEN, LEN, ANG_S1, ANG_S1, ANG_S1];
/// Default search bounds of Stephenson III, the ground link is longer.
pub const BOUND_S3: [[f64; 2]; DIM] =
    [[30., 100.], LEN, LEN, LEN, LEN, LEN, LEN, LEN, ANG, ANG, ANG];

impl SixBarTy {
    /// Default search bounds of the design variables.
    ///
    /// The order is `l1 l2 l3 l4 l5 l6 l8 l9 phi alpha lambda`.
    pub const fn bound(&self) -> &'static [[f64; 2]; DIM] {
        match self {
            Self::StephensonI => &BOUND_S1,
            Self::StephensonIII => &BOUND_S3,
            _ => &BOUND,
        }
    }
}

impl SixBar {
    /// Create a linkage from the design variables.
    ///
    /// The order is `l1 l2 l3 l4 l5 l6 l8 l9 phi alpha lambda`.
    pub const fn from_vectorized(ty: SixBarTy, v: [f64; DIM]) -> Self {
        let [l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda] = v;
        Self { ty, l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda }
    }

    /// Create a linkage from a slice of design variables.
    ///
    /// Return `None` if the length is not [`DIM`].
    pub fn from_slice(ty: SixBarTy, xs: &[f64]) -> Option<Self> {
        Some(Self::from_vectorized(ty, xs.try_into().ok()?))
    }

    /// Turn into the design variables.
    pub const fn to_vectorized(&self) -> [f64; DIM] {
        let Self { l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda, .. } = *self;
        [l1, l2, l3, l4, l5, l6, l8, l9, phi, alpha, lambda]
    }
}
