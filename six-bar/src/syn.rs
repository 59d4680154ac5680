//! The function-generation synthesis of six-bar linkages.
//!
//! The design variables are the eleven values of
//! [`SixBar::to_vectorized()`]. The fitness is the sum of squared errors
//! between the achieved and the desired output angles, where a position
//! that cannot be assembled or has a transmission angle out of the band is
//! replaced by [`INFEASIBLE`].
//!
//! ```
//! use six_bar::{mh, syn, SixBarTy};
//!
//! # let gen = 1;
//! # let pop = 4;
//! let func = syn::AngleSyn::new(SixBarTy::StephensonIII, syn::Target::preset6());
//! let s = mh::Solver::build(mh::De::default(), func)
//!     .task(|ctx| ctx.gen == gen)
//!     .pop_num(pop)
//!     .solve();
//! let verify = s.func().verify(&s.func().linkage(s.as_best_xs()));
//! assert_eq!(verify.rows.len(), 6);
//! ```
use crate::*;
use std::f64::consts::FRAC_PI_2;

/// The output angle of an infeasible position.
pub const INFEASIBLE: f64 = 999_999_999_999.;
/// Default population size, fifteen times the design variables.
pub const POP_NUM: usize = 15 * DIM;
/// Default generation limit.
pub const GEN: u64 = 2000;
/// Default absolute tolerance of the fitness to stop early.
pub const ATOL: f64 = 1e-4;
/// Default tolerance of the output angle check, in degrees.
pub const TOL_DEG: f64 = 5.;
/// Default half width of the transmission angle band, in degrees.
pub const DMU_DEG: f64 = 50.;

/// Error of the target creation.
#[derive(Debug, PartialEq, Eq)]
pub enum TargetError {
    /// No pair is given
    Empty,
    /// The input and output angles have different lengths
    Length(usize, usize),
    /// Some of the angles are NaN or infinite
    NonFinite,
}

impl std::fmt::Display for TargetError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty target"),
            Self::Length(i, o) => {
                write!(f, "mismatched target: {i} input angles and {o} output angles")
            }
            Self::NonFinite => write!(f, "non-finite target angle"),
        }
    }
}

impl std::error::Error for TargetError {}

/// The desired input and output angle pairs, in radians.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Target {
    theta_i: Vec<f64>,
    theta_o: Vec<f64>,
}

impl Target {
    /// Create a target from the input angles and the desired output angles,
    /// in radians.
    pub fn new(theta_i: Vec<f64>, theta_o: Vec<f64>) -> Result<Self, TargetError> {
        if theta_i.len() != theta_o.len() {
            Err(TargetError::Length(theta_i.len(), theta_o.len()))
        } else if theta_i.is_empty() {
            Err(TargetError::Empty)
        } else if !theta_i.iter().chain(&theta_o).all(|x| x.is_finite()) {
            Err(TargetError::NonFinite)
        } else {
            Ok(Self { theta_i, theta_o })
        }
    }

    /// Create a target from the angle pairs in degrees.
    pub fn from_degrees(pairs: &[[f64; 2]]) -> Result<Self, TargetError> {
        let (theta_i, theta_o) = pairs
            .iter()
            .map(|[i, o]| (i.to_radians(), o.to_radians()))
            .unzip();
        Self::new(theta_i, theta_o)
    }

    fn from_table(table: &[[f64; 2]]) -> Self {
        let (theta_i, theta_o) = table
            .iter()
            .map(|[i, o]| (i.to_radians(), o.to_radians()))
            .unzip();
        Self { theta_i, theta_o }
    }

    /// A target of six pairs.
    pub fn preset6() -> Self {
        Self::from_table(&[
            [50., 20.],
            [71., 56.],
            [80., 59.57],
            [89., 70.17],
            [100., 80.],
            [110., 93.8],
        ])
    }

    /// A target of twenty pairs, a full-cycle oscillating output.
    pub fn preset20() -> Self {
        Self::from_table(&[
            [0.37, 14.29],
            [3.32, 15.73],
            [9.13, 18.78],
            [17.68, 23.73],
            [28.75, 30.74],
            [42.07, 39.49],
            [57.30, 48.85],
            [74.08, 56.77],
            [91.99, 60.88],
            [110.58, 59.71],
            [129.42, 53.80],
            [148.01, 45.60],
            [165.92, 38.16],
            [182.70, 33.51],
            [197.93, 31.92],
            [211.25, 32.47],
            [222.32, 33.91],
            [230.87, 35.33],
            [236.68, 36.32],
            [239.63, 36.81],
        ])
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.theta_i.len()
    }

    /// Always false for a created target.
    pub fn is_empty(&self) -> bool {
        self.theta_i.is_empty()
    }

    /// The input angles.
    pub fn theta_i(&self) -> &[f64] {
        &self.theta_i
    }

    /// The desired output angles.
    pub fn theta_o(&self) -> &[f64] {
        &self.theta_o
    }

    /// Iterate over the pairs.
    pub fn pairs(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        std::iter::zip(&self.theta_i, &self.theta_o).map(|(i, o)| [*i, *o])
    }

    /// The pairs in degrees.
    pub fn to_degrees(&self) -> Vec<[f64; 2]> {
        self.pairs().map(|p| p.map(f64::to_degrees)).collect()
    }
}

/// The allowed range of the transmission angles, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MuBand {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl Default for MuBand {
    fn default() -> Self {
        Self::new(DMU_DEG)
    }
}

impl MuBand {
    /// Create a band `90 +/- dmu` from the half width in degrees.
    pub fn new(dmu: f64) -> Self {
        let dmu = dmu.to_radians();
        Self { min: FRAC_PI_2 - dmu, max: FRAC_PI_2 + dmu }
    }

    /// Return true if the angle is in the band, including the bounds.
    pub fn contains(&self, mu: f64) -> bool {
        (self.min..=self.max).contains(&mu)
    }

    /// Return true if both transmission angles of the pose are in the band.
    pub fn check(&self, pose: &Pose) -> bool {
        pose.mu.iter().all(|mu| self.contains(*mu))
    }

    /// The bounds in degrees.
    pub fn to_degrees(&self) -> [f64; 2] {
        [self.min.to_degrees(), self.max.to_degrees()]
    }
}

/// Function-generation synthesis task of a six-bar linkage.
#[derive(Clone, Debug)]
pub struct AngleSyn {
    /// Topology of the result
    pub ty: SixBarTy,
    /// Target pairs
    pub target: Target,
    /// Transmission angle band
    pub band: MuBand,
    /// Tolerance of the output angle check, in radians
    pub tol: f64,
    bound: Vec<[f64; 2]>,
}

impl AngleSyn {
    /// Create a task with the default bounds of the topology.
    pub fn new(ty: SixBarTy, target: Target) -> Self {
        Self {
            ty,
            target,
            band: MuBand::default(),
            tol: TOL_DEG.to_radians(),
            bound: ty.bound().to_vec(),
        }
    }

    /// Set the transmission angle band.
    pub fn band(self, band: MuBand) -> Self {
        Self { band, ..self }
    }

    /// Set the tolerance of the output angle check, in degrees.
    pub fn tol_deg(self, tol: f64) -> Self {
        Self { tol: tol.to_radians(), ..self }
    }

    /// Replace the search bounds.
    ///
    /// Return `None` if the number of bounds is not [`DIM`] or any bound
    /// is reversed.
    pub fn with_bound(self, bound: &[[f64; 2]]) -> Option<Self> {
        (bound.len() == DIM && bound.iter().all(|[lb, ub]| lb <= ub))
            .then(|| Self { bound: bound.to_vec(), ..self })
    }

    /// Replace the length bounds and the angle bounds, in degrees for the
    /// angles.
    pub fn with_ranges(self, len: [f64; 2], ang_deg: [f64; 2]) -> Option<Self> {
        let ang = ang_deg.map(f64::to_radians);
        let mut bound = [len; DIM];
        bound[8..].fill(ang);
        self.with_bound(&bound)
    }

    /// Build the linkage from the design variables.
    ///
    /// # Panics
    ///
    /// Panic if the length is not [`DIM`].
    pub fn linkage(&self, xs: &[f64]) -> SixBar {
        let mut v = [0.; DIM];
        v.copy_from_slice(xs);
        SixBar::from_vectorized(self.ty, v)
    }

    /// The achieved output angles of the target input angles, `None` for
    /// the infeasible positions.
    ///
    /// Each root search of Stephenson II starts from [`GAMMA_GUESS`].
    pub fn achieved(&self, sb: &SixBar) -> Vec<Option<f64>> {
        self.target
            .theta_i()
            .iter()
            .map(|t| sb.pos(*t).filter(|p| self.band.check(p)).map(|p| p.theta_o))
            .collect()
    }

    /// The fitness of a linkage.
    pub fn eval(&self, sb: &SixBar) -> f64 {
        std::iter::zip(self.achieved(sb), self.target.theta_o())
            .map(|(o, od)| (o.unwrap_or(INFEASIBLE) - od).powi(2))
            .sum()
    }

    /// Check a result linkage against the target.
    pub fn verify(&self, sb: &SixBar) -> Verify {
        let rows = self
            .target
            .pairs()
            .map(|[theta_i, theta_od]| {
                let pose = sb.pos(theta_i);
                let theta_o = pose.map(|p| p.theta_o);
                VerifyRow {
                    theta_i,
                    theta_od,
                    theta_o,
                    mu: pose.map(|p| p.mu),
                    angle_ok: theta_o.is_some_and(|o| (o - theta_od).abs() <= self.tol),
                    mu_ok: pose.is_some_and(|p| self.band.check(&p)),
                }
            })
            .collect();
        Verify { rows, tol: self.tol, band: self.band }
    }
}

impl mh::Bounded for AngleSyn {
    #[inline]
    fn bound(&self) -> &[[f64; 2]] {
        &self.bound
    }
}

impl mh::ObjFunc for AngleSyn {
    type Ys = f64;

    fn fitness(&self, xs: &[f64]) -> Self::Ys {
        self.eval(&self.linkage(xs))
    }
}

/// One pair of the result check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerifyRow {
    /// Input angle
    pub theta_i: f64,
    /// Desired output angle
    pub theta_od: f64,
    /// Achieved output angle
    pub theta_o: Option<f64>,
    /// Transmission angles
    pub mu: Option<[f64; 2]>,
    /// The output angle error is in the tolerance
    pub angle_ok: bool,
    /// Both transmission angles are in the band
    pub mu_ok: bool,
}

impl VerifyRow {
    /// Return true if both checks pass.
    pub fn is_ok(&self) -> bool {
        self.angle_ok && self.mu_ok
    }

    /// The output angle error.
    pub fn error(&self) -> Option<f64> {
        self.theta_o.map(|o| o - self.theta_od)
    }
}

/// The result check of a synthesized linkage.
#[derive(Clone, Debug, PartialEq)]
pub struct Verify {
    /// Check of each pair
    pub rows: Vec<VerifyRow>,
    /// Tolerance of the output angle
    pub tol: f64,
    /// Transmission angle band
    pub band: MuBand,
}

impl Verify {
    /// Return true if every pair passes both checks.
    pub fn is_ok(&self) -> bool {
        self.rows.iter().all(VerifyRow::is_ok)
    }

    /// Number of the passed pairs.
    pub fn passed(&self) -> usize {
        self.rows.iter().filter(|r| r.is_ok()).count()
    }

    /// The maximum absolute output angle error, `None` if any position is
    /// infeasible.
    pub fn max_error(&self) -> Option<f64> {
        self.rows
            .iter()
            .map(|r| r.error().map(f64::abs))
            .try_fold(0., |acc: f64, e| Some(acc.max(e?)))
    }
}

// Constantly assert that these types implement a certain trait
macro_rules! assert_impl {
    ($fn_name:ident, $trait_name:path, $($ty:ty),+) => {
        #[allow(unused)]
        const fn $fn_name<T: $trait_name>() {}
        $(const _: () = $fn_name::<$ty>();)+
    };
}

assert_impl!(assert_mh_objfunc, mh::ObjFunc, AngleSyn);
