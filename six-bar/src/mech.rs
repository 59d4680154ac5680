//! Linkage mechanism types.
//!
//! All the six-bar linkages are planar, with the input pivot `A` at the
//! origin and the output pivot `B` at `l1` along `phi`.
pub use self::{geo::Coord, stephenson::GAMMA_GUESS, ty::*, vectorized::*};
use self::{geo::*, stephenson::*, watt::*};

mod geo;
mod stephenson;
mod ty;
mod vectorized;
mod watt;

/// Six-bar linkage.
///
/// Link `l7` is not a design variable, it is the ternary side derived from
/// the others (see [`SixBar::l7()`]).
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SixBar {
    /// Topology
    #[cfg_attr(feature = "serde", serde(default))]
    pub ty: SixBarTy,
    /// Ground link between the pivots `A` and `B`
    pub l1: f64,
    /// Link 2
    pub l2: f64,
    /// Link 3
    pub l3: f64,
    /// Link 4
    pub l4: f64,
    /// Link 5
    pub l5: f64,
    /// Link 6
    pub l6: f64,
    /// Link 8
    pub l8: f64,
    /// Link 9
    pub l9: f64,
    /// Angle of the ground link
    pub phi: f64,
    /// Inner angle of the input-side ternary link
    pub alpha: f64,
    /// Inner angle of the output-side ternary link
    pub lambda: f64,
}

/// The position of a six-bar linkage at an input angle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Pose {
    /// Joints `A` to `G`, see [`JOINT_NAMES`]
    pub joints: [Coord; 7],
    /// Transmission angles of the two loops, in radians
    pub mu: [f64; 2],
    /// Output angle, in radians, not wrapped
    pub theta_o: f64,
}

impl Pose {
    /// Check the finite values, return `None` if any of them is NaN or
    /// infinite.
    pub(crate) fn new(joints: [Coord; 7], mu: [f64; 2], theta_o: f64) -> Option<Self> {
        joints
            .iter()
            .flatten()
            .chain(&mu)
            .chain([&theta_o])
            .all(|x| x.is_finite())
            .then_some(Self { joints, mu, theta_o })
    }

    /// Get the joint by index.
    pub const fn joint(&self, i: usize) -> Coord {
        self.joints[i]
    }

    /// Get a link as a pair of joints.
    pub fn link(&self, [i, j]: [usize; 2]) -> [Coord; 2] {
        [self.joints[i], self.joints[j]]
    }

    /// The transmission angles in degrees.
    pub fn mu_deg(&self) -> [f64; 2] {
        self.mu.map(f64::to_degrees)
    }
}

impl SixBar {
    /// An example linkage of the type.
    ///
    /// Return the linkage and an input angle that can be assembled.
    pub fn example(ty: SixBarTy) -> (Self, f64) {
        let joints = match ty {
            SixBarTy::WattI => [
                [0., 0.],
                [60., 0.],
                [15., 20.],
                [45., 30.],
                [30., 55.],
                [60., 75.],
                [80., 40.],
            ],
            SixBarTy::WattII => [
                [0., 0.],
                [60., 0.],
                [30., -20.],
                [10., 25.],
                [45., 10.],
                [50., 40.],
                [75., 25.],
            ],
            SixBarTy::StephensonI => [
                [0., 0.],
                [60., 0.],
                [5., 25.],
                [20., 15.],
                [45., 30.],
                [75., 35.],
                [40., 50.],
            ],
            SixBarTy::StephensonII => [
                [0., 0.],
                [70., 0.],
                [10., 25.],
                [20., 10.],
                [40., 40.],
                [50., 20.],
                [75., 30.],
            ],
            SixBarTy::StephensonIII => [
                [0., 0.],
                [60., 0.],
                [25., -15.],
                [10., 25.],
                [35., 50.],
                [30., 20.],
                [70., 40.],
            ],
        };
        Self::from_joints(ty, joints)
    }

    /// Measure a linkage from its joints `A` to `G` at one position.
    ///
    /// The joints are moved so that `A` is the origin. Return the linkage
    /// and the input angle of the position.
    pub fn from_joints(ty: SixBarTy, joints: [Coord; 7]) -> (Self, f64) {
        let [x0, y0] = joints[0];
        let [a, b, c, d, e, f, g] = joints.map(|[x, y]| [x - x0, y - y0]);
        let phi = dir(a, b);
        let l1 = dist(a, b);
        let (sb, t) = match ty {
            SixBarTy::WattI => {
                let sb = Self {
                    l2: dist(a, c),
                    l3: dist(c, d),
                    l4: dist(b, d),
                    l5: dist(c, e),
                    l6: dist(b, g),
                    l8: dist(e, f),
                    l9: dist(g, f),
                    alpha: dir(c, e) - dir(c, d),
                    lambda: dir(b, d) - dir(b, g),
                    ..Self::default()
                };
                (sb, dir(a, c))
            }
            SixBarTy::WattII => {
                let sb = Self {
                    l2: dist(a, c),
                    l3: dist(a, d),
                    l4: dist(d, e),
                    l5: dist(c, e),
                    l6: dist(c, f),
                    l8: dist(f, g),
                    l9: dist(b, g),
                    alpha: dir(a, c) - phi,
                    lambda: dir(c, e) - dir(c, f),
                    ..Self::default()
                };
                (sb, dir(a, d))
            }
            SixBarTy::StephensonI => {
                let sb = Self {
                    l2: dist(a, c),
                    l3: dist(a, d),
                    l4: dist(b, e),
                    l5: dist(d, e),
                    l6: dist(b, f),
                    l8: dist(c, g),
                    l9: dist(f, g),
                    alpha: dir(a, c) - dir(a, d),
                    lambda: dir(b, e) - dir(b, f),
                    ..Self::default()
                };
                (sb, dir(a, d))
            }
            SixBarTy::StephensonII => {
                let sb = Self {
                    l2: dist(a, d),
                    l3: dist(a, c),
                    l4: dist(c, e),
                    l5: dist(d, f),
                    l6: dist(e, f),
                    l8: dist(f, g),
                    l9: dist(b, g),
                    alpha: dir(a, c) - dir(a, d),
                    lambda: dir(f, e) - dir(f, g),
                    ..Self::default()
                };
                (sb, dir(a, d))
            }
            SixBarTy::StephensonIII => {
                let sb = Self {
                    l2: dist(a, c),
                    l3: dist(a, d),
                    l4: dist(d, f),
                    l5: dist(c, f),
                    l6: dist(e, f),
                    l8: dist(e, g),
                    l9: dist(b, g),
                    alpha: dir(a, c) - phi,
                    lambda: dir(f, d) - dir(f, e),
                    ..Self::default()
                };
                (sb, dir(a, d))
            }
        };
        (Self { ty, l1, phi, ..sb }, t)
    }

    /// The derived side of the ternary link.
    ///
    /// Only Watt I has this link on its coupler (`DE`), the other types
    /// return `None`.
    pub fn l7(&self) -> Option<f64> {
        let Self { l3, l5, alpha, .. } = *self;
        matches!(self.ty, SixBarTy::WattI)
            .then(|| (l3 * l3 + l5 * l5 - 2. * l3 * l5 * alpha.cos()).sqrt())
    }

    /// The ten links as joint index pairs, see [`SixBarTy::edges()`].
    pub const fn edges(&self) -> [[usize; 2]; 10] {
        self.ty.edges()
    }

    /// Get the position with the input angle `t`.
    ///
    /// Return `None` if the linkage cannot be assembled.
    pub fn pos(&self, t: f64) -> Option<Pose> {
        self.pos_s(t, GAMMA_GUESS)
    }

    /// Get the position with the input angle `t`, and the initial guess of
    /// the numerical solver.
    ///
    /// The `guess` is only used by [`SixBarTy::StephensonII`].
    pub fn pos_s(&self, t: f64, guess: f64) -> Option<Pose> {
        match self.ty {
            SixBarTy::WattI => watt1(self, t),
            SixBarTy::WattII => watt2(self, t),
            SixBarTy::StephensonI => stephenson1(self, t),
            SixBarTy::StephensonII => stephenson2(self, t, guess),
            SixBarTy::StephensonIII => stephenson3(self, t),
        }
    }

    /// Generator for the positions of the input angles, `None` for the
    /// impossible positions.
    ///
    /// The numerical solver starts from the last solved angle, so a
    /// continuous input keeps the same branch.
    pub fn pos_iter<I>(&self, iter: I) -> impl Iterator<Item = Option<Pose>> + '_
    where
        I: IntoIterator<Item = f64>,
        I::IntoIter: 'static,
    {
        let mut guess = GAMMA_GUESS;
        iter.into_iter().map(move |t| {
            let pose = self.pos_s(t, guess)?;
            if self.ty.is_numerical() {
                guess = dir(pose.joints[2], pose.joints[4]);
            }
            Some(pose)
        })
    }

    /// Sweep the input angle from `start` to `end` (inclusive) with `res`
    /// samples.
    ///
    /// Return the input angles and their positions.
    pub fn sweep(&self, start: f64, end: f64, res: usize) -> Vec<(f64, Option<Pose>)> {
        let ts = linspace(start, end, res).collect::<Vec<_>>();
        let poses = self.pos_iter(ts.clone());
        ts.into_iter().zip(poses).collect()
    }

    /// Get the output angles of the input angles.
    pub fn output_angles(&self, ts: &[f64]) -> Vec<Option<f64>> {
        self.pos_iter(ts.to_vec())
            .map(|pose| pose.map(|p| p.theta_o))
            .collect()
    }
}

/// Evenly spaced values, including both ends.
pub fn linspace(start: f64, end: f64, res: usize) -> impl Iterator<Item = f64> {
    let step = if res > 1 {
        (end - start) / (res - 1) as f64
    } else {
        0.
    };
    (0..res).map(move |n| start + n as f64 * step)
}
