/// Joint names, the index of [`Pose::joints`](super::Pose::joints).
pub const JOINT_NAMES: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;
const D: usize = 3;
const E: usize = 4;
const F: usize = 5;
const G: usize = 6;

/// Type (topology) of the six-bar linkage.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum SixBarTy {
    /// Watt I, the input crank drives a ternary coupler
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "W1", alias = "WattI"))]
    #[cfg_attr(feature = "clap", value(name = "w1", alias = "watt1"))]
    WattI,
    /// Watt II, two four-bar loops in series sharing a ternary link
    #[cfg_attr(feature = "serde", serde(rename = "W2", alias = "WattII"))]
    #[cfg_attr(feature = "clap", value(name = "w2", alias = "watt2"))]
    WattII,
    /// Stephenson I, ternary input link
    #[cfg_attr(feature = "serde", serde(rename = "S1", alias = "StephensonI"))]
    #[cfg_attr(feature = "clap", value(name = "s1", alias = "stephenson1"))]
    StephensonI,
    /// Stephenson II, ternary input link with a non-dyadic output loop
    #[cfg_attr(feature = "serde", serde(rename = "S2", alias = "StephensonII"))]
    #[cfg_attr(feature = "clap", value(name = "s2", alias = "stephenson2"))]
    StephensonII,
    /// Stephenson III, ternary ground link
    #[cfg_attr(feature = "serde", serde(rename = "S3", alias = "StephensonIII"))]
    #[cfg_attr(feature = "clap", value(name = "s3", alias = "stephenson3"))]
    StephensonIII,
}

impl std::fmt::Display for SixBarTy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for type conversion.
#[derive(Debug)]
pub struct SixBarTyError;

impl std::fmt::Display for SixBarTyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "invalid six-bar type, expect one of W1, W2, S1, S2, S3")
    }
}

impl std::error::Error for SixBarTyError {}

impl std::str::FromStr for SixBarTy {
    type Err = SixBarTyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::LIST
            .into_iter()
            .find(|ty| ty.abbr().eq_ignore_ascii_case(s))
            .ok_or(SixBarTyError)
    }
}

impl SixBarTy {
    /// All types.
    pub const LIST: [Self; 5] = [
        Self::WattI,
        Self::WattII,
        Self::StephensonI,
        Self::StephensonII,
        Self::StephensonIII,
    ];

    /// Name of the type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WattI => "Watt I",
            Self::WattII => "Watt II",
            Self::StephensonI => "Stephenson I",
            Self::StephensonII => "Stephenson II",
            Self::StephensonIII => "Stephenson III",
        }
    }

    /// Abbreviation of the type.
    pub const fn abbr(&self) -> &'static str {
        match self {
            Self::WattI => "W1",
            Self::WattII => "W2",
            Self::StephensonI => "S1",
            Self::StephensonII => "S2",
            Self::StephensonIII => "S3",
        }
    }

    /// Return true if the output angle requires a numerical root.
    pub const fn is_numerical(&self) -> bool {
        matches!(self, Self::StephensonII)
    }

    /// The ten links as joint index pairs, in the order of `L1` to `L10`.
    pub const fn edges(&self) -> [[usize; 2]; 10] {
        match self {
            Self::WattI => [
                [A, B],
                [A, C],
                [C, D],
                [B, D],
                [C, E],
                [B, G],
                [D, E],
                [E, F],
                [F, G],
                [G, D],
            ],
            Self::WattII => [
                [A, B],
                [A, C],
                [A, D],
                [D, E],
                [E, C],
                [F, C],
                [E, F],
                [G, F],
                [B, G],
                [B, C],
            ],
            Self::StephensonI => [
                [A, B],
                [A, C],
                [A, D],
                [B, E],
                [D, E],
                [B, F],
                [C, D],
                [C, G],
                [G, F],
                [F, E],
            ],
            Self::StephensonII => [
                [A, B],
                [A, D],
                [A, C],
                [C, E],
                [D, F],
                [F, E],
                [C, D],
                [F, G],
                [G, B],
                [G, E],
            ],
            Self::StephensonIII => [
                [A, B],
                [A, C],
                [A, D],
                [D, F],
                [C, F],
                [E, F],
                [D, E],
                [G, E],
                [G, B],
                [B, C],
            ],
        }
    }

    /// The two ternary links as joint index triples.
    ///
    /// The first one carries the input or the ground, the second one is the
    /// floating or output ternary link.
    pub const fn ternary(&self) -> [[usize; 3]; 2] {
        match self {
            Self::WattI => [[B, G, D], [C, D, E]],
            Self::WattII => [[A, B, C], [C, E, F]],
            Self::StephensonI => [[A, C, D], [B, E, F]],
            Self::StephensonII => [[A, D, C], [G, E, F]],
            Self::StephensonIII => [[A, B, C], [D, E, F]],
        }
    }

    /// The vertices of the transmission angles `mu1` and `mu2`.
    ///
    /// Each triple is `[vertex, p, q]`, the angle is between `vertex -> p`
    /// and `vertex -> q`.
    pub const fn mu_joints(&self) -> [[usize; 3]; 2] {
        match self {
            Self::WattI => [[D, B, C], [F, E, G]],
            Self::WattII => [[E, D, C], [G, F, B]],
            Self::StephensonI => [[E, D, B], [G, F, C]],
            Self::StephensonII => [[E, C, F], [G, F, B]],
            Self::StephensonIII => [[F, C, D], [G, E, B]],
        }
    }

    /// Joint index pair of the input link, from the pivot.
    pub const fn input_link(&self) -> [usize; 2] {
        match self {
            Self::WattI => [A, C],
            _ => [A, D],
        }
    }

    /// Joint index pair of the output link, from the pivot.
    pub const fn output_link(&self) -> [usize; 2] {
        match self {
            Self::StephensonI => [B, F],
            _ => [B, G],
        }
    }
}
