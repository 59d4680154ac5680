//! Functions for reading/writing CSV format.
//!
//! All the angles in the files are in degrees.
use crate::{syn, Pose};
pub use csv::Error;
use csv::{ReaderBuilder, Writer};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::Cursor;

/// Parse CSV from string.
pub fn parse_csv<D>(s: &str) -> Result<Vec<D>, Error>
where
    D: DeserializeOwned,
{
    ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(s))
        .deserialize()
        .collect()
}

/// Dump CSV to string.
pub fn dump_csv<'a, C, S>(c: C) -> Result<String, Box<dyn std::error::Error>>
where
    C: Into<std::borrow::Cow<'a, [S]>>,
    S: Serialize + Clone + 'a,
{
    let mut w = Writer::from_writer(Vec::new());
    let v = c.into().into_owned();
    v.into_iter().try_for_each(|c| w.serialize(c))?;
    Ok(String::from_utf8(w.into_inner()?)?)
}

/// Parse a target from the rows of input and desired output angles.
pub fn parse_target(s: &str) -> Result<syn::Target, Box<dyn std::error::Error>> {
    let pairs = parse_csv::<[f64; 2]>(s)?;
    Ok(syn::Target::from_degrees(&pairs)?)
}

/// Dump a target into the rows of input and desired output angles.
pub fn dump_target(target: &syn::Target) -> Result<String, Box<dyn std::error::Error>> {
    dump_csv(target.to_degrees())
}

/// A row of the result check.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ReportRow {
    /// Input angle
    pub theta_i: f64,
    /// Desired output angle
    pub theta_od: f64,
    /// Achieved output angle
    pub theta_o: Option<f64>,
    /// Output angle error
    pub error: Option<f64>,
    /// Transmission angle of the first loop
    pub mu1: Option<f64>,
    /// Transmission angle of the second loop
    pub mu2: Option<f64>,
    /// Output angle in tolerance
    pub angle_ok: bool,
    /// Transmission angles in band
    pub mu_ok: bool,
}

impl From<&syn::VerifyRow> for ReportRow {
    fn from(row: &syn::VerifyRow) -> Self {
        let [mu1, mu2] = match row.mu {
            Some(mu) => mu.map(|mu| Some(mu.to_degrees())),
            None => [None; 2],
        };
        Self {
            theta_i: row.theta_i.to_degrees(),
            theta_od: row.theta_od.to_degrees(),
            theta_o: row.theta_o.map(f64::to_degrees),
            error: row.error().map(f64::to_degrees),
            mu1,
            mu2,
            angle_ok: row.angle_ok,
            mu_ok: row.mu_ok,
        }
    }
}

/// Dump the result check as a report.
pub fn dump_report(verify: &syn::Verify) -> Result<String, Box<dyn std::error::Error>> {
    let rows = verify.rows.iter().map(ReportRow::from).collect::<Vec<_>>();
    dump_csv(rows)
}

/// A row of the angle relation, the cells are empty if the position is
/// impossible.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SweepRow {
    /// Input angle
    pub theta_i: f64,
    /// Output angle
    pub theta_o: Option<f64>,
    /// Transmission angle of the first loop
    pub mu1: Option<f64>,
    /// Transmission angle of the second loop
    pub mu2: Option<f64>,
}

impl SweepRow {
    /// Create a row from the input angle and its position.
    pub fn new(theta_i: f64, pose: Option<&Pose>) -> Self {
        let [mu1, mu2] = match pose {
            Some(p) => p.mu_deg().map(Some),
            None => [None; 2],
        };
        Self {
            theta_i: theta_i.to_degrees(),
            theta_o: pose.map(|p| p.theta_o.to_degrees()),
            mu1,
            mu2,
        }
    }
}

/// Dump the angle relation of a sweep.
pub fn dump_sweep(sweep: &[(f64, Option<Pose>)]) -> Result<String, Box<dyn std::error::Error>> {
    let rows = sweep
        .iter()
        .map(|(t, pose)| SweepRow::new(*t, pose.as_ref()))
        .collect::<Vec<_>>();
    dump_csv(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn target_file() {
        let s = "# theta_i, theta_od\n50, 20\n71, 56\n";
        let target = parse_target(s).unwrap();
        assert_eq!(target.len(), 2);
        assert_abs_diff_eq!(target.theta_o()[1], 56f64.to_radians());
        let back = parse_target(&dump_target(&target).unwrap()).unwrap();
        assert_eq!(back.len(), 2);
        assert!(parse_target("# nothing\n").is_err());
    }

    #[test]
    fn empty_cells() {
        let s = dump_sweep(&[(0., None)]).unwrap();
        assert_eq!(s, "theta_i,theta_o,mu1,mu2\n0.0,,,\n");
    }
}
