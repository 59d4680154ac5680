use super::logger::Logger;
use six_bar::{plot, JOINT_NAMES};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct Pose {
    /// Linkage file (RON)
    file: PathBuf,
    /// Input angle in degrees
    #[clap(long, allow_negative_numbers = true)]
    angle: f64,
    /// Draw the mechanism to an SVG file
    #[clap(long)]
    svg: Option<PathBuf>,
    /// Show the link labels in the drawing
    #[clap(long)]
    label: bool,
}

#[derive(serde::Serialize)]
struct Angles {
    theta_i: f64,
    theta_o: f64,
    mu1: f64,
    mu2: f64,
}

pub(super) fn pose(pose: Pose) {
    let Pose { file, angle, svg, label } = pose;
    let sb = super::load_linkage(&file);
    let t = angle.to_radians();
    let pose = sb
        .pos(t)
        .unwrap_or_else(|| panic!("{} cannot be assembled at {angle} deg", sb.ty));
    let mut log = Logger::new(std::io::stdout().lock());
    let mut f = || -> std::io::Result<()> {
        log.section(sb.ty.abbr())?;
        log.log(&sb)?;
        log.section("joints")?;
        let joints = std::iter::zip(JOINT_NAMES, pose.joints).collect::<Vec<_>>();
        log.log(std::collections::BTreeMap::from_iter(joints))?;
        log.section("angles")?;
        let [mu1, mu2] = pose.mu_deg();
        log.log(Angles { theta_i: angle, theta_o: pose.theta_o.to_degrees(), mu1, mu2 })?;
        log.flush()
    };
    f().unwrap_or_else(|e| panic!("write failed: {e}"));
    if let Some(path) = svg {
        let svg = plot::SVGBackend::new(&path, (1600, 1600));
        plot::Figure::new(&sb)
            .angle(t)
            .link_label(label)
            .plot(svg)
            .unwrap_or_else(|e| panic!("plot failed: {e}"));
    }
}
