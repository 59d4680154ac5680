use six_bar::{csv::dump_sweep, plot};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct Sweep {
    /// Linkage file (RON)
    file: PathBuf,
    /// Number of samples
    #[clap(long, default_value_t = 3600)]
    res: usize,
    /// Start of the input angle in degrees
    #[clap(long, default_value_t = 0.)]
    start: f64,
    /// End of the input angle in degrees, included
    #[clap(long, default_value_t = 359.)]
    end: f64,
    /// Also draw the angle relation to an SVG file
    #[clap(long)]
    svg: Option<PathBuf>,
}

pub(super) fn sweep(sweep: Sweep) {
    let Sweep { file, res, start, end, svg } = sweep;
    let sb = super::load_linkage(&file);
    let sweep = sb.sweep(start.to_radians(), end.to_radians(), res);
    let csv = dump_sweep(&sweep).unwrap_or_else(|e| panic!("dump failed: {e}"));
    print!("{csv}");
    if let Some(path) = svg {
        let svg = plot::SVGBackend::new(&path, (1200, 800));
        plot::angles(svg, &sweep, None).unwrap_or_else(|e| panic!("plot failed: {e}"));
    }
}
