use super::*;
use crate::{syn::Verify, Pose};
use plotters::style::full_palette::ORANGE;

/// Plot the angle relation of a sweep, in degrees.
///
/// The output angle and the two transmission angles are drawn over the
/// input angle. The impossible positions break the lines. If the result
/// check is given, the desired and the achieved target angles are marked.
///
/// ```
/// use six_bar::{plot::*, SixBar, SixBarTy};
///
/// let (sb, _) = SixBar::example(SixBarTy::StephensonII);
/// let sweep = sb.sweep(0., 6., 90);
/// let mut buf = String::new();
/// angles(SVGBackend::with_string(&mut buf, (800, 600)), &sweep, None).unwrap();
/// ```
pub fn angles<B, R>(
    root: R,
    sweep: &[(f64, Option<Pose>)],
    verify: Option<&Verify>,
) -> PResult<(), B>
where
    B: DrawingBackend,
    Canvas<B>: From<R>,
{
    const FONT_SIZE: f64 = 24.;
    let root = Canvas::from(root);
    root.fill(&WHITE)?;
    let series = |f: fn(&Pose) -> f64| -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut run = Vec::new();
        for (t, pose) in sweep {
            match pose {
                Some(p) => run.push((t.to_degrees(), f(p).to_degrees())),
                None if !run.is_empty() => runs.push(std::mem::take(&mut run)),
                None => (),
            }
        }
        if !run.is_empty() {
            runs.push(run);
        }
        runs
    };
    let lines = [
        ("θo", series(|p| p.theta_o), BLUE),
        ("μ1", series(|p| p.mu[0]), GREEN),
        ("μ2", series(|p| p.mu[1]), ORANGE),
    ];
    let targets = verify
        .map(|v| {
            let desired = v.rows.iter().map(|r| [r.theta_i, r.theta_od]);
            let achieved = v.rows.iter().filter_map(|r| Some([r.theta_i, r.theta_o?]));
            [desired.collect::<Vec<_>>(), achieved.collect()]
        })
        .unwrap_or_else(|| [Vec::new(), Vec::new()])
        .map(|pts: Vec<[f64; 2]>| {
            pts.into_iter()
                .map(|p| p.map(f64::to_degrees))
                .map(|[x, y]| (x, y))
                .collect::<Vec<_>>()
        });
    let pts = lines
        .iter()
        .flat_map(|(_, runs, _)| runs.iter().flatten())
        .chain(targets.iter().flatten())
        .copied();
    let init = [f64::INFINITY, f64::NEG_INFINITY];
    let [[x_min, x_max], [y_min, y_max]] = pts.fold([init; 2], |[bx, by], (x, y)| {
        [[bx[0].min(x), bx[1].max(x)], [by[0].min(y), by[1].max(y)]]
    });
    let [x_min, x_max, y_min, y_max] = if x_min.is_finite() && y_min.is_finite() {
        [x_min, x_max.max(x_min + 1.), y_min, y_max.max(y_min + 1.)]
    } else {
        [0., 360., 0., 180.]
    };
    let mut chart = ChartBuilder::on(&root)
        .set_label_area_size(LabelAreaPosition::Left, (10).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (10).percent())
        .margin((4).percent())
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Input angle (deg)")
        .x_label_style(font(FONT_SIZE))
        .y_desc("Angle (deg)")
        .y_label_style(font(FONT_SIZE))
        .x_label_formatter(&formatter)
        .y_label_formatter(&formatter)
        .draw()?;
    for (label, runs, color) in lines {
        for (i, run) in runs.into_iter().enumerate() {
            // Label the first run only
            let label = if i == 0 { label } else { "" };
            Style::Line.draw(&mut chart, run, color.stroke_width(2), label)?;
        }
    }
    let [desired, achieved] = targets;
    if verify.is_some() {
        Style::Circle.draw(&mut chart, desired, RED.stroke_width(2), "Desired")?;
        Style::Cross.draw(&mut chart, achieved, BLACK.stroke_width(2), "Achieved")?;
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE)
        .border_style(BLACK)
        .label_font(font(FONT_SIZE))
        .draw()?;
    Ok(())
}
