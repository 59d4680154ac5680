use super::*;

/// Plot the synthesis history, the generations and their best fitness.
///
/// ```
/// use six_bar::plot::*;
///
/// let mut buf = String::new();
/// let svg = SVGBackend::with_string(&mut buf, (800, 600));
/// let fitness: [(u64, f64); 4] = [(0, 3.), (5, 2.), (10, 0.5), (15, 0.1)];
/// history(svg, fitness).unwrap();
/// ```
pub fn history<B, R, H>(root: R, history: H) -> PResult<(), B>
where
    B: DrawingBackend,
    Canvas<B>: From<R>,
    H: AsRef<[(u64, f64)]>,
{
    const FONT_SIZE: i32 = 24;
    let history = history.as_ref();
    let root = Canvas::from(root);
    root.fill(&WHITE)?;
    let max_fitness = history
        .iter()
        .map(|(_, f)| *f)
        .filter(|f| f.is_finite())
        .fold(0., f64::max)
        .max(f64::EPSILON);
    let last_gen = history.iter().map(|(n, _)| *n).max().unwrap_or_default();
    let mut chart = ChartBuilder::on(&root)
        .set_label_area_size(LabelAreaPosition::Left, (10).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (10).percent())
        .margin((4).percent())
        .build_cartesian_2d(0..last_gen.max(1), 0.0..max_fitness)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("Generation")
        .x_label_style(font(FONT_SIZE as f64))
        .y_desc("Fitness")
        .y_label_style(font(FONT_SIZE as f64))
        .y_label_formatter(&formatter)
        .draw()?;
    chart
        .draw_series(LineSeries::new(history.iter().copied(), BLUE))?
        .label("Best Fitness")
        .legend(|c| EmptyElement::at(c) + PathElement::new([(1, 0), (FONT_SIZE - 1, 0)], BLUE));
    Ok(())
}
