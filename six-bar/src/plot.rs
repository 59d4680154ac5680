//! The functions used to plot the linkage and synthesis result.
//!
//! ```
//! use six_bar::{plot::*, SixBar, SixBarTy};
//!
//! let (sb, t) = SixBar::example(SixBarTy::WattI);
//! let mut buf = String::new();
//! Figure::new(&sb)
//!     .angle(t)
//!     .link_label(true)
//!     .plot(SVGBackend::with_string(&mut buf, (800, 800)))
//!     .unwrap();
//! ```
pub use self::{angles::angles, history::history, linkage::*};
#[doc(no_inline)]
pub use plotters::{prelude::*, *};

mod angles;
mod history;
mod linkage;

/// Result type of the plotting.
pub type PResult<T, B> = Result<T, DrawingAreaErrorKind<<B as DrawingBackend>::ErrorType>>;
/// The drawing area.
pub type Canvas<B> = DrawingArea<B, coord::Shift>;

const DEFAULT_FONT: &str = "Times New Roman";

/// Get the font with the size.
pub fn font(size: f64) -> TextStyle<'static> {
    (DEFAULT_FONT, size).into_font().color(&BLACK)
}

/// Marker or line style.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Style {
    /// Continuous Line
    Line,
    /// Circle Marker
    #[default]
    Circle,
    /// Triangle Marker
    Triangle,
    /// Cross Marker
    Cross,
}

impl Style {
    pub(crate) fn draw<'a, DB, CT, I>(
        &self,
        chart: &mut ChartContext<'a, DB, CT>,
        line: I,
        color: ShapeStyle,
        label: &str,
    ) -> PResult<(), DB>
    where
        DB: DrawingBackend + 'a,
        CT: CoordTranslate,
        CT::From: Clone + 'static,
        I: IntoIterator<Item = CT::From>,
    {
        let dot_size = color.stroke_width + 5;
        let has_label = !label.is_empty();
        macro_rules! impl_marker {
            ($mk:ident) => {{
                let line = line.into_iter().map(|c| $mk::new(c, dot_size, color));
                let anno = chart.draw_series(line)?;
                if has_label {
                    anno.label(label).legend(move |(x, y)| {
                        $mk::new((x + dot_size as i32 / 2, y), dot_size, color)
                    });
                }
            }};
        }
        match self {
            Self::Line => {
                let anno = chart.draw_series(LineSeries::new(line, color))?;
                if has_label {
                    anno.label(label)
                        .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], color));
                }
            }
            Self::Circle => impl_marker!(Circle),
            Self::Triangle => impl_marker!(TriangleMarker),
            Self::Cross => impl_marker!(Cross),
        }
        Ok(())
    }
}

/// Get the 1:1 bounding box of the data, ignore the labels.
pub fn area2d<'a, I>(pts: I, area: (u32, u32)) -> [std::ops::Range<f64>; 2]
where
    I: IntoIterator<Item = &'a [f64; 2]>,
{
    let [w, h] = [area.0 as f64, area.1 as f64];
    let init = [f64::INFINITY, f64::NEG_INFINITY];
    let [[x_min, x_max], [y_min, y_max]] = pts.into_iter().fold([init; 2], |[bx, by], [x, y]| {
        [[bx[0].min(*x), bx[1].max(*x)], [by[0].min(*y), by[1].max(*y)]]
    });
    let dx = (x_max - x_min).abs().max(f64::EPSILON);
    let dy = (y_max - y_min).abs().max(f64::EPSILON);
    let x_cen = (x_min + x_max) * 0.5;
    let y_cen = (y_min + y_max) * 0.5;
    if dx / dy > w / h {
        let x_r = dx * 0.5 * 1.2;
        let y_r = dx / w * h * 0.5 * 1.2;
        [x_cen - x_r..x_cen + x_r, y_cen - y_r..y_cen + y_r]
    } else {
        let y_r = dy * 0.5 * 1.2;
        let x_r = dy / h * w * 0.5 * 1.2;
        [x_cen - x_r..x_cen + x_r, y_cen - y_r..y_cen + y_r]
    }
}

pub(crate) fn formatter(v: &f64) -> String {
    let s = format!("{v:.04}");
    let n = s.trim_end_matches('0').trim_end_matches('.').len();
    s[..n].to_string()
}
