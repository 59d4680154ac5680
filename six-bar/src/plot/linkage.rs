use super::*;
use crate::{linspace, Coord, SixBar, GAMMA_GUESS, JOINT_NAMES};
use std::f64::consts::{PI, TAU};
use fmtastic::Subscript;
use plotters::style::full_palette::{AMBER_200, CYAN_200, GREEN_800};

macro_rules! inner_opt {
    ($($(#[$meta:meta])+ fn $name:ident($ty:ty))+) => {$(
        $(#[$meta])+
        pub fn $name(mut self, $name: $ty) -> Self {
            self.opt.$name = $name;
            self
        }
    )+};
}

/// Drawing options.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Opt {
    /// Stroke width of the links
    pub stroke: u32,
    /// Font size
    pub font: f64,
    /// Show the grid
    pub grid: bool,
    /// Show the axis
    pub axis: bool,
    /// Show the link labels `L1` to `L10`
    pub link_label: bool,
    /// Show the arcs of the input, output and transmission angles
    pub angle_arc: bool,
}

impl Default for Opt {
    fn default() -> Self {
        Self {
            stroke: 5,
            font: 24.,
            grid: false,
            axis: true,
            link_label: false,
            angle_arc: true,
        }
    }
}

/// Drawing option of a six-bar linkage at an input angle.
#[derive(Clone)]
pub struct Figure<'a> {
    sb: &'a SixBar,
    angle: f64,
    guess: f64,
    opt: Opt,
}

impl<'a> Figure<'a> {
    /// Create a figure of the linkage at zero input angle.
    pub fn new(sb: &'a SixBar) -> Self {
        Self { sb, angle: 0., guess: GAMMA_GUESS, opt: Opt::default() }
    }

    /// Set the input angle.
    pub fn angle(self, angle: f64) -> Self {
        Self { angle, ..self }
    }

    /// Set the initial guess of the numerical solver, see
    /// [`SixBar::pos_s()`].
    pub fn guess(self, guess: f64) -> Self {
        Self { guess, ..self }
    }

    /// Set the inner options.
    pub fn with_opt(self, opt: Opt) -> Self {
        Self { opt, ..self }
    }

    inner_opt! {
        /// Set the line stroke of the linkage.
        fn stroke(u32)
        /// Set font size.
        fn font(f64)
        /// Use grid in the plot.
        fn grid(bool)
        /// Show the axis.
        fn axis(bool)
        /// Show the link labels.
        fn link_label(bool)
        /// Show the angle arcs.
        fn angle_arc(bool)
    }

    /// Plot the linkage.
    ///
    /// Return a layout error if the linkage cannot be assembled at the
    /// angle.
    pub fn plot<B, R>(&self, root: R) -> PResult<(), B>
    where
        B: DrawingBackend,
        Canvas<B>: From<R>,
    {
        let root = Canvas::from(root);
        let pose = (self.sb)
            .pos_s(self.angle, self.guess)
            .ok_or(DrawingAreaErrorKind::LayoutError)?;
        root.fill(&WHITE)?;
        let Opt { stroke, font: font_size, grid, axis, link_label, angle_arc } = self.opt;
        let dot_size = stroke + 3;
        let [x_spec, y_spec] = area2d(&pose.joints, root.dim_in_pixel());
        let arc_r = (x_spec.end - x_spec.start) * 0.04;
        let mut chart = ChartBuilder::on(&root)
            .set_label_area_size(LabelAreaPosition::Left, (8).percent())
            .set_label_area_size(LabelAreaPosition::Bottom, (4).percent())
            .margin((4).percent())
            .build_cartesian_2d(x_spec, y_spec)?;
        let mut mesh = chart.configure_mesh();
        if !grid {
            mesh.disable_mesh();
        }
        if !axis {
            mesh.disable_axes();
        }
        mesh.label_style(font(font_size * 0.8))
            .x_label_formatter(&formatter)
            .y_label_formatter(&formatter)
            .draw()?;
        let pt = |i: usize| (pose.joints[i][0], pose.joints[i][1]);
        // Ternary links
        for (tri, color) in std::iter::zip(self.sb.ty.ternary(), [CYAN_200, AMBER_200]) {
            let tri = tri.map(pt);
            chart.draw_series([Polygon::new(tri.to_vec(), color.mix(0.6).filled())])?;
        }
        // Links
        let is_io = |[i, j]: [usize; 2]| {
            [self.sb.ty.input_link(), self.sb.ty.output_link()]
                .iter()
                .any(|l| *l == [i, j] || *l == [j, i])
        };
        for (n, edge) in self.sb.edges().into_iter().enumerate() {
            let style = if is_io(edge) {
                RED.stroke_width(stroke)
            } else if n == 0 {
                BLACK.mix(0.4).stroke_width(stroke)
            } else {
                BLACK.stroke_width(stroke)
            };
            let line = edge.map(pt);
            chart.draw_series(LineSeries::new(line, style))?;
            if link_label {
                let [(x1, y1), (x2, y2)] = line;
                let mid = ((x1 + x2) * 0.5, (y1 + y2) * 0.5);
                let text = Text::new(
                    format!("L{}", Subscript(n + 1)),
                    mid,
                    font(font_size * 0.8).color(&GREEN_800),
                );
                chart.draw_series([text])?;
            }
        }
        // Angle arcs, the input and output angles start from the x axis
        if angle_arc {
            let ty = self.sb.ty;
            let [a, b] = [pose.joints[0], pose.joints[1]];
            let input = pose.joints[ty.input_link()[1]];
            let output = pose.joints[ty.output_link()[1]];
            let mut arcs = vec![("θi", a, 0., dir(a, input)), ("θo", b, 0., dir(b, output))];
            for (name, tri) in std::iter::zip(["μ1", "μ2"], ty.mu_joints()) {
                let [v, p, q] = tri.map(|i| pose.joints[i]);
                let start = dir(v, p);
                let sweep = (dir(v, q) - start + PI).rem_euclid(TAU) - PI;
                arcs.push((name, v, start, start + sweep));
            }
            for (name, c, start, end) in arcs {
                let line = linspace(start, end, 30).map(|t| polar(c, arc_r, t));
                chart.draw_series(LineSeries::new(line, MAGENTA.stroke_width(2)))?;
                let pos = polar(c, arc_r * 1.8, (start + end) * 0.5);
                let text = Text::new(name, pos, font(font_size * 0.7).color(&MAGENTA));
                chart.draw_series([text])?;
            }
        }
        // Grounded pivots
        let grounded = [0, 1].map(pt).map(|c| {
            EmptyElement::at(c) + TriangleMarker::new((0, 10), dot_size + 3, BLACK.filled())
        });
        chart.draw_series(grounded)?;
        // Joints
        let joints = JOINT_NAMES.iter().enumerate().map(|(i, name)| {
            EmptyElement::at(pt(i))
                + Circle::new((0, 0), dot_size, BLACK.filled())
                + Text::new(*name, (5, 5), font(font_size).color(&BLUE))
        });
        chart.draw_series(joints)?;
        Ok(())
    }
}

fn dir(p: Coord, q: Coord) -> f64 {
    (q[1] - p[1]).atan2(q[0] - p[0])
}

fn polar(c: Coord, r: f64, t: f64) -> (f64, f64) {
    (c[0] + r * t.cos(), c[1] + r * t.sin())
}
