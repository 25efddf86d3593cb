//! jgraph script generation.
//!
//! The script is built in a fixed order: header, box-and-whisker polygons,
//! scatter points, then one dashed line series per requested statistic.
//! Series always follow [`Statistic::ALL`] order, so two selections holding the
//! same statistics produce identical scripts.

use std::collections::BTreeSet;

use crate::history::{FitnessHistory, Statistic};
use crate::palette::{MarkType, Rgb, SeriesStyle};
use crate::stats::FiveNumberSummary;

pub const BOX_WIDTH: f64 = 0.4;
pub const X_LABEL: &str = "Epoch";
pub const Y_LABEL: &str = "Fitness";
pub const DEFAULT_AXIS_SIZE: f64 = 6.0;

const INK: Rgb = Rgb::BLACK;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesSelection {
    pub box_and_whiskers: bool,
    pub scatter: bool,
    pub statistics: BTreeSet<Statistic>,
}

impl SeriesSelection {
    pub fn with_statistics<I: IntoIterator<Item = Statistic>>(statistics: I) -> Self {
        Self {
            statistics: statistics.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.box_and_whiskers && !self.scatter && self.statistics.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
    pub x_size: f64,
    pub y_size: f64,
    pub selection: SeriesSelection,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            x_size: DEFAULT_AXIS_SIZE,
            y_size: DEFAULT_AXIS_SIZE,
            selection: SeriesSelection::default(),
        }
    }
}

/// Renders with fresh color and marker cursors.
pub fn render(history: &FitnessHistory, options: &GraphOptions) -> String {
    render_with_style(history, options, &mut SeriesStyle::default())
}

/// Renders using the caller's cursors, leaving them advanced past every
/// color and marker this script consumed.
pub fn render_with_style(
    history: &FitnessHistory,
    options: &GraphOptions,
    style: &mut SeriesStyle,
) -> String {
    let mut out = String::new();
    write_header(&mut out, options.x_size, options.y_size);

    let selection = &options.selection;
    if selection.box_and_whiskers {
        let fill = style.next_color();
        for (epoch, quartiles) in history.quantiles().iter().enumerate() {
            write_box(&mut out, epoch as f64, quartiles, fill);
        }
    }

    if selection.scatter {
        write_scatter(&mut out, &history.populations);
    }

    for &statistic in &selection.statistics {
        let mark = style.next_mark();
        let color = style.next_color();
        write_line(&mut out, &history.series(statistic), statistic.label(), mark, color);
    }
    out
}

/// Appends one formatted line to a script buffer.
macro_rules! push_line {
    ($out:expr) => {
        $out.push('\n')
    };
    ($out:expr, $($arg:tt)*) => {{
        $out.push_str(&format!($($arg)*));
        $out.push('\n');
    }};
}

fn write_header(out: &mut String, x_size: f64, y_size: f64) {
    push_line!(out, "newgraph");
    push_line!(out, "xaxis");
    push_line!(out, "    size {x_size}");
    push_line!(out, "    label : {X_LABEL}");
    push_line!(out);
    push_line!(out, "yaxis");
    push_line!(out, "    size {y_size}");
    push_line!(out, "    label : {Y_LABEL}");
}

fn write_box(out: &mut String, x: f64, q: &FiveNumberSummary, fill: Rgb) {
    let lx = x - BOX_WIDTH / 2.0;
    let rx = x + BOX_WIDTH / 2.0;
    let (lq, uq) = (q.lower_quartile, q.upper_quartile);

    push_line!(
        out,
        "newline poly pcfill {fill} color {INK} pts {lx} {lq} {rx} {lq} {rx} {uq} {lx} {uq}"
    );
    write_segment(out, (x, uq), (x, q.maximum));
    write_segment(out, (lx, q.maximum), (rx, q.maximum));
    write_segment(out, (x, lq), (x, q.minimum));
    write_segment(out, (lx, q.minimum), (rx, q.minimum));
}

fn write_segment(out: &mut String, from: (f64, f64), to: (f64, f64)) {
    push_line!(
        out,
        "newline marktype none linetype solid color {INK} pts {} {} {} {}",
        from.0,
        from.1,
        to.0,
        to.1
    );
}

fn write_scatter(out: &mut String, populations: &[Vec<f64>]) {
    push_line!(out, "newcurve marktype circle fill 1 linetype none pts");
    for (epoch, population) in populations.iter().enumerate() {
        for fitness in population {
            push_line!(out, "    {epoch} {fitness}");
        }
    }
}

fn write_line(out: &mut String, values: &[f64], label: &str, mark: MarkType, color: Rgb) {
    push_line!(
        out,
        "newline marktype {mark} linetype dashed color {color} cfill {} pts",
        Rgb::WHITE
    );
    for (epoch, value) in values.iter().enumerate() {
        push_line!(out, "{epoch} {value}");
    }
    push_line!(out, "label : {label}");
}
