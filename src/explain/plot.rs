//! Attribution summary plot (beeswarm) rendered to PNG
//!
//! The chart is laid out as SVG and rasterized with resvg. One row per
//! feature, ordered by mean |attribution|; each dot is a sample, placed by
//! its attribution and coloured by the feature's value.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use faer::Mat;
use resvg::{tiny_skia, usvg};

use super::attribution::rank_features;

/// Canvas size in pixels
pub const PLOT_WIDTH: u32 = 1000;
pub const PLOT_HEIGHT: u32 = 600;

/// Maximum number of feature rows drawn
pub const MAX_DISPLAY: usize = 20;

const MARGIN_LEFT: f64 = 190.0;
const MARGIN_RIGHT: f64 = 110.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

const DOT_RADIUS: f64 = 2.2;

/// Horizontal bucket width used to stack overlapping dots
const SWARM_BUCKET_PX: f64 = 3.0;

const LOW_COLOR: (u8, u8, u8) = (0, 139, 251);
const HIGH_COLOR: (u8, u8, u8) = (255, 0, 81);

const EMPTY_NOTE: &str = "No samples in this group";

/// Everything needed to draw one summary plot
pub struct SummaryPlot<'a> {
    pub title: &'a str,
    pub feature_names: &'a [String],
    /// Attribution matrix (samples x features)
    pub shap: &'a Mat<f64>,
    /// Feature values used for dot colour (samples x features)
    pub features: &'a Mat<f64>,
    /// Rows of `shap`/`features` that belong to this plot
    pub rows: &'a [usize],
}

/// Rasterizes SVG plots; holds the font database so it is loaded once.
pub struct PlotRenderer {
    options: usvg::Options<'static>,
}

impl Default for PlotRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotRenderer {
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        Self { options }
    }

    /// Render the plot and write it as a PNG file
    pub fn render_png(&self, plot: &SummaryPlot<'_>, path: &Path) -> Result<()> {
        let svg = summary_svg(plot);
        let tree = usvg::Tree::from_str(&svg, &self.options)
            .context("Failed to parse generated summary plot")?;

        let mut pixmap = tiny_skia::Pixmap::new(PLOT_WIDTH, PLOT_HEIGHT)
            .context("Failed to allocate plot canvas")?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap
            .save_png(path)
            .with_context(|| format!("Failed to write plot to {}", path.display()))
    }
}

/// Build the SVG document for a summary plot
pub fn summary_svg(plot: &SummaryPlot<'_>) -> String {
    let (w, h) = (PLOT_WIDTH as f64, PLOT_HEIGHT as f64);
    let plot_w = w - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = h - MARGIN_TOP - MARGIN_BOTTOM;

    let mut svg = String::with_capacity(64 * 1024);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="DejaVu Sans, Arial, Helvetica, sans-serif">"#
    );
    let _ = writeln!(svg, r#"<rect width="{w}" height="{h}" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="30" font-size="18" text-anchor="middle" fill="black">{}</text>"#,
        w / 2.0,
        escape(plot.title)
    );

    if plot.rows.is_empty() || plot.feature_names.is_empty() {
        let _ = writeln!(
            svg,
            r##"<text x="{}" y="{}" font-size="16" text-anchor="middle" fill="#555555">{}</text>"##,
            w / 2.0,
            h / 2.0,
            EMPTY_NOTE
        );
        svg.push_str("</svg>\n");
        return svg;
    }

    let ranked = rank_features(plot.shap, plot.rows, plot.feature_names);
    let shown: Vec<usize> = ranked.iter().take(MAX_DISPLAY).map(|r| r.index).collect();
    let row_h = plot_h / shown.len() as f64;

    let (x_min, x_max) = value_range(plot.shap, plot.rows, &shown);
    let to_px = |v: f64| MARGIN_LEFT + (v - x_min) / (x_max - x_min) * plot_w;

    // Axis ticks and grid
    let axis_y = MARGIN_TOP + plot_h;
    let _ = writeln!(
        svg,
        r#"<line x1="{MARGIN_LEFT}" y1="{axis_y}" x2="{}" y2="{axis_y}" stroke="black" stroke-width="1"/>"#,
        MARGIN_LEFT + plot_w
    );
    for tick in ticks(x_min, x_max) {
        let x = to_px(tick);
        let _ = writeln!(
            svg,
            r#"<line x1="{x:.1}" y1="{axis_y}" x2="{x:.1}" y2="{}" stroke="black"/>"#,
            axis_y + 5.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{x:.1}" y="{}" font-size="12" text-anchor="middle">{}</text>"#,
            axis_y + 20.0,
            format_tick(tick)
        );
    }
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="14" text-anchor="middle">SHAP value (impact on model output)</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        h - 15.0
    );

    // Zero reference line
    if x_min <= 0.0 && x_max >= 0.0 {
        let zx = to_px(0.0);
        let _ = writeln!(
            svg,
            r##"<line x1="{zx:.1}" y1="{MARGIN_TOP}" x2="{zx:.1}" y2="{axis_y}" stroke="#999999" stroke-width="1"/>"##
        );
    }

    for (slot, &j) in shown.iter().enumerate() {
        let center = MARGIN_TOP + (slot as f64 + 0.5) * row_h;
        let _ = writeln!(
            svg,
            r##"<line x1="{MARGIN_LEFT}" y1="{center:.1}" x2="{}" y2="{center:.1}" stroke="#cccccc" stroke-dasharray="1,3"/>"##,
            MARGIN_LEFT + plot_w
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.1}" font-size="12" text-anchor="end">{}</text>"#,
            MARGIN_LEFT - 8.0,
            center + 4.0,
            escape(&plot.feature_names[j])
        );

        let (lo, hi) = color_range(plot.features, plot.rows, j);
        let max_offset = row_h * 0.4;
        let mut buckets: std::collections::HashMap<i64, usize> = std::collections::HashMap::new();

        for &i in plot.rows {
            let x = to_px(plot.shap[(i, j)]);
            let bucket = (x / SWARM_BUCKET_PX).round() as i64;
            let k = buckets.entry(bucket).or_insert(0);
            let offset = swarm_offset(*k, max_offset);
            *k += 1;

            let t = normalize(plot.features[(i, j)], lo, hi);
            let _ = writeln!(
                svg,
                r#"<circle cx="{x:.1}" cy="{:.1}" r="{DOT_RADIUS}" fill="{}" fill-opacity="0.8"/>"#,
                center + offset,
                blend(t)
            );
        }
    }

    color_bar(&mut svg, w, plot_h);
    svg.push_str("</svg>\n");
    svg
}

/// Vertical offset for the k-th dot in a bucket: 0, +d, -d, +2d, -2d, ...
fn swarm_offset(k: usize, max_offset: f64) -> f64 {
    let step = DOT_RADIUS * 0.9;
    let level = ((k + 1) / 2) as f64;
    let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
    (sign * level * step).clamp(-max_offset, max_offset)
}

fn color_bar(svg: &mut String, w: f64, plot_h: f64) {
    let x = w - MARGIN_RIGHT + 40.0;
    let top = MARGIN_TOP + plot_h * 0.1;
    let height = plot_h * 0.8;
    let _ = writeln!(
        svg,
        r#"<defs><linearGradient id="fv" x1="0" y1="1" x2="0" y2="0"><stop offset="0" stop-color="{}"/><stop offset="1" stop-color="{}"/></linearGradient></defs>"#,
        blend(0.0),
        blend(1.0)
    );
    let _ = writeln!(
        svg,
        r#"<rect x="{x}" y="{top}" width="10" height="{height}" fill="url(#fv)"/>"#
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="12">High</text>"#,
        x + 14.0,
        top + 10.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="12">Low</text>"#,
        x + 14.0,
        top + height
    );
    let lx = x + 40.0;
    let ly = top + height / 2.0;
    let _ = writeln!(
        svg,
        r#"<text x="{lx}" y="{ly}" font-size="12" text-anchor="middle" transform="rotate(-90 {lx} {ly})">Feature value</text>"#
    );
}

/// Padded attribution range over the plotted cells
fn value_range(shap: &Mat<f64>, rows: &[usize], cols: &[usize]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &i in rows {
        for &j in cols {
            let v = shap[(i, j)];
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() || (hi - lo).abs() < 1e-12 {
        let c = if lo.is_finite() { lo } else { 0.0 };
        return (c - 1.0, c + 1.0);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// 5th and 95th percentile of a feature over the plotted rows
fn color_range(features: &Mat<f64>, rows: &[usize], j: usize) -> (f64, f64) {
    let mut values: Vec<f64> = rows.iter().map(|&i| features[(i, j)]).collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pick = |q: f64| values[((values.len() - 1) as f64 * q).round() as usize];
    let (lo, hi) = (pick(0.05), pick(0.95));
    if hi > lo {
        (lo, hi)
    } else {
        (values[0], values[values.len() - 1])
    }
}

fn normalize(v: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Blue-to-red colour for a normalized feature value
fn blend(t: f64) -> String {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        mix(LOW_COLOR.0, HIGH_COLOR.0),
        mix(LOW_COLOR.1, HIGH_COLOR.1),
        mix(LOW_COLOR.2, HIGH_COLOR.2)
    )
}

/// Round tick positions covering [lo, hi]
fn ticks(lo: f64, hi: f64) -> Vec<f64> {
    let raw = (hi - lo) / 5.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(magnitude * 10.0);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn format_tick(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
