//! SVG badge composition.
//!
//! Turns a [`Profile`] into a self-contained SVG card: a header, six labelled
//! statistic rows and a two-rectangle progress gauge. Two fixed layouts exist,
//! differing only in dimensions and typography.

use crate::models::{display_value, format_number, number_or, Profile};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Selectable card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// 467x195 card with a 417px progress bar.
    #[default]
    Full,
    /// 410x180 card with a 360px progress bar.
    Compact,
}

impl FromStr for Layout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Layout::Full),
            "compact" => Ok(Layout::Compact),
            other => Err(format!("unknown layout '{}'", other)),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Full => write!(f, "full"),
            Layout::Compact => write!(f, "compact"),
        }
    }
}

/// Geometry and typography for one layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSpec {
    pub width: u32,
    pub height: u32,
    pub header_font_px: u32,
    pub row_font_px: u32,
    pub padding_x: u32,
    pub header_y: u32,
    pub first_row_y: u32,
    pub row_step: u32,
    /// Right edge for value text, relative to `padding_x`.
    pub value_x: u32,
    pub bar_y: u32,
    pub bar_width: f64,
    pub bar_height: u32,
}

const FULL: LayoutSpec = LayoutSpec {
    width: 467,
    height: 195,
    header_font_px: 18,
    row_font_px: 14,
    padding_x: 25,
    header_y: 35,
    first_row_y: 60,
    row_step: 20,
    value_x: 420,
    bar_y: 175,
    bar_width: 417.0,
    bar_height: 10,
};

const COMPACT: LayoutSpec = LayoutSpec {
    width: 410,
    height: 180,
    header_font_px: 16,
    row_font_px: 12,
    padding_x: 25,
    header_y: 32,
    first_row_y: 55,
    row_step: 18,
    value_x: 360,
    bar_y: 160,
    bar_width: 360.0,
    bar_height: 8,
};

impl Layout {
    pub fn spec(&self) -> &'static LayoutSpec {
        match self {
            Layout::Full => &FULL,
            Layout::Compact => &COMPACT,
        }
    }
}

/// Numeric values derived from a profile, with loose-JSON defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankStats {
    /// Progress towards the next rank, 0 when absent.
    pub progress: f64,
    /// Owned machines counted towards the rank, 0 when absent.
    pub ownership: f64,
    /// Machines required for the rank, 1 when absent or zero.
    pub requirement: f64,
}

impl RankStats {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            progress: number_or(&profile.current_rank_progress, 0.0),
            ownership: number_or(&profile.rank_ownership, 0.0),
            requirement: number_or(&profile.rank_requirement, 1.0),
        }
    }

    /// Share of the rank requirement still outstanding, rounded to 2 places.
    ///
    /// Not rendered on either layout.
    pub fn remaining_percent(&self) -> f64 {
        let raw = (self.requirement - self.ownership) / self.requirement * 100.0;
        (raw * 100.0).round() / 100.0
    }

    /// Width of the filled part of a bar `bar_width` long.
    pub fn fill_width(&self, bar_width: f64) -> f64 {
        (self.progress / 100.0 * bar_width).clamp(0.0, bar_width)
    }
}

/// Escapes text for use inside SVG character data or attribute values.
pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

const ROW_LABELS: [&str; 6] = [
    "👤 Username:",
    "🧠 Points:",
    "💻 System Owns:",
    "👥 User Owns:",
    "🎖️ Current Rank:",
    "⏭️ Next Rank:",
];

/// Renders the badge for `profile` using `layout`.
pub fn render_badge(profile: &Profile, layout: Layout) -> String {
    let spec = layout.spec();
    let stats = RankStats::from_profile(profile);

    tracing::debug!(
        "Composing {} badge: progress={}, remaining={}%",
        layout,
        stats.progress,
        stats.remaining_percent()
    );

    let values = [
        &profile.name,
        &profile.points,
        &profile.system_owns,
        &profile.user_owns,
        &profile.rank,
        &profile.next_rank,
    ];

    let mut rows = String::new();
    for (i, (label, value)) in ROW_LABELS.iter().zip(values).enumerate() {
        let y = spec.first_row_y + spec.row_step * i as u32;
        rows.push_str(&format!(
            r#"
  <g transform="translate({px}, {y})">
    <text class="label" x="0" y="0">{label}</text>
    <text class="value" x="{vx}" y="0" text-anchor="end">{value}</text>
  </g>"#,
            px = spec.padding_x,
            y = y,
            label = label,
            vx = spec.value_x,
            value = escape_xml(&display_value(value)),
        ));
    }

    let radius = format_number(spec.bar_height as f64 / 2.0);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" fill="none">
  <style>
    .header {{
      font: 600 {hf}px 'Fira Code', monospace;
      fill: #9fef00;
    }}
    .label {{
      font: 600 {rf}px 'Fira Code', monospace;
      fill: #9fef00;
    }}
    .value {{
      font: 600 {rf}px 'Fira Code', monospace;
      fill: #58d66d;
    }}
    .progress-bg {{
      fill: #30363d;
    }}
    .progress-bar {{
      fill: #9fef00;
    }}
  </style>

  <rect x="0.5" y="0.5" rx="4.5" width="{cw}" height="{ch}" fill="#161b22" stroke="#2f2f2f" />

  <g transform="translate({px}, {hy})">
    <text class="header">🟢 HTB STATUS</text>
    <text class="value" x="{vx}" y="0" text-anchor="end">{progress}%</text>
  </g>
{rows}

  <g transform="translate({px}, {by})">
    <rect width="{bw}" height="{bh}" class="progress-bg" rx="{r}" ry="{r}" />
    <rect width="{fill}" height="{bh}" class="progress-bar" rx="{r}" ry="{r}" />
  </g>
</svg>
"##,
        w = spec.width,
        h = spec.height,
        hf = spec.header_font_px,
        rf = spec.row_font_px,
        cw = spec.width - 1,
        ch = spec.height - 1,
        px = spec.padding_x,
        hy = spec.header_y,
        vx = spec.value_x,
        progress = format_number(stats.progress),
        rows = rows,
        by = spec.bar_y,
        bw = format_number(spec.bar_width),
        bh = spec.bar_height,
        r = radius,
        fill = format_number(stats.fill_width(spec.bar_width)),
    )
}
