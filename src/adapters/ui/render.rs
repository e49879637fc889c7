//! Terminal rendering of the result panel, gauge and advice.
//!
//! Everything returns `String`s so the TUI decides when to print.

use crate::domain::{BAND_WIDTHS, BmiResult, HealthAdvice, gauge_position};
use crossterm::style::{Color, Stylize};

/// Width of the gauge in terminal cells.
pub const GAUGE_WIDTH: usize = 50;

const BAND_COLORS: [Color; 4] = [
    Color::Rgb { r: 0x9e, g: 0xc5, b: 0xfe },
    Color::Rgb { r: 0xa7, g: 0xf3, b: 0xd0 },
    Color::Rgb { r: 0xfd, g: 0xe6, b: 0x8a },
    Color::Rgb { r: 0xfe, g: 0xca, b: 0xca },
];

/// Map a `display_tag` to a terminal colour.
pub fn tag_color(tag: &str) -> Color {
    match tag {
        "blue" => Color::Blue,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        _ => Color::White,
    }
}

/// Column of the gauge marker for a bar `width` cells wide.
pub fn marker_column(bmi: f64, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let pos = gauge_position(bmi) / 100.0;
    (pos * (width - 1) as f64).round() as usize
}

/// Band index (0..4) for each cell, using the fixed band widths.
pub fn band_cells(width: usize) -> Vec<usize> {
    (0..width)
        .map(|i| {
            let center = (i as f64 + 0.5) / width as f64 * 100.0;
            let mut edge = 0.0;
            for (band, w) in BAND_WIDTHS.iter().enumerate() {
                edge += w;
                if center < edge {
                    return band;
                }
            }
            BAND_WIDTHS.len() - 1
        })
        .collect()
}

/// Two-line gauge: marker row above a row of coloured bands.
pub fn render_gauge(bmi: f64, width: usize) -> String {
    let marker = marker_column(bmi, width);
    let mut out = String::new();
    out.push_str(&" ".repeat(marker));
    out.push_str(&format!("{}", "▼".bold()));
    out.push('\n');
    for band in band_cells(width) {
        out.push_str(&format!("{}", "█".with(BAND_COLORS[band])));
    }
    out.push('\n');
    let labels = format!(
        "{:<w1$}{:^w2$}{:>w3$}",
        "thin",
        "normal",
        "obese",
        w1 = width / 3,
        w2 = width / 3,
        w3 = width - 2 * (width / 3)
    );
    out.push_str(&format!("{}", labels.dark_grey()));
    out
}

/// BMI value, coloured category label and gauge.
pub fn render_result(result: &BmiResult) -> String {
    format!(
        "\n  {}\n  {}\n  {}\n\n{}\n",
        "YOUR RESULT".dark_grey().bold(),
        format!("{:.1}", result.bmi).bold(),
        result
            .category
            .label()
            .with(tag_color(&result.display_tag))
            .bold(),
        render_gauge(result.bmi, GAUGE_WIDTH)
    )
}

/// Summary followed by the two bullet lists.
pub fn render_advice(advice: &HealthAdvice) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "💡 Health summary".bold()));
    out.push_str(&format!("{}\n", advice.summary));

    out.push_str(&format!("\n{}\n", "🏃 Recommended activities".bold().with(Color::Blue)));
    for item in &advice.recommendations {
        out.push_str(&format!("  {} {}\n", "•".with(Color::Blue), item));
    }

    out.push_str(&format!("\n{}\n", "🥗 Eating habits".bold().with(Color::Green)));
    for item in &advice.diet_tips {
        out.push_str(&format!("  {} {}\n", "•".with(Color::Green), item));
    }
    out
}
