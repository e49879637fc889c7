//! Pastel ASCII banner with a vertical gradient (BMI ADVISOR).

use chrono::{Datelike, Local};
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Pastel pink (#f9a8d4).
const PASTEL_PINK: (u8, u8, u8) = (0xf9, 0xa8, 0xd4);
/// Pastel purple (#c4b5fd).
const PASTEL_PURPLE: (u8, u8, u8) = (0xc4, 0xb5, 0xfd);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Banner text as figlet art, or the plain title if the font cannot render it.
fn banner_art(title: &str) -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(title).map(|figure| figure.to_string()))
        .unwrap_or_else(|| title.to_string())
}

/// Prints the welcome banner with a pink-to-purple gradient, then version and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let art = banner_art("BMI Advisor");
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(PASTEL_PINK, PASTEL_PURPLE, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: PASTEL_PURPLE.0,
        g: PASTEL_PURPLE.1,
        b: PASTEL_PURPLE.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Body Mass Index with AI health advice\r\n\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

/// Footer line printed when the session ends.
pub fn footer() -> String {
    format!("© {} BMI Advisor | Powered by Gemini", Local::now().year())
}
