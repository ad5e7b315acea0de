//! Welcome banner: "VAKIT" in figlet's standard font with a green gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Deep green (#1a5f4f).
pub(crate) const DEEP_GREEN: (u8, u8, u8) = (0x1a, 0x5f, 0x4f);
/// Mint (#3ea87d).
pub(crate) const MINT: (u8, u8, u8) = (0x3e, 0xa8, 0x7d);
/// Marker green (#34d399), used for the highlighted next prayer.
pub(crate) const MARKER: (u8, u8, u8) = (0x34, 0xd3, 0x99);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

pub(crate) fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// Prints the welcome banner, then the version line.
pub fn print_welcome() {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("VAKIT").map(|fig| fig.to_string()))
        .unwrap_or_else(|| "VAKIT\n".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let _ = out.execute(SetForegroundColor(rgb(lerp_rgb(DEEP_GREEN, MINT, t))));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(rgb(MINT)));
    let _ = out.execute(Print(format!(
        "v{}  prayer times & Qibla compass\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(DEEP_GREEN, MINT, 0.0), DEEP_GREEN);
        assert_eq!(lerp_rgb(DEEP_GREEN, MINT, 1.0), MINT);
    }
}
