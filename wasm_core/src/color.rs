// HEX / RGB / HSL color conversion for the color converter page.
use serde::Serialize;

/// Channels and alpha in `0.0..=1.0`, unrounded so HSL input survives the trip back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn to_rgb8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Alpha rounded to two decimals.
    pub fn alpha(self) -> f64 {
        (self.a * 100.0).round() / 100.0
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ColorFormats {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
}

/// Parses a CSS color and renders it in all three notations. Translucent colors
/// render as `rgba()` / `hsla()`; the hex form always drops alpha.
///
/// # Example
/// ```
/// use devtoolkit_core::color::convert_color;
/// let formats = convert_color("#30d96e")?;
/// assert_eq!(formats.hex, "#30D96E");
/// assert_eq!(formats.rgb, "rgb(48, 217, 110)");
/// assert_eq!(formats.hsl, "hsl(142, 69%, 52%)");
///
/// let glass = convert_color("rgba(255, 0, 0, 0.5)")?;
/// assert_eq!(glass.rgb, "rgba(255, 0, 0, 0.5)");
/// assert_eq!(glass.hsl, "hsla(0, 100%, 50%, 0.5)");
/// # Ok::<(), String>(())
/// ```
pub fn convert_color(input: &str) -> Result<ColorFormats, String> {
    let color = parse_color(input)?;
    let [r, g, b] = color.to_rgb8();
    let (h, s, l) = rgb_to_hsl(color);
    let (h, s, l) = (
        h.round() as i64,
        (s * 100.0).round() as i64,
        (l * 100.0).round() as i64,
    );
    let alpha = color.alpha();
    let (rgb, hsl) = if alpha == 1.0 {
        (format!("rgb({r}, {g}, {b})"), format!("hsl({h}, {s}%, {l}%)"))
    } else {
        (
            format!("rgba({r}, {g}, {b}, {alpha})"),
            format!("hsla({h}, {s}%, {l}%, {alpha})"),
        )
    };
    Ok(ColorFormats {
        hex: format!("#{r:02X}{g:02X}{b:02X}"),
        rgb,
        hsl,
    })
}

/// Accepts every CSS Color 4 notation `csscolorparser` knows (all named colors,
/// `transparent`, `#rgb[a]`, `#rrggbb[aa]`, `rgb[a]()`, `hsl[a]()`, `hwb()`) plus bare hex.
pub fn parse_color(input: &str) -> Result<Rgba, String> {
    let text = input.trim();
    if text.is_empty() {
        return Err("color is empty".into());
    }
    let parsed = csscolorparser::parse(text).or_else(|err| {
        let bare_hex = matches!(text.len(), 3 | 4 | 6 | 8)
            && text.chars().all(|ch| ch.is_ascii_hexdigit());
        if bare_hex {
            csscolorparser::parse(&format!("#{text}"))
        } else {
            Err(err)
        }
    });
    let color = parsed.map_err(|err| format!("invalid color {text:?}: {err}"))?;
    Ok(Rgba {
        r: color.r.clamp(0.0, 1.0),
        g: color.g.clamp(0.0, 1.0),
        b: color.b.clamp(0.0, 1.0),
        a: color.a.clamp(0.0, 1.0),
    })
}

/// Returns hue in degrees, saturation and lightness in `0.0..=1.0`.
pub fn rgb_to_hsl(color: Rgba) -> (f64, f64, f64) {
    let Rgba { r, g, b, .. } = color;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return (0.0, 0.0, l);
    }
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    (h * 60.0, s, l)
}
