use crate::error::WheelError;

/// Lightness added to a slice's base color for its inner accent disc.
pub const ACCENT_LIFT: f64 = 0.18;
/// Desaturation applied to slices that have already been chosen.
pub const CHOSEN_DESATURATE: f64 = 0.9;
pub const CHOSEN_LIFT: f64 = 0.12;
/// Milder version for the translucent veil laid over a chosen photo slice.
pub const VEIL_DESATURATE: f64 = 0.8;
pub const VEIL_LIFT: f64 = 0.06;

const LABEL_LUMINANCE_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue, saturation and lightness, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelColor {
    Black,
    White,
}

impl LabelColor {
    pub fn as_css(self) -> &'static str {
        match self {
            LabelColor::Black => "#000000",
            LabelColor::White => "#ffffff",
        }
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb`, `rrggbb` or the `#rgb` shorthand.
    pub fn from_hex(hex: &str) -> Result<Self, WheelError> {
        let invalid = || WheelError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(invalid());
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h / 6.0, s, l }
    }

    /// Luminance weighting on gamma-encoded channels scaled to `0..=1`.
    pub fn luminance(self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Hsl {
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = if self.s == 0.0 {
            (self.l, self.l, self.l)
        } else {
            let q = if self.l < 0.5 {
                self.l * (1.0 + self.s)
            } else {
                self.l + self.s - self.l * self.s
            };
            let p = 2.0 * self.l - q;
            (
                hue_to_channel(p, q, self.h + 1.0 / 3.0),
                hue_to_channel(p, q, self.h),
                hue_to_channel(p, q, self.h - 1.0 / 3.0),
            )
        };

        let to_byte = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(to_byte(r), to_byte(g), to_byte(b))
    }
}

pub fn lighten(color: Rgb, amount: f64) -> Rgb {
    let hsl = color.to_hsl();
    Hsl { l: (hsl.l + amount).clamp(0.0, 1.0), ..hsl }.to_rgb()
}

/// Scales saturation down by `amount` and lifts lightness by `lift`.
pub fn desaturate(color: Rgb, amount: f64, lift: f64) -> Rgb {
    let hsl = color.to_hsl();
    Hsl {
        h: hsl.h,
        s: (hsl.s * (1.0 - amount)).clamp(0.0, 1.0),
        l: (hsl.l + lift).clamp(0.0, 1.0),
    }
    .to_rgb()
}

pub fn pick_label_color(background: Rgb) -> LabelColor {
    if background.luminance() > LABEL_LUMINANCE_THRESHOLD {
        LabelColor::Black
    } else {
        LabelColor::White
    }
}

/// Base and accent colors for a slice, greyed out once it has been chosen.
pub fn slice_palette(base: Rgb, chosen: bool) -> (Rgb, Rgb) {
    let accent = lighten(base, ACCENT_LIFT);
    if chosen {
        (
            desaturate(base, CHOSEN_DESATURATE, CHOSEN_LIFT),
            desaturate(accent, CHOSEN_DESATURATE, CHOSEN_LIFT),
        )
    } else {
        (base, accent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#df2b2b").unwrap(), Rgb::new(0xdf, 0x2b, 0x2b));
        assert_eq!(Rgb::from_hex("fb8c00").unwrap(), Rgb::new(0xfb, 0x8c, 0x00));
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn rejects_bad_hex() {
        for bad in ["", "#12", "#1234567", "#gg0000", "#ééé"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(WheelError::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn hex_output_is_lowercase_rgb_order() {
        // rgb channels must not be swapped on the way out
        assert_eq!(Rgb::new(0x12, 0xab, 0x3c).to_hex(), "#12ab3c");
    }

    #[test]
    fn hsl_of_primaries() {
        let red = Rgb::new(255, 0, 0).to_hsl();
        assert!((red.h - 0.0).abs() < 1e-9);
        assert!((red.s - 1.0).abs() < 1e-9);
        assert!((red.l - 0.5).abs() < 1e-9);

        let blue = Rgb::new(0, 0, 255).to_hsl();
        assert!((blue.h - 2.0 / 3.0).abs() < 1e-9);

        let grey = Rgb::new(128, 128, 128).to_hsl();
        assert_eq!(grey.s, 0.0);
    }

    #[test]
    fn hsl_conversion_preserves_catalogue_colors() {
        for hex in ["#df2b2b", "#fb8c00", "#f2ce24", "#2060c9", "#7b3bb6", "#23103e"] {
            let rgb = Rgb::from_hex(hex).unwrap();
            assert_eq!(rgb.to_hsl().to_rgb(), rgb, "{hex}");
        }
    }

    #[test]
    fn lighten_raises_lightness_and_clamps() {
        let base = Rgb::from_hex("#2060c9").unwrap();
        let lighter = lighten(base, ACCENT_LIFT);
        assert!(lighter.to_hsl().l > base.to_hsl().l);
        assert_eq!(lighten(base, 5.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn desaturate_pulls_toward_grey() {
        let base = Rgb::from_hex("#df2b2b").unwrap();
        let dull = desaturate(base, 1.0, 0.0);
        assert_eq!(dull.r, dull.g);
        assert_eq!(dull.g, dull.b);

        let partial = desaturate(base, 0.8, 0.06);
        assert!(partial.to_hsl().s < base.to_hsl().s);
        assert!(partial.to_hsl().l > base.to_hsl().l);
    }

    #[test]
    fn label_color_contrasts_with_background() {
        assert_eq!(pick_label_color(Rgb::new(255, 255, 255)), LabelColor::Black);
        assert_eq!(pick_label_color(Rgb::from_hex("#f2ce24").unwrap()), LabelColor::Black);
        assert_eq!(pick_label_color(Rgb::from_hex("#23103e").unwrap()), LabelColor::White);
        assert_eq!(pick_label_color(Rgb::from_hex("#2060c9").unwrap()), LabelColor::White);
    }

    #[test]
    fn chosen_palette_is_muted() {
        let base = Rgb::from_hex("#3fa64b").unwrap();
        let (live, _) = slice_palette(base, false);
        let (muted, muted_accent) = slice_palette(base, true);
        assert_eq!(live, base);
        assert!(muted.to_hsl().s < base.to_hsl().s);
        assert!(muted_accent.to_hsl().s < lighten(base, ACCENT_LIFT).to_hsl().s);
    }
}
