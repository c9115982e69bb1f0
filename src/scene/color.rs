use crate::graph::Rgba;

/// 8-bit color handed to the renderer. Alpha stays a float, as in CSS `rgba()`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl RenderColor {
    pub fn alpha_byte(self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

pub fn float_to_byte(value: f32) -> u8 {
    if value == 1.0 {
        255
    } else {
        (value * 256.0).floor().clamp(0.0, 255.0) as u8
    }
}

pub fn to_render_color(color: Rgba) -> RenderColor {
    RenderColor {
        r: float_to_byte(color.r),
        g: float_to_byte(color.g),
        b: float_to_byte(color.b),
        a: color.a.clamp(0.0, 1.0),
    }
}

/// Lowers HSL lightness by `amount` of itself; hue, saturation and alpha are
/// kept.
pub fn darken(color: RenderColor, amount: f32) -> RenderColor {
    let amount = amount.clamp(0.0, 1.0);
    if amount <= 0.0 {
        return color;
    }

    let (h, s, l) = rgb_to_hsl(color.r, color.g, color.b);
    let (r, g, b) = hsl_to_rgb(h, s, l - l * amount);
    RenderColor { r, g, b, a: color.a }
}

pub fn shade(color: Rgba, darkened: bool, amount: f32) -> RenderColor {
    let color = to_render_color(color);
    if darkened { darken(color, amount) } else { color }
}

fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta <= f32::EPSILON {
        return (0.0, 0.0, l);
    }

    let s = if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (h * 60.0, s, l)
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let to_byte = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;

    if s <= f32::EPSILON {
        let gray = to_byte(l);
        return (gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h / 360.0;

    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    (
        to_byte(channel(h + 1.0 / 3.0)),
        to_byte(channel(h)),
        to_byte(channel(h - 1.0 / 3.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightness(color: RenderColor) -> f32 {
        rgb_to_hsl(color.r, color.g, color.b).2
    }

    #[test]
    fn float_to_byte_matches_css_conversion() {
        assert_eq!(float_to_byte(1.0), 255);
        assert_eq!(float_to_byte(0.0), 0);
        assert_eq!(float_to_byte(0.5), 128);
        assert_eq!(float_to_byte(0.999), 255);
        assert_eq!(float_to_byte(-0.2), 0);
    }

    #[test]
    fn darken_scales_lightness_and_keeps_alpha() {
        let base = to_render_color(Rgba::new(0.2, 0.6, 0.9, 0.75));
        let darker = darken(base, 0.9);

        assert_eq!(darker.a, 0.75);
        let expected = lightness(base) * 0.1;
        assert!((lightness(darker) - expected).abs() < 0.01);
    }

    #[test]
    fn darken_preserves_hue_of_saturated_color() {
        let red = RenderColor { r: 255, g: 0, b: 0, a: 1.0 };
        let darker = darken(red, 0.9);
        assert!(darker.r > 0);
        assert_eq!((darker.g, darker.b), (0, 0));
        assert!(darker.r < 30);
    }

    #[test]
    fn zero_amount_is_identity() {
        let base = to_render_color(Rgba::new(0.3, 0.4, 0.5, 1.0));
        assert_eq!(darken(base, 0.0), base);
        assert_eq!(shade(Rgba::new(0.3, 0.4, 0.5, 1.0), false, 0.9), base);
    }

    #[test]
    fn gray_stays_gray() {
        let gray = RenderColor { r: 200, g: 200, b: 200, a: 1.0 };
        let darker = darken(gray, 0.5);
        assert_eq!(darker.r, darker.g);
        assert_eq!(darker.g, darker.b);
        assert_eq!(darker.r, 100);
    }
}
