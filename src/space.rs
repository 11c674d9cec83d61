//! Color space conversions: sRGB, HSL, CIE XYZ and CIE L*a*b*.
//!
//! All functions are pure.  Values built from out-of-range inputs are
//! clamped, never rejected.

use lazy_static::lazy_static;
use rgb::{RGB8, RGBA8};

/// Specifies the methods a RGB color encoding must provide to be
/// measured perceptually.
pub trait RGBColor: Sized {
    /// Return the red, green and blue components of the color.
    fn to_rgb8(&self) -> RGB8;

    /// Create a color from its red, green and blue components.
    fn from_rgb8(c: RGB8) -> Self;

    /// Convert the color to CIE XYZ (sRGB, D65).
    fn to_xyz(&self) -> Xyz {
        let RGB8 { r, g, b } = self.to_rgb8();
        rgb_to_xyz(r, g, b)
    }

    /// Convert the color to CIE L*a*b* relative to [`D65`].
    fn to_lab(&self) -> Lab { self.to_xyz().to_lab() }

    /// Perceptual distance to `other`: the CIEDE2000 difference
    /// divided by 100, so that black and white are ≈ 1 apart.
    ///
    /// # Example
    ///
    /// ```
    /// use rgb::RGB8;
    /// use distinct_colors::RGBColor;
    /// let black = RGB8::new(0, 0, 0);
    /// let white = RGB8::new(255, 255, 255);
    /// assert!((black.distance(&white) - 1.).abs() < 1e-2);
    /// ```
    fn distance(&self, other: &Self) -> f64 {
        self.to_lab().ciede2000(&other.to_lab()) / 100.
    }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgb8(&self) -> RGB8 { *self }

    #[inline]
    fn from_rgb8(c: RGB8) -> Self { c }
}

/// The alpha channel is ignored by every measurement.
impl RGBColor for RGBA8 {
    #[inline]
    fn to_rgb8(&self) -> RGB8 { RGB8 { r: self.r, g: self.g, b: self.b } }

    #[inline]
    fn from_rgb8(c: RGB8) -> Self { RGBA8 { r: c.r, g: c.g, b: c.b, a: 255 } }
}

/// Build a color from integer channels, clamping each to \[0, 255\].
pub fn rgb_clamped(r: i32, g: i32, b: i32) -> RGB8 {
    let c = |x: i32| x.clamp(0, 255) as u8;
    RGB8 { r: c(r), g: c(g), b: c(b) }
}

/// A color given by hue, saturation and luminance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    h: f64,
    s: f64,
    l: f64,
}

impl Hsl {
    /// Create an HSL color.  The hue is clamped to \[0, 360\] and the
    /// saturation and luminance to \[0, 1\].
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Hsl { h: h.clamp(0., 360.), s: s.clamp(0., 1.), l: l.clamp(0., 1.) }
    }

    /// Hue in degrees.
    pub fn h(&self) -> f64 { self.h }
    /// Saturation.
    pub fn s(&self) -> f64 { self.s }
    /// Luminance.
    pub fn l(&self) -> f64 { self.l }

    /// Convert to 8 bit sRGB with [`hsl_to_rgb`].
    pub fn to_rgb(&self) -> RGB8 { hsl_to_rgb(self.h, self.s, self.l) }

    /// Convert to any [`RGBColor`] encoding.
    pub fn to_color<Color: RGBColor>(&self) -> Color {
        Color::from_rgb8(self.to_rgb())
    }
}

/// CIE 1931 XYZ tristimulus values, restricted to the sRGB gamut
/// under a D65 illuminant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Xyz {
    x: f64,
    y: f64,
    z: f64,
}

/// Reference white of the D65 illuminant.
pub const D65: Xyz = Xyz { x: 0.9505, y: 1.0, z: 1.089 };

impl Xyz {
    /// Create XYZ values, clamping each component to \[0, `D65`\].
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Xyz { x: x.clamp(0., D65.x), y: y.clamp(0., D65.y), z: z.clamp(0., D65.z) }
    }

    /// X component, in \[0, 0.9505\].
    pub fn x(&self) -> f64 { self.x }
    /// Y component (luminance), in \[0, 1\].
    pub fn y(&self) -> f64 { self.y }
    /// Z component, in \[0, 1.089\].
    pub fn z(&self) -> f64 { self.z }

    /// Convert to L*a*b* relative to [`D65`].
    #[inline]
    pub fn to_lab(&self) -> Lab { xyz_to_lab(*self, D65) }
}

/// A point of the CIE L*a*b* color space.  Components are not
/// bounded; `l` is roughly in \[0, 100\] for sRGB colors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// A L*a*b* point; nothing is clamped.
    pub const fn new(l: f64, a: f64, b: f64) -> Self { Lab { l, a, b } }
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

lazy_static! {
    // Linearized value of every 8 bit channel.
    static ref SRGB_LINEAR: [f64; 256] = {
        let mut table = [0.; 256];
        for (i, v) in table.iter_mut().enumerate() {
            *v = srgb_to_linear(i as f64 / 255.);
        }
        table
    };
}

/// Convert sRGB channels to CIE XYZ (D65 working space).
pub fn rgb_to_xyz(r: u8, g: u8, b: u8) -> Xyz {
    let r = SRGB_LINEAR[r as usize];
    let g = SRGB_LINEAR[g as usize];
    let b = SRGB_LINEAR[b as usize];
    Xyz::new(0.4124564 * r + 0.3575761 * g + 0.1804375 * b,
             0.2126729 * r + 0.7151522 * g + 0.0721750 * b,
             0.0193339 * r + 0.1191920 * g + 0.9503041 * b)
}

#[inline]
fn f_lab(t: f64) -> f64 {
    if t > 0.008856 { t.cbrt() } else { 7.787 * t + 16. / 116. }
}

/// Convert XYZ values to L*a*b* relative to the reference `white`.
pub fn xyz_to_lab(xyz: Xyz, white: Xyz) -> Lab {
    let fx = f_lab(xyz.x / white.x);
    let fy = f_lab(xyz.y / white.y);
    let fz = f_lab(xyz.z / white.z);
    Lab { l: 116. * fy - 16., a: 500. * (fx - fy), b: 200. * (fy - fz) }
}

/// Convert a RGB color to L*a*b* relative to [`D65`].
#[inline]
pub fn rgb_to_lab(c: RGB8) -> Lab { c.to_lab() }

/// Scale a normalized channel to \[0, 255\], rounding half away from
/// zero.
#[inline]
fn channel(v: f64) -> u8 { (255. * v).round().clamp(0., 255.) as u8 }

/// Convert HSL to RGB.  `h` is in degrees (\[0, 360\]), `s` and `l`
/// in \[0, 1\].
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> RGB8 {
    if s == 0. {
        let v = channel(l);
        return RGB8 { r: v, g: v, b: v };
    }
    let q = if l < 0.5 { l * (1. + s) } else { l + s - l * s };
    let p = 2. * l - q;
    let basis = |t: f64| {
        let t = if t < 0. { t + 1. } else if t > 1. { t - 1. } else { t };
        if 6. * t < 1. { p + (q - p) * 6. * t }
        else if 2. * t < 1. { q }
        else if 3. * t < 2. { p + (q - p) * (2. / 3. - t) * 6. }
        else { p }
    };
    let hk = h / 360.;
    RGB8 { r: channel(basis(hk + 1. / 3.)),
           g: channel(basis(hk)),
           b: channel(basis(hk - 1. / 3.)) }
}

/// Perceptual distance between two colors: CIEDE2000 / 100.
#[inline]
pub fn color_distance(c1: RGB8, c2: RGB8) -> f64 { c1.distance(&c2) }


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clamping() {
        assert_eq!(rgb_clamped(12, 34, 56), RGB8::new(12, 34, 56));
        assert_eq!(rgb_clamped(300, -4, 255), RGB8::new(255, 0, 255));
        let hsl = Hsl::new(400., -0.5, 0.25);
        assert_eq!((hsl.h(), hsl.s(), hsl.l()), (360., 0., 0.25));
        let hsl = Hsl::new(120., 0.5, 0.75);
        assert_eq!((hsl.h(), hsl.s(), hsl.l()), (120., 0.5, 0.75));
        let xyz = Xyz::new(2., -1., 1.5);
        assert_eq!((xyz.x(), xyz.y(), xyz.z()), (0.9505, 0., 1.089));
        let xyz = Xyz::new(0.3, 0.4, 0.5);
        assert_eq!((xyz.x(), xyz.y(), xyz.z()), (0.3, 0.4, 0.5));
    }

    #[test]
    fn white_and_black() {
        let w = rgb_to_lab(RGB8::new(255, 255, 255));
        assert!((w.l - 100.).abs() < 1e-2, "L = {}", w.l);
        // b* ≈ 0.0104 because the matrix white is 1.08883, not 1.089.
        assert!(w.a.abs() < 2e-2 && w.b.abs() < 2e-2, "{:?}", w);
        let k = rgb_to_lab(RGB8::new(0, 0, 0));
        assert!(k.l.abs() < 1e-9, "L = {}", k.l);
    }

    #[test]
    fn xyz_of_primaries() {
        let red = rgb_to_xyz(255, 0, 0);
        assert!((red.x() - 0.4124564).abs() < 1e-7);
        assert!((red.y() - 0.2126729).abs() < 1e-7);
        let mid = rgb_to_xyz(10, 10, 10);
        assert!((mid.y() - 10. / 255. / 12.92).abs() < 1e-6);
    }

    #[test]
    fn hsl_gray() {
        assert_eq!(hsl_to_rgb(0., 0., 0.5), RGB8::new(128, 128, 128));
        assert_eq!(Hsl::new(200., 0., 1.).to_rgb(), RGB8::new(255, 255, 255));
        assert_eq!(Hsl::new(200., 0., 0.).to_rgb(), RGB8::new(0, 0, 0));
    }

    #[test]
    fn hsl_hues() {
        assert_eq!(hsl_to_rgb(0., 1., 0.5), RGB8::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(120., 1., 0.5), RGB8::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(240., 1., 0.5), RGB8::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(360., 1., 0.5), RGB8::new(255, 0, 0));
        assert_eq!(Hsl::new(180., 0.5, 0.5).to_color::<RGBA8>(),
                   RGBA8::new(64, 191, 191, 255));
    }

    #[test]
    fn distance_basics() {
        let colors = [RGB8::new(0, 0, 0), RGB8::new(255, 255, 255),
                      RGB8::new(255, 0, 0), RGB8::new(12, 200, 77),
                      RGB8::new(30, 30, 200), RGB8::new(128, 128, 128)];
        for &c1 in &colors {
            assert_eq!(color_distance(c1, c1), 0.);
            for &c2 in &colors {
                let d12 = color_distance(c1, c2);
                let d21 = color_distance(c2, c1);
                assert!(d12 >= 0.);
                assert!((d12 - d21).abs() <= 1e-12, "{} ≉ {}", d12, d21);
            }
        }
    }

    #[test]
    fn rgba_ignores_alpha() {
        let a = RGBA8::new(200, 10, 10, 0);
        let b = RGBA8::new(10, 10, 200, 255);
        assert_eq!(a.distance(&b),
                   color_distance(RGB8::new(200, 10, 10), RGB8::new(10, 10, 200)));
    }
}
