//! Perceptually distinct colors.
//!
//! - [`PaletteGenerator`] hands out colors that stay far, in CIEDE2000
//!   distance, from every color it issued before.
//! - [`KeyedPalette`] attaches such colors to keys.
//!
//! Conversions between sRGB, [`Hsl`], [`Xyz`] and [`Lab`] are
//! available as free functions and through the [`RGBColor`] trait.
//!
//! # Example
//!
//! ```
//! use rgb::RGB8;
//! use distinct_colors::{PaletteGenerator, GeneratorConfig};
//! let mut palette = PaletteGenerator::seeded(GeneratorConfig::default(), 1);
//! // Keep new colors well away from a white background.
//! palette.add(RGB8::new(255, 255, 255), 4.);
//! let colors: Vec<_> = (0 .. 5).map(|_| palette.next_color()).collect();
//! ```

mod ciede2000;
mod error;
mod generator;
mod issued;
mod keyed;
mod space;

pub use error::{Error, Result};
pub use generator::{GeneratorConfig, PaletteGenerator, Sampling,
                    DEFAULT_ACCURACY, MAX_THRESHOLD, MIN_THRESHOLD};
pub use issued::{ColorRatio, IssuedColorSet, SetChange};
pub use keyed::KeyedPalette;
pub use space::{color_distance, hsl_to_rgb, rgb_clamped, rgb_to_lab,
                rgb_to_xyz, xyz_to_lab, Hsl, Lab, RGBColor, Xyz, D65};
