//! Adaptive rejection sampling of distinct colors.
//!
//! Candidates are drawn in HSL and accepted when their weighted
//! CIEDE2000 distance to every issued color reaches the current
//! threshold.  Each acceptance raises the threshold; each run of
//! failures longer than the accuracy budget lowers it.

use rand::{Rng, SeedableRng, rngs::StdRng};
use rgb::RGB8;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::issued::{IssuedColorSet, SetChange};
use crate::space::{Hsl, RGBColor};

/// Largest acceptance threshold; also the starting value.
pub const MAX_THRESHOLD: f64 = 1.;
/// Smallest acceptance threshold.
pub const MIN_THRESHOLD: f64 = 0.01;
/// Default number of consecutive rejections tolerated before the
/// threshold is relaxed.
pub const DEFAULT_ACCURACY: u32 = 200;

const ACCEPT_STEP: f64 = 0.02;
const RELAX_STEP: f64 = 0.002;
const REMOVE_STEP: f64 = 0.1;

/// How saturation and luminance of candidates are drawn.  The hue is
/// always uniform in \[0, 360).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sampling {
    /// Uniform in \[0, 1\].  Slowest but covers everything.
    #[default]
    Uniform,
    /// `√u`: favors vivid and light colors, for dark backgrounds.
    Bright,
    /// `u²`: favors muted and dark colors, for light backgrounds.
    Dim,
}

impl Sampling {
    fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Hsl {
        let h = 360. * rng.random::<f64>();
        let s: f64 = rng.random();
        let l: f64 = rng.random();
        let (s, l) = match self {
            Sampling::Uniform => (s, l),
            Sampling::Bright => (s.sqrt(), l.sqrt()),
            Sampling::Dim => (s * s, l * l),
        };
        Hsl::new(h, s, l)
    }
}

/// Settings of a [`PaletteGenerator`].
///
/// # Example
///
/// ```
/// use distinct_colors::{GeneratorConfig, Sampling};
/// let config = GeneratorConfig::default()
///     .accuracy(500)
///     .sampling(Sampling::Dim)
///     .max_attempts(100_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    accuracy: u32,
    initial_threshold: f64,
    sampling: Sampling,
    max_attempts: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            accuracy: DEFAULT_ACCURACY,
            initial_threshold: MAX_THRESHOLD,
            sampling: Sampling::Uniform,
            max_attempts: None,
        }
    }
}

impl GeneratorConfig {
    /// Number of consecutive rejections after which the threshold is
    /// lowered.  Higher values give more distinct colors, more slowly.
    pub fn accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Threshold of a fresh generator, clamped to
    /// \[[`MIN_THRESHOLD`], [`MAX_THRESHOLD`]\].
    pub fn initial_threshold(mut self, threshold: f64) -> Self {
        self.initial_threshold = threshold.clamp(MIN_THRESHOLD, MAX_THRESHOLD);
        self
    }

    /// How candidates are drawn.
    pub fn sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Bound the candidates drawn by [`PaletteGenerator::next_color`].
    /// Past the bound, the candidate farthest from the issued colors
    /// is returned even if it does not clear the threshold.
    pub fn max_attempts(mut self, attempts: u64) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }
}

enum Search {
    Found(RGB8),
    Exhausted { attempts: u64, best: Option<RGB8> },
}

/// Generator of colors perceptually distinct from those it already
/// issued.
///
/// Not synchronized: every operation takes `&mut self`.
///
/// # Example
///
/// ```
/// use distinct_colors::{PaletteGenerator, GeneratorConfig, RGBColor};
/// let mut palette = PaletteGenerator::seeded(GeneratorConfig::default(), 7);
/// let c0 = palette.next_color();
/// let c1 = palette.next_color();
/// assert!(c0.distance(&c1) >= distinct_colors::MIN_THRESHOLD);
/// ```
#[derive(Debug)]
pub struct PaletteGenerator<R = StdRng> {
    issued: IssuedColorSet,
    threshold: f64,
    accepted_at: Option<f64>, // threshold cleared by the last color
    failures: u32,
    config: GeneratorConfig,
    rng: R,
}

impl PaletteGenerator<StdRng> {
    /// A generator with the default configuration, seeded from the
    /// operating system.
    pub fn new() -> Self { Self::with_config(GeneratorConfig::default()) }

    /// A generator with `config`, seeded from the operating system.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// A reproducible generator.
    pub fn seeded(config: GeneratorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for PaletteGenerator<StdRng> {
    fn default() -> Self { Self::new() }
}

impl<R: Rng> PaletteGenerator<R> {
    /// A generator drawing its candidates from `rng`.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        PaletteGenerator { issued: IssuedColorSet::new(),
                           threshold: config.initial_threshold,
                           accepted_at: None,
                           failures: 0,
                           config,
                           rng }
    }

    /// The current acceptance threshold.
    pub fn threshold(&self) -> f64 { self.threshold }

    /// Rejections tolerated before the threshold is relaxed.
    pub fn accuracy(&self) -> u32 { self.config.accuracy }

    /// The threshold that the color returned by the last
    /// [`next_color`](Self::next_color) or
    /// [`try_next_color`](Self::try_next_color) cleared against every
    /// issued entry.  `None` before the first color and after a color
    /// issued past [`GeneratorConfig::max_attempts`].
    pub fn accepted_threshold(&self) -> Option<f64> { self.accepted_at }

    /// The colors issued so far, including those added with
    /// [`add`](Self::add).
    pub fn issued(&self) -> &IssuedColorSet { &self.issued }

    fn set_threshold(&mut self, t: f64) {
        self.threshold = t.clamp(MIN_THRESHOLD, MAX_THRESHOLD);
    }

    fn observe(&mut self, change: SetChange) {
        match change {
            SetChange::Added => return,
            // Few colors left: the space is easy, be pickier.
            SetChange::Removed { remaining } if remaining <= 2 =>
                self.set_threshold(self.threshold + REMOVE_STEP),
            SetChange::Removed { .. } | SetChange::Cleared =>
                self.set_threshold(MAX_THRESHOLD),
        }
        debug!(?change, threshold = self.threshold, "threshold retuned");
    }

    /// Register a color that new colors must keep away from, such as
    /// a background.  The larger `weight`, the farther away.
    pub fn add(&mut self, color: RGB8, weight: f64) {
        let change = self.issued.add(color, weight);
        self.observe(change);
    }

    /// Retract the first issued entry equal to `color`.  Returns
    /// `false` if `color` was never issued.
    pub fn remove(&mut self, color: RGB8) -> bool {
        match self.issued.remove(color) {
            Some(change) => { self.observe(change); true }
            None => false,
        }
    }

    /// Retract the first issued entry equal to `color` with this
    /// `weight`.  Returns `false` if there is none.
    pub fn remove_weighted(&mut self, color: RGB8, weight: f64) -> bool {
        match self.issued.remove_weighted(color, weight) {
            Some(change) => { self.observe(change); true }
            None => false,
        }
    }

    /// Forget every issued color and reset the threshold.
    pub fn clear(&mut self) {
        let change = self.issued.clear();
        self.observe(change);
    }

    fn accept(&mut self, color: RGB8, attempts: u64) {
        debug!(color = ?color, attempts, threshold = self.threshold, "color issued");
        self.issued.add(color, 1.);
        self.accepted_at = Some(self.threshold);
        self.set_threshold(self.threshold + ACCEPT_STEP);
        self.failures = 0;
    }

    fn reject(&mut self) {
        self.failures += 1;
        if self.failures > self.config.accuracy {
            self.failures = 0;
            self.set_threshold(self.threshold - RELAX_STEP);
            trace!(threshold = self.threshold, "threshold relaxed");
        }
    }

    fn search(&mut self, max_attempts: Option<u64>) -> Search {
        let mut best: Option<(RGB8, f64)> = None;
        let mut attempts = 0;
        loop {
            if max_attempts.is_some_and(|m| attempts >= m) {
                return Search::Exhausted { attempts, best: best.map(|(c, _)| c) }
            }
            attempts += 1;
            let color = self.config.sampling.sample(&mut self.rng).to_rgb();
            let lab = color.to_lab();
            if self.issued.all_farther(&lab, self.threshold) {
                self.accept(color, attempts);
                return Search::Found(color)
            }
            if max_attempts.is_some() {
                if let Some(d) = self.issued.nearest(&lab) {
                    if best.map_or(true, |(_, b)| d > b) { best = Some((color, d)) }
                }
            }
            self.reject();
        }
    }

    /// Return a new color, distinct from all issued ones, and issue it.
    ///
    /// Without [`GeneratorConfig::max_attempts`] this loops until a
    /// candidate clears the threshold, relying on the threshold
    /// relaxing as rejections accumulate.
    pub fn next_color(&mut self) -> RGB8 {
        match self.search(self.config.max_attempts) {
            Search::Found(color) => color,
            Search::Exhausted { attempts, best } => {
                let color = match best {
                    Some(c) => c,
                    None => self.config.sampling.sample(&mut self.rng).to_rgb(),
                };
                warn!(color = ?color, attempts, threshold = self.threshold,
                      "palette saturated, issuing farthest candidate");
                self.issued.add(color, 1.);
                self.accepted_at = None;
                self.failures = 0;
                color
            }
        }
    }

    /// Like [`next_color`](Self::next_color) but draw at most
    /// `max_attempts` candidates.
    ///
    /// # Errors
    ///
    /// [`Error::Exhausted`] if no candidate cleared the threshold.
    /// Nothing is issued then, but the threshold keeps the
    /// relaxation that happened meanwhile.
    pub fn try_next_color(&mut self, max_attempts: u64) -> Result<RGB8> {
        match self.search(Some(max_attempts)) {
            Search::Found(color) => Ok(color),
            Search::Exhausted { attempts, .. } => {
                warn!(attempts, threshold = self.threshold, "no distinct color found");
                Err(Error::Exhausted { attempts, threshold: self.threshold })
            }
        }
    }
}
