//! Colors attached to caller-defined keys (categories, order types …).

use std::collections::HashMap;
use std::hash::Hash;

use rand::{Rng, rngs::StdRng};
use rgb::RGB8;

use crate::generator::{GeneratorConfig, PaletteGenerator};
use crate::issued::ColorRatio;

/// A map from keys to distinct colors.  A key gets a fresh color the
/// first time it is looked up and keeps it until retracted.
#[derive(Debug)]
pub struct KeyedPalette<K, R = StdRng> {
    generator: PaletteGenerator<R>,
    colors: HashMap<K, ColorRatio>, // the entry issued for each key
}

impl<K: Eq + Hash> KeyedPalette<K> {
    /// An empty palette with the default generator settings.
    pub fn new() -> Self {
        Self::from_generator(PaletteGenerator::new())
    }

    /// An empty palette whose generator uses `config`.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self::from_generator(PaletteGenerator::with_config(config))
    }
}

impl<K: Eq + Hash> Default for KeyedPalette<K> {
    fn default() -> Self { Self::new() }
}

impl<K: Eq + Hash, R: Rng> KeyedPalette<K, R> {
    /// Use `generator`, and the colors it already issued, for new keys.
    pub fn from_generator(generator: PaletteGenerator<R>) -> Self {
        KeyedPalette { generator, colors: HashMap::new() }
    }

    /// The color of `key`, generating one if needed.
    pub fn color_for(&mut self, key: K) -> RGB8 {
        if let Some(e) = self.colors.get(&key) { return e.color() }
        let c = self.generator.next_color();
        self.colors.insert(key, ColorRatio::from(c));
        c
    }

    /// The color of `key`, if it has one.
    pub fn get(&self, key: &K) -> Option<RGB8> {
        self.colors.get(key).map(|e| e.color())
    }

    /// The color of `key`, or `default` if it has none.
    pub fn get_or(&self, key: &K, default: RGB8) -> RGB8 {
        self.get(key).unwrap_or(default)
    }

    /// Give `key` a fixed `color` that generated colors must keep
    /// away from with the given repulsion `weight`.  A previous color
    /// of `key` is retracted.
    pub fn pin(&mut self, key: K, color: RGB8, weight: f64) {
        let entry = ColorRatio::new(color, weight);
        if let Some(old) = self.colors.insert(key, entry) {
            self.generator.remove_weighted(old.color(), old.weight());
        }
        self.generator.add(color, entry.weight());
    }

    /// Drop the color of `key`, making room for new colors.
    pub fn retract(&mut self, key: &K) -> Option<RGB8> {
        let e = self.colors.remove(key)?;
        self.generator.remove_weighted(e.color(), e.weight());
        Some(e.color())
    }

    /// Forget every key and every issued color.
    pub fn reload(&mut self) {
        self.colors.clear();
        self.generator.clear();
    }

    /// Number of keys with a color.
    pub fn len(&self) -> usize { self.colors.len() }

    pub fn is_empty(&self) -> bool { self.colors.is_empty() }

    /// The underlying generator, with every issued entry.
    pub fn generator(&self) -> &PaletteGenerator<R> { &self.generator }
}
