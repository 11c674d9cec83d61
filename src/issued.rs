//! Colors already handed out, each with its repulsion weight.

use rgb::RGB8;
use crate::space::{Lab, RGBColor};

/// A color together with the factor by which new colors must keep
/// away from it.
///
/// The usual weight is 1.  About 4 suits a background color and 32
/// keeps everything very far away.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRatio {
    color: RGB8,
    weight: f64,
    lab: Lab, // `color` in L*a*b*, computed once
}

fn valid_weight(w: f64) -> f64 {
    if w > 0. && w.is_finite() { w } else { 1. }
}

impl ColorRatio {
    /// Pair `color` with a repulsion `weight`.  A weight that is not
    /// a positive finite number is replaced by 1.
    pub fn new(color: RGB8, weight: f64) -> Self {
        ColorRatio { color, weight: valid_weight(weight), lab: color.to_lab() }
    }

    /// The issued color.
    pub fn color(&self) -> RGB8 { self.color }

    /// The repulsion weight, always positive and finite.
    pub fn weight(&self) -> f64 { self.weight }

    /// The color in L*a*b* relative to D65.
    pub fn lab(&self) -> Lab { self.lab }

    /// Perceptual distance from `lab` to this color, divided by the
    /// weight.
    #[inline]
    pub fn weighted_distance(&self, lab: &Lab) -> f64 {
        lab.ciede2000(&self.lab) / 100. / self.weight
    }
}

impl From<RGB8> for ColorRatio {
    fn from(color: RGB8) -> Self { ColorRatio::new(color, 1.) }
}

/// What a mutation did to an [`IssuedColorSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetChange {
    Added,
    /// One entry was removed; `remaining` entries are left.
    Removed { remaining: usize },
    Cleared,
}

/// Insertion-ordered set of issued colors.
#[derive(Clone, Debug, Default)]
pub struct IssuedColorSet {
    entries: Vec<ColorRatio>,
}

impl IssuedColorSet {
    /// An empty set.
    pub fn new() -> Self { Self::default() }

    /// Append `color` with the given repulsion `weight`.
    pub fn add(&mut self, color: RGB8, weight: f64) -> SetChange {
        self.entries.push(ColorRatio::new(color, weight));
        SetChange::Added
    }

    /// Remove the first entry whose color is `color`.  Returns `None`
    /// if there is none.
    pub fn remove(&mut self, color: RGB8) -> Option<SetChange> {
        self.remove_first(|e| e.color == color)
    }

    /// Remove the first entry with this `color` and this `weight`
    /// (after the same normalization as [`ColorRatio::new`]).
    pub fn remove_weighted(&mut self, color: RGB8, weight: f64)
                           -> Option<SetChange> {
        let weight = valid_weight(weight);
        self.remove_first(|e| e.color == color && e.weight == weight)
    }

    fn remove_first(&mut self, pred: impl Fn(&ColorRatio) -> bool)
                    -> Option<SetChange> {
        let i = self.entries.iter().position(pred)?;
        self.entries.remove(i);
        Some(SetChange::Removed { remaining: self.entries.len() })
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> SetChange {
        self.entries.clear();
        SetChange::Cleared
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Whether some entry has this `color`, whatever its weight.
    pub fn contains(&self, color: RGB8) -> bool {
        self.entries.iter().any(|e| e.color == color)
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColorRatio> {
        self.entries.iter()
    }

    /// The issued colors, in insertion order.
    pub fn colors(&self) -> Vec<RGB8> {
        self.entries.iter().map(|e| e.color).collect()
    }

    /// Smallest weighted distance from `lab` to any entry, or `None`
    /// if the set is empty.
    pub(crate) fn nearest(&self, lab: &Lab) -> Option<f64> {
        self.entries.iter().map(|e| e.weighted_distance(lab))
            .fold(None, |m, d| Some(m.map_or(d, |m: f64| m.min(d))))
    }

    /// Whether `lab` is at least `threshold` (weighted) from every
    /// entry.  Stops at the first entry that is too close.
    pub(crate) fn all_farther(&self, lab: &Lab, threshold: f64) -> bool {
        self.entries.iter().all(|e| e.weighted_distance(lab) >= threshold)
    }
}

impl<'a> IntoIterator for &'a IssuedColorSet {
    type Item = &'a ColorRatio;
    type IntoIter = std::slice::Iter<'a, ColorRatio>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
    const GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };
    const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 255 };

    #[test]
    fn keeps_order_and_weights() {
        let mut set = IssuedColorSet::new();
        assert_eq!(set.add(RED, 1.), SetChange::Added);
        set.add(GREEN, 4.);
        set.add(BLUE, 32.);
        assert_eq!(set.colors(), vec![RED, GREEN, BLUE]);
        let w: Vec<_> = set.iter().map(|e| e.weight()).collect();
        assert_eq!(w, vec![1., 4., 32.]);
    }

    #[test]
    fn remove_first_match() {
        let mut set = IssuedColorSet::new();
        set.add(RED, 1.);
        set.add(GREEN, 1.);
        set.add(RED, 8.);
        assert_eq!(set.remove(RED), Some(SetChange::Removed { remaining: 2 }));
        let left: Vec<_> = set.iter().map(|e| (e.color(), e.weight())).collect();
        assert_eq!(left, vec![(GREEN, 1.), (RED, 8.)]);
        assert_eq!(set.remove(BLUE), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_matching_weight() {
        let mut set = IssuedColorSet::new();
        set.add(RED, 4.);
        set.add(RED, 1.);
        assert_eq!(set.remove_weighted(RED, 1.),
                   Some(SetChange::Removed { remaining: 1 }));
        let left: Vec<_> = set.iter().map(|e| (e.color(), e.weight())).collect();
        assert_eq!(left, vec![(RED, 4.)]);
        assert_eq!(set.remove_weighted(RED, 2.), None);
        assert_eq!(set.remove_weighted(RED, 4.),
                   Some(SetChange::Removed { remaining: 0 }));
    }

    #[test]
    fn invalid_weights_become_one() {
        for w in [0., -1., f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(ColorRatio::new(RED, w).weight(), 1., "weight {}", w);
        }
        assert_eq!(ColorRatio::new(RED, 0.5).weight(), 0.5);
        let lab = GREEN.to_lab();
        let d = ColorRatio::new(RED, -1.).weighted_distance(&lab);
        assert!(d > 0. && d.is_finite());
    }

    #[test]
    fn clear_empties() {
        let mut set = IssuedColorSet::new();
        set.add(RED, 1.);
        assert_eq!(set.clear(), SetChange::Cleared);
        assert!(set.is_empty());
        assert!(!set.contains(RED));
    }

    #[test]
    fn weight_scales_distance() {
        let lab = GREEN.to_lab();
        let plain = ColorRatio::from(RED);
        let heavy = ColorRatio::new(RED, 4.);
        assert!((plain.weighted_distance(&lab) - RED.distance(&GREEN)).abs() < 1e-12);
        assert!((heavy.weighted_distance(&lab) * 4.
                 - plain.weighted_distance(&lab)).abs() < 1e-12);
    }

    #[test]
    fn nearest_entry() {
        let mut set = IssuedColorSet::new();
        assert_eq!(set.nearest(&RED.to_lab()), None);
        set.add(GREEN, 1.);
        set.add(RED, 1.);
        assert_eq!(set.nearest(&RED.to_lab()), Some(0.));
        assert!(!set.all_farther(&RED.to_lab(), 0.01));
        assert!(set.all_farther(&BLUE.to_lab(), 0.01));
    }
}
