//! CIEDE2000 color difference (CIE Technical Report 142-2001).
//!
//! The parametric factors kL, kC and kH are all 1.

use crate::space::Lab;

// 25⁷
const P25: f64 = 6_103_515_625.;

/// Hue angle of (a, b) in degrees, in \[0, 360).
#[inline]
fn hue(a: f64, b: f64) -> f64 {
    if a == 0. && b == 0. { return 0. }
    let h = b.atan2(a).to_degrees();
    if h < 0. { h + 360. } else { h }
}

#[inline]
fn cos_deg(d: f64) -> f64 { d.to_radians().cos() }

#[inline]
fn sin_deg(d: f64) -> f64 { d.to_radians().sin() }

/// `√(c⁷ / (c⁷ + 25⁷))`, shared by the G correction and RC.
#[inline]
fn chroma_weight(c: f64) -> f64 {
    let c7 = c.powi(7);
    (c7 / (c7 + P25)).sqrt()
}

impl Lab {
    /// CIEDE2000 difference ΔE₀₀ between `self` and `other`.
    ///
    /// The result is symmetric, non-negative and zero for identical
    /// points.  Black and white are 100 apart.
    pub fn ciede2000(&self, other: &Lab) -> f64 {
        let (l1, a1, b1) = (self.l, self.a, self.b);
        let (l2, a2, b2) = (other.l, other.a, other.b);

        let avg_c = (a1.hypot(b1) + a2.hypot(b2)) / 2.;
        let g = (1. - chroma_weight(avg_c)) / 2.;
        let a1 = a1 * (1. + g);
        let a2 = a2 * (1. + g);
        let c1 = a1.hypot(b1);
        let c2 = a2.hypot(b2);
        let h1 = hue(a1, b1);
        let h2 = hue(a2, b2);
        let achromatic = c1 * c2 == 0.;

        let dh = if achromatic { 0. } else {
            let dh = h2 - h1;
            if dh.abs() <= 180. { dh }
            else if dh > 180. { dh - 360. }
            else { dh + 360. }
        };
        let avg_h = if achromatic { h1 + h2 }
            else if (h1 - h2).abs() <= 180. { (h1 + h2) / 2. }
            else if h1 + h2 < 360. { (h1 + h2 + 360.) / 2. }
            else { (h1 + h2 - 360.) / 2. };

        let t = 1. - 0.17 * cos_deg(avg_h - 30.)
            + 0.24 * cos_deg(2. * avg_h)
            + 0.32 * cos_deg(3. * avg_h + 6.)
            - 0.20 * cos_deg(4. * avg_h - 63.);

        let delta_l = l2 - l1;
        let delta_c = c2 - c1;
        let delta_h = 2. * (c1 * c2).sqrt() * sin_deg(dh / 2.);

        let avg_l = (l1 + l2) / 2.;
        let avg_c = (c1 + c2) / 2.;
        let l50 = (avg_l - 50.) * (avg_l - 50.);
        let sl = 1. + 0.015 * l50 / (20. + l50).sqrt();
        let sc = 1. + 0.045 * avg_c;
        let sh = 1. + 0.015 * avg_c * t;

        let d_theta = 30. * (-((avg_h - 275.) / 25.).powi(2)).exp();
        let rt = -2. * chroma_weight(avg_c) * sin_deg(2. * d_theta);

        let l = delta_l / sl;
        let c = delta_c / sc;
        let h = delta_h / sh;
        (l * l + c * c + h * h + rt * c * h).max(0.).sqrt()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    // Sharma, Wu & Dalal (2005), "The CIEDE2000 color-difference
    // formula: implementation notes, supplementary test data, and
    // mathematical observations", table 1.
    const SHARMA: [([f64; 3], [f64; 3], f64); 12] = [
        ([50.0000, 2.6772, -79.7751], [50.0000, 0.0000, -82.7485], 2.0425),
        ([50.0000, 3.1571, -77.2803], [50.0000, 0.0000, -82.7485], 2.8615),
        ([50.0000, 2.8361, -74.0200], [50.0000, 0.0000, -82.7485], 3.4412),
        ([50.0000, -1.3802, -84.2814], [50.0000, 0.0000, -82.7485], 1.0000),
        ([50.0000, 0.0000, 0.0000], [50.0000, -1.0000, 2.0000], 2.3669),
        ([50.0000, 2.4900, -0.0010], [50.0000, -2.4900, 0.0009], 7.1792),
        ([50.0000, 2.4900, -0.0010], [50.0000, -2.4900, 0.0011], 7.2195),
        ([50.0000, -0.0010, 2.4900], [50.0000, 0.0009, -2.4900], 4.8045),
        ([50.0000, 2.5000, 0.0000], [73.0000, 25.0000, -18.0000], 27.1492),
        ([50.0000, 2.5000, 0.0000], [50.0000, 3.2592, 0.3350], 1.0000),
        ([60.2574, -34.0099, 36.2677], [60.4626, -34.1751, 39.4387], 1.2644),
        ([22.7233, 20.0904, -46.6940], [23.0331, 14.9730, -42.5619], 2.0373),
    ];

    fn lab([l, a, b]: [f64; 3]) -> Lab { Lab::new(l, a, b) }

    #[test]
    fn reference_pairs() {
        for (p1, p2, expected) in SHARMA {
            let d = lab(p1).ciede2000(&lab(p2));
            assert!((d - expected).abs() < 1e-4,
                    "{:?} {:?}: {} ≉ {}", p1, p2, d, expected);
            let d = lab(p2).ciede2000(&lab(p1));
            assert!((d - expected).abs() < 1e-4,
                    "{:?} {:?}: {} ≉ {} (swapped)", p2, p1, d, expected);
        }
    }

    #[test]
    fn identical_points() {
        for p in [[0., 0., 0.], [50., 20., -30.], [100., 0., 0.]] {
            assert_eq!(lab(p).ciede2000(&lab(p)), 0.);
        }
    }

    #[test]
    fn black_white() {
        let d = lab([0., 0., 0.]).ciede2000(&lab([100., 0., 0.]));
        assert!((d - 100.).abs() < 1e-9, "{}", d);
    }
}
