/// Errors reported by a [`PaletteGenerator`](crate::PaletteGenerator).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A bounded request drew `attempts` candidates without finding
    /// one at least `threshold` away from every issued color.
    #[error("no distinct color found in {attempts} attempts (threshold {threshold:.3})")]
    Exhausted { attempts: u64, threshold: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
