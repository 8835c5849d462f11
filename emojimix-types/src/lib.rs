//! # emojimix-types
//!
//! Value types shared by emojimix-core and the emojimix front end: colors and
//! their hex encoding, mixes, and the batched change report emitted by the store.

pub mod change;
pub mod color;
pub mod mix;

pub use change::{ChangeNotification, Move};
pub use color::{ColorFormatError, ColorRgba};
pub use mix::{Mix, PresentableMix};

/// Storage-assigned identifier of a persisted mix.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct MixId(i64);

impl MixId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MixId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
