use serde::{Deserialize, Serialize};

use crate::color::ColorRgba;
use crate::MixId;

/// A short run of symbols and the background color derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mix {
    pub symbols: String,
    pub color: ColorRgba,
}

impl Mix {
    pub fn new(symbols: impl Into<String>, color: ColorRgba) -> Self {
        Self {
            symbols: symbols.into(),
            color,
        }
    }
}

/// Display-ready copy of a stored mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentableMix {
    pub id: MixId,
    pub symbols: String,
    pub color: ColorRgba,
}

impl PresentableMix {
    pub fn new(id: MixId, mix: Mix) -> Self {
        Self {
            id,
            symbols: mix.symbols,
            color: mix.color,
        }
    }

    pub fn to_mix(&self) -> Mix {
        Mix::new(self.symbols.clone(), self.color)
    }
}
