//! Random mix generation and the symbol-to-color mapping.

use emojimix_types::{ColorRgba, Mix};

/// Symbols used when no palette is configured.
pub const DEFAULT_PALETTE: &[&str] = &[
    "🍇", "🍈", "🍉", "🍊", "🍋", "🍌", "🍍", "🥭", "🍎", "🍏", "🍐", "🍒",
    "🍓", "🫐", "🥝", "🍅", "🫒", "🥥", "🥑", "🍆", "🥔", "🥕", "🌽", "🌶️",
    "🫑", "🥒", "🥬", "🥦", "🧄", "🧅", "🍄",
];

/// Upper bound on symbols per mix; also the number of color channels derived.
pub const MAX_SYMBOLS_PER_MIX: usize = 3;

/// Lowest channel value `derive_color` can produce.
pub const CHANNEL_OFFSET: f64 = 0.25;

pub struct MixGenerator {
    palette: Vec<String>,
    symbols_per_mix: usize,
    rng_state: u64,
}

impl MixGenerator {
    /// Generator seeded from the system clock.
    pub fn new(palette: Vec<String>) -> Self {
        Self::with_seed(palette, clock_seed())
    }

    /// Generator with a fixed seed; the same seed and palette replay the same mixes.
    pub fn with_seed(palette: Vec<String>, seed: u64) -> Self {
        let palette = if palette.is_empty() {
            log::warn!(target: "generator", "empty palette, using the default one");
            DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect()
        } else {
            palette
        };
        Self {
            palette,
            symbols_per_mix: MAX_SYMBOLS_PER_MIX,
            rng_state: seed,
        }
    }

    pub fn with_symbols_per_mix(mut self, count: usize) -> Self {
        self.symbols_per_mix = count.clamp(1, MAX_SYMBOLS_PER_MIX);
        self
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// `count` independent draws from the palette, duplicates allowed.
    pub fn pick_symbols(&mut self, count: usize) -> Vec<String> {
        (0..count)
            .map(|_| {
                let index = self.next_index(self.palette.len());
                self.palette[index].clone()
            })
            .collect()
    }

    pub fn make_mix(&mut self) -> Mix {
        let symbols = self.pick_symbols(self.symbols_per_mix);
        let color = derive_color(&symbols);
        let mix = Mix::new(symbols.concat(), color);
        log::debug!(target: "generator", "generated {} ({})", mix.symbols, color.to_hex());
        mix
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.rng_state = self
            .rng_state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.rng_state >> 33) as usize) % len
    }
}

/// Background color for a symbol sequence.
///
/// The first three symbols drive red, green and blue. Each channel is the sum
/// of the symbol's code points modulo 128, scaled by 1/255 and offset by
/// `CHANNEL_OFFSET`, so every channel lands in `[0.25, 0.75)`. Missing symbols
/// count as a sum of zero.
pub fn derive_color<S: AsRef<str>>(symbols: &[S]) -> ColorRgba {
    let channel = |i: usize| {
        let sum: u64 = symbols
            .get(i)
            .map(|s| s.as_ref().chars().map(|c| u64::from(u32::from(c))).sum::<u64>())
            .unwrap_or(0);
        (sum % 128) as f64 / 255.0 + CHANNEL_OFFSET
    };
    ColorRgba::opaque(channel(0), channel(1), channel(2))
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
        ^ 0x9E37_79B9_7F4A_7C15
}
