/// Color class of a roulette roll.
///
/// The Blaze double wheel has one white slot (0), seven red (1-7) and seven
/// black (8-14). `Unknown` covers absent or out-of-range rolls and must never
/// occur for valid feed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    White,
    Red,
    Black,
    Unknown,
}

impl ColorClass {
    /// Classify a roll value. Total over all inputs.
    pub fn of(roll: Option<u32>) -> Self {
        match roll {
            Some(0) => Self::White,
            Some(1..=7) => Self::Red,
            Some(8..=14) => Self::Black,
            _ => Self::Unknown,
        }
    }

    /// Single-character wire tag: B (branco), R (vermelho), P (preto).
    pub fn tag(self) -> char {
        match self {
            Self::White => 'B',
            Self::Red => 'R',
            Self::Black => 'P',
            Self::Unknown => '?',
        }
    }

    /// Whether the class takes part in pattern detection (whites are dropped).
    pub fn is_pattern_color(self) -> bool {
        matches!(self, Self::Red | Self::Black)
    }
}
