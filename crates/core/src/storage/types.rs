use std::num::IntErrorKind;

/// Number of rows a list query may return, always within `1..=200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimit(u32);

impl ListLimit {
    /// Limit used when none (or zero) is requested.
    pub const DEFAULT: u32 = 50;
    /// Largest limit a caller can get.
    pub const MAX: u32 = 200;

    /// Clamps a requested limit into range. Zero means "use the default".
    pub fn new(requested: i64) -> Self {
        if requested == 0 {
            return Self::default();
        }
        Self(requested.clamp(1, i64::from(Self::MAX)) as u32)
    }

    /// Parses a raw query-string value.
    ///
    /// Missing or non-numeric input falls back to the default; out-of-range
    /// numbers (including ones too large for an `i64`) are clamped.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        match raw.parse::<i64>() {
            Ok(n) => Self::new(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Self(Self::MAX),
                IntErrorKind::NegOverflow => Self(1),
                _ => Self::default(),
            },
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
