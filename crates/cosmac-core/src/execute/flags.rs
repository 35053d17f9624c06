//! `DF` update behaviors for different instruction classes.

/// Describes how `DF` should be updated after an accumulator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagsUpdate {
    /// `DF` keeps its previous value.
    #[default]
    None,
    /// `DF` takes the given carry/borrow value.
    Set(bool),
}

impl FlagsUpdate {
    /// Resolves the update against the previous `DF` value.
    #[must_use]
    pub const fn apply(self, previous: bool) -> bool {
        match self {
            Self::None => previous,
            Self::Set(value) => value,
        }
    }
}

/// Result of an accumulator operation: the new `D` plus its `DF` effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    /// New accumulator value.
    pub d: u8,
    /// Effect on `DF`.
    pub flags: FlagsUpdate,
}

impl AluResult {
    /// Result that leaves `DF` alone.
    #[must_use]
    pub const fn value(d: u8) -> Self {
        Self {
            d,
            flags: FlagsUpdate::None,
        }
    }

    /// Result that writes `DF`.
    #[must_use]
    pub const fn with_df(d: u8, df: bool) -> Self {
        Self {
            d,
            flags: FlagsUpdate::Set(df),
        }
    }
}
