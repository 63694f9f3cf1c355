use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::interpreter::value::core::Number;

/// Names of the register slots, in write order.
pub const SLOT_NAMES: &str = "abcdefghijklmnopqrstuvwxyz";
/// The key that reads the most recently written slot.
pub const LAST_KEY: &str = "@";

/// Represents all errors a register can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The key names no slot, or the slot is empty.
    #[error("register @{key} is empty")]
    NotFound {
        /// The requested key.
        key: String,
    },
    /// A range bound is not a slot name, or the bounds are reversed.
    #[error("invalid register range @{from}_{to}")]
    InvalidRange {
        /// The first slot.
        from: String,
        /// The last slot.
        to:   String,
    },
    /// Every slot in the range is empty.
    #[error("register range @{from}_{to} is empty")]
    EmptyRange {
        /// The first slot.
        from: String,
        /// The last slot.
        to:   String,
    },
}

/// Read access to previously stored values.
///
/// The evaluator borrows a register for the duration of one call and only ever
/// reads from it. Keys are single lowercase letters; [`LAST_KEY`] stands for
/// the most recently written value.
pub trait Register {
    /// Reads a single slot.
    ///
    /// # Errors
    /// Returns `RegisterError::NotFound` if the key has no value.
    fn read(&self, key: &str) -> Result<Number, RegisterError>;

    /// Reads the slots `from..=to` in order, skipping empty ones.
    ///
    /// # Errors
    /// Returns `RegisterError::InvalidRange` for bad bounds and
    /// `RegisterError::EmptyRange` if no slot in the range has a value.
    fn read_range(&self, from: &str, to: &str) -> Result<Vec<Number>, RegisterError>;
}

/// A register of 26 slots filled cyclically from `a` to `z`.
///
/// ## Example
/// ```
/// use dailycalc::{
///     interpreter::value::core::Number,
///     register::{QueueRegister, Register},
/// };
///
/// let mut register = QueueRegister::new();
/// assert_eq!(register.write(Number::from(bigdecimal::BigDecimal::from(7))), 'a');
/// assert_eq!(register.cursor(), 'b');
/// assert_eq!(register.read("@").unwrap().to_string(), "7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueueRegister {
    slots:  BTreeMap<char, Number>,
    cursor: usize,
    last:   Option<char>,
}

impl QueueRegister {
    /// Creates an empty register with the cursor on `a`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot the next [`write`](Self::write) goes to.
    #[must_use]
    pub fn cursor(&self) -> char {
        SLOT_NAMES.chars().nth(self.cursor).unwrap_or('a')
    }

    /// Stores `value` at the cursor and advances the cursor, wrapping after
    /// `z`. Returns the slot that was written.
    pub fn write(&mut self, value: Number) -> char {
        let slot = self.cursor();
        self.slots.insert(slot, value);
        self.last = Some(slot);
        self.cursor = (self.cursor + 1) % SLOT_NAMES.len();
        debug!(%slot, "register write");
        slot
    }

    /// Number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Register for QueueRegister {
    fn read(&self, key: &str) -> Result<Number, RegisterError> {
        let not_found = || RegisterError::NotFound { key: key.to_string() };

        let slot = if key == LAST_KEY {
            self.last.ok_or_else(not_found)?
        } else {
            slot(key).ok_or_else(not_found)?
        };

        self.slots.get(&slot).cloned().ok_or_else(not_found)
    }

    fn read_range(&self, from: &str, to: &str) -> Result<Vec<Number>, RegisterError> {
        let invalid = || RegisterError::InvalidRange { from: from.to_string(),
                                                       to:   to.to_string(), };

        let (Some(first), Some(last)) = (slot(from), slot(to)) else {
            return Err(invalid());
        };
        if first > last {
            return Err(invalid());
        }

        let values: Vec<Number> = self.slots
                                      .range(first..=last)
                                      .map(|(_, number)| number.clone())
                                      .collect();

        if values.is_empty() {
            return Err(RegisterError::EmptyRange { from: from.to_string(),
                                                   to:   to.to_string(), });
        }

        Ok(values)
    }
}

/// Resolves a single-letter key to its slot name.
fn slot(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if SLOT_NAMES.contains(c) => Some(c),
        _ => None,
    }
}
