//! Identifier management using string interning for efficient string storage and comparison
//!
//! Cell ids coming out of a diagram file are opaque strings that get compared
//! over and over again while rules resolve edge endpoints. This module
//! provides the [`Id`] type which interns them once and compares by symbol.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use serde::{Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Locks the global interner.
///
/// The interner only ever grows, so a poisoned lock still holds a usable table.
fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Efficient identifier type using string interning
///
/// Used for node and edge ids. Two `Id`s are equal exactly when the strings
/// they were created from are equal.
///
/// # Examples
///
/// ```
/// use ddd_diagram_core::identifier::Id;
///
/// let order = Id::new("order-1");
/// let same = Id::new("order-1");
///
/// assert_eq!(order, same);
/// assert_eq!(order, "order-1");
/// assert_eq!(order.to_string(), "order-1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Looks up an already interned identifier without interning `name`.
    ///
    /// Returns `None` when no `Id` was ever created for `name`, which also
    /// means no node or edge can carry it.
    ///
    /// # Examples
    ///
    /// ```
    /// use ddd_diagram_core::identifier::Id;
    ///
    /// let known = Id::new("known-cell");
    /// assert_eq!(Id::lookup("known-cell"), Some(known));
    /// assert_eq!(Id::lookup("never-seen-cell-7f3a"), None);
    /// ```
    pub fn lookup(name: &str) -> Option<Self> {
        interner().get(name).map(Self)
    }

    /// Returns an owned copy of the identifier string.
    pub fn to_owned_string(self) -> String {
        interner().resolve(self.0).unwrap_or_default().to_string()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        write!(f, "{str_value}")
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_owned_string())
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Id {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
