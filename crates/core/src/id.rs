// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ID generation abstractions

use parking_lot::Mutex;

/// Define a newtype ID wrapper around `SmolStr` with a type prefix.
///
/// Generates `from_string()` for parsing, `as_str()`, `Display`,
/// `From<String>`, `From<&str>`, `PartialEq<str>`, `Borrow<str>`, and
/// `Deref` implementations.
///
/// IDs read `{prefix}{suffix}`, e.g. `act-` plus a 19 character nanoid
/// (23 characters, exactly the SmolStr inline capacity).
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the ID type.
///     pub struct ActionId("act-");
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($prefix:literal);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub smol_str::SmolStr);

        impl $name {
            pub const PREFIX: &'static str = $prefix;

            /// Create ID from existing string (for parsing/deserialization)
            pub fn from_string(id: impl Into<smol_str::SmolStr>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from_string(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                &self.0
            }
        }
    };
}

/// Source of fresh identifier suffixes.
///
/// The lifecycle prefixes whatever this returns, so implementations only
/// need to guarantee uniqueness.
pub trait IdGen: Send + Sync {
    fn next(&self) -> String;
}

/// Random nanoid suffixes (production default).
#[derive(Debug, Clone, Copy, Default)]
pub struct NanoIdGen;

impl IdGen for NanoIdGen {
    fn next(&self) -> String {
        nanoid::nanoid!(19)
    }
}

/// Zero-padded counter suffixes: `0001`, `0002`, ...
///
/// Deterministic, so tests can name actions before creating them.
#[derive(Debug, Default)]
pub struct SequentialIdGen {
    counter: Mutex<u64>,
}

impl SequentialIdGen {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let mut counter = self.counter.lock();
        *counter += 1;
        format!("{:04}", *counter)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
