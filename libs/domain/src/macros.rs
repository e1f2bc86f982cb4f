//! Macros for defining range-checked numeric domain values.

/// Macro to define a small numeric newtype restricted to `MIN..=MAX`.
///
/// This generates a newtype wrapper around `u8` with:
/// - `MIN` / `MAX` constants
/// - `new()` returning a `DomainError` for out-of-range input
/// - `get()` and `index()` (zero-based position)
/// - `all()` iterating every valid value in order
/// - `Display` and `FromStr` implementations
/// - `Serialize` and `Deserialize` as a plain JSON number
///
/// # Example
///
/// ```ignore
/// define_ranged!(SlotNo, 1, 12, SlotOutOfRange);
///
/// let slot = SlotNo::new(5)?;
/// assert_eq!(slot.index(), 4);
/// ```
#[macro_export]
macro_rules! define_ranged {
    ($name:ident, $min:literal, $max:literal, $err:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u8);

        impl $name {
            /// Smallest valid value.
            pub const MIN: u8 = $min;

            /// Largest valid value.
            pub const MAX: u8 = $max;

            /// Creates a value, rejecting anything outside `MIN..=MAX`.
            pub fn new(value: i64) -> Result<Self, $crate::DomainError> {
                if value < Self::MIN as i64 || value > Self::MAX as i64 {
                    return Err($crate::DomainError::$err(value));
                }
                Ok(Self(value as u8))
            }

            /// Creates a value from a zero-based position.
            pub fn from_index(index: usize) -> Result<Self, $crate::DomainError> {
                Self::new(index as i64 + Self::MIN as i64)
            }

            /// Returns the underlying number.
            #[must_use]
            pub const fn get(&self) -> u8 {
                self.0
            }

            /// Returns the zero-based position of this value.
            #[must_use]
            pub const fn index(&self) -> usize {
                (self.0 - Self::MIN) as usize
            }

            /// Iterates every valid value in ascending order.
            pub fn all() -> impl Iterator<Item = Self> {
                (Self::MIN..=Self::MAX).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err($crate::DomainError::Empty);
                }
                let value: i64 = trimmed
                    .parse()
                    .map_err(|_| $crate::DomainError::InvalidNumber(trimmed.to_string()))?;
                Self::new(value)
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_u8(self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = i64::deserialize(deserializer)?;
                Self::new(value).map_err(serde::de::Error::custom)
            }
        }
    };
}
