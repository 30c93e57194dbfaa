//! Macro for implementing Display and FromStr for wire-level enums
//!
//! The backend spells enum values in a fixed case (e.g. `INSTAGRAM`), while
//! callers and configuration files are not always consistent. This macro
//! gives one place for the canonical spelling and case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use leadflow_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Email,
//!     Sms,
//! }
//!
//! impl_domain_status_conversions!(Channel {
//!     Email => "EMAIL",
//!     Sms => "SMS",
//! });
//!
//! assert_eq!(Channel::Sms.to_string(), "SMS");
//! assert_eq!("email".parse::<Channel>().unwrap(), Channel::Email);
//! ```

/// Implements Display and FromStr traits for wire-level enums
///
/// This macro generates:
/// - Display trait: writes the canonical spelling given in the mapping
/// - FromStr trait: matches the canonical spelling ignoring ASCII case
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their canonical string
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
