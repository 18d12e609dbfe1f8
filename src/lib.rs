//! Populate a configuration struct from environment variables and
//! command-line flags, described once per field.
//!
//! ```ignore
//! let mut spec = Specification::default();
//! let parsed = flagfig::process("myapp", &mut spec)?;
//! ```
//!
//! That single call reads `MYAPP_*` environment variables, registers one
//! flag per field, applies textual defaults, and parses the command line.
//!
//! # Describing fields
//!
//! There is no runtime reflection. A config type implements [`FlagConfig`]
//! by listing its fields in declaration order:
//!
//! ```ignore
//! impl FlagConfig for Specification {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::new("Debug", &mut self.debug).usage("enable debug mode"),
//!             Field::new("Port", &mut self.port).short("p").default("8080"),
//!             Field::new("RateOfTravel", &mut self.rate_of_travel),
//!             Field::new("UserName", &mut self.user_name).env("USER_NAME"),
//!         ]
//!     }
//! }
//! ```
//!
//! The identifier passed to [`Field::new`] is the field's name in
//! CamelCase. It drives both the flag name and the environment key.
//!
//! | Method | Meaning |
//! |--------|---------|
//! | `.name("max-count")` | external flag name, replacing the derived one |
//! | `.short("p")` | extra alias bound to the same field |
//! | `.usage("...")` | help text |
//! | `.default("8080")` | textual default, coerced to the field's type |
//! | `.env("USER_NAME")` | environment key used instead of the identifier |
//!
//! Without `.name`, the identifier is split into words and hyphenated:
//! `RateOfTravel` becomes `--rate-of-travel`, `UserID` becomes `--user-id`.
//!
//! Supported field types: `bool`, every fixed-width integer plus `isize` and
//! `usize`, `f32`, `f64`, `String`, [`std::time::Duration`] and
//! `Vec<String>` (comma separated). Maps compile but are skipped with a
//! warning, as is anything declared through [`Field::unsupported`].
//!
//! # Layer precedence
//!
//! ```text
//! Textual default       .default("...")
//!        ↑ overridden by
//! Environment vars      PREFIX_IDENT (or PREFIX_ENV / ENV with .env(..))
//!        ↑ overridden by
//! Command-line flags    --name / --short
//! ```
//!
//! A value counts as set only when it differs from its type's zero value:
//! `MYAPP_PORT=0` leaves a `default("8080")` in place. Every layer is sparse.
//!
//! Environment keys are the uppercased `{prefix}_{ident}`; an empty prefix
//! drops the underscore. Durations use Go-style literals (`1h30m`, `250ms`),
//! integers accept `0x`, `0o`, `0b` and leading-zero octal.
//!
//! # Error handling
//!
//! All fallible operations return [`FlagfigError`]. A field without a usable
//! name, a malformed default and a malformed environment value fail before the
//! command line is read. Command-line problems, including `--help`, arrive as
//! [`FlagfigError::Cli`]; call [`clap::Error::exit`] on it for the usual
//! print-and-exit behavior.
//!
//! # Testing
//!
//! [`Flagfig::builder()`] accepts synthetic environment variables and
//! arguments, so a pass can run without touching the process state.

pub mod error;
pub mod types;

mod bind;
mod builder;
mod coerce;
mod duration;
mod env;
mod field;
mod flags;
mod name;
mod ops;
mod resolve;

#[cfg(test)]
mod fixtures;

pub use builder::{Flagfig, FlagfigBuilder};
pub use coerce::coerce;
pub use duration::{format_duration, parse_duration};
pub use error::{CoerceError, FlagfigError};
pub use field::{Bindable, Field, FlagConfig, Slot};
pub use flags::FlagSet;
pub use name::hyphenate;
pub use ops::{ConfigResult, get_value, list_values};
pub use resolve::{Parsed, ResolveInput, resolve};
pub use types::{Kind, Value};

/// Populate `config` from `{PREFIX}_*` environment variables, then from the
/// process command line.
pub fn process<C: FlagConfig + ?Sized>(
    prefix: &str,
    config: &mut C,
) -> Result<Parsed, FlagfigError> {
    Flagfig::builder().env_prefix(prefix).process(config)
}

/// Same as [`process`].
pub fn parse<C: FlagConfig + ?Sized>(
    prefix: &str,
    config: &mut C,
) -> Result<Parsed, FlagfigError> {
    process(prefix, config)
}
