//! Bind configuration fields to command-line flags.
//!
//! For every field, in declaration order:
//!
//! 1. Derive the external name (explicit `name`, else the hyphenated identifier).
//! 2. Coerce the textual `default`, if any, to the field's kind.
//! 3. Collect the flag names: the external name plus the `short` alias.
//! 4. Register one flag per name, bound to the field's storage.
//!
//! The value a flag is registered with follows a fixed precedence: the
//! field's current value when it is not the zero value (typically set by the
//! environment pass), else the coerced default, else the zero value. Parsing
//! the command line later overrides all three.

use tracing::warn;

use crate::coerce::coerce;
use crate::error::FlagfigError;
use crate::field::Field;
use crate::flags::FlagSet;
use crate::types::Value;

/// Register a flag for every bindable field in `fields`.
///
/// Map and unsupported fields are logged and left unbound.
pub fn bind_flags<'a>(fields: Vec<Field<'a>>, flags: &mut FlagSet<'a>) -> Result<(), FlagfigError> {
    for field in fields {
        bind_field(field, flags)?;
    }
    Ok(())
}

fn bind_field<'a>(field: Field<'a>, flags: &mut FlagSet<'a>) -> Result<(), FlagfigError> {
    let name = field.external_name()?;

    let default = match field.default_text() {
        Some(text) => {
            coerce(text, field.kind()).map_err(|source| FlagfigError::InvalidDefault {
                field: name.clone(),
                source,
            })?
        }
        None => None,
    };

    let names = field.flag_names()?;

    if !field.kind().is_bindable() {
        warn!(
            field = field.ident(),
            flag = %name,
            type_name = field.slot().type_name(),
            "unsupported field type, no flag registered"
        );
        return Ok(());
    }

    let usage = field.usage_text();
    let slot = field.into_slot();
    let Some(initial) = initial_value(slot.current(), default) else {
        return Ok(());
    };
    flags.bind(slot, initial, &names, usage)
}

/// The registration value: a non-zero current value, else the default, else
/// the zero value of the current value's kind.
fn initial_value(current: Option<Value>, default: Option<Value>) -> Option<Value> {
    let current = current?;
    if !current.is_zero() {
        return Some(current);
    }
    Some(default.unwrap_or(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FlagConfig;
    use crate::fixtures::test::{Colliding, Level, Specification};
    use std::time::Duration;

    fn bind_and_parse<C: FlagConfig>(config: &mut C, args: &[&str]) -> Result<(), FlagfigError> {
        let mut flags = FlagSet::new("test");
        bind_flags(config.fields(), &mut flags)?;
        let argv = std::iter::once("test").chain(args.iter().copied());
        flags.parse(argv)
    }

    #[test]
    fn default_applies_without_flags() {
        let mut level = Level {
            default: "255",
            ..Level::default()
        };
        bind_and_parse(&mut level, &[]).unwrap();
        assert_eq!(level.level, 255);
    }

    #[test]
    fn flag_overrides_default() {
        let mut level = Level {
            default: "255",
            ..Level::default()
        };
        bind_and_parse(&mut level, &["--level", "10"]).unwrap();
        assert_eq!(level.level, 10);
    }

    #[test]
    fn out_of_range_default_is_parse_error() {
        let mut level = Level {
            default: "256",
            ..Level::default()
        };
        let err = bind_and_parse(&mut level, &[]).unwrap_err();
        match err {
            FlagfigError::InvalidDefault { field, .. } => assert_eq!(field, "level"),
            other => panic!("Expected InvalidDefault, got {other:?}"),
        }
    }

    #[test]
    fn string_list_default() {
        let mut spec = Specification::default();
        bind_and_parse(&mut spec, &[]).unwrap();
        assert_eq!(spec.user_array, vec!["asdfx", "asdfy", "asdfz"]);
        assert!(spec.users.is_empty());
    }

    #[test]
    fn all_defaults_of_specification() {
        let mut spec = Specification::default();
        bind_and_parse(&mut spec, &[]).unwrap();
        assert_eq!(spec.port, 8080);
        assert_eq!(spec.rate_of_travel, 2.5);
        assert_eq!(spec.timeout, Duration::from_secs(2_592_063));
        assert_eq!(spec.int8, 127);
        assert_eq!(spec.nint8, -128);
        assert_eq!(spec.uint8, 255);
        assert_eq!(spec.int16, 32_767);
        assert_eq!(spec.uint16, 65_535);
        assert_eq!(spec.int32, 1_048_576);
        assert_eq!(spec.uint32, 255);
        assert!(!spec.debug);
        assert_eq!(spec.user, "");
    }

    #[test]
    fn preset_value_beats_default() {
        let mut spec = Specification {
            port: 9090,
            ..Specification::default()
        };
        bind_and_parse(&mut spec, &[]).unwrap();
        assert_eq!(spec.port, 9090);
    }

    #[test]
    fn preset_list_beats_default() {
        let mut spec = Specification {
            user_array: vec!["env".into()],
            ..Specification::default()
        };
        bind_and_parse(&mut spec, &[]).unwrap();
        assert_eq!(spec.user_array, vec!["env"]);
    }

    #[test]
    fn flag_beats_preset_value() {
        let mut spec = Specification {
            port: 9090,
            ..Specification::default()
        };
        bind_and_parse(&mut spec, &["-p", "7070"]).unwrap();
        assert_eq!(spec.port, 7070);
    }

    #[test]
    fn short_aliases_bind_the_same_field() {
        let mut spec = Specification::default();
        bind_and_parse(&mut spec, &["--u8", "7", "--n8=-1", "--i8", "0x7f"]).unwrap();
        assert_eq!(spec.uint8, 7);
        assert_eq!(spec.nint8, -1);
        assert_eq!(spec.int8, 127);
    }

    #[test]
    fn explicit_name_replaces_derived_name() {
        let mut spec = Specification::default();
        bind_and_parse(&mut spec, &["--max-count", "4"]).unwrap();
        assert_eq!(spec.count, 4);
        let derived = bind_and_parse(&mut Specification::default(), &["--count", "4"]);
        assert!(derived.is_err());
    }

    #[test]
    fn derived_names_are_hyphenated() {
        let mut spec = Specification::default();
        let mut flags = FlagSet::new("test");
        bind_flags(spec.fields(), &mut flags).unwrap();
        let names: Vec<&str> = flags.flag_names().collect();
        assert!(names.contains(&"rate-of-travel"));
        assert!(names.contains(&"user-name"));
        assert!(names.contains(&"user-array"));
        assert!(!names.contains(&"color-codes"));
    }

    #[test]
    fn map_field_is_skipped() {
        let mut spec = Specification::default();
        bind_and_parse(&mut spec, &[]).unwrap();
        assert!(spec.color_codes.is_empty());
        let map_flag = bind_and_parse(&mut Specification::default(), &["--color-codes", "a"]);
        assert!(map_flag.is_err());
    }

    #[test]
    fn unsupported_field_is_skipped() {
        let mut port = 0u16;
        let mut flags = FlagSet::new("test");
        let fields = vec![
            Field::unsupported("Handler", "fn()").default("ignored"),
            Field::new("Port", &mut port).default("80"),
        ];
        bind_flags(fields, &mut flags).unwrap();
        let names: Vec<&str> = flags.flag_names().collect();
        assert_eq!(names, vec!["port"]);
        assert!(flags.parse(["test", "--handler", "x"]).is_err());
        flags.parse(["test"]).unwrap();
        drop(flags);
        assert_eq!(port, 80);
    }

    #[test]
    fn colliding_names_are_reported() {
        let mut colliding = Colliding::default();
        let err = bind_and_parse(&mut colliding, &[]).unwrap_err();
        assert!(matches!(err, FlagfigError::DuplicateFlag { ref name } if name == "user-id"));
    }

    #[test]
    fn initial_value_precedence() {
        assert_eq!(
            initial_value(Some(Value::U8(3)), Some(Value::U8(9))),
            Some(Value::U8(3))
        );
        assert_eq!(
            initial_value(Some(Value::U8(0)), Some(Value::U8(9))),
            Some(Value::U8(9))
        );
        assert_eq!(initial_value(Some(Value::U8(0)), None), Some(Value::U8(0)));
        assert_eq!(initial_value(None, Some(Value::U8(9))), None);
    }
}
