use std::collections::HashMap;

use tracing::debug;

use crate::coerce::coerce;
use crate::error::FlagfigError;
use crate::field::Field;
use crate::name::env_keys;

/// Assign environment values to `fields`.
///
/// Each field is looked up as `{PREFIX}_{KEY}` (uppercased), where `KEY` is the
/// field's `env` override or its identifier; an override also falls back to
/// its bare form. A hit is coerced to the field's kind and written into the
/// field, so the flag pass sees it as already set. Map and unsupported fields
/// are skipped.
///
/// Takes an iterator so tests can pass synthetic data instead of `std::env::vars()`.
pub fn apply_env(
    fields: &mut [Field<'_>],
    prefix: &str,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<(), FlagfigError> {
    let vars: HashMap<String, String> = vars.into_iter().collect();

    for field in fields.iter_mut() {
        if !field.kind().is_bindable() {
            continue;
        }

        let keys = env_keys(prefix, field.ident(), field.env_override());
        let Some((key, raw)) = keys
            .into_iter()
            .find_map(|key| vars.get(&key).map(|raw| (key, raw.clone())))
        else {
            continue;
        };

        let value = match coerce(&raw, field.kind()) {
            Ok(Some(value)) => value,
            Ok(None) => continue,
            Err(source) => {
                return Err(FlagfigError::InvalidEnv {
                    key,
                    value: raw,
                    source,
                });
            }
        };

        debug!(field = field.ident(), %key, "set from environment");
        field.slot_mut().assign(value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FlagConfig;
    use crate::fixtures::test::Specification;
    use std::time::Duration;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn apply(
        spec: &mut Specification,
        prefix: &str,
        pairs: &[(&str, &str)],
    ) -> Result<(), FlagfigError> {
        let mut fields = spec.fields();
        apply_env(&mut fields, prefix, vars(pairs))
    }

    #[test]
    fn prefixed_identifier_key() {
        let mut spec = Specification::default();
        apply(&mut spec, "myapp", &[("MYAPP_PORT", "9000")]).unwrap();
        assert_eq!(spec.port, 9000);
    }

    #[test]
    fn identifier_is_uppercased_without_hyphens() {
        let mut spec = Specification::default();
        apply(&mut spec, "myapp", &[("MYAPP_RATEOFTRAVEL", "1.25")]).unwrap();
        assert_eq!(spec.rate_of_travel, 1.25);
    }

    #[test]
    fn env_override_key() {
        let mut spec = Specification::default();
        apply(&mut spec, "myapp", &[("MYAPP_USER_NAME", "gopher")]).unwrap();
        assert_eq!(spec.user_name, "gopher");
    }

    #[test]
    fn env_override_falls_back_to_bare_key() {
        let mut spec = Specification::default();
        apply(&mut spec, "myapp", &[("USER_NAME", "bare")]).unwrap();
        assert_eq!(spec.user_name, "bare");
    }

    #[test]
    fn prefixed_key_wins_over_bare_key() {
        let mut spec = Specification::default();
        apply(
            &mut spec,
            "myapp",
            &[("USER_NAME", "bare"), ("MYAPP_USER_NAME", "prefixed")],
        )
        .unwrap();
        assert_eq!(spec.user_name, "prefixed");
    }

    #[test]
    fn typed_values() {
        let mut spec = Specification::default();
        apply(
            &mut spec,
            "app",
            &[
                ("APP_DEBUG", "true"),
                ("APP_TIMEOUT", "1m30s"),
                ("APP_USERS", "ann,bob"),
                ("APP_UINT8", "0x10"),
            ],
        )
        .unwrap();
        assert!(spec.debug);
        assert_eq!(spec.timeout, Duration::from_secs(90));
        assert_eq!(spec.users, vec!["ann", "bob"]);
        assert_eq!(spec.uint8, 16);
    }

    #[test]
    fn missing_vars_leave_fields_untouched() {
        let mut spec = Specification::default();
        apply(&mut spec, "myapp", &[("OTHER_PORT", "1")]).unwrap();
        assert_eq!(spec, Specification::default());
    }

    #[test]
    fn malformed_value_reports_key() {
        let mut spec = Specification::default();
        let err = apply(&mut spec, "myapp", &[("MYAPP_INT8", "300")]).unwrap_err();
        match err {
            FlagfigError::InvalidEnv { key, value, .. } => {
                assert_eq!(key, "MYAPP_INT8");
                assert_eq!(value, "300");
            }
            other => panic!("Expected InvalidEnv, got {other:?}"),
        }
    }

    #[test]
    fn map_fields_are_skipped() {
        let mut spec = Specification::default();
        apply(&mut spec, "myapp", &[("MYAPP_COLORCODES", "red=1")]).unwrap();
        assert!(spec.color_codes.is_empty());
    }
}
