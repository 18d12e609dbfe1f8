//! External names for flags and environment variables.

use std::sync::LazyLock;

use regex::Regex;

/// A word is a run of non-uppercase characters, a capital followed by
/// non-uppercase characters, or a run of capitals. Alternatives are tried in
/// that order at each position.
static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("([^A-Z]+|[A-Z][^A-Z]+|[A-Z]+)").expect("word pattern is valid")
});

/// Convert a camel-case identifier into a lowercase hyphenated flag name.
///
/// `RateOfTravel` becomes `rate-of-travel` and `UserID` becomes `user-id`. A
/// capital run swallows the capital that starts the next word, so `HTTPPort`
/// becomes `httpp-ort`.
pub fn hyphenate(ident: &str) -> String {
    WORD.find_iter(ident)
        .map(|word| word.as_str().to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Environment variable keys to try for a field, in lookup order.
///
/// The primary key is `PREFIX_KEY`, uppercased, where `KEY` is the explicit
/// env override if present and the field identifier otherwise. An explicit
/// override also falls back to its bare, unprefixed form.
pub fn env_keys(prefix: &str, ident: &str, env_override: Option<&str>) -> Vec<String> {
    let key = env_override.unwrap_or(ident);
    let primary = if prefix.is_empty() {
        key.to_uppercase()
    } else {
        format!("{prefix}_{key}").to_uppercase()
    };

    let mut keys = vec![primary];
    if let Some(alt) = env_override.map(str::to_uppercase)
        && !keys.contains(&alt)
    {
        keys.push(alt);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_words() {
        assert_eq!(hyphenate("RateOfTravel"), "rate-of-travel");
        assert_eq!(hyphenate("UserName"), "user-name");
        assert_eq!(hyphenate("Debug"), "debug");
    }

    #[test]
    fn capital_runs_are_one_word() {
        assert_eq!(hyphenate("UserID"), "user-id");
        assert_eq!(hyphenate("ID"), "id");
        assert_eq!(hyphenate("HTTPPort"), "httpp-ort");
    }

    #[test]
    fn digits_stay_with_their_word() {
        assert_eq!(hyphenate("Int8"), "int8");
        assert_eq!(hyphenate("Nint16"), "nint16");
        assert_eq!(hyphenate("Timeout2"), "timeout2");
    }

    #[test]
    fn lowercase_leading_run() {
        assert_eq!(hyphenate("rateOfTravel"), "rate-of-travel");
        assert_eq!(hyphenate("snake_case"), "snake_case");
    }

    #[test]
    fn empty_identifier_has_no_name() {
        assert_eq!(hyphenate(""), "");
    }

    #[test]
    fn env_key_from_ident() {
        assert_eq!(env_keys("myapp", "Port", None), vec!["MYAPP_PORT"]);
        assert_eq!(env_keys("", "Port", None), vec!["PORT"]);
    }

    #[test]
    fn env_key_override_with_fallback() {
        assert_eq!(
            env_keys("myapp", "UserName", Some("user_name")),
            vec!["MYAPP_USER_NAME", "USER_NAME"]
        );
    }

    #[test]
    fn env_key_override_without_prefix_has_no_duplicate() {
        assert_eq!(
            env_keys("", "UserName", Some("USER_NAME")),
            vec!["USER_NAME"]
        );
    }
}
