use std::ffi::OsString;
use std::path::Path;

use crate::error::FlagfigError;
use crate::field::FlagConfig;
use crate::resolve::{self, Parsed, ResolveInput};

/// Entry point for building a flagfig pass.
pub struct Flagfig;

impl Flagfig {
    pub fn builder() -> FlagfigBuilder {
        FlagfigBuilder::new()
    }
}

/// Builder for one environment + command-line pass over a config struct.
///
/// Environment variables and arguments default to the real process ones;
/// [`env_vars()`](Self::env_vars) and [`args()`](Self::args) replace them,
/// which keeps tests independent of the process state.
pub struct FlagfigBuilder {
    env_prefix: Option<String>,
    env_enabled: bool,
    program: Option<String>,
    about: Option<String>,
    args: Option<Vec<OsString>>,
    env_vars: Option<Vec<(String, String)>>,
}

impl FlagfigBuilder {
    fn new() -> Self {
        Self {
            env_prefix: None,
            env_enabled: true,
            program: None,
            about: None,
            args: None,
            env_vars: None,
        }
    }

    /// Set the environment variable prefix: `MYAPP_PORT` for prefix `myapp`.
    /// Without a prefix, fields are looked up by their bare identifier.
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable the environment pass entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Program name for the help listing (default: the first argument).
    pub fn program(mut self, name: &str) -> Self {
        self.program = Some(name.to_string());
        self
    }

    /// Description shown at the top of the help listing.
    pub fn about(mut self, about: &str) -> Self {
        self.about = Some(about.to_string());
        self
    }

    /// Use these arguments (program name first) instead of `std::env::args_os()`.
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Use these variables instead of `std::env::vars()`.
    pub fn env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Resolve the effective env prefix (None if env disabled).
    fn effective_env_prefix(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        Some(self.env_prefix.clone().unwrap_or_default())
    }

    /// Build the `ResolveInput` from current builder state.
    fn build_input(self) -> ResolveInput {
        let env_prefix = self.effective_env_prefix();
        let args = self.args.unwrap_or_else(|| std::env::args_os().collect());
        let program = self.program.unwrap_or_else(|| {
            args.first()
                .map(Path::new)
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let env_vars = match (&env_prefix, self.env_vars) {
            (None, _) => Vec::new(),
            (Some(_), Some(vars)) => vars,
            (Some(_), None) => std::env::vars().collect(),
        };

        ResolveInput {
            env_vars,
            env_prefix,
            program,
            about: self.about,
            args,
        }
    }

    /// Populate `config` from the environment, then from the command line.
    pub fn process<C: FlagConfig + ?Sized>(self, config: &mut C) -> Result<Parsed, FlagfigError> {
        resolve::resolve(self.build_input(), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::Specification;

    #[test]
    fn env_prefix_is_used() {
        let builder = Flagfig::builder().env_prefix("myapp");
        assert_eq!(builder.effective_env_prefix(), Some("myapp".to_string()));
    }

    #[test]
    fn missing_prefix_means_bare_keys() {
        let builder = Flagfig::builder();
        assert_eq!(builder.effective_env_prefix(), Some(String::new()));
    }

    #[test]
    fn no_env_disables_prefix() {
        let builder = Flagfig::builder().env_prefix("myapp").no_env();
        assert_eq!(builder.effective_env_prefix(), None);
    }

    #[test]
    fn program_defaults_to_first_arg() {
        let input = Flagfig::builder()
            .args(["/usr/bin/demo", "--port", "1"])
            .env_vars(Vec::<(String, String)>::new())
            .build_input();
        assert_eq!(input.program, "demo");
        assert_eq!(input.args.len(), 3);
    }

    #[test]
    fn explicit_program_wins() {
        let input = Flagfig::builder()
            .program("demo")
            .args(["/usr/bin/demo"])
            .env_vars([("A", "1")])
            .build_input();
        assert_eq!(input.program, "demo");
        assert_eq!(input.env_vars, vec![("A".to_string(), "1".to_string())]);
    }

    #[test]
    fn no_env_drops_supplied_vars() {
        let input = Flagfig::builder()
            .no_env()
            .args(["demo"])
            .env_vars([("PORT", "1")])
            .build_input();
        assert!(input.env_vars.is_empty());
    }

    #[test]
    fn process_with_synthetic_sources() {
        let mut spec = Specification::default();
        let parsed = Flagfig::builder()
            .env_prefix("myapp")
            .env_vars([("MYAPP_USER", "env"), ("MYAPP_PORT", "5000")])
            .args(["demo", "--user", "flag", "rest"])
            .process(&mut spec)
            .unwrap();
        assert_eq!(spec.user, "flag");
        assert_eq!(spec.port, 5000);
        assert_eq!(parsed.args, vec!["rest"]);
    }

    #[test]
    fn process_reports_unknown_flags() {
        let mut spec = Specification::default();
        let result = Flagfig::builder()
            .no_env()
            .args(["demo", "--nope"])
            .process(&mut spec);
        assert!(matches!(result, Err(FlagfigError::Cli(_))));
    }
}
