//! The flag registry: named command-line flags bound to field storage.
//!
//! A [`FlagSet`] is an explicit value rather than process-wide state. Each
//! [`bind`](FlagSet::bind) call registers one field under one or more names;
//! [`parse`](FlagSet::parse) hands the arguments to clap and writes every
//! parsed value straight into the bound field.

use std::collections::HashSet;
use std::ffi::OsString;

use clap::{Arg, ArgAction, Command};
use tracing::debug;

use crate::coerce::parse_flag_value;
use crate::error::FlagfigError;
use crate::field::Slot;
use crate::types::{Kind, Value};

/// Id of the catch-all positional argument.
const POSITIONAL_ID: &str = "__flagfig_args";

/// Names taken by clap's built-in help flag.
const RESERVED: [&str; 2] = ["help", "h"];

struct Binding<'a> {
    slot: Slot<'a>,
    names: Vec<String>,
}

/// A set of flags bound to the fields of one configuration value.
pub struct FlagSet<'a> {
    program: String,
    about: Option<String>,
    args: Vec<Arg>,
    names: HashSet<String>,
    bindings: Vec<Binding<'a>>,
    positionals: Vec<String>,
}

impl<'a> FlagSet<'a> {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            args: Vec::new(),
            names: HashSet::new(),
            bindings: Vec::new(),
            positionals: Vec::new(),
        }
    }

    /// Description shown at the top of the help listing.
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Register `slot` under every name in `names`.
    ///
    /// `initial` is written into the slot immediately, so the field holds the
    /// registered value even if no flag is passed. Reusing a name fails with
    /// [`FlagfigError::DuplicateFlag`] and leaves the set unchanged.
    pub fn bind(
        &mut self,
        mut slot: Slot<'a>,
        initial: Value,
        names: &[String],
        usage: &str,
    ) -> Result<(), FlagfigError> {
        let mut seen = HashSet::new();
        for name in names {
            if name.is_empty()
                || name.starts_with('-')
                || name.contains('=')
                || name.contains(char::is_whitespace)
            {
                return Err(FlagfigError::InvalidFlagName { name: name.clone() });
            }
            if RESERVED.contains(&name.as_str())
                || name == POSITIONAL_ID
                || self.names.contains(name)
                || !seen.insert(name.as_str())
            {
                return Err(FlagfigError::DuplicateFlag { name: name.clone() });
            }
        }

        let kind = slot.kind();
        let help = help_text(usage, &initial);
        slot.assign(initial)?;

        for name in names {
            debug!(flag = %name, %kind, "registered flag");
            self.args.push(flag_arg(name, kind, &help));
            self.names.insert(name.clone());
        }
        self.bindings.push(Binding {
            slot,
            names: names.to_vec(),
        });
        Ok(())
    }

    /// All registered flag names, in registration order.
    pub fn flag_names(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .flat_map(|b| b.names.iter().map(String::as_str))
    }

    /// Parse `args` (program name first) and write every flag value into its
    /// field.
    ///
    /// Occurrences are applied in command-line order across all names of a
    /// field, so the last one wins. The first occurrence of a string-list flag
    /// replaces the registered value and later ones append to it.
    pub fn parse<I, T>(&mut self, args: I) -> Result<(), FlagfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command().try_get_matches_from(args)?;

        let mut occurrences: Vec<(usize, usize, Value)> = Vec::new();
        for (index, binding) in self.bindings.iter().enumerate() {
            for name in &binding.names {
                let Some(values) = matches.try_get_many::<Value>(name)? else {
                    continue;
                };
                let positions: Vec<usize> = matches
                    .indices_of(name)
                    .map(|indices| indices.collect())
                    .unwrap_or_default();
                for (n, value) in values.enumerate() {
                    let at = positions.get(n).or(positions.last()).copied().unwrap_or(0);
                    occurrences.push((at, index, value.clone()));
                }
            }
        }
        occurrences.sort_by_key(|(at, _, _)| *at);

        let mut touched = vec![false; self.bindings.len()];
        for (_, index, value) in occurrences {
            let Some(binding) = self.bindings.get_mut(index) else {
                continue;
            };
            debug!(flag = %binding.names.join("|"), %value, "set from command line");
            if touched[index] {
                binding.slot.extend(value)?;
            } else {
                binding.slot.assign(value)?;
                touched[index] = true;
            }
        }

        self.positionals = matches
            .try_get_many::<String>(POSITIONAL_ID)?
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Ok(())
    }

    /// Positional arguments left over after the last [`parse`](Self::parse).
    pub fn args(&self) -> &[String] {
        &self.positionals
    }

    /// The rendered help listing.
    pub fn usage(&self) -> String {
        self.command().render_help().to_string()
    }

    fn command(&self) -> Command {
        let mut command = Command::new(self.program.clone())
            .arg(
                Arg::new(POSITIONAL_ID)
                    .value_name("ARGS")
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .value_parser(clap::value_parser!(String)),
            )
            .args(self.args.iter().cloned());
        if let Some(about) = &self.about {
            command = command.about(about.clone());
        }
        command
    }
}

fn help_text(usage: &str, initial: &Value) -> String {
    if initial.is_zero() {
        return usage.to_string();
    }
    if usage.is_empty() {
        format!("[default: {initial}]")
    } else {
        format!("{usage} [default: {initial}]")
    }
}

fn value_name(kind: Kind) -> &'static str {
    match kind {
        Kind::Bool => "BOOL",
        Kind::Int | Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 => "INT",
        Kind::Uint | Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 => "UINT",
        Kind::F32 | Kind::F64 => "FLOAT",
        Kind::Duration => "DURATION",
        Kind::StringList => "LIST",
        Kind::Str | Kind::Map | Kind::Unsupported => "STRING",
    }
}

/// Build the clap argument for one flag name. Every flag appends, so all
/// occurrences reach [`FlagSet::parse`] in order. A valued flag takes the next
/// argument as is, even when it starts with `-`.
fn flag_arg(name: &str, kind: Kind, help: &str) -> Arg {
    let mut arg = Arg::new(name.to_string())
        .long(name.to_string())
        .help(help.to_string())
        .value_name(value_name(kind))
        .action(ArgAction::Append)
        .value_parser(move |text: &str| parse_flag_value(text, kind));

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        arg = arg.short(c);
    }

    if kind == Kind::Bool {
        arg = arg
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true");
    } else {
        arg = arg.allow_hyphen_values(true);
    }
    arg
}
