//! Core pipeline: environment pass, flag binding, command-line parse.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. Steps:
//!
//! 1. Assign matching environment variables to fields (if a prefix is set)
//! 2. Register one flag per field name, initialised by precedence
//! 3. Parse the arguments, overwriting bound fields in place

use std::ffi::OsString;

use crate::bind::bind_flags;
use crate::env::apply_env;
use crate::error::FlagfigError;
use crate::field::FlagConfig;
use crate::flags::FlagSet;

/// All pre-loaded data needed to process a config. No I/O happens here.
pub struct ResolveInput {
    /// Raw environment variable pairs (pass `std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Env var prefix (e.g. `"myapp"`). `None` means env disabled.
    pub env_prefix: Option<String>,
    /// Program name shown in the help listing.
    pub program: String,
    /// Optional description for the help listing.
    pub about: Option<String>,
    /// Command-line arguments, program name first.
    pub args: Vec<OsString>,
}

/// What a successful pass leaves besides the populated config.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// Positional arguments that were not consumed by any flag.
    pub args: Vec<String>,
    /// The rendered help listing for the bound flags.
    pub usage: String,
}

/// Populate `config` from pre-loaded inputs.
///
/// An environment error is returned immediately; flags are not bound in that
/// case.
pub fn resolve<C: FlagConfig + ?Sized>(
    input: ResolveInput,
    config: &mut C,
) -> Result<Parsed, FlagfigError> {
    let mut fields = config.fields();

    // 1: Environment
    if let Some(prefix) = &input.env_prefix {
        apply_env(&mut fields, prefix, input.env_vars)?;
    }

    // 2: Flags
    let mut flags = FlagSet::new(input.program);
    if let Some(about) = input.about {
        flags = flags.about(about);
    }
    bind_flags(fields, &mut flags)?;

    // 3: Command line (highest priority)
    flags.parse(input.args)?;

    Ok(Parsed {
        args: flags.args().to_vec(),
        usage: flags.usage(),
    })
}
