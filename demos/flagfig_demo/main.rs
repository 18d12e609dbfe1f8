//! # flagfig demo application
//!
//! Fills a sample struct from `MYAPP_*` environment variables and the
//! command line, then prints every value and the help listing.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example flagfig_demo
//! MYAPP_PORT=9000 cargo run --example flagfig_demo -- --debug --u8 7
//! cargo run --example flagfig_demo -- --users a --users b,c extra args
//! RUST_LOG=flagfig=debug cargo run --example flagfig_demo
//! ```
//!
//! | Feature | How to exercise it |
//! |---------|--------------------|
//! | Textual defaults | run with no arguments |
//! | Env var override | `MYAPP_PORT=9000` |
//! | Env key override | `MYAPP_USER_NAME=ana` or plain `USER_NAME=ana` |
//! | Short aliases | `-p 9000`, `--u8 7` |
//! | List flags | `--users a --users b,c` |
//! | Help | `--help` |

mod config;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use flagfig::{Flagfig, FlagfigError, list_values};

use config::Specification;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut spec = Specification::default();
    let parsed = match Flagfig::builder()
        .env_prefix("myapp")
        .about("flagfig demo: environment and flag driven configuration")
        .process(&mut spec)
    {
        Ok(parsed) => parsed,
        Err(FlagfigError::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match list_values(&mut spec) {
        Ok(listing) => println!("{listing}"),
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }

    if !parsed.args.is_empty() {
        println!("args = {}", parsed.args.join(" "));
    }

    println!();
    println!("{}", parsed.usage);
    ExitCode::SUCCESS
}
