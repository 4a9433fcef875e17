//! Table-driven command-line option parsing.
//!
//! A flat table of [`Opt`] descriptors is matched against the process's
//! argument vector:
//! - short options `-c`, clusters `-abc`, values as `-cVALUE` or `-c VALUE`
//! - long options `--name`, `--name=value`, and `--no-name` for negatable
//!   counters
//! - `--` ends option scanning
//!
//! Values are written straight into caller-owned variables through typed
//! [`Slot`]s. The vector is compacted in place so that only the positional
//! arguments remain after the program name.
//!
//! ```
//! use argparser::{Opt, Parser};
//!
//! let mut verbose = 0;
//! let mut count = 0;
//! let mut args: Vec<String> = ["prog", "-vv", "--count=3", "input"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let n = Parser::new(vec![
//!     Opt::help(),
//!     Opt::boolean(&mut verbose).short('v').long("verbose").description("more output"),
//!     Opt::integer(&mut count).short('c').long("count").description("how many"),
//! ])
//! .usage("prog [options] FILE")
//! .parse(&mut args)
//! .unwrap();
//!
//! assert_eq!((n, verbose, count), (1, 2, 3));
//! assert_eq!(args, ["prog", "input"]);
//! ```
//!
//! The core never exits the process. [`Parser::parse_or_exit`] is the
//! boundary that prints diagnostics and terminates.

mod classify;
mod coerce;
mod error;
mod option;
mod parser;
mod usage;

pub use classify::{classify, Token};
pub use coerce::{parse_flag, parse_float, parse_integer, CoerceError};
pub use error::{Error, NumberKind, OptionRef, Result};
pub use option::{Callback, Kind, Opt, Slot, Value};
pub use parser::Parser;
