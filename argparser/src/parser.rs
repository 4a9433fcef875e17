use std::collections::HashSet;
use std::io::{self, Write};

use tracing::{debug, trace};

use crate::classify::{classify, Token};
use crate::coerce::{self, CoerceError};
use crate::error::{Error, NumberKind, OptionRef, Result};
use crate::option::{Kind, Opt};

/// An option table plus the text around it in the usage output.
pub struct Parser<'a> {
    pub(crate) options: Vec<Opt<'a>>,
    pub(crate) usages: Vec<String>,
    pub(crate) description: Option<String>,
    pub(crate) epilog: Option<String>,
    stop_at_non_option: bool,
}

/// Cursors for one `parse` call.
///
/// Survivors are only recorded while scanning; `args` is not reordered until
/// the whole scan has succeeded.
struct Scan {
    read: usize,
    kept: Vec<usize>,
    /// Byte offset of the unconsumed part of a short-option cluster.
    cluster: Option<usize>,
}

impl Scan {
    fn keep(&mut self) {
        self.kept.push(self.read);
        self.read += 1;
    }

    /// Keep every unread argument, then move the survivors down behind the
    /// program name and drop the rest.
    fn finish(mut self, args: &mut Vec<String>) -> usize {
        while self.read < args.len() {
            self.keep();
        }
        let mut write = 1;
        for read in self.kept {
            debug_assert!(write <= read, "write cursor passed read cursor");
            args.swap(write, read);
            write += 1;
        }
        args.truncate(write);
        write - 1
    }

    /// Take the whole next argument as an option value.
    fn next_value<'s>(&mut self, args: &'s [String]) -> std::result::Result<&'s str, CoerceError> {
        if self.read + 1 < args.len() {
            self.read += 1;
            Ok(&args[self.read])
        } else {
            Err(CoerceError::Missing)
        }
    }
}

fn value_error(err: CoerceError, kind: Kind, option: OptionRef) -> Error {
    match err {
        CoerceError::Missing => Error::MissingValue(option),
        CoerceError::OutOfRange => Error::OutOfRange(option),
        CoerceError::Malformed => match kind {
            Kind::Boolean => Error::InvalidFlagValue(option),
            Kind::Float => Error::MalformedNumber {
                option,
                kind: NumberKind::Float,
            },
            _ => Error::MalformedNumber {
                option,
                kind: NumberKind::Integer,
            },
        },
    }
}

fn bad_table(msg: String) -> Error {
    Error::BadDescriptorTable(msg)
}

impl<'a> Parser<'a> {
    pub fn new(options: Vec<Opt<'a>>) -> Self {
        Parser {
            options,
            usages: Vec::new(),
            description: None,
            epilog: None,
            stop_at_non_option: false,
        }
    }

    /// Add a usage line. The first prints as `Usage: ...`, later ones as
    /// `   or: ...`.
    pub fn usage(mut self, line: &str) -> Self {
        self.usages.push(line.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }

    pub fn epilog(mut self, text: &str) -> Self {
        self.epilog = Some(text.to_string());
        self
    }

    /// Treat the first positional argument as the end of the options, e.g.
    /// for a dispatcher that hands the rest to a sub-command.
    pub fn stop_at_non_option(mut self, stop: bool) -> Self {
        self.stop_at_non_option = stop;
        self
    }

    pub fn options(&self) -> &[Opt<'a>] {
        &self.options
    }

    /// Look up an option by its long name.
    pub fn option(&self, long_name: &str) -> Option<&Opt<'a>> {
        self.options
            .iter()
            .find(|o| o.is_option() && o.long_name() == Some(long_name))
    }

    /// Parse `args` against the table, writing matched values through the
    /// option targets.
    ///
    /// `args[0]` is the program name and is left alone. On success `args`
    /// is rewritten to the program name followed by the surviving
    /// positional arguments in their original order, and their count is
    /// returned. On error `args` is left in its original order.
    pub fn parse(&mut self, args: &mut Vec<String>) -> Result<usize> {
        self.check_options()?;
        if args.is_empty() {
            return Ok(0);
        }

        let mut scan = Scan {
            read: 1,
            kept: Vec::new(),
            cluster: None,
        };

        while scan.read < args.len() {
            let token = classify(&args[scan.read]);
            trace!(index = scan.read, arg = %args[scan.read], ?token, "classified");
            match token {
                Token::Positional => {
                    if self.stop_at_non_option {
                        debug!(arg = %args[scan.read], "stopping at first non-option");
                        break;
                    }
                    scan.keep();
                }
                Token::Terminator => {
                    scan.read += 1;
                    break;
                }
                Token::LongOption => {
                    self.long_opt(args, &mut scan)?;
                    scan.read += 1;
                }
                Token::ShortCluster => {
                    scan.cluster = Some(1);
                    while scan.cluster.is_some() {
                        self.short_opt(args, &mut scan)?;
                    }
                    scan.read += 1;
                }
            }
        }

        let survivors = scan.finish(args);
        debug!(survivors, "parse finished");
        Ok(survivors)
    }

    /// Resolve the first character of the pending cluster.
    fn short_opt(&mut self, args: &[String], scan: &mut Scan) -> Result<()> {
        let Some(offset) = scan.cluster else {
            return Ok(());
        };
        let arg = &args[scan.read];
        let Some(c) = arg[offset..].chars().next() else {
            scan.cluster = None;
            return Ok(());
        };

        let idx = self
            .find_short(c)
            .ok_or_else(|| Error::UnknownOption(arg.clone()))?;
        let after = offset + c.len_utf8();
        let kind = self.options[idx].kind();
        let option = OptionRef::Short(c);

        if !kind.takes_value() {
            scan.cluster = (after < arg.len()).then_some(after);
            self.options[idx].count();
            debug!(%option, "matched");
            return self.run_callback(idx);
        }

        // A value-taking option eats the rest of the cluster.
        scan.cluster = None;
        let raw = if after < arg.len() {
            &arg[after..]
        } else {
            scan.next_value(args)
                .map_err(|e| value_error(e, kind, option.clone()))?
        };
        self.apply_value(idx, raw, option)
    }

    fn long_opt(&mut self, args: &[String], scan: &mut Scan) -> Result<()> {
        let arg = &args[scan.read];
        let body = &arg[2..];
        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let option = OptionRef::Long(name.to_string());

        if let Some(idx) = self.find_long(name) {
            let kind = self.options[idx].kind();
            if kind == Kind::Boolean {
                match inline.map(coerce::parse_flag) {
                    None | Some(Ok(true)) => self.options[idx].count(),
                    Some(Ok(false)) => self.options[idx].reset_count(),
                    Some(Err(e)) => return Err(value_error(e, kind, option)),
                }
                debug!(%option, "matched");
                return self.run_callback(idx);
            }

            let raw = match inline {
                Some(value) => value,
                None => scan
                    .next_value(args)
                    .map_err(|e| value_error(e, kind, option.clone()))?,
            };
            return self.apply_value(idx, raw, option);
        }

        if let Some(idx) = name.strip_prefix("no-").and_then(|b| self.find_negatable(b)) {
            if inline.is_some() {
                return Err(Error::UnexpectedValue(option));
            }
            self.options[idx].uncount();
            debug!(%option, "matched negation");
            return self.run_callback(idx);
        }

        Err(Error::UnknownOption(arg.clone()))
    }

    fn apply_value(&mut self, idx: usize, raw: &str, option: OptionRef) -> Result<()> {
        let kind = self.options[idx].kind();
        if let Err(e) = self.options[idx].store(raw) {
            return Err(value_error(e, kind, option));
        }
        debug!(%option, value = raw, "matched");
        self.run_callback(idx)
    }

    fn run_callback(&self, idx: usize) -> Result<()> {
        let opt = &self.options[idx];
        match &opt.callback {
            Some(cb) => cb.call(self, opt),
            None => Ok(()),
        }
    }

    fn find_short(&self, c: char) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.is_option() && o.short_name == Some(c))
    }

    fn find_long(&self, name: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.is_option() && o.long_name.as_deref() == Some(name))
    }

    fn find_negatable(&self, name: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|o| o.is_negatable() && o.long_name.as_deref() == Some(name))
    }

    /// Reject tables that cannot be parsed unambiguously.
    fn check_options(&self) -> Result<()> {
        let mut shorts = HashSet::new();
        let mut longs = HashSet::new();
        let last = self.options.len().saturating_sub(1);

        for (i, opt) in self.options.iter().enumerate() {
            if !opt.is_option() {
                if opt.kind() == Kind::End && i != last {
                    return Err(bad_table(format!("end marker at entry {} is not last", i)));
                }
                if opt.short_name.is_some() || opt.long_name.is_some() {
                    return Err(bad_table(format!("entry {} cannot carry option names", i)));
                }
                if opt.kind() == Kind::Group && opt.description.is_empty() {
                    return Err(bad_table(format!("group at entry {} has no title", i)));
                }
                continue;
            }
            if opt.description.is_empty() {
                return Err(bad_table(format!("option at entry {} has no help text", i)));
            }

            if let Some(c) = opt.short_name {
                if c == '-' || c.is_whitespace() || c.is_control() {
                    return Err(bad_table(format!("invalid short name {:?}", c)));
                }
                if !shorts.insert(c) {
                    return Err(bad_table(format!("duplicate short name `-{}`", c)));
                }
            }
            if let Some(name) = opt.long_name.as_deref() {
                if name.is_empty()
                    || name.starts_with('-')
                    || name.contains(|c: char| c == '=' || c.is_whitespace())
                {
                    return Err(bad_table(format!("invalid long name {:?}", name)));
                }
                if !longs.insert(name) {
                    return Err(bad_table(format!("duplicate long name `--{}`", name)));
                }
            }
        }
        Ok(())
    }

    /// Print the diagnostic for `err` and return the exit status it calls
    /// for.
    ///
    /// Help goes to `out`; errors go to `err_out` followed by the usage.
    pub fn report<O: Write, E: Write>(
        &self,
        err: &Error,
        out: &mut O,
        err_out: &mut E,
    ) -> io::Result<i32> {
        match err {
            Error::HelpRequested => self.write_usage(out)?,
            Error::Exit(_) => {}
            _ => {
                writeln!(err_out, "error: {}", err)?;
                if err.shows_usage() {
                    self.write_usage(err_out)?;
                }
            }
        }
        out.flush()?;
        err_out.flush()?;
        Ok(err.exit_code())
    }

    /// Like [`parse`](Self::parse), but a failed parse prints its
    /// diagnostic and ends the process.
    pub fn parse_or_exit(&mut self, args: &mut Vec<String>) -> usize {
        match self.parse(args) {
            Ok(survivors) => survivors,
            Err(err) => {
                let code = self
                    .report(&err, &mut io::stdout().lock(), &mut io::stderr().lock())
                    .unwrap_or(1);
                std::process::exit(code);
            }
        }
    }
}
