//! Option descriptors.
//!
//! An [`Opt`] pairs the names an option answers to with a typed [`Slot`]
//! that borrows the caller's storage. The parser writes through the slot
//! and never holds a value of its own.

use crate::coerce::{self, CoerceError};
use crate::error::{Error, Result};
use crate::parser::Parser;

/// What kind of option a descriptor is, without its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    End,
    Group,
    Boolean,
    Integer,
    Float,
    String,
}

/// Kind plus the caller-owned storage written on a match.
///
/// A `None` target still parses and validates the value; only the write is
/// skipped.
pub enum Slot<'a> {
    /// Marks the end of the table. Optional; the end of the vector works too.
    End,
    /// Section header in the usage output.
    Group,
    /// Occurrence counter: incremented per match, decremented on negation.
    Boolean(Option<&'a mut u32>),
    Integer(Option<&'a mut i64>),
    Float(Option<&'a mut f64>),
    String(Option<&'a mut Option<String>>),
}

impl Slot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Slot::End => Kind::End,
            Slot::Group => Kind::Group,
            Slot::Boolean(_) => Kind::Boolean,
            Slot::Integer(_) => Kind::Integer,
            Slot::Float(_) => Kind::Float,
            Slot::String(_) => Kind::String,
        }
    }
}

impl Kind {
    pub fn takes_value(self) -> bool {
        matches!(self, Kind::Integer | Kind::Float | Kind::String)
    }

    /// Placeholder shown after `=` in the usage listing.
    pub(crate) fn placeholder(self) -> Option<&'static str> {
        match self {
            Kind::Integer => Some("<int>"),
            Kind::Float => Some("<flt>"),
            Kind::String => Some("<str>"),
            _ => None,
        }
    }
}

/// Snapshot of a target slot, as seen by callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'v> {
    Count(u32),
    Integer(i64),
    Float(f64),
    String(Option<&'v str>),
}

/// Hook run right after an option has been matched and stored.
///
/// Returning an error stops the parse; [`Error::HelpRequested`] and
/// [`Error::Exit`] are the usual ways to end the program early.
pub trait Callback {
    fn call(&self, parser: &Parser<'_>, option: &Opt<'_>) -> Result<()>;
}

impl<F> Callback for F
where
    F: Fn(&Parser<'_>, &Opt<'_>) -> Result<()>,
{
    fn call(&self, parser: &Parser<'_>, option: &Opt<'_>) -> Result<()> {
        self(parser, option)
    }
}

pub struct Opt<'a> {
    pub(crate) slot: Slot<'a>,
    pub(crate) short_name: Option<char>,
    pub(crate) long_name: Option<String>,
    pub(crate) description: String,
    pub(crate) callback: Option<Box<dyn Callback + 'a>>,
    pub(crate) negatable: bool,
}

impl<'a> Opt<'a> {
    pub fn new(slot: Slot<'a>) -> Self {
        Opt {
            slot,
            short_name: None,
            long_name: None,
            description: String::new(),
            callback: None,
            negatable: false,
        }
    }

    pub fn boolean(target: &'a mut u32) -> Self {
        Self::new(Slot::Boolean(Some(target)))
    }

    pub fn integer(target: &'a mut i64) -> Self {
        Self::new(Slot::Integer(Some(target)))
    }

    pub fn float(target: &'a mut f64) -> Self {
        Self::new(Slot::Float(Some(target)))
    }

    pub fn string(target: &'a mut Option<String>) -> Self {
        Self::new(Slot::String(Some(target)))
    }

    /// Section header; only its title is printed in the usage listing.
    pub fn group(title: &str) -> Self {
        Self::new(Slot::Group).description(title)
    }

    pub fn end() -> Self {
        Self::new(Slot::End)
    }

    /// `-h, --help`: asks the caller to print usage and exit successfully.
    pub fn help() -> Self {
        Self::new(Slot::Boolean(None))
            .short('h')
            .long("help")
            .description("show this help message and exit")
            .callback(|_, _| Err(Error::HelpRequested))
    }

    pub fn short(mut self, c: char) -> Self {
        self.short_name = Some(c);
        self
    }

    pub fn long(mut self, name: &str) -> Self {
        self.long_name = Some(name.to_string());
        self
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    /// Accept `--no-<long>` to decrement the counter. Booleans only.
    pub fn negatable(mut self) -> Self {
        self.negatable = true;
        self
    }

    pub fn callback<F>(mut self, f: F) -> Self
    where
        F: Fn(&Parser<'_>, &Opt<'_>) -> Result<()> + 'a,
    {
        self.callback = Some(Box::new(f));
        self
    }

    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    pub fn help_text(&self) -> &str {
        &self.description
    }

    pub fn is_negatable(&self) -> bool {
        self.negatable && self.kind() == Kind::Boolean
    }

    /// Current content of the target, or `None` when there is no target.
    pub fn value(&self) -> Option<Value<'_>> {
        match &self.slot {
            Slot::Boolean(Some(t)) => Some(Value::Count(**t)),
            Slot::Integer(Some(t)) => Some(Value::Integer(**t)),
            Slot::Float(Some(t)) => Some(Value::Float(**t)),
            Slot::String(Some(t)) => Some(Value::String((**t).as_deref())),
            _ => None,
        }
    }

    /// Whether this entry can be matched on the command line at all.
    pub(crate) fn is_option(&self) -> bool {
        !matches!(self.kind(), Kind::End | Kind::Group)
    }

    pub(crate) fn count(&mut self) {
        if let Slot::Boolean(Some(t)) = &mut self.slot {
            **t = t.saturating_add(1);
        }
    }

    pub(crate) fn uncount(&mut self) {
        if let Slot::Boolean(Some(t)) = &mut self.slot {
            **t = t.saturating_sub(1);
        }
    }

    pub(crate) fn reset_count(&mut self) {
        if let Slot::Boolean(Some(t)) = &mut self.slot {
            **t = 0;
        }
    }

    /// Convert `raw` and write it to the target of a value-taking option.
    pub(crate) fn store(&mut self, raw: &str) -> std::result::Result<(), CoerceError> {
        match &mut self.slot {
            Slot::Integer(target) => {
                let v = coerce::parse_integer(raw)?;
                if let Some(t) = target {
                    **t = v;
                }
            }
            Slot::Float(target) => {
                let v = coerce::parse_float(raw)?;
                if let Some(t) = target {
                    **t = v;
                }
            }
            Slot::String(target) => {
                if let Some(t) = target {
                    **t = Some(raw.to_string());
                }
            }
            Slot::End | Slot::Group | Slot::Boolean(_) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_names() {
        let mut n = 0;
        let opt = Opt::integer(&mut n)
            .short('n')
            .long("number")
            .description("a number");
        assert_eq!(opt.kind(), Kind::Integer);
        assert_eq!(opt.short_name(), Some('n'));
        assert_eq!(opt.long_name(), Some("number"));
        assert_eq!(opt.help_text(), "a number");
        assert!(opt.callback.is_none());
    }

    #[test]
    fn counter_floors_at_zero() {
        let mut v = 1;
        {
            let mut opt = Opt::boolean(&mut v);
            opt.uncount();
            opt.uncount();
            assert_eq!(opt.value(), Some(Value::Count(0)));
            opt.count();
            opt.count();
        }
        assert_eq!(v, 2);
    }

    #[test]
    fn store_converts_per_kind() {
        let mut i = 0;
        let mut f = 0.0;
        let mut s = None;
        {
            let mut oi = Opt::integer(&mut i);
            let mut of = Opt::float(&mut f);
            let mut os = Opt::string(&mut s);
            assert_eq!(oi.store("0x20"), Ok(()));
            assert_eq!(of.store("2.5"), Ok(()));
            assert_eq!(os.store("-dash"), Ok(()));
            assert_eq!(oi.store("x"), Err(CoerceError::Malformed));
            assert_eq!(os.value(), Some(Value::String(Some("-dash"))));
        }
        assert_eq!(i, 32);
        assert_eq!(f, 2.5);
        assert_eq!(s.as_deref(), Some("-dash"));
    }

    #[test]
    fn targetless_slot_still_validates() {
        let mut opt = Opt::new(Slot::Integer(None));
        assert_eq!(opt.store("12"), Ok(()));
        assert_eq!(opt.store("12z"), Err(CoerceError::Malformed));
        assert_eq!(opt.value(), None);
    }

    #[test]
    fn negation_only_for_booleans() {
        let mut s = None;
        assert!(!Opt::string(&mut s).negatable().is_negatable());
        assert!(Opt::new(Slot::Boolean(None)).negatable().is_negatable());
    }

    #[test]
    fn help_option_shape() {
        let opt = Opt::help();
        assert_eq!(opt.short_name(), Some('h'));
        assert_eq!(opt.long_name(), Some("help"));
        assert_eq!(opt.kind(), Kind::Boolean);
        assert!(opt.callback.is_some());
    }
}
