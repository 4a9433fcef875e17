//! Help text rendering.

use std::io::{self, Write};

use crate::option::{Kind, Opt};
use crate::parser::Parser;

/// Left margin before every option line.
const MARGIN: usize = 4;

/// `-x, --long-name=<type>` for one option.
fn render_names(opt: &Opt<'_>) -> String {
    let mut s = String::new();
    if let Some(c) = opt.short_name() {
        s.push('-');
        s.push(c);
    }
    if let Some(long) = opt.long_name() {
        if !s.is_empty() {
            s.push_str(", ");
        }
        s.push_str("--");
        s.push_str(long);
    }
    if let Some(placeholder) = opt.kind().placeholder() {
        s.push('=');
        s.push_str(placeholder);
    }
    s
}

impl<'a> Parser<'a> {
    fn listed(&self) -> impl Iterator<Item = &Opt<'a>> + '_ {
        self.options.iter().take_while(|o| o.kind() != Kind::End)
    }

    /// Column where help texts start, not counting the two-space gutter.
    fn column_width(&self) -> usize {
        let widest = self
            .listed()
            .filter(|o| o.kind() != Kind::Group)
            .map(|o| render_names(o).chars().count())
            .max()
            .unwrap_or(0);
        widest.div_ceil(4) * 4 + MARGIN
    }

    pub fn write_usage<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, line) in self.usages.iter().enumerate() {
            let lead = if i == 0 { "Usage:" } else { "   or:" };
            writeln!(out, "{} {}", lead, line)?;
        }
        if let Some(description) = &self.description {
            writeln!(out, "{}", description)?;
        }

        let width = self.column_width();
        for opt in self.listed() {
            if opt.kind() == Kind::Group {
                writeln!(out)?;
                writeln!(out, "{}", opt.help_text())?;
                continue;
            }

            // `width` covers the widest rendering plus the margin, so names
            // never run into the help column.
            let names = format!("{:margin$}{}", "", render_names(opt), margin = MARGIN);
            writeln!(out, "{:<width$}  {}", names, opt.help_text(), width = width)?;
        }

        if let Some(epilog) = &self.epilog {
            writeln!(out)?;
            writeln!(out, "{}", epilog)?;
        }
        Ok(())
    }

    pub fn usage_string(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write_usage(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
