use super::status::PkgStatus;
use crate::{
    debug,
    error::StatusDbError,
    types::{parse_dependency_list, DependencyAlternatives},
};

use std::{cell::OnceCell, fmt, io::BufRead};

/// What a single physical line of a status file means to the stanza parser
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// End of the current stanza
    Blank,
    /// `Name: value`, or a bare `Name:`
    Header(&'a str, &'a str),
    /// Leading whitespace stripped
    Continuation(&'a str),
    Unknown,
}

fn classify(line: &str) -> Line<'_> {
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with(char::is_whitespace) {
        return Line::Continuation(line.trim_start());
    }

    // Field names never contain whitespace, so the first space ends the name
    let (head, value) = line.split_once(' ').unwrap_or((line, ""));
    match head.strip_suffix(':') {
        Some(name) if !name.is_empty() && !name.contains(char::is_whitespace) => {
            Line::Header(name, value)
        }
        _ => Line::Unknown,
    }
}

fn chomp(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// One paragraph of the dpkg status database
#[derive(Debug, Clone, Default)]
pub struct Package {
    // In the order they first appear
    fields: Vec<(String, String)>,
    requires: OnceCell<Vec<DependencyAlternatives>>,
}

impl Package {
    /// Consume lines from `reader` until a blank line or the end of input.
    ///
    /// The blank line is consumed too. Lines that are neither field headers
    /// nor continuations are skipped. If the reader is sitting on a blank
    /// line the result has no fields at all.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, StatusDbError> {
        let mut res = Package::default();
        // Index of the field continuation lines belong to
        let mut current: Option<usize> = None;
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            // Old records may carry Latin-1 text
            let line = String::from_utf8_lossy(&buf);
            match classify(chomp(&line)) {
                Line::Blank => break,
                Line::Header(name, value) => {
                    current = Some(res.set_field(name, value));
                }
                Line::Continuation(content) => match current {
                    Some(idx) => {
                        let value = &mut res.fields[idx].1;
                        // First fold marks the value as multi-line
                        if !value.contains('\n') {
                            value.push('\n');
                        }
                        value.push('\n');
                        value.push_str(content);
                    }
                    None => debug!("Ignoring continuation line without a field: {}", chomp(&line)),
                },
                Line::Unknown => debug!("Ignoring malformed line: {}", chomp(&line)),
            }
        }

        Ok(res)
    }

    fn set_field(&mut self, name: &str, value: &str) -> usize {
        match self.fields.iter().position(|(n, _)| n == name) {
            Some(idx) => {
                self.fields[idx].1 = value.to_owned();
                idx
            }
            None => {
                self.fields.push((name.to_owned(), value.to_owned()));
                self.fields.len() - 1
            }
        }
    }

    /// Raw value of a field, exactly as folded from the file
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Field value as deb822 text: one line per physical line, with the
    /// `.` placeholder turned back into an empty line.
    pub fn text(&self, name: &str) -> Option<String> {
        let raw = self.field(name)?;
        let (first, rest) = match raw.split_once('\n') {
            Some(x) => x,
            None => return Some(raw.to_owned()),
        };

        let mut lines = vec![first];
        let rest = rest.strip_prefix('\n').unwrap_or(rest);
        lines.extend(rest.split('\n').map(|l| if l == "." { "" } else { l }));
        Some(lines.join("\n"))
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// True when not a single field was read
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.field("Package")
    }

    pub fn version(&self) -> Option<&str> {
        self.field("Version")
    }

    /// Whether the last word of `Status` is `installed`.
    /// Records without `Status` count as not installed.
    pub fn installed(&self) -> bool {
        self.field("Status")
            .and_then(|s| s.split_whitespace().last())
            .map_or(false, |state| state == "installed")
    }

    pub fn status(&self) -> Result<Option<PkgStatus>, StatusDbError> {
        self.field("Status").map(PkgStatus::try_from).transpose()
    }

    /// Parsed `Depends`, computed on first call
    pub fn requires(&self) -> Result<&[DependencyAlternatives], StatusDbError> {
        if let Some(deps) = self.requires.get() {
            return Ok(deps);
        }
        let deps = parse_dependency_list(self.field("Depends"))?;
        Ok(self.requires.get_or_init(|| deps))
    }

    /// Parse any relationship field, like `Pre-Depends` or `Recommends`
    pub fn relations(&self, field: &str) -> Result<Vec<DependencyAlternatives>, StatusDbError> {
        if field == "Depends" {
            return Ok(self.requires()?.to_vec());
        }
        parse_dependency_list(self.field(field))
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Eq for Package {}

impl fmt::Display for Package {
    /// Write the stanza back in control file syntax
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (name, value) in self.fields() {
            match value.split_once('\n') {
                Some((first, rest)) => {
                    write!(f, "{}:", name)?;
                    if !first.is_empty() {
                        write!(f, " {}", first)?;
                    }
                    writeln!(f)?;
                    let rest = rest.strip_prefix('\n').unwrap_or(rest);
                    for line in rest.split('\n') {
                        writeln!(f, " {}", line)?;
                    }
                }
                None => writeln!(f, "{}: {}", name, value)?,
            }
        }
        Ok(())
    }
}
