use console::{measure_text_width, Term};
use std::{
    io,
    sync::atomic::{AtomicBool, Ordering},
};

// Width of the message prefix column
const PREFIX_LEN: usize = 10;

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {{
        $crate::WRITER
            .writeln(&console::style("INFO").blue().bold().to_string(), &format!($($arg)+))
            .ok();
    }};
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {{
        $crate::WRITER
            .writeln(&console::style("WARNING").yellow().bold().to_string(), &format!($($arg)+))
            .ok();
    }};
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {{
        $crate::WRITER
            .writeln(&console::style("ERROR").red().bold().to_string(), &format!($($arg)+))
            .ok();
    }};
}

/// Follow-up lines of an `error!`, one per cause
#[macro_export]
macro_rules! due_to {
    ($($arg:tt)+) => {{
        $crate::WRITER
            .writeln(&console::style("DUE TO").yellow().bold().to_string(), &format!($($arg)+))
            .ok();
    }};
}

/// Only shown with --verbose
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {{
        if $crate::WRITER.is_verbose() {
            $crate::WRITER
                .writeln(&console::style("DEBUG").dim().to_string(), &format!($($arg)+))
                .ok();
        }
    }};
}

/// Right-align `prefix` in the prefix column
pub fn gen_prefix(prefix: &str) -> String {
    let width = measure_text_width(prefix);
    if width >= PREFIX_LEN {
        format!("{} ", prefix)
    } else {
        format!("{}{} ", " ".repeat(PREFIX_LEN - 1 - width), prefix)
    }
}

/// Writes diagnostics to stderr, leaving stdout for program output
pub struct Writer {
    term: Term,
    verbose: AtomicBool,
}

impl Writer {
    pub fn new() -> Self {
        Writer {
            term: Term::stderr(),
            verbose: AtomicBool::new(false),
        }
    }

    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Write a message, continuation lines get an empty prefix
    pub fn writeln(&self, prefix: &str, msg: &str) -> io::Result<()> {
        let mut lines = msg.lines();
        let first = lines.next().unwrap_or_default();
        self.term
            .write_line(&format!("{}{}", gen_prefix(prefix), first))?;
        for line in lines {
            self.term.write_line(&format!("{}{}", gen_prefix(""), line))?;
        }
        Ok(())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}
