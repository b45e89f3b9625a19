//! Colored status messages for stderr.
//!
//! Color is applied only when the caller says the target supports it.

use std::io::{self, Write};

use owo_colors::{AnsiColors, OwoColorize};

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    color: AnsiColors,
    msg: &str,
    supports_color: bool,
) -> io::Result<()> {
    if supports_color {
        writeln!(writer, "{} {}", prefix.color(color).bold(), msg)
    } else {
        writeln!(writer, "{} {}", prefix, msg)
    }
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "[info]", AnsiColors::Cyan, msg, supports_color)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "[ok]", AnsiColors::Green, msg, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "[error]", AnsiColors::Red, msg, supports_color)
}
