//! G-code line parsing for the cutter's three commands.

use core::fmt;

use heapless::String;

use crate::config::units::Millimeters;
use crate::error::{CommandError, Result};
use crate::motion::{Axis, MoveRequest};

/// A decoded command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `G0`: linear move to (absolute) or by (relative) the given targets.
    Move(MoveRequest),
    /// `G90`: absolute coordinates.
    Absolute,
    /// `G91`: relative coordinates.
    Relative,
}

impl Command {
    /// Decode one line.
    ///
    /// The command word is `G` followed by its number, so `G0`, `G00` and
    /// `G0X1` all decode as a move. Axis parameters that are missing or not
    /// followed by a number are left unset.
    ///
    /// # Errors
    ///
    /// `CommandError::Empty` for a blank line, `CommandError::Unsupported`
    /// for any other command word.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty.into());
        }

        let (number, params) = split_word(line).ok_or_else(|| unsupported(line))?;
        match number {
            0 => {
                let mut request = MoveRequest::new();
                for axis in Axis::ALL {
                    request.set(axis, parameter(params, axis.letter()).map(Millimeters));
                }
                Ok(Command::Move(request))
            }
            90 => Ok(Command::Absolute),
            91 => Ok(Command::Relative),
            _ => Err(unsupported(line)),
        }
    }

    /// Relative single-axis jog as the two commands a host sends for it.
    pub fn jog(axis: Axis, distance: Millimeters) -> [Command; 2] {
        [
            Command::Relative,
            Command::Move(MoveRequest::new().with(axis, distance)),
        ]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Absolute => write!(f, "G90"),
            Command::Relative => write!(f, "G91"),
            Command::Move(request) => {
                write!(f, "G0")?;
                for axis in Axis::ALL {
                    if let Some(value) = request.target(axis) {
                        write!(f, " {}{}", axis.letter(), value.0)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Value after the first occurrence of `letter` in `text`, or `default`.
///
/// Only the number immediately following the letter is read (leading
/// whitespace and trailing junk are ignored). A letter followed by no number
/// also yields `default`.
///
/// ```
/// use foam_cutter::command::parameter_value;
///
/// assert_eq!(parameter_value("G0 X3.14 Y2 X5", 'X', 0.0), 3.14);
/// assert_eq!(parameter_value("G0 X3.14 Y2 X5", 'Z', -1.0), -1.0);
/// ```
pub fn parameter_value(text: &str, letter: char, default: f32) -> f32 {
    parameter(text, letter).unwrap_or(default)
}

fn parameter(text: &str, letter: char) -> Option<f32> {
    let start = text.find(letter)? + letter.len_utf8();
    leading_number(&text[start..])
}

/// Longest decimal prefix of `text` (after whitespace), parsed as `f32`.
fn leading_number(text: &str) -> Option<f32> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse().ok()
}

/// Split `G<number><rest>` into the number and the rest.
fn split_word(line: &str) -> Option<(u16, &str)> {
    let rest = line.strip_prefix('G')?;
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let number = rest[..digits].parse().ok()?;
    Some((number, &rest[digits..]))
}

fn unsupported(line: &str) -> crate::error::Error {
    let word = line.split_whitespace().next().unwrap_or(line);
    let mut name: String<16> = String::new();
    for c in word.chars() {
        if name.push(c).is_err() {
            break;
        }
    }
    CommandError::Unsupported(name).into()
}
