//! Integer literal parsing for scalar targets.
//!
//! Literals are decimal unless prefixed: `0x` (hex), `0o` (octal), `0b`
//! (binary), or a bare leading `0` (octal). Prefixes are case-insensitive.
//! Underscores may separate digits, or follow a prefix. Signed targets
//! accept a leading `+` or `-`. No surrounding whitespace is accepted.

use crate::target::IntegerSlot;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerError {
    #[error("invalid {type_name} literal")]
    Syntax { type_name: &'static str },

    #[error("value out of range for {type_name}")]
    OutOfRange { type_name: &'static str },
}

/// Parse `text` and store it into `slot`.
pub fn assign(slot: IntegerSlot<'_>, text: &str) -> Result<(), IntegerError> {
    let type_name = slot.type_name();
    if slot.is_signed() {
        let value = parse_signed(text, type_name)?;
        match slot {
            IntegerSlot::I8(slot) => *slot = fit(value, type_name)?,
            IntegerSlot::I16(slot) => *slot = fit(value, type_name)?,
            IntegerSlot::I32(slot) => *slot = fit(value, type_name)?,
            IntegerSlot::I64(slot) => *slot = fit(value, type_name)?,
            IntegerSlot::I128(slot) => *slot = value,
            IntegerSlot::Isize(slot) => *slot = fit(value, type_name)?,
            _ => return Err(IntegerError::Syntax { type_name }),
        }
    } else {
        let value = parse_magnitude(text, type_name)?;
        match slot {
            IntegerSlot::U8(slot) => *slot = fit(value, type_name)?,
            IntegerSlot::U16(slot) => *slot = fit(value, type_name)?,
            IntegerSlot::U32(slot) => *slot = fit(value, type_name)?,
            IntegerSlot::U64(slot) => *slot = fit(value, type_name)?,
            IntegerSlot::U128(slot) => *slot = value,
            IntegerSlot::Usize(slot) => *slot = fit(value, type_name)?,
            _ => return Err(IntegerError::Syntax { type_name }),
        }
    }
    Ok(())
}

fn fit<T, V>(value: V, type_name: &'static str) -> Result<T, IntegerError>
where
    T: TryFrom<V>,
{
    T::try_from(value).map_err(|_| IntegerError::OutOfRange { type_name })
}

fn parse_signed(text: &str, type_name: &'static str) -> Result<i128, IntegerError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = parse_magnitude(digits, type_name)?;

    if negative {
        if magnitude == i128::MIN.unsigned_abs() {
            return Ok(i128::MIN);
        }
        fit::<i128, _>(magnitude, type_name).map(|value| -value)
    } else {
        fit(magnitude, type_name)
    }
}

fn parse_magnitude(text: &str, type_name: &'static str) -> Result<u128, IntegerError> {
    let syntax = IntegerError::Syntax { type_name };
    if text.is_empty() || !underscores_ok(text) {
        return Err(syntax);
    }

    let (radix, digits) = match text.as_bytes() {
        [b'0', b'x' | b'X', _, ..] => (16, &text[2..]),
        [b'0', b'o' | b'O', _, ..] => (8, &text[2..]),
        [b'0', b'b' | b'B', _, ..] => (2, &text[2..]),
        [b'0', ..] => (8, &text[1..]),
        _ => (10, text),
    };

    let mut value: u128 = 0;
    for ch in digits.chars() {
        if ch == '_' {
            continue;
        }
        let digit = ch.to_digit(radix).ok_or(syntax)?;
        value = value
            .checked_mul(u128::from(radix))
            .and_then(|value| value.checked_add(u128::from(digit)))
            .ok_or(IntegerError::OutOfRange { type_name })?;
    }
    Ok(value)
}

/// Underscores must sit between digits, or directly after a base prefix.
fn underscores_ok(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut hex = false;
    // '^' start, '0' digit or prefix, '_' underscore, '!' anything else
    let mut saw = b'^';

    if bytes.len() >= 2 && bytes[0] == b'0' {
        let prefix = bytes[1].to_ascii_lowercase();
        if matches!(prefix, b'b' | b'o' | b'x') {
            hex = prefix == b'x';
            start = 2;
            saw = b'0';
        }
    }

    for &byte in &bytes[start..] {
        if byte.is_ascii_digit() || (hex && byte.is_ascii_hexdigit()) {
            saw = b'0';
            continue;
        }
        if byte == b'_' {
            if saw != b'0' {
                return false;
            }
            saw = b'_';
            continue;
        }
        if saw == b'_' {
            return false;
        }
        saw = b'!';
    }
    saw != b'_'
}
