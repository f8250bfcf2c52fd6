//! Ciphertext hex parsing.

use serde::Deserialize;

/// How strictly ciphertext hex is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexMode {
    /// Even-length strings of hex digits only; anything else is an error.
    #[default]
    Strict,
    /// Accept whatever legacy producers emit. Line terminators are dropped
    /// and split the input into runs; each run is cut into groups of up to
    /// two characters. A group yields one byte from its leading whitespace,
    /// optional sign and leading hex digits, wrapping negatives mod 256, or
    /// `0` if it has no digits. Never fails.
    Lenient,
}

/// Parse a hex ciphertext string into bytes. Digits are case-insensitive.
///
/// # Errors
///
/// In [`HexMode::Strict`], returns [`hex::FromHexError`] for odd-length input
/// or any non-hex character.
pub fn parse_hex(input: &str, mode: HexMode) -> Result<Vec<u8>, hex::FromHexError> {
    match mode {
        HexMode::Strict => hex::decode(input),
        HexMode::Lenient => Ok(parse_lenient(input)),
    }
}

/// Characters that end a group and are themselves discarded.
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace skipped before a group's digits.
fn is_leading_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn parse_lenient(input: &str) -> Vec<u8> {
    input
        .split(is_line_terminator)
        .flat_map(|run| {
            let chars: Vec<char> = run.chars().collect();
            chars.chunks(2).map(parse_group).collect::<Vec<_>>()
        })
        .collect()
}

fn parse_group(group: &[char]) -> u8 {
    let mut rest = group
        .iter()
        .copied()
        .skip_while(|c| is_leading_space(*c))
        .peekable();

    let negative = match rest.peek().copied() {
        Some('-') => {
            rest.next();
            true
        }
        Some('+') => {
            rest.next();
            false
        }
        _ => false,
    };

    let value = rest
        .map_while(|c| c.to_digit(16))
        .fold(0i32, |acc, digit| acc * 16 + digit as i32);

    let value = if negative { -value } else { value };
    value.rem_euclid(256) as u8
}
