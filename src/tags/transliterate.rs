//! UTF-8 to ISO-8859-1 transliteration
//!
//! Code points up to U+00FF map to the byte of the same value. Anything above
//! is replaced by the closest-looking Latin-1 text from [`substitute`], or `?`
//! when nothing sensible exists.

use super::value::Latin1String;

/// Replacement byte for characters with no approximation
const UNMAPPABLE: u8 = b'?';

/// Convert text to Latin-1, approximating characters outside the charset
pub fn to_latin1(text: &str) -> Latin1String {
    let mut bytes = Vec::with_capacity(text.len());
    for c in text.chars() {
        let code = u32::from(c);
        if code <= 0xFF {
            bytes.push(code as u8);
        } else if let Some(sub) = substitute(c) {
            bytes.extend_from_slice(sub);
        } else {
            bytes.push(UNMAPPABLE);
        }
    }
    Latin1String::from_bytes(bytes)
}

/// Latin-1 approximation for a character outside the charset.
///
/// Covers the Windows-1252 extras (the characters most often found in tags
/// written on Windows) plus the Unicode dash, quote and space families.
fn substitute(c: char) -> Option<&'static [u8]> {
    let sub: &'static [u8] = match c {
        // dashes and minus
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
        | '\u{2212}' => b"-",
        // single quotes and primes
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => b"'",
        // double quotes
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => b"\"",
        '\u{2039}' => b"<",
        '\u{203A}' => b">",
        '\u{2026}' => b"...",
        '\u{2022}' => b"\xB7",
        '\u{2020}' => b"+",
        '\u{2021}' => b"++",
        '\u{2030}' => b"%o",
        '\u{20AC}' => b"EUR",
        '\u{2122}' => b"(TM)",
        // spacing
        '\u{2002}'..='\u{200A}' | '\u{202F}' | '\u{205F}' => b" ",
        '\u{200B}' | '\u{2060}' | '\u{FEFF}' => b"",
        // Latin letters present in Windows-1252 but not Latin-1
        '\u{0152}' => b"OE",
        '\u{0153}' => b"oe",
        '\u{0160}' => b"S",
        '\u{0161}' => b"s",
        '\u{0178}' => b"Y",
        '\u{017D}' => b"Z",
        '\u{017E}' => b"z",
        '\u{0192}' => b"f",
        '\u{02C6}' => b"^",
        '\u{02DC}' => b"~",
        _ => return None,
    };
    Some(sub)
}
