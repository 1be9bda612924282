//! Escaping tables and the single-codepoint encoder.
//!
//! Two escaping grammars exist and must not be mixed: the characters that are
//! special between the brackets of a character field are not the characters
//! that are special everywhere else in a pattern. A `-` is harmless in general
//! context but is a range operator inside `[...]`; a `.` is a wildcard in
//! general context but literal inside `[...]`.

use std::fmt;

use phf::{Map, Set, phf_map, phf_set};

/// Where an encoded token is going to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscapeContext {
    /// Between the brackets of a character field.
    CharacterField,
    /// Anywhere outside a character field.
    General,
}

impl EscapeContext {
    /// The set of characters that need a backslash in this context.
    pub fn specials(self) -> &'static Set<char> {
        match self {
            Self::CharacterField => &FIELD_SPECIALS,
            Self::General => &GENERAL_SPECIALS,
        }
    }
}

impl fmt::Display for EscapeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CharacterField => write!(f, "character field context"),
            Self::General => write!(f, "general context"),
        }
    }
}

/// Characters that are syntax inside `[...]`.
///
/// PCRE reads an unescaped `[` inside a field as a literal, but some engines
/// refuse to compile it, so it is escaped as well.
pub static FIELD_SPECIALS: Set<char> = phf_set! { '^', '-', ']', '\\', '[' };

/// Characters that are syntax outside `[...]`.
///
/// `]` and `}` are absent: without an opener they are ordinary characters.
pub static GENERAL_SPECIALS: Set<char> = phf_set! {
    '.', '^', '$', '*', '+', '?', '(', ')', '[', '{', '\\', '|',
};

/// ASCII control characters that have a mnemonic escape.
pub static CONTROL_MNEMONICS: Map<char, &'static str> = phf_map! {
    '\0' => "\\0",
    '\x07' => "\\a",
    '\x1b' => "\\e",
    '\x0c' => "\\f",
    '\n' => "\\n",
    '\r' => "\\r",
    '\t' => "\\t",
};

/// Encode one codepoint as a pattern-safe token for `context`.
///
/// Non-ASCII codepoints become one `\x{h}` escape per UTF-16 code unit, so a
/// codepoint outside the Basic Multilingual Plane yields two escapes and no
/// escape needs more than four hex digits.
pub fn encode_scalar(c: char, context: EscapeContext) -> String {
    if !c.is_ascii() {
        let mut units = [0u16; 2];
        return c
            .encode_utf16(&mut units)
            .iter()
            .map(|unit| format!("\\x{{{unit:x}}}"))
            .collect();
    }

    if let Some(mnemonic) = CONTROL_MNEMONICS.get(&c) {
        return (*mnemonic).to_string();
    }

    if context.specials().contains(&c) {
        format!("\\{c}")
    } else {
        c.to_string()
    }
}

/// The control character spelled by the mnemonic letter in `\<letter>`.
pub fn control_for_mnemonic(letter: char) -> Option<char> {
    CONTROL_MNEMONICS
        .entries()
        .find(|(_, mnemonic)| mnemonic.chars().nth(1) == Some(letter))
        .map(|(control, _)| *control)
}

#[cfg(test)]
mod tests {
    use super::*;

    use EscapeContext::{CharacterField, General};

    #[test]
    fn escaping_sets_are_distinct() {
        assert_eq!(encode_scalar('-', General), "-");
        assert_eq!(encode_scalar('-', CharacterField), "\\-");
        assert_eq!(encode_scalar('.', General), "\\.");
        assert_eq!(encode_scalar('.', CharacterField), ".");
    }

    #[test]
    fn shared_specials_escape_in_both_contexts() {
        for ch in ['^', '[', '\\'] {
            assert_eq!(encode_scalar(ch, General), format!("\\{ch}"));
            assert_eq!(encode_scalar(ch, CharacterField), format!("\\{ch}"));
        }
    }

    #[test]
    fn closing_bracket_only_special_in_field() {
        assert_eq!(encode_scalar(']', General), "]");
        assert_eq!(encode_scalar(']', CharacterField), "\\]");
        assert_eq!(encode_scalar('}', General), "}");
    }

    #[test]
    fn general_specials() {
        for ch in ['.', '^', '$', '*', '+', '?', '(', ')', '[', '{', '\\', '|'] {
            assert_eq!(encode_scalar(ch, General), format!("\\{ch}"), "{ch:?}");
        }
        for ch in ['$', '*', '+', '?', '(', ')', '{', '|'] {
            assert_eq!(encode_scalar(ch, CharacterField), ch.to_string(), "{ch:?}");
        }
    }

    #[test]
    fn control_mnemonics() {
        let expected = [
            ('\0', "\\0"),
            ('\x07', "\\a"),
            ('\x1b', "\\e"),
            ('\x0c', "\\f"),
            ('\n', "\\n"),
            ('\r', "\\r"),
            ('\t', "\\t"),
        ];
        for (ch, mnemonic) in expected {
            assert_eq!(encode_scalar(ch, General), mnemonic);
            assert_eq!(encode_scalar(ch, CharacterField), mnemonic);
        }
    }

    #[test]
    fn other_controls_are_literal() {
        assert_eq!(encode_scalar('\x01', General), "\x01");
        assert_eq!(encode_scalar('\x7f', CharacterField), "\x7f");
    }

    #[test]
    fn bmp_scalar_is_one_escape() {
        assert_eq!(encode_scalar('é', General), "\\x{e9}");
        assert_eq!(encode_scalar('–', CharacterField), "\\x{2013}");
    }

    #[test]
    fn astral_scalar_is_surrogate_pair() {
        let encoded = encode_scalar('\u{1F600}', General);
        assert_eq!(encoded, "\\x{d83d}\\x{de00}");
        assert_eq!(encoded.matches("\\x{").count(), 2);
    }

    #[test]
    fn mnemonic_lookup() {
        assert_eq!(control_for_mnemonic('n'), Some('\n'));
        assert_eq!(control_for_mnemonic('0'), Some('\0'));
        assert_eq!(control_for_mnemonic('e'), Some('\x1b'));
        assert_eq!(control_for_mnemonic('d'), None);
    }
}
