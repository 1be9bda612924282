//! Translation from rendered pattern text to the host engine's dialect.
//!
//! The algebra writes PCRE-style text. The host engine spells a few tokens
//! differently or not at all, so they are rewritten here, just before
//! compilation:
//!
//! | Rendered              | Engine                           |
//! |-----------------------|----------------------------------|
//! | `\x{d83d}\x{de00}`    | `\x{1f600}`                      |
//! | `\0` `\a` `\e` `\f` … | `\x{0}` `\x{7}` …                |
//! | `\p{L&}`              | `\p{LC}`                         |
//! | `\N`                  | `[^\n]`                          |
//! | `\h` / `\H`           | `[\x{9}\p{Zs}]` / `[^…]`         |
//! | `\v` / `\V`           | `[\x{a}\x{b}…\x{2029}]` / `[^…]` |
//! | `\R`                  | `(?:\x{d}\x{a}\|[\x{a}\x{b}…])`   |
//! | `&`, `~` in `[…]`     | `\&`, `\~`                       |
//!
//! The host engine would read `\h` as a hex digit and `\v` as a vertical tab,
//! so the whitespace types are always spelled out as classes. Inside a field
//! `\h` and `\v` expand to their members and the negated forms become nested
//! classes. `\R` has no meaning inside a field and is passed through.
//!
//! A lone surrogate escape has no scalar value and is passed through, so the
//! engine rejects it.

use std::iter::Peekable;
use std::str::Chars;

use log::trace;

use crate::escape::control_for_mnemonic;

const HIGH_SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Members of `\h`, for use between field brackets.
const HORIZONTAL_WHITESPACE: &str = "\\x{9}\\p{Zs}";
/// Members of `\v`, for use between field brackets.
const VERTICAL_WHITESPACE: &str = "\\x{a}\\x{b}\\x{c}\\x{d}\\x{85}\\x{2028}\\x{2029}";

/// Rewrite `source` into text the host engine accepts with the same meaning.
pub fn translate(source: &str) -> String {
    Translator {
        chars: source.chars().peekable(),
        out: String::with_capacity(source.len()),
        in_field: false,
    }
    .run()
}

struct Translator<'a> {
    chars: Peekable<Chars<'a>>,
    out: String,
    in_field: bool,
}

impl Translator<'_> {
    fn run(mut self) -> String {
        while let Some(c) = self.chars.next() {
            match c {
                '\\' => self.escape(),
                '[' if !self.in_field => {
                    self.in_field = true;
                    self.out.push('[');
                    if self.chars.peek() == Some(&'^') {
                        self.chars.next(); // consume negation marker
                        self.out.push('^');
                    }
                }
                ']' if self.in_field => {
                    self.in_field = false;
                    self.out.push(']');
                }
                '&' | '~' if self.in_field => {
                    self.out.push('\\');
                    self.out.push(c);
                }
                _ => self.out.push(c),
            }
        }
        self.out
    }

    /// Handle the text after a backslash.
    fn escape(&mut self) {
        let Some(c) = self.chars.next() else {
            self.out.push('\\');
            return;
        };

        if let Some(control) = control_for_mnemonic(c) {
            trace!("rewriting \\{c} as a hex escape");
            self.push_hex(control as u32);
            return;
        }

        match c {
            'x' => self.hex_escape(),
            'p' | 'P' if self.lookahead_is("{L&}") => {
                trace!("rewriting \\{c}{{L&}} as \\{c}{{LC}}");
                self.skip("{L&}".len());
                self.out.push('\\');
                self.out.push(c);
                self.out.push_str("{LC}");
            }
            'N' if !self.in_field => {
                trace!("rewriting \\N as a negated field");
                self.out.push_str("[^\\n]");
            }
            'h' | 'H' | 'v' | 'V' => self.whitespace_type(c),
            'R' if !self.in_field => {
                trace!("rewriting \\R as a line break group");
                let line_break = format!("(?:\\x{{d}}\\x{{a}}|[{VERTICAL_WHITESPACE}])");
                self.out.push_str(&line_break);
            }
            _ => {
                self.out.push('\\');
                self.out.push(c);
            }
        }
    }

    /// Handle `\x{…}`, joining a surrogate pair into one scalar.
    fn hex_escape(&mut self) {
        let mut ahead = self.chars.clone();
        let Some(unit) = braced_hex(&mut ahead) else {
            self.out.push_str("\\x");
            return;
        };
        self.chars = ahead;

        if HIGH_SURROGATES.contains(&unit) {
            let mut ahead = self.chars.clone();
            if ahead.next() == Some('\\')
                && ahead.next() == Some('x')
                && let Some(low) = braced_hex(&mut ahead)
                && LOW_SURROGATES.contains(&low)
            {
                self.chars = ahead;
                let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                trace!("joining surrogates {unit:x} {low:x} into {scalar:x}");
                self.push_hex(scalar);
                return;
            }
        }
        self.push_hex(unit);
    }

    /// Spell out `\h`, `\H`, `\v` or `\V` as an explicit class.
    fn whitespace_type(&mut self, c: char) {
        let members = if c.eq_ignore_ascii_case(&'h') {
            HORIZONTAL_WHITESPACE
        } else {
            VERTICAL_WHITESPACE
        };
        trace!("rewriting \\{c} as a field");
        let rewritten = match (c.is_ascii_uppercase(), self.in_field) {
            (false, true) => members.to_string(),
            (false, false) => format!("[{members}]"),
            (true, _) => format!("[^{members}]"),
        };
        self.out.push_str(&rewritten);
    }

    fn push_hex(&mut self, value: u32) {
        self.out.push_str(&format!("\\x{{{value:x}}}"));
    }

    fn lookahead_is(&self, expected: &str) -> bool {
        let mut ahead = self.chars.clone();
        expected.chars().all(|c| ahead.next() == Some(c))
    }

    fn skip(&mut self, count: usize) {
        for _ in 0..count {
            self.chars.next();
        }
    }
}

/// Parse `{hex}` from the front of `chars`, consuming it.
fn braced_hex(chars: &mut Peekable<Chars<'_>>) -> Option<u32> {
    if chars.next()? != '{' {
        return None;
    }
    let mut digits = String::new();
    loop {
        match chars.next()? {
            '}' => break,
            c if c.is_ascii_hexdigit() && digits.len() < 8 => digits.push(c),
            _ => return None,
        }
    }
    u32::from_str_radix(&digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(translate("^[a-z]+(?:\\.|-)$"), "^[a-z]+(?:\\.|-)$");
        assert_eq!(translate("(?!x)\\d{4,12}"), "(?!x)\\d{4,12}");
    }

    #[test]
    fn surrogate_pair_joins() {
        assert_eq!(translate("\\x{d83d}\\x{de00}"), "\\x{1f600}");
        assert_eq!(
            translate("[\\x{d83d}\\x{de00}-\\x{d83d}\\x{de4f}]"),
            "[\\x{1f600}-\\x{1f64f}]"
        );
    }

    #[test]
    fn lone_surrogates_pass_through() {
        assert_eq!(translate("\\x{d83d}a"), "\\x{d83d}a");
        assert_eq!(translate("\\x{de00}"), "\\x{de00}");
        assert_eq!(translate("\\x{d83d}\\x{41}"), "\\x{d83d}\\x{41}");
    }

    #[test]
    fn bmp_escapes_unchanged() {
        assert_eq!(translate("\\x{e9}\\x{2013}"), "\\x{e9}\\x{2013}");
    }

    #[test]
    fn mnemonics_become_hex() {
        assert_eq!(
            translate("\\0\\a\\e\\f\\n\\r\\t"),
            "\\x{0}\\x{7}\\x{1b}\\x{c}\\x{a}\\x{d}\\x{9}"
        );
    }

    #[test]
    fn nul_before_digit_is_not_octal() {
        assert_eq!(translate("\\01"), "\\x{0}1");
    }

    #[test]
    fn cased_letter_property() {
        assert_eq!(translate("\\p{L&}\\P{L&}"), "\\p{LC}\\P{LC}");
        assert_eq!(translate("[\\p{L&}]"), "[\\p{LC}]");
        assert_eq!(translate("\\p{Lu}"), "\\p{Lu}");
    }

    #[test]
    fn not_newline() {
        assert_eq!(translate("a\\Nb"), "a[^\\n]b");
    }

    #[test]
    fn whitespace_types_become_fields() {
        assert_eq!(translate("\\h"), "[\\x{9}\\p{Zs}]");
        assert_eq!(translate("\\H"), "[^\\x{9}\\p{Zs}]");
        assert_eq!(
            translate("\\v"),
            "[\\x{a}\\x{b}\\x{c}\\x{d}\\x{85}\\x{2028}\\x{2029}]"
        );
        assert_eq!(
            translate("\\V"),
            "[^\\x{a}\\x{b}\\x{c}\\x{d}\\x{85}\\x{2028}\\x{2029}]"
        );
    }

    #[test]
    fn whitespace_types_inside_fields() {
        assert_eq!(translate("[a\\h]"), "[a\\x{9}\\p{Zs}]");
        assert_eq!(translate("[a\\H]"), "[a[^\\x{9}\\p{Zs}]]");
        assert_eq!(translate("[\\R]"), "[\\R]");
    }

    #[test]
    fn line_break_sequence() {
        assert_eq!(
            translate("\\R"),
            "(?:\\x{d}\\x{a}|[\\x{a}\\x{b}\\x{c}\\x{d}\\x{85}\\x{2028}\\x{2029}])"
        );
    }

    #[test]
    fn hex_escape_is_not_horizontal_whitespace() {
        assert_eq!(translate("\\x{68}"), "\\x{68}");
    }

    #[test]
    fn set_operators_escaped_in_fields_only() {
        assert_eq!(translate("[&&~~]&~"), "[\\&\\&\\~\\~]&~");
        assert_eq!(translate("[^&]"), "[^\\&]");
    }

    #[test]
    fn escaped_brackets_do_not_toggle_fields() {
        assert_eq!(translate("[\\]&]"), "[\\]\\&]");
        assert_eq!(translate("\\[&\\]"), "\\[&\\]");
    }

    #[test]
    fn malformed_hex_is_left_for_the_engine() {
        assert_eq!(translate("\\x{zz}"), "\\x{zz}");
        assert_eq!(translate("\\x41"), "\\x41");
        assert_eq!(translate("\\"), "\\");
    }
}
