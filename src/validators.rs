//! Name and telephone-number validators built from the construction algebra.
//!
//! Names are checked against a blacklist of punctuation and control
//! characters. Phone numbers go through three stages: a liberal check of the
//! styled input, removal of everything except digits and `+`, then a strict
//! check against NANP or E.164 numbering.

use log::debug;

use crate::expr::*;
use crate::pattern::{EngineOptions, Pattern, PatternError};
use crate::seq;

/// E.164 country codes with one digit. `+1` is matched separately as NANP.
pub const ONE_DIGIT_COUNTRY_CODES: [&str; 1] = ["7"];

pub const TWO_DIGIT_COUNTRY_CODES: [&str; 47] = [
    "82", "41", "20", "33", "31", "48", "64", "45", "60", "54", "63", "57", "98", "47", "90", "92",
    "89", "56", "53", "43", "40", "86", "30", "95", "51", "52", "39", "81", "44", "55", "83", "32",
    "91", "36", "61", "65", "27", "93", "34", "62", "28", "46", "66", "84", "49", "94", "58",
];

pub const THREE_DIGIT_COUNTRY_CODES: [&str; 230] = [
    "212", "216", "507", "227", "850", "965", "997", "800", "377", "999", "693", "594", "696",
    "685", "809", "964", "976", "378", "857", "678", "963", "887", "245", "254", "504", "876",
    "243", "210", "223", "239", "230", "855", "871", "222", "292", "968", "996", "389", "371",
    "253", "692", "680", "684", "978", "875", "990", "224", "244", "255", "350", "352", "219",
    "358", "426", "688", "801", "879", "966", "961", "266", "291", "299", "881", "859", "804",
    "886", "217", "236", "261", "806", "993", "422", "599", "355", "880", "889", "807", "351",
    "508", "679", "265", "686", "215", "268", "697", "388", "967", "974", "598", "687", "269",
    "503", "851", "670", "234", "420", "681", "248", "505", "597", "506", "691", "296", "596",
    "695", "264", "858", "251", "852", "425", "873", "971", "698", "221", "998", "381", "674",
    "970", "423", "856", "242", "238", "878", "220", "500", "237", "379", "374", "675", "259",
    "376", "241", "372", "298", "424", "429", "356", "595", "383", "385", "884", "218", "509",
    "808", "683", "252", "803", "969", "689", "295", "235", "382", "225", "962", "359", "240",
    "877", "232", "690", "994", "995", "250", "233", "231", "802", "853", "427", "249", "428",
    "592", "267", "256", "421", "991", "972", "211", "263", "502", "979", "213", "671", "888",
    "226", "290", "870", "883", "373", "257", "885", "591", "258", "992", "677", "501", "214",
    "676", "375", "872", "882", "380", "854", "293", "294", "260", "247", "672", "357", "590",
    "297", "229", "977", "354", "387", "673", "699", "386", "874", "682", "694", "960", "370",
    "973", "246", "262", "384", "805", "593", "228", "975", "353",
];

/// The expressions this module knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    Name,
    StyledPhone,
    PhoneDestyler,
    StandardizedPhone,
}

impl Validator {
    pub const ALL: [Validator; 4] = [
        Validator::Name,
        Validator::StyledPhone,
        Validator::PhoneDestyler,
        Validator::StandardizedPhone,
    ];

    pub fn expression(self) -> Node {
        match self {
            Validator::Name => name_validator().into(),
            Validator::StyledPhone => styled_phone_validator(),
            Validator::PhoneDestyler => phone_destyler(),
            Validator::StandardizedPhone => standardized_phone_validator().into(),
        }
    }
}

// ─── Expressions ────────────────────────────────────────────────────────────

/// A line of one or more characters, none of them blacklisted.
pub fn name_validator() -> Sequence {
    let blacklist = chars_of("!@#$%^&*()+=[]{}<>\\|/?:;\r\n\t\0");
    line(blacklist.negated().one_or_more())
}

/// Digits, `+`, brackets, dots, dashes and separators, in any order.
pub fn styled_phone_validator() -> Node {
    let styling = chars([
        FieldItem::from('+'),
        ('0'..='9').into(),
        '-'.into(),
        '\u{2013}'.into(),
        '\u{2014}'.into(),
        '.'.into(),
        '('.into(),
        ')'.into(),
    ]);
    one_of([Node::from(styling), UnicodeProperty::Separator.matching()]).one_or_more()
}

/// Runs of anything other than digits and `+`, for stripping.
pub fn phone_destyler() -> Node {
    chars([FieldItem::from('0'..='9'), '+'.into()])
        .negated()
        .one_or_more()
}

/// A destyled number in NANP form, or in E.164 form with a known country code.
pub fn standardized_phone_validator() -> Group {
    let digit = || chars(['0'..='9']);
    let not_zero_or_one = || chars(['2'..='9']);
    let not_one = || chars([FieldItem::from('0'), ('2'..='9').into()]);
    let one = char('1');

    // NPA: the second digit is never 9.
    let area_code = seq![not_zero_or_one(), chars(['0'..='8']), digit()];
    // NXX: at most one of the last two digits is 1.
    let exchange = seq![
        not_zero_or_one(),
        one_of([
            seq![one.clone(), not_one()],
            seq![not_one(), one],
            seq![not_one(), not_one()],
        ]),
    ];
    let nanp = seq![text("+1").maybe(), area_code, exchange, digit().repeating(4)];

    // At most 15 digits including the country code, at least 4 after it.
    let e164 = one_of([
        seq![prefixes(&ONE_DIGIT_COUNTRY_CODES), digit().repeating_between(4..=14)],
        seq![prefixes(&TWO_DIGIT_COUNTRY_CODES), digit().repeating_between(4..=13)],
        seq![prefixes(&THREE_DIGIT_COUNTRY_CODES), digit().repeating_between(4..=12)],
    ]);

    one_of([Node::from(nanp), e164.into()])
}

fn prefixes(codes: &[&str]) -> Sequence {
    seq![char('+'), one_of(codes.iter().map(|code| text(code)))]
}

// ─── Validators ─────────────────────────────────────────────────────────────

/// The compiled validators, ready to check input.
#[derive(Debug)]
pub struct Validators {
    name: Pattern,
    styled_phone: Pattern,
    phone_destyler: Pattern,
    standardized_phone: Pattern,
}

impl Validators {
    pub fn new() -> Result<Self, PatternError> {
        Self::with_options(&EngineOptions::default())
    }

    pub fn with_options(options: &EngineOptions) -> Result<Self, PatternError> {
        Ok(Self {
            name: Pattern::compile_with(name_validator(), options)?,
            styled_phone: Pattern::compile_with(styled_phone_validator(), options)?,
            phone_destyler: Pattern::compile_with(phone_destyler(), options)?,
            standardized_phone: Pattern::compile_with(standardized_phone_validator(), options)?,
        })
    }

    /// The name unchanged, or `None` if it holds a blacklisted character.
    pub fn process_name(&self, input: &str) -> Result<Option<String>, PatternError> {
        if !self.name.fully_matches(input)? {
            debug!("rejected name {input:?}");
            return Ok(None);
        }
        Ok(Some(input.to_string()))
    }

    /// The number reduced to digits and `+`, or `None` if it is not a valid
    /// telephone number.
    pub fn process_phone(&self, input: &str) -> Result<Option<String>, PatternError> {
        if !self.styled_phone.fully_matches(input)? {
            debug!("rejected styling of {input:?}");
            return Ok(None);
        }
        let destyled = self.phone_destyler.strip_all(input)?;
        if !self.standardized_phone.fully_matches(&destyled)? {
            debug!("rejected number {destyled:?}");
            return Ok(None);
        }
        Ok(Some(destyled))
    }
}
