//! Build regular expressions from typed nodes instead of hand-escaped strings.
//!
//! # Example
//!
//! ```rust
//! use reggie::{Pattern, Quantify, chars_of, line};
//!
//! // Anything but punctuation, one or more times, covering the whole line.
//! let name = line(chars_of("!@#$%^&*()+=[]{}<>\\|/?:;").negated().one_or_more());
//!
//! let pattern = Pattern::compile(name).unwrap();
//! assert_eq!(pattern.as_str(), "^[^!@#$%\\^&*()+=\\[\\]{}<>\\\\|/?:;]+$");
//!
//! assert!(pattern.fully_matches("Jean-Luc Picard").unwrap());
//! assert!(!pattern.fully_matches("Robert'); DROP TABLE").unwrap());
//! ```

pub mod escape;
pub mod expr;
pub mod pattern;
pub mod validators;

pub use escape::EscapeContext;
pub use expr::*;
pub use pattern::{DEFAULT_BACKTRACK_LIMIT, EngineOptions, Matches, Pattern, PatternError};
pub use validators::{Validator, Validators};
