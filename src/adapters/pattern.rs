//! String generation from `pattern` regular expressions.
//!
//! The pattern is parsed into a high-level IR with `regex-syntax` and walked
//! with a generator seeded from the pattern text, so a given pattern always
//! yields the same sample. The result is checked against the compiled regex
//! before it is returned.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use regex_syntax::hir::{Class, ClassUnicode, ClassUnicodeRange, Hir, HirKind};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;
use tracing::debug;

/// Upper bound on optional repetitions (`*`, `+`, `{n,}`)
const MAX_EXTRA_REPEATS: u32 = 10;

/// Generated strings longer than this many bytes are rejected
const MAX_GENERATED_LEN: usize = 10_000;

const FALLBACK: &str = "string";

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid pattern syntax: {0}")]
    Syntax(#[from] regex_syntax::Error),

    #[error("pattern does not compile: {0}")]
    Compile(#[from] regex::Error),

    #[error("unsupported pattern construct: {0}")]
    Unsupported(&'static str),

    #[error("character class matches nothing")]
    EmptyClass,

    #[error("generated string is too long")]
    TooLong,

    #[error("generated value {0:?} does not match the pattern")]
    Mismatch(String),
}

/// Generate a string matching `pattern`
pub fn generate_from_pattern(pattern: &str) -> Result<String, PatternError> {
    let regex = Regex::new(pattern)?;
    let hir = regex_syntax::Parser::new().parse(pattern)?;

    let mut generator = HirGenerator {
        rng: StdRng::seed_from_u64(seed_for(pattern)),
        out: String::new(),
    };
    generator.emit(&hir)?;

    if regex.is_match(&generator.out) {
        Ok(generator.out)
    } else {
        Err(PatternError::Mismatch(generator.out))
    }
}

/// Pattern-driven string, falling back to `"string"` for patterns that
/// cannot be sampled
pub fn string_from_pattern(pattern: &str) -> String {
    match generate_from_pattern(pattern) {
        Ok(value) => value,
        Err(e) => {
            debug!("Falling back for pattern {:?}: {}", pattern, e);
            FALLBACK.to_string()
        }
    }
}

fn seed_for(pattern: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    pattern.hash(&mut hasher);
    hasher.finish()
}

struct HirGenerator {
    rng: StdRng,
    out: String,
}

impl HirGenerator {
    fn emit(&mut self, hir: &Hir) -> Result<(), PatternError> {
        if self.out.len() > MAX_GENERATED_LEN {
            return Err(PatternError::TooLong);
        }

        match hir.kind() {
            HirKind::Empty | HirKind::Look(_) => Ok(()),
            HirKind::Literal(literal) => {
                let text = std::str::from_utf8(&literal.0)
                    .map_err(|_| PatternError::Unsupported("non-UTF-8 literal"))?;
                self.out.push_str(text);
                Ok(())
            }
            HirKind::Class(Class::Unicode(class)) => {
                let c = self.pick_char(class)?;
                self.out.push(c);
                Ok(())
            }
            HirKind::Class(Class::Bytes(class)) => {
                let ascii: Vec<(u8, u8)> = class
                    .ranges()
                    .iter()
                    .filter(|r| r.start() <= 0x7F)
                    .map(|r| (r.start(), r.end().min(0x7F)))
                    .collect();
                let (start, end) = *ascii
                    .get(self.rng.gen_range(0..ascii.len().max(1)))
                    .ok_or(PatternError::Unsupported("non-ASCII byte class"))?;
                self.out.push(char::from(self.rng.gen_range(start..=end)));
                Ok(())
            }
            HirKind::Repetition(rep) => {
                let extra = match rep.max {
                    _ if !rep.greedy => 0,
                    Some(max) => max.saturating_sub(rep.min).min(MAX_EXTRA_REPEATS),
                    None => MAX_EXTRA_REPEATS,
                };
                let count = rep.min + self.rng.gen_range(0..=extra);
                for _ in 0..count {
                    self.emit(&rep.sub)?;
                }
                Ok(())
            }
            HirKind::Capture(capture) => self.emit(&capture.sub),
            HirKind::Concat(parts) => parts.iter().try_for_each(|part| self.emit(part)),
            HirKind::Alternation(branches) => {
                let branch = &branches[self.rng.gen_range(0..branches.len())];
                self.emit(branch)
            }
        }
    }

    /// Prefer printable ASCII members of the class, fall back to the class
    /// itself when it has none
    fn pick_char(&mut self, class: &ClassUnicode) -> Result<char, PatternError> {
        let mut printable = class.clone();
        printable.intersect(&ClassUnicode::new([ClassUnicodeRange::new(' ', '~')]));

        let ranges = if printable.ranges().is_empty() {
            class.ranges()
        } else {
            printable.ranges()
        };

        let total: u32 = ranges.iter().map(|r| r.end() as u32 - r.start() as u32 + 1).sum();
        if total == 0 {
            return Err(PatternError::EmptyClass);
        }

        let mut index = self.rng.gen_range(0..total);
        for range in ranges {
            let width = range.end() as u32 - range.start() as u32 + 1;
            if index < width {
                return Ok(char::from_u32(range.start() as u32 + index).unwrap_or(range.start()));
            }
            index -= width;
        }
        Err(PatternError::EmptyClass)
    }
}
