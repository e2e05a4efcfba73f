use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;
use thiserror::Error;

/// Longest sample the default meter accepts, in characters
pub const MAX_SAMPLE_CHARS: usize = 256;

/// Length at which the length factor saturates
const IDEAL_LENGTH: f64 = 16.0;

/// Multiplier applied to samples found in the common password list
const COMMON_PENALTY: f64 = 0.1;

const LENGTH_WEIGHT: f64 = 0.35;
const CHARSET_WEIGHT: f64 = 0.25;
const VARIETY_WEIGHT: f64 = 0.15;
const SEQUENCE_WEIGHT: f64 = 0.25;

const KEYBOARD_ROWS: [&str; 4] = ["qwertyuiop", "asdfghjkl", "zxcvbnm", "1234567890"];
const KEYBOARD_RUN: usize = 4;

/// Most frequent passwords from public breach corpora, lowercase
static COMMON_PASSWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "123456", "12345", "123456789", "password", "iloveyou", "princess", "1234567",
        "rockyou", "12345678", "abc123", "nicole", "daniel", "babygirl", "monkey", "lovely",
        "jessica", "654321", "michael", "ashley", "qwerty", "111111", "iloveu", "000000",
        "michelle", "tigger", "sunshine", "chocolate", "password1", "soccer", "anthony",
        "friends", "butterfly", "purple", "angel", "jordan", "liverpool", "justin", "loveme",
        "123123", "football", "secret", "letmein", "admin", "welcome", "dragon", "baseball",
        "master", "shadow", "superman", "trustno1", "qwerty123", "1q2w3e4r", "zaq12wsx",
    ]
    .into_iter()
    .collect()
});

/// Score produced by a strength meter
#[derive(Debug, Clone, PartialEq)]
pub struct Strength {
    /// Higher is harder to guess
    pub score: f64,
    /// Meter-specific detail, opaque to the evaluation pipeline
    pub details: BTreeMap<String, String>,
}

impl Strength {
    pub fn new(score: f64) -> Self {
        Self {
            score,
            details: BTreeMap::new(),
        }
    }
}

/// Reasons a meter can refuse a sample
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeterError {
    #[error("empty password")]
    Empty,

    #[error("control character at position {0}")]
    ControlCharacter(usize),

    #[error("undecodable input at position {0}")]
    Undecodable(usize),

    #[error("password too long ({actual} characters, max {max})")]
    TooLong { actual: usize, max: usize },

    #[error("{0}")]
    Other(String),
}

/// A password strength heuristic.
///
/// Implementations must be deterministic and callable from many threads at
/// once. Any `Fn(&str) -> Result<Strength, MeterError>` qualifies, which is
/// how tests plug in stubs.
pub trait StrengthMeter: Send + Sync {
    fn score(&self, password: &str) -> Result<Strength, MeterError>;
}

impl<F> StrengthMeter for F
where
    F: Fn(&str) -> Result<Strength, MeterError> + Send + Sync,
{
    fn score(&self, password: &str) -> Result<Strength, MeterError> {
        self(password)
    }
}

/// Default heuristic meter.
///
/// Combines four factors in `[0, 1]`:
/// - length, saturating at 16 characters
/// - character classes present (lower, upper, digit, symbol)
/// - share of distinct characters
/// - share of characters outside sequences, repeats and keyboard runs
///
/// Passwords from the common list are scaled down by `COMMON_PENALTY`.
/// The result stays in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordMeter;

impl PasswordMeter {
    pub fn new() -> Self {
        Self
    }

    fn validate(chars: &[char]) -> Result<(), MeterError> {
        if chars.is_empty() {
            return Err(MeterError::Empty);
        }
        if chars.len() > MAX_SAMPLE_CHARS {
            return Err(MeterError::TooLong {
                actual: chars.len(),
                max: MAX_SAMPLE_CHARS,
            });
        }
        for (position, &ch) in chars.iter().enumerate() {
            if ch == char::REPLACEMENT_CHARACTER {
                return Err(MeterError::Undecodable(position));
            }
            if ch.is_control() {
                return Err(MeterError::ControlCharacter(position));
            }
        }
        Ok(())
    }

    fn length_factor(chars: &[char]) -> f64 {
        (chars.len() as f64 / IDEAL_LENGTH).min(1.0)
    }

    fn charset_factor(chars: &[char]) -> f64 {
        let lower = chars.iter().any(|c| c.is_lowercase());
        let upper = chars.iter().any(|c| c.is_uppercase());
        let digit = chars.iter().any(|c| c.is_numeric());
        let symbol = chars.iter().any(|c| !c.is_alphanumeric());
        [lower, upper, digit, symbol].iter().filter(|&&present| present).count() as f64 / 4.0
    }

    fn variety_factor(chars: &[char]) -> f64 {
        let distinct: HashSet<&char> = chars.iter().collect();
        distinct.len() as f64 / chars.len() as f64
    }

    /// Share of characters not covered by a run
    fn sequence_factor(chars: &[char]) -> f64 {
        let mut in_run = vec![false; chars.len()];

        // Arithmetic runs of three: "abc", "321", "aaa"
        for (start, window) in chars.windows(3).enumerate() {
            let first = window[1] as i64 - window[0] as i64;
            let second = window[2] as i64 - window[1] as i64;
            if first == second && first.abs() <= 1 {
                in_run[start..start + 3].iter_mut().for_each(|flag| *flag = true);
            }
        }

        for (start, window) in chars.windows(KEYBOARD_RUN).enumerate() {
            let fragment: String = window.iter().map(|c| c.to_ascii_lowercase()).collect();
            let on_keyboard = KEYBOARD_ROWS.iter().any(|row| {
                row.contains(&fragment) || row.chars().rev().collect::<String>().contains(&fragment)
            });
            if on_keyboard {
                in_run[start..start + KEYBOARD_RUN]
                    .iter_mut()
                    .for_each(|flag| *flag = true);
            }
        }

        let covered = in_run.iter().filter(|&&flag| flag).count();
        1.0 - covered as f64 / chars.len() as f64
    }

    fn is_common(password: &str) -> bool {
        COMMON_PASSWORDS.contains(password.to_lowercase().as_str())
    }
}

impl StrengthMeter for PasswordMeter {
    fn score(&self, password: &str) -> Result<Strength, MeterError> {
        let chars: Vec<char> = password.chars().collect();
        Self::validate(&chars)?;

        let factors = [
            ("length", Self::length_factor(&chars), LENGTH_WEIGHT, "use at least 16 characters"),
            (
                "charset",
                Self::charset_factor(&chars),
                CHARSET_WEIGHT,
                "mix lowercase, uppercase, digits and symbols",
            ),
            ("variety", Self::variety_factor(&chars), VARIETY_WEIGHT, "avoid repeating characters"),
            (
                "sequences",
                Self::sequence_factor(&chars),
                SEQUENCE_WEIGHT,
                "avoid sequences, repeats and keyboard runs",
            ),
        ];

        let mut details = BTreeMap::new();
        let mut score = 0.0;
        for (name, value, weight, hint) in factors {
            score += value * weight;
            if value < 1.0 {
                details.insert(name.to_string(), hint.to_string());
            }
        }

        if Self::is_common(password) {
            score *= COMMON_PENALTY;
            details.insert(
                "common".to_string(),
                "appears in a list of very common passwords".to_string(),
            );
        }

        tracing::trace!("Scored {:?}: {:.3}", password, score);

        Ok(Strength {
            score: score.clamp(0.0, 1.0),
            details,
        })
    }
}
