//! Number systems lab
//!
//! Conversion between bases 2, 8, 10 and 16 with the worked steps a
//! student would write out: place values on the way to decimal,
//! division/remainder chains on the way back. Bad digits are rejected
//! before any arithmetic happens.

use thiserror::Error;

/// Bases offered by the lab
pub const SUPPORTED_BASES: [u32; 4] = [2, 8, 10, 16];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BaseConvError {
    #[error("Please enter a number.")]
    Empty,
    #[error("Invalid digit '{digit}' for base {base}.")]
    InvalidDigit { digit: char, base: u32 },
    #[error("Base {0} is not supported.")]
    UnsupportedBase(u32),
    #[error("Number is too large to convert.")]
    Overflow,
}

/// A finished conversion: the result string plus the worked steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub result: String,
    pub steps: Vec<String>,
}

fn digit_to_char(digit: u32) -> char {
    char::from_digit(digit, 16)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?')
}

fn char_to_digit(c: char, base: u32) -> Result<u32, BaseConvError> {
    c.to_digit(16)
        .filter(|&d| d < base)
        .ok_or(BaseConvError::InvalidDigit { digit: c, base })
}

fn check_base(base: u32) -> Result<(), BaseConvError> {
    if SUPPORTED_BASES.contains(&base) {
        Ok(())
    } else {
        Err(BaseConvError::UnsupportedBase(base))
    }
}

/// Strip an optional sign and `0b`/`0o`/`0x` prefix.
fn normalize(input: &str) -> (bool, &str) {
    let input = input.trim();
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let rest = ["0b", "0B", "0o", "0O", "0x", "0X"]
        .iter()
        .find_map(|p| rest.strip_prefix(p))
        .unwrap_or(rest);
    (negative, rest)
}

/// Parse a string in `base` into a decimal value, with the place-value
/// expansion as worked steps.
pub fn to_decimal(input: &str, base: u32) -> Result<(i64, Vec<String>), BaseConvError> {
    check_base(base)?;
    let (negative, digits) = normalize(input);
    if digits.is_empty() {
        return Err(BaseConvError::Empty);
    }

    let mut value: i64 = 0;
    let mut steps = Vec::new();
    let count = digits.chars().count();
    for (i, c) in digits.chars().enumerate() {
        let digit = char_to_digit(c, base)?;
        let exponent = (count - 1 - i) as u32;
        let place = (base as i64)
            .checked_pow(exponent)
            .and_then(|p| p.checked_mul(digit as i64))
            .ok_or(BaseConvError::Overflow)?;
        value = value.checked_add(place).ok_or(BaseConvError::Overflow)?;
        steps.push(format!(
            "{} x {}^{} = {}",
            c.to_ascii_uppercase(),
            base,
            exponent,
            place
        ));
    }
    steps.push(format!("Sum = {}", value));

    Ok((if negative { -value } else { value }, steps))
}

/// Render a decimal value in `base`, with the division/remainder chain
/// as worked steps.
pub fn from_decimal(value: i64, base: u32) -> Result<Conversion, BaseConvError> {
    check_base(base)?;
    if base == 10 {
        return Ok(Conversion {
            result: value.to_string(),
            steps: vec!["No conversion needed.".to_string()],
        });
    }
    if value == 0 {
        return Ok(Conversion {
            result: "0".to_string(),
            steps: vec!["0 divided by any base is 0.".to_string()],
        });
    }

    let mut n = value.unsigned_abs();
    let mut steps = Vec::new();
    let mut remainders = Vec::new();
    while n > 0 {
        let quotient = n / base as u64;
        let remainder = (n % base as u64) as u32;
        steps.push(format!(
            "{} / {} = {} remainder {}",
            n,
            base,
            quotient,
            digit_to_char(remainder)
        ));
        remainders.push(digit_to_char(remainder));
        n = quotient;
    }

    let mut result = String::new();
    if value < 0 {
        result.push('-');
    }
    result.extend(remainders.iter().rev());
    Ok(Conversion { result, steps })
}

/// Full conversion from `from` base to `to` base via decimal, steps from
/// both halves concatenated.
pub fn convert(input: &str, from: u32, to: u32) -> Result<Conversion, BaseConvError> {
    let (value, mut steps) = if from == 10 {
        check_base(from)?;
        let (negative, digits) = normalize(input);
        if digits.is_empty() {
            return Err(BaseConvError::Empty);
        }
        let magnitude: i64 = digits
            .parse()
            .map_err(|_| match digits.chars().find(|c| !c.is_ascii_digit()) {
                Some(c) => BaseConvError::InvalidDigit { digit: c, base: 10 },
                None => BaseConvError::Overflow,
            })?;
        (
            if negative { -magnitude } else { magnitude },
            vec!["Already in decimal.".to_string()],
        )
    } else {
        to_decimal(input, from)?
    };

    let rendered = from_decimal(value, to)?;
    steps.extend(rendered.steps);
    Ok(Conversion {
        result: rendered.result,
        steps,
    })
}
