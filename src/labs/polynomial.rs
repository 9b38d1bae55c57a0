//! Polynomials lab
//!
//! Expands a product of polynomial factors in x - "(x + 2)(x - 3)" -
//! into standard form, with optional evaluation at a chosen x. The
//! parser accepts decimal coefficients, implicit factor multiplication,
//! and caret exponents; anything else is a visible error, not a panic.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExprError {
    #[error("Please enter an expression.")]
    Empty,
    #[error("Invalid expression - please enter a valid polynomial expression using x.")]
    Invalid,
    #[error("Unbalanced parentheses.")]
    Unbalanced,
    #[error("Exponents must be non-negative integers.")]
    BadExponent,
    #[error("Invalid numeric value for x.")]
    BadX,
}

/// Dense polynomial over x; coefficients ascending by power.
#[derive(Debug, Clone, PartialEq)]
pub struct Poly {
    coeffs: Vec<f64>,
}

impl Poly {
    pub fn constant(c: f64) -> Self {
        Self { coeffs: vec![c] }
    }

    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn degree(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|&c| c != 0.0)
            .unwrap_or(0)
    }

    fn add_term(&mut self, coef: f64, power: usize) {
        if self.coeffs.len() <= power {
            self.coeffs.resize(power + 1, 0.0);
        }
        self.coeffs[power] += coef;
    }

    pub fn mul(&self, other: &Poly) -> Poly {
        let mut out = vec![0.0; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                out[i + j] += a * b;
            }
        }
        Poly { coeffs: out }
    }

    /// Horner evaluation.
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Format a coefficient without a trailing `.0` for integer values.
fn fmt_num(c: f64) -> String {
    if c.fract().abs() < 1e-9 {
        format!("{}", c.round() as i64)
    } else {
        format!("{}", c)
    }
}

impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        for power in (0..=self.degree()).rev() {
            let c = self.coeffs.get(power).copied().unwrap_or(0.0);
            if c == 0.0 && self.degree() > 0 {
                continue;
            }
            let magnitude = c.abs();
            if wrote {
                write!(f, " {} ", if c < 0.0 { "-" } else { "+" })?;
            } else if c < 0.0 {
                write!(f, "-")?;
            }
            match power {
                0 => write!(f, "{}", fmt_num(magnitude))?,
                _ => {
                    if magnitude != 1.0 {
                        write!(f, "{}", fmt_num(magnitude))?;
                    }
                    if power == 1 {
                        write!(f, "x")?;
                    } else {
                        write!(f, "x^{}", power)?;
                    }
                }
            }
            wrote = true;
        }
        if !wrote {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// Parse one factor - a sum of terms like `2x^2`, `-x`, `3.5`.
fn parse_factor(src: &str) -> Result<Poly, ExprError> {
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0;
    let mut poly = Poly::constant(0.0);
    let mut any_term = false;

    while i < chars.len() {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        // Sign run
        let mut sign = 1.0;
        let mut saw_sign = false;
        while i < chars.len() && (chars[i] == '+' || chars[i] == '-') {
            if chars[i] == '-' {
                sign = -sign;
            }
            saw_sign = true;
            i += 1;
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
        }
        if i >= chars.len() {
            // Trailing sign with no term
            if saw_sign {
                return Err(ExprError::Invalid);
            }
            break;
        }

        // Coefficient digits
        let num_start = i;
        while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
            i += 1;
        }
        let coef = if i > num_start {
            let text: String = chars[num_start..i].iter().collect();
            text.parse::<f64>().map_err(|_| ExprError::Invalid)?
        } else {
            1.0
        };
        let has_coef = i > num_start;

        // Variable and exponent
        let has_x = i < chars.len() && (chars[i] == 'x' || chars[i] == 'X');
        if has_x {
            i += 1;
        }
        let mut power = if has_x { 1usize } else { 0 };
        if has_x && i < chars.len() && chars[i] == '^' {
            i += 1;
            let exp_start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i == exp_start {
                return Err(ExprError::BadExponent);
            }
            let text: String = chars[exp_start..i].iter().collect();
            power = text.parse().map_err(|_| ExprError::BadExponent)?;
        }

        if !has_coef && !has_x {
            return Err(ExprError::Invalid);
        }

        poly.add_term(sign * coef, power);
        any_term = true;
    }

    if any_term {
        Ok(poly)
    } else {
        Err(ExprError::Invalid)
    }
}

/// Split the expression into factors: parenthesized groups and bare
/// polynomial runs, optionally joined by `*`.
fn split_factors(src: &str) -> Result<Vec<&str>, ExprError> {
    let mut factors = Vec::new();
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'*' => i += 1,
            b'(' => {
                let close = src[i + 1..]
                    .find(|c| c == ')' || c == '(')
                    .map(|off| i + 1 + off)
                    .ok_or(ExprError::Unbalanced)?;
                if bytes[close] != b')' {
                    // Nested groups are beyond this lab
                    return Err(ExprError::Invalid);
                }
                factors.push(&src[i + 1..close]);
                i = close + 1;
            }
            b')' => return Err(ExprError::Unbalanced),
            _ => {
                let end = src[i..]
                    .find(['(', ')'])
                    .map(|off| i + off)
                    .unwrap_or(src.len());
                factors.push(&src[i..end]);
                i = end;
            }
        }
    }
    if factors.is_empty() {
        return Err(ExprError::Empty);
    }
    Ok(factors)
}

/// Expand a product of polynomial factors into a single polynomial.
pub fn expand(input: &str) -> Result<Poly, ExprError> {
    if input.trim().is_empty() {
        return Err(ExprError::Empty);
    }
    let mut product = Poly::constant(1.0);
    for factor in split_factors(input)? {
        product = product.mul(&parse_factor(factor)?);
    }
    Ok(product)
}

/// A finished expansion: standard form, the worked steps, and the
/// optional evaluation result.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub expanded: String,
    pub steps: Vec<String>,
    pub value_at: Option<f64>,
}

/// Expand and, when `x_value` is given, substitute and evaluate.
pub fn expand_with_steps(input: &str, x_value: Option<&str>) -> Result<Expansion, ExprError> {
    let poly = expand(input)?;
    let expanded = poly.to_string();
    let mut steps = vec![format!(
        "Step 1: Expand the expression\n   {} = {}",
        input.trim(),
        expanded
    )];

    let value_at = match x_value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => {
            let x: f64 = raw.parse().map_err(|_| ExprError::BadX)?;
            let value = poly.eval(x);
            steps.push(format!("Step 2: Substitute x = {}", fmt_num(x)));
            steps.push(format!("Step 3: Evaluate\n   {} = {}", expanded, fmt_num(value)));
            Some(value)
        }
        None => None,
    };

    Ok(Expansion {
        expanded,
        steps,
        value_at,
    })
}
