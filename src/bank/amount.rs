//! Conversion between decimal strings and integer cents.
use std::borrow::Cow;

use crate::bank::{CENTS_PER_UNIT, Money};

/// Formats cents as a fixed-width decimal, e.g. `150025` becomes `001500.25`.
pub fn format_balance(cents: Money) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let unit = CENTS_PER_UNIT as u64;
    format!("{sign}{:06}.{:02}", abs / unit, abs % unit)
}

/// A value that can be read as a decimal amount: text or a primitive number.
pub trait AmountInput {
    /// The text checked against the decimal amount shape.
    fn amount_text(&self) -> Cow<'_, str>;
}

impl AmountInput for &str {
    fn amount_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(*self)
    }
}

impl AmountInput for String {
    fn amount_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

macro_rules! integer_amount_input {
    ($($ty:ty),*) => {
        $(impl AmountInput for $ty {
            fn amount_text(&self) -> Cow<'_, str> {
                Cow::Owned(self.to_string())
            }
        })*
    };
}

integer_amount_input!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// Very small and very large floats print in exponent form, which is not a
// plain decimal and so never parses.
macro_rules! float_amount_input {
    ($($ty:ty),*) => {
        $(impl AmountInput for $ty {
            fn amount_text(&self) -> Cow<'_, str> {
                let abs = self.abs();
                if *self != 0.0 && (abs < 1e-6 || abs >= 1e21) {
                    Cow::Owned(format!("{self:e}"))
                } else {
                    Cow::Owned(self.to_string())
                }
            }
        })*
    };
}

float_amount_input!(f32, f64);

/// Parses a decimal amount such as `"150.25"`, `"-3"` or `"0,5"` into cents.
///
/// Digits beyond the second decimal place are dropped, not rounded. Returns
/// `None` when the input is not a plain decimal or the result does not fit
/// in [`Money`].
pub fn parse_amount_to_cents(input: impl AmountInput) -> Option<Money> {
    let text = input.amount_text().trim().replacen(',', ".", 1);

    let (negative, unsigned) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, "0"),
    };
    if !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let whole: Money = whole.parse().ok()?;
    let fraction: Money = format!("{fraction:0<2}")[..2].parse().ok()?;
    let whole = whole.checked_mul(CENTS_PER_UNIT)?;
    // Negative amounts are accumulated below zero so `i64::MIN` stays reachable.
    if negative {
        whole.checked_neg()?.checked_sub(fraction)
    } else {
        whole.checked_add(fraction)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
