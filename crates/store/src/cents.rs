use std::{
    fmt,
    ops::{Add, AddAssign},
};

/// Money amount represented as **integer cents**.
///
/// All amounts inside the store are kept in cents to avoid floating-point
/// drift; the `f64` bridge exists only for the JSON boundary.
///
/// # Examples
///
/// ```rust
/// use store::Cents;
///
/// let amount = Cents::from_amount(5.005).unwrap();
/// assert_eq!(amount.cents(), 501);
/// assert_eq!(amount.to_amount(), 5.01);
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a decimal amount to cents, rounding half away from zero at
    /// the cent boundary. Returns `None` for non-finite or out-of-range
    /// values.
    #[must_use]
    pub fn from_amount(value: f64) -> Option<Cents> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Cents(cents as i64))
    }

    /// Returns the amount as a decimal number with at most two fractional
    /// digits.
    #[must_use]
    pub fn to_amount(self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Cents) -> Option<Cents> {
        self.0.checked_add(rhs.0).map(Cents)
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Cents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Cents> for i64 {
    fn from(value: Cents) -> Self {
        value.0
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Self::Output {
        Cents(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 += rhs.0;
    }
}
