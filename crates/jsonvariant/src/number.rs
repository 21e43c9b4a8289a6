//! Numeric casting and the leading-number parser used when a string cell is
//! read as a number.

mod sealed {
    pub trait Sealed {}
}

/// Integer types a cell can be read as or written from.
///
/// Every conversion is an `as` cast: wrapping between integer widths, and
/// truncation toward zero (saturating at the bounds, `NaN` to zero) from floats.
pub trait Integer: Copy + sealed::Sealed {
    fn from_i64(value: i64) -> Self;
    fn from_f64(value: f64) -> Self;
    fn to_i64(self) -> i64;
}

/// Floating-point types a cell can be read as or written from.
pub trait Float: Copy + sealed::Sealed {
    fn from_i64(value: i64) -> Self;
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Integer for $t {
                #[inline]
                fn from_i64(value: i64) -> Self {
                    value as $t
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn to_i64(self) -> i64 {
                    self as i64
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Float for $t {
                #[inline]
                fn from_i64(value: i64) -> Self {
                    value as $t
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_float!(f32, f64);

/// Parse the leading integer of `s`: optional whitespace, optional sign, then
/// digits up to the first non-digit. Returns 0 when there are no digits.
pub(crate) fn parse_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add(i64::from(b - b'0'));
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Parse the longest prefix of `s` that forms a decimal number
/// (`[+-]digits[.digits][(e|E)[+-]digits]`). Returns 0.0 when there is none.
pub(crate) fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut has_digits = end > int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}
