//! printf-style message rendering.
//!
//! Supported directives: `%%`, `%s`, `%p` (inspect), `%d`/`%i`/`%u`,
//! `%f`, `%e`/`%E`, `%x`/`%X`, `%o`, `%b`/`%B`, `%c`. Flags `-`, `0`, `+`
//! and space, a decimal width and a `.precision` are honoured. A format
//! without directives is returned unchanged.

use domainlog_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// A single printf argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Text.
    Str(String),
    /// Any integer.
    Int(i128),
    /// Any float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Single character.
    Char(char),
    /// Opaque value captured through its `Debug` representation.
    Inspect(String),
}

impl Arg {
    /// Capture any value through its `Debug` output.
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Inspect(format!("{value:?}"))
    }

    /// Capture any value through its `Display` output.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::Str(value.to_string())
    }

    fn text(&self) -> String {
        match self {
            Self::Str(value) | Self::Inspect(value) => value.clone(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => float_text(*value),
            Self::Bool(value) => value.to_string(),
            Self::Char(value) => value.to_string(),
        }
    }

    fn inspect(&self) -> String {
        match self {
            Self::Str(value) => format!("{value:?}"),
            Self::Char(value) => format!("{value:?}"),
            _ => self.text(),
        }
    }

    fn integer(&self, directive: char) -> Result<i128, PrintfError> {
        match self {
            Self::Int(value) => Ok(*value),
            Self::Float(value) if value.is_finite() => Ok(value.trunc() as i128),
            Self::Str(value) => value
                .trim()
                .parse::<i128>()
                .map_err(|_| self.invalid(directive)),
            _ => Err(self.invalid(directive)),
        }
    }

    fn float(&self, directive: char) -> Result<f64, PrintfError> {
        match self {
            Self::Int(value) => Ok(*value as f64),
            Self::Float(value) => Ok(*value),
            Self::Str(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|_| self.invalid(directive)),
            _ => Err(self.invalid(directive)),
        }
    }

    fn character(&self, directive: char) -> Result<char, PrintfError> {
        match self {
            Self::Char(value) => Ok(*value),
            Self::Int(value) => u32::try_from(*value)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| self.invalid(directive)),
            Self::Str(value) => value.chars().next().ok_or_else(|| self.invalid(directive)),
            _ => Err(self.invalid(directive)),
        }
    }

    fn invalid(&self, directive: char) -> PrintfError {
        PrintfError::InvalidArgument {
            directive,
            value: self.inspect(),
        }
    }
}

macro_rules! arg_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Int(i128::from(value))
                }
            }
        )+
    };
}

arg_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Self::Int(i128::try_from(value).unwrap_or(i128::MAX))
    }
}

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        Self::Int(i128::try_from(value).unwrap_or(i128::MAX))
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

/// Rendering failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintfError {
    /// More directives than arguments.
    #[error("too few arguments: directive {position} has no value")]
    MissingArgument {
        /// One-based position of the directive.
        position: usize,
    },
    /// Unsupported conversion character.
    #[error("malformed format string: %{directive}")]
    UnknownDirective {
        /// The conversion character.
        directive: char,
    },
    /// Format ends in the middle of a directive.
    #[error("incomplete format specifier; use %% instead")]
    Incomplete,
    /// Width or precision above [`MAX_FIELD`].
    #[error("{field} too big: {value}")]
    FieldTooLarge {
        /// `width` or `precision`.
        field: &'static str,
        /// Requested size.
        value: usize,
    },
    /// Argument cannot be converted for the directive.
    #[error("invalid value for %{directive}: {value}")]
    InvalidArgument {
        /// The conversion character.
        directive: char,
        /// Inspected argument.
        value: String,
    },
}

impl From<PrintfError> for ErrorEnvelope {
    fn from(error: PrintfError) -> Self {
        Self::expected(ErrorCode::invalid_format(), error.to_string())
    }
}

const SUPPORTED: &str = "spcdiuxXobBfeE";

/// Largest accepted width or precision.
pub const MAX_FIELD: usize = u16::MAX as usize;

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    left: bool,
    zero: bool,
    plus: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

/// Substitute `args` into `format`.
///
/// Extra arguments are ignored.
pub fn sprintf(format: &str, args: &[Arg]) -> Result<String, PrintfError> {
    let mut output = String::with_capacity(format.len());
    let mut chars = format.chars().peekable();
    let mut position = 0;

    while let Some(ch) = chars.next() {
        if ch != '%' {
            output.push(ch);
            continue;
        }

        let spec = parse_spec(&mut chars)?;
        if spec.conversion == '%' {
            output.push('%');
            continue;
        }
        if !SUPPORTED.contains(spec.conversion) {
            return Err(PrintfError::UnknownDirective {
                directive: spec.conversion,
            });
        }

        position += 1;
        let arg = args
            .get(position - 1)
            .ok_or(PrintfError::MissingArgument { position })?;
        output.push_str(&render(&spec, arg)?);
    }

    Ok(output)
}

fn parse_spec(chars: &mut Peekable<Chars<'_>>) -> Result<Spec, PrintfError> {
    let mut spec = Spec::default();
    while let Some(flag) = chars.peek().copied() {
        match flag {
            '-' => spec.left = true,
            '0' => spec.zero = true,
            '+' => spec.plus = true,
            ' ' => spec.space = true,
            _ => break,
        }
        chars.next();
    }

    spec.width = bounded("width", read_number(chars))?;
    if chars.peek() == Some(&'.') {
        chars.next();
        spec.precision = bounded("precision", Some(read_number(chars).unwrap_or(0)))?;
    }
    spec.conversion = chars.next().ok_or(PrintfError::Incomplete)?;
    Ok(spec)
}

fn bounded(field: &'static str, value: Option<usize>) -> Result<Option<usize>, PrintfError> {
    match value {
        Some(value) if value > MAX_FIELD => Err(PrintfError::FieldTooLarge { field, value }),
        other => Ok(other),
    }
}

fn read_number(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.peek().and_then(|ch| ch.to_digit(10)) {
        chars.next();
        let digit = usize::try_from(digit).unwrap_or(0);
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
    }
    value
}

fn render(spec: &Spec, arg: &Arg) -> Result<String, PrintfError> {
    match spec.conversion {
        's' => Ok(pad_text(&truncate(arg.text(), spec.precision), spec)),
        'p' => Ok(pad_text(&truncate(arg.inspect(), spec.precision), spec)),
        'c' => Ok(pad_text(&arg.character('c')?.to_string(), spec)),
        'd' | 'i' | 'u' => {
            let value = arg.integer(spec.conversion)?;
            let digits = min_digits(value.unsigned_abs().to_string(), spec.precision);
            Ok(pad_number(sign(value < 0, spec), &digits, spec, spec.precision.is_none()))
        },
        'x' | 'X' | 'o' | 'b' | 'B' => {
            let value = arg.integer(spec.conversion)?;
            let magnitude = value.unsigned_abs();
            let digits = match spec.conversion {
                'x' => format!("{magnitude:x}"),
                'X' => format!("{magnitude:X}"),
                'o' => format!("{magnitude:o}"),
                _ => format!("{magnitude:b}"),
            };
            let digits = min_digits(digits, spec.precision);
            Ok(pad_number(sign(value < 0, spec), &digits, spec, spec.precision.is_none()))
        },
        'f' => {
            let value = arg.float('f')?;
            let precision = spec.precision.unwrap_or(6);
            Ok(render_float(value, spec, |magnitude| {
                format!("{magnitude:.precision$}")
            }))
        },
        'e' | 'E' => {
            let value = arg.float(spec.conversion)?;
            let precision = spec.precision.unwrap_or(6);
            let upper = spec.conversion == 'E';
            Ok(render_float(value, spec, |magnitude| {
                exponent_form(magnitude, precision, upper)
            }))
        },
        other => Err(PrintfError::UnknownDirective { directive: other }),
    }
}

/// Float text in the conventional shortest form: `1.5`, `100.0`,
/// `1.0e+20`, `1.5e-05`, `Infinity`.
fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_negative() { "-Infinity" } else { "Infinity" };
        return text.to_string();
    }
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-4..1e16).contains(&magnitude) {
        return format!("{value:?}");
    }
    let raw = format!("{value:e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let point = if mantissa.contains('.') { "" } else { ".0" };
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{point}e{exponent_sign}{:02}", exponent.unsigned_abs())
}

fn render_float(value: f64, spec: &Spec, digits: impl Fn(f64) -> String) -> String {
    if value.is_nan() {
        return pad_number(sign(false, spec), "NaN", spec, false);
    }
    let negative = value.is_sign_negative();
    if value.is_infinite() {
        return pad_number(sign(negative, spec), "Inf", spec, false);
    }
    pad_number(sign(negative, spec), &digits(value.abs()), spec, true)
}

fn exponent_form(magnitude: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{magnitude:.precision$e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}{marker}{exponent_sign}{:02}", exponent.unsigned_abs())
}

const fn sign(negative: bool, spec: &Spec) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn min_digits(digits: String, precision: Option<usize>) -> String {
    match precision {
        Some(precision) if precision > digits.len() => {
            format!("{}{digits}", "0".repeat(precision - digits.len()))
        },
        _ => digits,
    }
}

fn truncate(text: String, precision: Option<usize>) -> String {
    match precision {
        Some(precision) => text.chars().take(precision).collect(),
        None => text,
    }
}

fn pad_text(text: &str, spec: &Spec) -> String {
    let len = text.chars().count();
    match spec.width {
        Some(width) if width > len => {
            let fill = " ".repeat(width - len);
            if spec.left {
                format!("{text}{fill}")
            } else {
                format!("{fill}{text}")
            }
        },
        _ => text.to_owned(),
    }
}

fn pad_number(sign: &str, digits: &str, spec: &Spec, zero_allowed: bool) -> String {
    let len = sign.len() + digits.len();
    match spec.width {
        Some(width) if width > len => {
            let fill = width - len;
            if spec.left {
                format!("{sign}{digits}{}", " ".repeat(fill))
            } else if spec.zero && zero_allowed {
                format!("{sign}{}{digits}", "0".repeat(fill))
            } else {
                format!("{}{sign}{digits}", " ".repeat(fill))
            }
        },
        _ => format!("{sign}{digits}"),
    }
}
