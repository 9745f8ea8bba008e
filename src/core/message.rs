//! Message assembly from value lists and printf-style templates
//!
//! Values are passed as anything implementing [`LogArgs`]: a single value,
//! a tuple of values, `()` for none, or a slice of `&dyn LogValue`.
//!
//! A plain value list is joined the way print-style functions join their
//! operands: each value's text is appended as is, with a single space
//! between two neighbours only when neither of them is a string.
//!
//! A template is rendered printf-style. Supported verbs are
//! `%v %s %d %q %x %X %o %b %c %t %f %F %e %E %g %G` and `%%`, with the
//! flags `-`, `+`, `#`, `0` and space, a width, and a `.precision`. Width
//! and precision may be `*`, taking an integer from the value list; a
//! negative `*` width left-aligns and a negative `*` precision is ignored.
//! Floats printed with `%v`, `%g` or in a plain list use the shortest
//! representation and switch to exponent form when the decimal exponent is
//! below -4 or at least 6 (`1.234567e+06`).
//! Problems are reported inline instead of failing:
//!
//! | problem            | output              |
//! |--------------------|---------------------|
//! | verb/value mismatch| `%!d(string=x)`     |
//! | too few values     | `%!d(MISSING)`      |
//! | too many values    | `%!(EXTRA int=5)`   |
//! | `%` at end         | `%!(NOVERB)`        |
//! | bad `*` width      | `%!(BADWIDTH)`      |
//! | bad `*` precision  | `%!(BADPREC)`       |

use std::borrow::Cow;
use std::fmt::{self, Write};
use std::rc::Rc;
use std::sync::Arc;

/// Typed view of a loggable value.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    Str(&'a str),
    Int(i128),
    Uint(u128),
    Float(f64),
    Bool(bool),
    Char(char),
    Display(&'a dyn fmt::Display),
    Debug(&'a dyn fmt::Debug),
}

impl Value<'_> {
    /// Strings never get a separating space when values are joined.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
            Value::Display(_) | Value::Debug(_) => "value",
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(x) => f.write_str(&shortest_float(*x)),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Display(d) => write!(f, "{}", d),
            Value::Debug(d) => write!(f, "{:?}", d),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name(), self)
    }
}

/// A value that can appear in a log call.
pub trait LogValue {
    fn to_value(&self) -> Value<'_>;
}

impl<T: LogValue + ?Sized> LogValue for &T {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl LogValue for str {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl LogValue for String {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl LogValue for Cow<'_, str> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl LogValue for Box<str> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl LogValue for Arc<str> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl LogValue for Rc<str> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

macro_rules! impl_log_value {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl LogValue for $ty {
                #[inline]
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(*self as $wide)
                }
            }
        )+
    };
}

impl_log_value!(Int as i128: i8, i16, i32, i64, i128, isize);
impl_log_value!(Uint as u128: u8, u16, u32, u64, u128, usize);

impl LogValue for f64 {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl LogValue for f32 {
    fn to_value(&self) -> Value<'_> {
        // Widening directly would print 1.1f32 as 1.100000023841858.
        let widened = self.to_string().parse().unwrap_or(f64::from(*self));
        Value::Float(widened)
    }
}

impl LogValue for bool {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl LogValue for char {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Char(*self)
    }
}

impl LogValue for fmt::Arguments<'_> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Display(self)
    }
}

impl LogValue for Value<'_> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        *self
    }
}

/// Logs any [`Display`](fmt::Display) type as a non-string value.
///
/// ```
/// use logadapter::core::message::{render_plain, Displayed};
///
/// let addr: std::net::IpAddr = "10.0.0.1".parse().unwrap();
/// assert_eq!(render_plain(&("peer", Displayed(addr))), "peer10.0.0.1");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display> LogValue for Displayed<T> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Display(&self.0)
    }
}

/// Logs any [`Debug`](fmt::Debug) type using its debug representation.
#[derive(Debug, Clone, Copy)]
pub struct Debugged<T>(pub T);

impl<T: fmt::Debug> LogValue for Debugged<T> {
    #[inline]
    fn to_value(&self) -> Value<'_> {
        Value::Debug(&self.0)
    }
}

/// The value list of a log call.
pub trait LogArgs {
    /// Append every value, in order.
    fn push_values<'a>(&'a self, out: &mut Vec<&'a dyn LogValue>);
}

impl<T: LogValue> LogArgs for T {
    #[inline]
    fn push_values<'a>(&'a self, out: &mut Vec<&'a dyn LogValue>) {
        out.push(self);
    }
}

impl LogArgs for () {
    #[inline]
    fn push_values<'a>(&'a self, _out: &mut Vec<&'a dyn LogValue>) {}
}

impl LogArgs for [&dyn LogValue] {
    fn push_values<'a>(&'a self, out: &mut Vec<&'a dyn LogValue>) {
        for value in self {
            out.push(*value);
        }
    }
}

impl LogArgs for &[&dyn LogValue] {
    fn push_values<'a>(&'a self, out: &mut Vec<&'a dyn LogValue>) {
        (**self).push_values(out);
    }
}

impl<const N: usize> LogArgs for [&dyn LogValue; N] {
    fn push_values<'a>(&'a self, out: &mut Vec<&'a dyn LogValue>) {
        self.as_slice().push_values(out);
    }
}

impl LogArgs for Vec<&dyn LogValue> {
    fn push_values<'a>(&'a self, out: &mut Vec<&'a dyn LogValue>) {
        self.as_slice().push_values(out);
    }
}

macro_rules! impl_log_args_tuple {
    ($($name:ident),+) => {
        impl<$($name: LogValue),+> LogArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn push_values<'a>(&'a self, out: &mut Vec<&'a dyn LogValue>) {
                let ($($name,)+) = self;
                $(out.push($name);)+
            }
        }
    };
}

impl_log_args_tuple!(A);
impl_log_args_tuple!(A, B);
impl_log_args_tuple!(A, B, C);
impl_log_args_tuple!(A, B, C, D);
impl_log_args_tuple!(A, B, C, D, E);
impl_log_args_tuple!(A, B, C, D, E, F);
impl_log_args_tuple!(A, B, C, D, E, F, G);
impl_log_args_tuple!(A, B, C, D, E, F, G, H);
impl_log_args_tuple!(A, B, C, D, E, F, G, H, I);
impl_log_args_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_log_args_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_log_args_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

/// Build the message of a log call.
///
/// An empty or absent template joins the values; a template without values
/// is used verbatim.
pub fn assemble<A: LogArgs + ?Sized>(template: Option<&str>, args: &A) -> String {
    let mut values = Vec::new();
    args.push_values(&mut values);
    match template {
        Some(template) if !template.is_empty() => {
            if values.is_empty() {
                template.to_string()
            } else {
                sprintf(template, &values)
            }
        }
        _ => sprint(&values),
    }
}

/// Join values print-style.
///
/// ```
/// use logadapter::core::message::render_plain;
///
/// assert_eq!(render_plain(&("a", 1)), "a1");
/// assert_eq!(render_plain(&(1, 2, "x", 3)), "1 2x3");
/// ```
pub fn render_plain<A: LogArgs + ?Sized>(args: &A) -> String {
    assemble(None, args)
}

/// Render a printf-style template.
///
/// ```
/// use logadapter::core::message::render_template;
///
/// assert_eq!(render_template("%s=%d", &("x", 5)), "x=5");
/// ```
pub fn render_template<A: LogArgs + ?Sized>(template: &str, args: &A) -> String {
    let mut values = Vec::new();
    args.push_values(&mut values);
    sprintf(template, &values)
}

fn sprint(values: &[&dyn LogValue]) -> String {
    let mut out = String::new();
    let mut prev_is_string = true;
    for (idx, value) in values.iter().enumerate() {
        let value = value.to_value();
        let is_string = value.is_string();
        if idx > 0 && !is_string && !prev_is_string {
            out.push(' ');
        }
        let _ = write!(out, "{}", value);
        prev_is_string = is_string;
    }
    out
}

const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    width_from_arg: bool,
    precision_from_arg: bool,
}

fn sprintf(template: &str, values: &[&dyn LogValue]) -> String {
    let mut out = String::with_capacity(template.len() + 8 * values.len());
    let mut next = 0;
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let (mut spec, verb, tail) = parse_directive(&rest[pos + 1..]);
        rest = tail;

        if spec.width_from_arg {
            match count_arg(values, &mut next) {
                Some(width) => {
                    if width < 0 {
                        spec.minus = true;
                        spec.zero = false;
                    }
                    spec.width = Some(width.unsigned_abs() as usize);
                }
                None => out.push_str("%!(BADWIDTH)"),
            }
        }
        if spec.precision_from_arg {
            match count_arg(values, &mut next) {
                Some(precision) => spec.precision = usize::try_from(precision).ok(),
                None => out.push_str("%!(BADPREC)"),
            }
        }

        let Some(verb) = verb else {
            out.push_str("%!(NOVERB)");
            break;
        };
        if verb == '%' {
            out.push('%');
            continue;
        }
        match values.get(next) {
            Some(value) => {
                format_value(&mut out, &spec, verb, value.to_value());
                next += 1;
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }
    out.push_str(rest);

    if next < values.len() {
        out.push_str("%!(EXTRA ");
        for (idx, value) in values[next..].iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            let value = value.to_value();
            let _ = write!(out, "{}={}", value.type_name(), value);
        }
        out.push(')');
    }
    out
}

fn parse_directive(s: &str) -> (Spec, Option<char>, &str) {
    let mut spec = Spec::default();
    let mut chars = s.char_indices().peekable();

    while let Some(&(_, c)) = chars.peek() {
        match c {
            '-' => spec.minus = true,
            '+' => spec.plus = true,
            '#' => spec.sharp = true,
            '0' => spec.zero = true,
            ' ' => spec.space = true,
            _ => break,
        }
        chars.next();
    }

    if let Some(&(_, '*')) = chars.peek() {
        chars.next();
        spec.width_from_arg = true;
    } else {
        spec.width = parse_number(&mut chars);
    }

    if let Some(&(_, '.')) = chars.peek() {
        chars.next();
        if let Some(&(_, '*')) = chars.peek() {
            chars.next();
            spec.precision_from_arg = true;
        } else {
            spec.precision = Some(parse_number(&mut chars).unwrap_or(0));
        }
    }

    match chars.next() {
        Some((idx, verb)) => (spec, Some(verb), &s[idx + verb.len_utf8()..]),
        None => (spec, None, ""),
    }
}

/// Consume the next value as a `*` width or precision. The value is
/// consumed even when it is not a usable integer; a missing value is not.
fn count_arg(values: &[&dyn LogValue], next: &mut usize) -> Option<i64> {
    let value = values.get(*next)?;
    *next += 1;
    let count = match value.to_value() {
        Value::Int(i) => i64::try_from(i).ok()?,
        Value::Uint(u) => i64::try_from(u).ok()?,
        _ => return None,
    };
    (count.unsigned_abs() <= MAX_WIDTH as u64).then_some(count)
}

fn parse_number(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> Option<usize> {
    let mut number: Option<usize> = None;
    while let Some(&(_, c)) = chars.peek() {
        let Some(digit) = c.to_digit(10) else { break };
        let acc = number.unwrap_or(0);
        number = Some((acc * 10 + digit as usize).min(MAX_WIDTH));
        chars.next();
    }
    number
}

fn format_value(out: &mut String, spec: &Spec, verb: char, value: Value<'_>) {
    let done = match value {
        Value::Int(i) => format_integer(out, spec, verb, i < 0, i.unsigned_abs()),
        Value::Uint(u) => format_integer(out, spec, verb, false, u),
        Value::Float(x) => format_float(out, spec, verb, x),
        Value::Str(s) => format_str(out, spec, verb, s),
        Value::Bool(b) => match verb {
            'v' | 't' => {
                pad(out, spec, "", if b { "true" } else { "false" }, false);
                true
            }
            _ => false,
        },
        Value::Char(c) => match verb {
            'v' | 'c' | 's' => {
                pad(out, spec, "", c.encode_utf8(&mut [0; 4]), false);
                true
            }
            'q' => {
                pad(out, spec, "", &format!("{:?}", c), false);
                true
            }
            _ => format_integer(out, spec, verb, false, u128::from(u32::from(c))),
        },
        Value::Display(_) | Value::Debug(_) => match verb {
            'v' | 's' => {
                pad(out, spec, "", &truncate(&value.to_string(), spec.precision), false);
                true
            }
            'q' => {
                pad(out, spec, "", &format!("{:?}", value.to_string()), false);
                true
            }
            _ => false,
        },
    };
    if !done {
        let _ = write!(out, "%!{}({}={})", verb, value.type_name(), value);
    }
}

fn format_integer(out: &mut String, spec: &Spec, verb: char, negative: bool, magnitude: u128) -> bool {
    let (digits, prefix) = match verb {
        'v' | 'd' => (magnitude.to_string(), ""),
        'b' => (format!("{:b}", magnitude), if spec.sharp { "0b" } else { "" }),
        'o' => (format!("{:o}", magnitude), if spec.sharp { "0" } else { "" }),
        'x' => (format!("{:x}", magnitude), if spec.sharp { "0x" } else { "" }),
        'X' => (format!("{:X}", magnitude), if spec.sharp { "0X" } else { "" }),
        'c' | 'q' => {
            let c = u32::try_from(magnitude)
                .ok()
                .filter(|_| !negative)
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            let text = if verb == 'q' { format!("{:?}", c) } else { c.to_string() };
            pad(out, spec, "", &text, false);
            return true;
        }
        _ => return false,
    };

    let digits = match spec.precision {
        Some(0) if magnitude == 0 => String::new(),
        Some(p) if digits.len() < p => format!("{}{}", "0".repeat(p - digits.len()), digits),
        _ => digits,
    };
    let mut sign = String::from(sign_of(spec, negative));
    sign.push_str(prefix);
    pad(out, spec, &sign, &digits, spec.precision.is_none());
    true
}

fn format_float(out: &mut String, spec: &Spec, verb: char, x: f64) -> bool {
    if !matches!(verb, 'v' | 'f' | 'F' | 'e' | 'E' | 'g' | 'G') {
        return false;
    }
    if x.is_nan() {
        pad(out, spec, "", "NaN", false);
        return true;
    }
    let negative = x.is_sign_negative();
    if x.is_infinite() {
        pad(out, spec, if negative { "-" } else { "+" }, "Inf", false);
        return true;
    }

    let magnitude = x.abs();
    let body = match verb {
        'f' | 'F' => format!("{:.*}", spec.precision.unwrap_or(6), magnitude),
        'e' => exponent_form(magnitude, spec.precision.unwrap_or(6), false),
        'E' => exponent_form(magnitude, spec.precision.unwrap_or(6), true),
        'G' => general_form(magnitude, spec, true),
        _ => general_form(magnitude, spec, false),
    };
    pad(out, spec, sign_of(spec, negative), &body, true);
    true
}

fn format_str(out: &mut String, spec: &Spec, verb: char, s: &str) -> bool {
    match verb {
        'v' | 's' => pad(out, spec, "", &truncate(s, spec.precision), false),
        'q' => pad(out, spec, "", &format!("{:?}", truncate(s, spec.precision)), false),
        'x' | 'X' => {
            let mut hex = String::with_capacity(s.len() * 2);
            for byte in s.bytes() {
                let _ = if verb == 'x' {
                    write!(hex, "{:02x}", byte)
                } else {
                    write!(hex, "{:02X}", byte)
                };
            }
            pad(out, spec, "", &hex, false);
        }
        _ => return false,
    }
    true
}

fn sign_of(spec: &Spec, negative: bool) -> &'static str {
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

fn truncate(s: &str, precision: Option<usize>) -> Cow<'_, str> {
    match precision {
        Some(p) => match s.char_indices().nth(p) {
            Some((idx, _)) => Cow::Borrowed(&s[..idx]),
            None => Cow::Borrowed(s),
        },
        None => Cow::Borrowed(s),
    }
}

/// Write `sign + body` padded to the spec width. Zero padding goes between
/// sign and body and only applies to numbers.
fn pad(out: &mut String, spec: &Spec, sign: &str, body: &str, numeric: bool) {
    let len = sign.chars().count() + body.chars().count();
    let fill = spec.width.map_or(0, |w| w.saturating_sub(len));

    if fill == 0 {
        out.push_str(sign);
        out.push_str(body);
    } else if spec.minus {
        out.push_str(sign);
        out.push_str(body);
        out.extend(std::iter::repeat(' ').take(fill));
    } else if spec.zero && numeric {
        out.push_str(sign);
        out.extend(std::iter::repeat('0').take(fill));
        out.push_str(body);
    } else {
        out.extend(std::iter::repeat(' ').take(fill));
        out.push_str(sign);
        out.push_str(body);
    }
}

/// `d.ddde±XX`, exponent with at least two digits.
fn exponent_form(magnitude: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, magnitude);
    split_exponent(&raw, upper)
}

fn split_exponent(raw: &str, upper: bool) -> String {
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let marker = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}{}{:02}", mantissa, marker, sign, exp.unsigned_abs())
}

fn general_form(magnitude: f64, spec: &Spec, upper: bool) -> String {
    let Some(precision) = spec.precision else {
        let shortest = shortest_float(magnitude);
        return if upper { shortest.to_uppercase() } else { shortest };
    };
    let precision = precision.max(1);
    if magnitude == 0.0 {
        return "0".to_string();
    }

    let probe = format!("{:.*e}", precision - 1, magnitude);
    let exp: i32 = probe
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exp < -4 || exp >= precision as i32 {
        let (mantissa, _) = probe.split_once('e').unwrap_or((&probe, ""));
        let mantissa = trim_fraction(mantissa, spec.sharp);
        split_exponent(&format!("{}e{}", mantissa, exp), upper)
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, magnitude), spec.sharp).to_string()
    }
}

fn trim_fraction(s: &str, keep: bool) -> &str {
    if keep || !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.')
}

/// Exponent at or above which the shortest form switches to `d.ddde+XX`.
const SHORTEST_EXPONENT_LIMIT: i32 = 6;

/// Shortest round-trip text. Exponent form is used when the decimal
/// exponent is below -4 or at least [`SHORTEST_EXPONENT_LIMIT`].
fn shortest_float(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "+Inf".to_string() } else { "-Inf".to_string() };
    }
    let scientific = format!("{:e}", x);
    let exp: i32 = scientific
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);
    if x != 0.0 && !(-4..SHORTEST_EXPONENT_LIMIT).contains(&exp) {
        split_exponent(&scientific, false)
    } else {
        x.to_string()
    }
}
