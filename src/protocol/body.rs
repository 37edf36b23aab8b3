//! Frame body
//!
//! An ordered list of string fields. On the wire consecutive fields are
//! separated by a single zero byte, with no leading or trailing delimiter,
//! so a field can never carry a zero byte itself.

use std::fmt::{self, Display, LowerExp};

use bytes::BufMut;

use crate::error::{PinwireError, Result};

/// Field delimiter on the wire
pub const FIELD_DELIMITER: u8 = 0;

/// Ordered sequence of string fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    fields: Vec<String>,
}

/// A typed value appended to a body
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Str(String),
    Int(i64),
    Float(f64),
    /// Single byte, rendered as the character with that code point
    Byte(u8),
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn push_str(&mut self, value: impl Into<String>) -> &mut Self {
        self.fields.push(value.into());
        self
    }

    pub fn push_int(&mut self, value: i64) -> &mut Self {
        self.push_str(value.to_string())
    }

    /// Shortest representation that parses back to the same value
    ///
    /// Plain decimal for exponents -4 through 5, otherwise exponent form
    /// with a signed two-digit exponent: `0.0001`, `123456`, `1e-05`, `1e+21`.
    pub fn push_float(&mut self, value: f64) -> &mut Self {
        self.push_str(format_float(value))
    }

    pub fn push_byte(&mut self, value: u8) -> &mut Self {
        self.push_str(char::from(value).to_string())
    }

    pub fn push(&mut self, field: impl Into<Field>) -> &mut Self {
        match field.into() {
            Field::Str(s) => self.push_str(s),
            Field::Int(i) => self.push_int(i),
            Field::Float(f) => self.push_float(f),
            Field::Byte(b) => self.push_byte(b),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Field at `index`, `None` when out of range
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn get_bytes(&self, index: usize) -> Option<&[u8]> {
        self.get(index).map(str::as_bytes)
    }

    /// Decimal integer at `index`
    pub fn get_int(&self, index: usize) -> Option<i64> {
        self.get(index)?.parse().ok()
    }

    pub fn get_float(&self, index: usize) -> Option<f64> {
        self.get(index)?.parse().ok()
    }

    /// Field at `index` if it is exactly one byte long
    pub fn get_byte(&self, index: usize) -> Option<u8> {
        match self.get_bytes(index)? {
            [b] => Some(*b),
            _ => None,
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Drop the first `count` fields (all of them if `count` exceeds the length)
    pub fn shift(&mut self, count: usize) {
        let count = count.min(self.fields.len());
        self.fields.drain(..count);
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    // =========================================================================
    // Wire Encoding
    // =========================================================================

    /// Encoded size in bytes
    pub fn encoded_len(&self) -> usize {
        let content: usize = self.fields.iter().map(String::len).sum();
        content + self.fields.len().saturating_sub(1)
    }

    /// Append the encoded fields to `dst`
    ///
    /// Fails without writing anything if a field contains the delimiter.
    pub fn encode<B: BufMut>(&self, dst: &mut B) -> Result<()> {
        if let Some(index) = self
            .fields
            .iter()
            .position(|f| f.as_bytes().contains(&FIELD_DELIMITER))
        {
            return Err(PinwireError::InvalidField { index });
        }

        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                dst.put_u8(FIELD_DELIMITER);
            }
            dst.put_slice(field.as_bytes());
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.encode(&mut bytes)?;
        Ok(bytes)
    }

    /// Split `bytes` on zero bytes; empty input yields no fields
    pub fn decode(bytes: &[u8]) -> Self {
        let mut body = Self::new();
        body.decode_into(bytes);
        body
    }

    /// Append the fields found in `bytes`
    pub fn decode_into(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.fields.extend(
            bytes
                .split(|b| *b == FIELD_DELIMITER)
                .map(|f| String::from_utf8_lossy(f).into_owned()),
        );
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{:?}", field)?;
        }
        f.write_str("}")
    }
}

impl<S: Into<String>> FromIterator<S> for Body {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// Field Conversions
// =============================================================================

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Str(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Str(value)
    }
}

impl From<u8> for Field {
    fn from(value: u8) -> Self {
        Field::Byte(value)
    }
}

fn format_float<T>(value: T) -> String
where
    T: Copy + Into<f64> + Display + LowerExp,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        return "NaN".to_string();
    }
    if wide.is_infinite() {
        return if wide > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    match exponent.parse::<i32>() {
        Ok(exp) if !(-4..6).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => value.to_string(),
    }
}

macro_rules! int_field {
    ($($t:ty),*) => {
        $(impl From<$t> for Field {
            fn from(value: $t) -> Self {
                Field::Int(i64::from(value))
            }
        })*
    };
}

int_field!(i8, i16, i32, i64, u16, u32);

impl From<f32> for Field {
    fn from(value: f32) -> Self {
        // Shortest f32 digits so 0.1f32 stays "0.1"
        Field::Str(format_float(value))
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Float(value)
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Int(i64::from(value))
    }
}
