//! Decode Smile data into a value.
use crate::de::read::SliceReader;
use crate::de::string_cache::StringCache;
use crate::token;
use crate::value::Value;
use crate::Error;
use byteorder::{BigEndian, ByteOrder};
use indexmap::IndexMap;
use std::str;

mod read;
mod string_cache;

/// Deserializes a [`Value`] from a slice of Smile data.
///
/// The whole input must be consumed: a single value, optionally followed by the end-of-stream marker.
pub fn from_slice(slice: &[u8]) -> Result<Value, Error> {
    let mut de = Decoder::new(slice)?;
    let value = de.decode()?;
    de.end()?;
    Ok(value)
}

/// Parses a Smile byte stream into values.
pub struct Decoder<'de> {
    reader: SliceReader<'de>,
    remaining_depth: u8,
    raw_binary: bool,
    shared_names: Option<StringCache>,
    shared_values: Option<StringCache>,
}

impl<'de> Decoder<'de> {
    /// Creates a `Decoder`, validating the four byte header.
    pub fn new(slice: &'de [u8]) -> Result<Self, Error> {
        if slice.len() < 3 || slice[..3] != token::HEADER {
            return Err(Error::invalid_header());
        }
        let info = match slice.get(3) {
            Some(info) => *info,
            None => return Err(Error::unexpected_end_of_input()),
        };

        Ok(Decoder {
            reader: SliceReader::new(&slice[4..]),
            remaining_depth: 128,
            raw_binary: info & token::FLAG_RAW_BINARY != 0,
            shared_names: if info & token::FLAG_SHARED_NAMES != 0 {
                Some(StringCache::new())
            } else {
                None
            },
            shared_values: if info & token::FLAG_SHARED_VALUES != 0 {
                Some(StringCache::new())
            } else {
                None
            },
        })
    }

    /// Returns `true` if the header enabled shared key back-references.
    pub fn shared_names(&self) -> bool {
        self.shared_names.is_some()
    }

    /// Returns `true` if the header enabled shared string value back-references.
    pub fn shared_values(&self) -> bool {
        self.shared_values.is_some()
    }

    /// Returns `true` if the header declared raw binary support.
    ///
    /// The flag is carried through for round-trips; no raw binary token is accepted.
    pub fn raw_binary(&self) -> bool {
        self.raw_binary
    }

    /// Decodes a single value.
    pub fn decode(&mut self) -> Result<Value, Error> {
        self.parse_value()
    }

    /// Validates that all Smile data has been consumed from the input.
    ///
    /// Both the end-of-stream marker and the end of the input are considered valid ends.
    pub fn end(&mut self) -> Result<(), Error> {
        match self.reader.next() {
            Some(token::END_OF_STREAM) => Ok(()),
            Some(_) => Err(Error::trailing_data()),
            None => Ok(()),
        }
    }

    fn recursion_checked<F, T>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Decoder<'de>) -> Result<T, Error>,
    {
        self.remaining_depth -= 1;
        if self.remaining_depth == 0 {
            return Err(Error::recursion_limit_exceeded());
        }
        let r = f(self);
        self.remaining_depth += 1;
        r
    }

    fn parse_u8(&mut self) -> Result<u8, Error> {
        self.reader.next().ok_or_else(Error::unexpected_end_of_input)
    }

    fn parse_vint(&mut self) -> Result<u64, Error> {
        let mut value = 0;
        let mut shift = 0;
        loop {
            let byte = self.reader.next().ok_or_else(Error::incomplete_vint)?;
            value |= u64::from(byte & 0x7f) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }

            shift += 7;
            if shift >= 64 {
                return Err(Error::incomplete_vint());
            }
        }
    }

    fn parse_i32(&mut self) -> Result<Value, Error> {
        let buf = self.reader.read(4).ok_or_else(Error::incomplete_int_32)?;
        let decoded = zigzag_i32(BigEndian::read_u32(buf));
        Ok(Value::Int(i64::from(decoded)))
    }

    fn parse_i64(&mut self) -> Result<Value, Error> {
        let buf = self.reader.read(8).ok_or_else(Error::incomplete_int_64)?;
        let decoded = zigzag_i64(BigEndian::read_u64(buf));
        Ok(Value::Int(decoded))
    }

    fn parse_f32(&mut self) -> Result<Value, Error> {
        let buf = self.reader.read(4).ok_or_else(Error::incomplete_float_32)?;
        let value = f32::from_bits(BigEndian::read_u32(buf));
        Ok(Value::Float(f64::from(value)))
    }

    fn parse_f64(&mut self) -> Result<Value, Error> {
        let buf = self.reader.read(8).ok_or_else(Error::incomplete_float_64)?;
        let value = f64::from_bits(BigEndian::read_u64(buf));
        Ok(Value::Float(value))
    }

    fn intern_value(&mut self, s: &str) {
        if s.len() > token::MAX_SHARED_STRING_LEN {
            return;
        }
        if let Some(shared_values) = &mut self.shared_values {
            shared_values.intern(s);
        }
    }

    fn parse_inline_string(&mut self, len: usize) -> Result<Value, Error> {
        let buf = self.reader.read(len).ok_or_else(Error::incomplete_string)?;
        let s = str::from_utf8(buf).map_err(|_| Error::invalid_utf8())?;
        self.intern_value(s);
        Ok(Value::Str(s.to_string()))
    }

    fn parse_long_string(&mut self) -> Result<Value, Error> {
        let len = self.parse_vint()?;
        let len = usize::try_from(len).map_err(|_| Error::incomplete_string())?;
        let buf = self.reader.read(len).ok_or_else(Error::incomplete_string)?;
        match self.reader.next() {
            Some(token::STRING_END) => {}
            _ => return Err(Error::missing_string_terminator()),
        }

        let s = str::from_utf8(buf).map_err(|_| Error::invalid_utf8())?;
        self.intern_value(s);
        Ok(Value::Str(s.to_string()))
    }

    fn parse_shared_string(&mut self, reference: u16) -> Result<Value, Error> {
        let s = self
            .shared_values
            .as_ref()
            .and_then(|c| c.get(reference))
            .ok_or_else(|| Error::invalid_shared_reference(reference))?;
        Ok(Value::Str(s.to_string()))
    }

    fn parse_long_shared_string(&mut self) -> Result<Value, Error> {
        let byte = self
            .reader
            .next()
            .ok_or_else(Error::incomplete_shared_reference)?;
        self.parse_shared_string(u16::from(byte) + 31)
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        self.recursion_checked(|de| {
            let mut items = vec![];
            loop {
                match de.reader.peek() {
                    Some(token::END_ARRAY) => {
                        de.reader.consume();
                        return Ok(Value::Array(items));
                    }
                    Some(_) => items.push(de.parse_value()?),
                    None => return Err(Error::unexpected_end_of_input()),
                }
            }
        })
    }

    fn parse_object(&mut self) -> Result<Value, Error> {
        self.recursion_checked(|de| {
            let mut fields = IndexMap::new();
            loop {
                match de.reader.peek() {
                    Some(token::END_OBJECT) => {
                        de.reader.consume();
                        return Ok(Value::Object(fields));
                    }
                    Some(_) => {
                        let name = de.parse_name()?;
                        let value = de.parse_value()?;
                        fields.insert(name, value);
                    }
                    None => return Err(Error::unexpected_end_of_input()),
                }
            }
        })
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        match self.parse_u8()? {
            token @ 0x01..=0x1f => self.parse_shared_string(u16::from(token) - 1),
            0x20 => Ok(Value::Str(String::new())),
            0x21 => Ok(Value::Null),
            0x22 => Ok(Value::Bool(false)),
            0x23 => Ok(Value::Bool(true)),
            0x24 => self.parse_i32(),
            0x25 => self.parse_i64(),
            0x28 => self.parse_f32(),
            0x29 => self.parse_f64(),
            token @ 0x40..=0x5f => self.parse_inline_string(token as usize - (0x40 - 1)),
            token @ 0x60..=0x7f => self.parse_inline_string(token as usize - (0x60 - 33)),
            token @ 0x80..=0x9f => self.parse_inline_string(token as usize - (0x80 - 2)),
            token @ 0xa0..=0xbf => self.parse_inline_string(token as usize - (0xa0 - 34)),
            token @ 0xc0..=0xdf => Ok(Value::Int(small_int(token))),
            0xe0 | 0xe4 => self.parse_long_string(),
            0xec => self.parse_long_shared_string(),
            0xf8 => self.parse_array(),
            0xfa => self.parse_object(),
            token => Err(Error::unknown_token(token)),
        }
    }

    fn intern_name(&mut self, s: &str) {
        if let Some(shared_names) = &mut self.shared_names {
            shared_names.intern(s);
        }
    }

    fn parse_inline_name(&mut self, len: usize) -> Result<String, Error> {
        let buf = self.reader.read(len).ok_or_else(Error::incomplete_string)?;
        let s = str::from_utf8(buf).map_err(|_| Error::invalid_utf8())?;
        self.intern_name(s);
        Ok(s.to_string())
    }

    fn parse_long_name(&mut self) -> Result<String, Error> {
        let len = self.parse_vint()?;
        let len = usize::try_from(len).map_err(|_| Error::incomplete_string())?;
        let buf = self.reader.read(len).ok_or_else(Error::incomplete_string)?;
        match self.reader.next() {
            Some(token::STRING_END) => {}
            _ => return Err(Error::missing_field_name_terminator()),
        }

        let s = str::from_utf8(buf).map_err(|_| Error::invalid_utf8())?;
        self.intern_name(s);
        Ok(s.to_string())
    }

    fn parse_shared_name(&mut self, reference: u16) -> Result<String, Error> {
        let s = self
            .shared_names
            .as_ref()
            .and_then(|c| c.get(reference))
            .ok_or_else(|| Error::invalid_shared_reference(reference))?;
        Ok(s.to_string())
    }

    fn parse_long_shared_name(&mut self) -> Result<String, Error> {
        let buf = self
            .reader
            .read(2)
            .ok_or_else(Error::incomplete_shared_name_reference)?;
        self.parse_shared_name(BigEndian::read_u16(buf))
    }

    fn parse_name(&mut self) -> Result<String, Error> {
        match self.parse_u8()? {
            0x20 => Ok(String::new()),
            0x30 => self.parse_long_shared_name(),
            0x34 => self.parse_long_name(),
            token @ 0x40..=0x7f => self.parse_shared_name(u16::from(token & 0x3f)),
            token @ 0x80..=0xff => self.parse_inline_name((token as usize & 0x3f) + 1),
            token => Err(Error::unknown_key_token(token)),
        }
    }
}

#[inline]
fn zigzag_i32(v: u32) -> i32 {
    ((v >> 1) as i32) ^ (-((v & 1) as i32))
}

#[inline]
fn zigzag_i64(v: u64) -> i64 {
    ((v >> 1) as i64) ^ (-((v & 1) as i64))
}

#[inline]
fn small_int(token: u8) -> i64 {
    // sign extend the low 5 bits
    i64::from(((token & 0x1f) << 3) as i8 >> 3)
}
