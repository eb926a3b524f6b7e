//! Encode a value as Smile data.
use crate::ser::string_cache::StringCache;
use crate::token;
use crate::value::Value;
use crate::Error;
use byteorder::{BigEndian, WriteBytesExt};
use std::io::Write;

mod string_cache;

/// Serializes a value into a byte buffer using the default encoder settings.
pub fn to_vec(value: &Value) -> Result<Vec<u8>, Error> {
    let mut buf = vec![];
    to_writer(&mut buf, value)?;
    Ok(buf)
}

/// Serializes a value into an IO stream using the default encoder settings.
pub fn to_writer<W>(writer: W, value: &Value) -> Result<(), Error>
where
    W: Write,
{
    let mut encoder = Encoder::new(writer)?;
    encoder.encode(value)
}

/// A builder for [`Encoder`]s.
pub struct Builder {
    shared_names: bool,
    shared_values: bool,
    raw_binary: bool,
}

impl Builder {
    /// Controls back-references for repeated object keys. Defaults to `true`.
    pub fn shared_names(&mut self, shared_names: bool) -> &mut Self {
        self.shared_names = shared_names;
        self
    }

    /// Controls back-references for repeated string values of up to 64 bytes. Defaults to `true`.
    pub fn shared_values(&mut self, shared_values: bool) -> &mut Self {
        self.shared_values = shared_values;
        self
    }

    /// Declares raw binary support in the header. Defaults to `false`.
    ///
    /// The flag only affects the header byte; the value model has no binary variant, so no raw binary token is
    /// ever written.
    pub fn raw_binary(&mut self, raw_binary: bool) -> &mut Self {
        self.raw_binary = raw_binary;
        self
    }

    /// Creates an `Encoder`, writing the four byte header to `writer`.
    pub fn build<W>(&self, mut writer: W) -> Result<Encoder<W>, Error>
    where
        W: Write,
    {
        let mut flags = 0;
        if self.shared_names {
            flags |= token::FLAG_SHARED_NAMES;
        }
        if self.shared_values {
            flags |= token::FLAG_SHARED_VALUES;
        }
        if self.raw_binary {
            flags |= token::FLAG_RAW_BINARY;
        }
        let buf = [b':', b')', b'\n', flags];
        writer.write_all(&buf).map_err(Error::io)?;

        Ok(Encoder {
            writer,
            shared_names: if self.shared_names {
                Some(StringCache::new())
            } else {
                None
            },
            shared_values: if self.shared_values {
                Some(StringCache::new())
            } else {
                None
            },
        })
    }
}

/// Serializes values into a Smile byte stream.
pub struct Encoder<W> {
    writer: W,
    shared_names: Option<StringCache>,
    shared_values: Option<StringCache>,
}

impl Encoder<()> {
    /// Returns a new [`Builder`] with default settings.
    pub fn builder() -> Builder {
        Builder {
            shared_names: true,
            shared_values: true,
            raw_binary: false,
        }
    }
}

impl<W> Encoder<W>
where
    W: Write,
{
    /// Creates an encoder with default settings, writing the header to `writer`.
    pub fn new(writer: W) -> Result<Self, Error> {
        Encoder::builder().build(writer)
    }

    /// Consumes the encoder, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes the end-of-stream marker and returns the inner writer.
    pub fn end(mut self) -> Result<W, Error> {
        self.writer
            .write_u8(token::END_OF_STREAM)
            .map_err(Error::io)?;

        Ok(self.writer)
    }

    /// Encodes a single value.
    ///
    /// The back-reference tables persist across calls, so values encoded by one encoder form a single document
    /// stream.
    pub fn encode(&mut self, value: &Value) -> Result<(), Error> {
        match value {
            Value::Null => self.writer.write_u8(token::NULL).map_err(Error::io),
            Value::Bool(v) => {
                let b = if *v { token::TRUE } else { token::FALSE };
                self.writer.write_u8(b).map_err(Error::io)
            }
            Value::Int(v) => self.encode_int(*v),
            Value::Float(v) => self.encode_float(*v),
            Value::Str(v) => self.encode_str(v),
            Value::Array(items) => {
                self.writer.write_u8(token::START_ARRAY).map_err(Error::io)?;
                for item in items {
                    self.encode(item)?;
                }
                self.writer.write_u8(token::END_ARRAY).map_err(Error::io)
            }
            Value::Object(fields) => {
                self.writer
                    .write_u8(token::START_OBJECT)
                    .map_err(Error::io)?;
                for (name, value) in fields {
                    self.encode_name(name)?;
                    self.encode(value)?;
                }
                self.writer.write_u8(token::END_OBJECT).map_err(Error::io)
            }
        }
    }

    fn encode_int(&mut self, v: i64) -> Result<(), Error> {
        if (-16..=15).contains(&v) {
            return self
                .writer
                .write_u8(token::SMALL_INT | (v as u8 & 0x1f))
                .map_err(Error::io);
        }

        match i32::try_from(v) {
            Ok(v) => {
                let zigzag = ((v << 1) ^ (v >> 31)) as u32;
                self.writer.write_u8(token::INT_32).map_err(Error::io)?;
                self.writer.write_u32::<BigEndian>(zigzag).map_err(Error::io)
            }
            Err(_) => {
                let zigzag = ((v << 1) ^ (v >> 63)) as u64;
                self.writer.write_u8(token::INT_64).map_err(Error::io)?;
                self.writer.write_u64::<BigEndian>(zigzag).map_err(Error::io)
            }
        }
    }

    fn encode_float(&mut self, v: f64) -> Result<(), Error> {
        self.writer.write_u8(token::FLOAT_64).map_err(Error::io)?;
        self.writer.write_f64::<BigEndian>(v).map_err(Error::io)
    }

    fn write_vint(&mut self, mut v: u64) -> Result<(), Error> {
        loop {
            if v < 0x80 {
                return self.writer.write_u8(v as u8).map_err(Error::io);
            }
            self.writer.write_u8(v as u8 | 0x80).map_err(Error::io)?;
            v >>= 7;
        }
    }

    fn write_shared_str(&mut self, v: &str) -> Result<bool, Error> {
        let shared_values = match &mut self.shared_values {
            Some(shared_values) => shared_values,
            None => return Ok(false),
        };

        if v.len() > token::MAX_SHARED_STRING_LEN {
            return Ok(false);
        }

        match shared_values.get(v) {
            Some(backref @ 0..=30) => {
                self.writer.write_u8(backref as u8 + 1).map_err(Error::io)?;
                Ok(true)
            }
            Some(backref) if backref <= token::MAX_SHARED_STRING_REF => {
                let buf = [token::LONG_SHARED_STRING, (backref - 31) as u8];
                self.writer.write_all(&buf).map_err(Error::io)?;
                Ok(true)
            }
            // entries past the last expressible reference only ever appear inline
            Some(_) => Ok(false),
            None => {
                shared_values.intern(v);
                Ok(false)
            }
        }
    }

    fn encode_str(&mut self, v: &str) -> Result<(), Error> {
        if v.is_empty() {
            return self.writer.write_u8(token::EMPTY_STRING).map_err(Error::io);
        }

        if self.write_shared_str(v)? {
            return Ok(());
        }

        if v.is_ascii() {
            if v.len() <= 32 {
                self.writer
                    .write_u8(token::TINY_ASCII + (v.len() as u8 - 1))
                    .map_err(Error::io)?;
                self.writer.write_all(v.as_bytes()).map_err(Error::io)?;
            } else if v.len() <= 64 {
                self.writer
                    .write_u8(token::SMALL_ASCII + (v.len() as u8 - 33))
                    .map_err(Error::io)?;
                self.writer.write_all(v.as_bytes()).map_err(Error::io)?;
            } else {
                self.write_long_str(token::LONG_ASCII, v)?;
            }
        } else {
            // a non-ASCII UTF-8 string is at least 2 bytes long
            if v.len() <= 33 {
                self.writer
                    .write_u8(token::TINY_UNICODE + (v.len() as u8 - 2))
                    .map_err(Error::io)?;
                self.writer.write_all(v.as_bytes()).map_err(Error::io)?;
            } else if v.len() <= 64 {
                self.writer
                    .write_u8(token::SMALL_UNICODE + (v.len() as u8 - 34))
                    .map_err(Error::io)?;
                self.writer.write_all(v.as_bytes()).map_err(Error::io)?;
            } else {
                self.write_long_str(token::LONG_UNICODE, v)?;
            }
        }

        Ok(())
    }

    fn write_long_str(&mut self, base: u8, v: &str) -> Result<(), Error> {
        self.writer.write_u8(base).map_err(Error::io)?;
        self.write_vint(v.len() as u64)?;
        self.writer.write_all(v.as_bytes()).map_err(Error::io)?;
        self.writer.write_u8(token::STRING_END).map_err(Error::io)
    }

    fn write_shared_name(&mut self, v: &str) -> Result<bool, Error> {
        let shared_names = match &mut self.shared_names {
            Some(shared_names) => shared_names,
            None => return Ok(false),
        };

        match shared_names.get(v) {
            Some(backref @ 0..=63) => {
                self.writer
                    .write_u8(token::KEY_SHORT_SHARED + backref as u8)
                    .map_err(Error::io)?;
                Ok(true)
            }
            Some(backref) => {
                self.writer
                    .write_u8(token::KEY_LONG_SHARED)
                    .map_err(Error::io)?;
                self.writer.write_u16::<BigEndian>(backref).map_err(Error::io)?;
                Ok(true)
            }
            None => {
                shared_names.intern(v);
                Ok(false)
            }
        }
    }

    fn encode_name(&mut self, v: &str) -> Result<(), Error> {
        if v.is_empty() {
            return self.writer.write_u8(token::EMPTY_STRING).map_err(Error::io);
        }

        if self.write_shared_name(v)? {
            return Ok(());
        }

        if v.len() <= 64 {
            let base = if v.is_ascii() {
                token::KEY_ASCII
            } else {
                token::KEY_UNICODE
            };
            self.writer
                .write_u8(base + (v.len() as u8 - 1))
                .map_err(Error::io)?;
            self.writer.write_all(v.as_bytes()).map_err(Error::io)?;
        } else {
            self.writer
                .write_u8(token::KEY_LONG_NAME)
                .map_err(Error::io)?;
            self.write_vint(v.len() as u64)?;
            self.writer.write_all(v.as_bytes()).map_err(Error::io)?;
            self.writer.write_u8(token::STRING_END).map_err(Error::io)?;
        }

        Ok(())
    }
}
