//! A Smile codec for JSON-style value trees.
//!
//! [Smile] is a binary data format created by the developers of the Jackson serialization library for Java. It is
//! designed to be a binary equivalent of JSON: more compact on the wire and cheaper to process, while representing
//! exactly the JSON data model.
//!
//! This crate encodes and decodes [`Value`] trees. [`to_vec`] serializes a value into a freshly allocated buffer and
//! [`from_slice`] parses one back, with object key order preserved end-to-end. [`Encoder::builder`] exposes the
//! header flags controlling back-references for repeated object keys (`shared_names`) and repeated short string
//! values (`shared_values`).
//!
//! ```
//! use smile_value::Value;
//!
//! let value = Value::from(vec![Value::from("hello"), Value::from(5)]);
//! let bytes = smile_value::to_vec(&value)?;
//! assert_eq!(smile_value::from_slice(&bytes)?, value);
//! # Ok::<(), smile_value::Error>(())
//! ```
//!
//! [Smile]: https://github.com/FasterXML/smile-format-specification
#![warn(missing_docs)]

#[doc(inline)]
pub use de::{from_slice, Decoder};
#[doc(inline)]
pub use error::{Error, ErrorKind};
#[doc(inline)]
pub use ser::{to_vec, to_writer, Encoder};
#[doc(inline)]
pub use value::{to_value, Value};

pub mod de;
mod error;
pub mod ser;
pub mod token;
pub mod value;
