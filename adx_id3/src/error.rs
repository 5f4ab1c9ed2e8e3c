//! Contains the errors that can arise while reading or writing ADX headers
//!
//! The primary error is [`AdxError`]. The type of error is determined by [`ErrorKind`].
//!
//! NOTE: A missing ID3v2 tag is **not** an error. Readers return `Ok(None)` in that case.

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, AdxError>`
pub type Result<T> = std::result::Result<T, AdxError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// The magic value is not `0x8000`
	NotAnAdx,
	/// The input ended before a decoding step could complete
	///
	/// The message names the step (header, header size, header body, loop block, tag body).
	InsufficientData(&'static str),
	/// The header declares a version other than 3 or 4
	UnsupportedAdxVersion(u8),
	/// The rewritten header would not fit in the 16-bit (signed) header size field
	OffsetTooBig(usize),
	/// The frame size is too small to convert sample positions into byte positions
	BadFrameSize(u8),
	/// The loop block runs past the declared header size
	///
	/// This is only reported with [`ParsingMode::Strict`](crate::config::ParsingMode::Strict).
	SizeMismatch,
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
}

/// Errors that could occur within this crate
pub struct AdxError {
	pub(crate) kind: ErrorKind,
}

impl AdxError {
	/// Create an `AdxError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::error::{AdxError, ErrorKind};
	///
	/// let not_an_adx = AdxError::new(ErrorKind::NotAnAdx);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::error::{AdxError, ErrorKind};
	///
	/// let err = AdxError::new(ErrorKind::UnsupportedAdxVersion(5));
	/// if let ErrorKind::UnsupportedAdxVersion(version) = err.kind() {
	/// 	println!("Can't handle ADX v{version}");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for AdxError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::Io(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for AdxError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<std::io::Error> for AdxError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl Display for AdxError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),

			ErrorKind::NotAnAdx => write!(f, "Invalid magic header value, not an ADX file"),
			ErrorKind::InsufficientData(step) => {
				write!(f, "Not enough data to read the {step}")
			},
			ErrorKind::UnsupportedAdxVersion(version) => write!(
				f,
				"Found an unsupported ADX version ({version}), expected 3 or 4"
			),
			ErrorKind::OffsetTooBig(size) => write!(
				f,
				"Supplied data is too big, an ADX header of {size} bytes cannot fit"
			),
			ErrorKind::BadFrameSize(size) => {
				write!(f, "Encountered an invalid frame size ({size})")
			},
			ErrorKind::SizeMismatch => write!(
				f,
				"The loop block extends past the declared header size"
			),
		}
	}
}
