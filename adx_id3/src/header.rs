//! The common ADX header
//!
//! Every ADX file (version 3 and 4 alike) starts with the same 20 byte prefix:
//!
//! | Offset | Field              | Type |
//! |--------|--------------------|------|
//! | 0x00   | Magic (`0x8000`)   | u16  |
//! | 0x02   | Header size        | u16  |
//! | 0x04   | Encoding type      | u8   |
//! | 0x05   | Frame size         | u8   |
//! | 0x06   | Bit depth          | u8   |
//! | 0x07   | Channel count      | u8   |
//! | 0x08   | Sample rate        | i32  |
//! | 0x0C   | Sample count       | i32  |
//! | 0x10   | Highpass frequency | i16  |
//! | 0x12   | Version            | u8   |
//! | 0x13   | Revision           | u8   |
//!
//! The header size counts the bytes *following* the size field, up to the start of the audio data.
//! The last 6 of those bytes hold the `(c)CRI` copyright string.

use crate::error::Result;
use crate::macros::err;
use crate::util::bytes::BigEndianFields;

/// The ADX magic value, stored big-endian at the start of every file
pub const ADX_MAGIC: u16 = 0x8000;

/// Size of the header prefix shared by every ADX version
pub const COMMON_HEADER_SIZE: usize = 20;

/// Length of the `(c)CRI` copyright string that ends every header
pub const COPYRIGHT_SIZE: usize = 6;

/// Number of copyright bytes (`(c`) that sit *before* the offset the header size points at
pub(crate) const COPYRIGHT_PREFIX_SIZE: usize = 2;

/// The largest header size that may be written
///
/// The field is 16 bits wide, but is treated as signed by CRI's tooling.
pub const MAX_HEADER_SIZE: usize = i16::MAX as usize;

/// Check the first 2 bytes of a file for [`ADX_MAGIC`]
pub(crate) fn verify_magic(magic: [u8; 2]) -> Result<()> {
	if u16::from_be_bytes(magic) != ADX_MAGIC {
		log::debug!("Invalid ADX magic: {:02X?}", magic);
		err!(NotAnAdx);
	}

	Ok(())
}

/// A decoded view of the common ADX header
///
/// This is decoded fresh from the caller's bytes on every operation and never owns them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AdxHeader {
	/// The magic value, always [`ADX_MAGIC`] once parsed
	pub magic: u16,
	/// Number of bytes following this field, up to the start of the audio data
	pub header_size: u16,
	/// The encoding type (3 = standard ADX, 4 = exponential scale, ...)
	pub encoding_type: u8,
	/// Size of a single frame, in bytes
	pub frame_size: u8,
	/// Bits per sample
	pub bit_depth: u8,
	/// Number of channels
	pub channel_count: u8,
	/// Sample rate, in Hz
	pub sample_rate: i32,
	/// Total number of samples per channel
	pub sample_count: i32,
	/// Highpass frequency
	pub highpass_frequency: i16,
	/// The header version, only 3 and 4 are supported
	pub version: u8,
	/// The header revision (flags)
	pub revision: u8,
}

impl AdxHeader {
	/// Decode the common header from the start of an ADX file
	///
	/// # Errors
	///
	/// * `data` doesn't start with [`ADX_MAGIC`]
	/// * `data` is shorter than [`COMMON_HEADER_SIZE`]
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::header::AdxHeader;
	///
	/// # fn main() -> adx_id3::error::Result<()> {
	/// let bytes = [
	/// 	0x80, 0x00, 0x00, 0x2C, 0x03, 0x12, 0x04, 0x02, 0x00, 0x00, 0xAC, 0x44, 0x00, 0x01, 0x00,
	/// 	0x00, 0x01, 0xF4, 0x04, 0x00,
	/// ];
	///
	/// let header = AdxHeader::parse(&bytes)?;
	/// assert_eq!(header.sample_rate, 44100);
	/// assert_eq!(header.channel_count, 2);
	/// assert_eq!(header.version, 4);
	/// # Ok(()) }
	/// ```
	pub fn parse(data: &[u8]) -> Result<Self> {
		let Some(magic) = data.be_u16_at(0) else {
			err!(InsufficientData("header"));
		};

		verify_magic(magic.to_be_bytes())?;

		let Some(header_size) = data.be_u16_at(2) else {
			err!(InsufficientData("header size"));
		};

		if data.len() < COMMON_HEADER_SIZE {
			err!(InsufficientData("header body"));
		}

		let (Some(sample_rate), Some(sample_count), Some(highpass_frequency)) =
			(data.be_i32_at(8), data.be_i32_at(12), data.be_i16_at(16))
		else {
			err!(InsufficientData("header body"));
		};

		Ok(Self {
			magic,
			header_size,
			encoding_type: data[4],
			frame_size: data[5],
			bit_depth: data[6],
			channel_count: data[7],
			sample_rate,
			sample_count,
			highpass_frequency,
			version: data[18],
			revision: data[19],
		})
	}

	/// The total number of bytes before the audio data starts
	pub fn data_offset(&self) -> usize {
		usize::from(self.header_size) + 4
	}
}
