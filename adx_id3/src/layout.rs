//! Version-specific header layout
//!
//! Version 3 and 4 headers only differ in what sits between the common header and the loop
//! block. Version 4 stores a sample history for each channel, followed by 4 bytes of padding.
//!
//! The layout is resolved once per header and then threaded through everything that needs to
//! know where the loop block starts.

use crate::config::ParsingMode;
use crate::error::Result;
use crate::header::{AdxHeader, COMMON_HEADER_SIZE, COPYRIGHT_PREFIX_SIZE};
use crate::loops::{LOOP_BLOCK_PREFIX_SIZE, LOOP_RECORD_SIZE};
use crate::macros::err;
use crate::util::bytes::BigEndianFields;

/// A supported ADX header version
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdxVersion {
	/// Version 3
	V3,
	/// Version 4
	V4,
}

impl AdxVersion {
	/// Map the raw version byte, if supported
	pub fn from_u8(version: u8) -> Option<Self> {
		match version {
			3 => Some(Self::V3),
			4 => Some(Self::V4),
			_ => None,
		}
	}
}

/// Where the loop block lives for a given header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HeaderLayout {
	/// The header version
	pub version: AdxVersion,
	/// Offset of the loop block (alignment samples) from the start of the file
	///
	/// This is also the size of the base header, the part every file has regardless of looping.
	pub loop_offset: usize,
}

impl HeaderLayout {
	/// Resolve the layout for a decoded header
	///
	/// # Errors
	///
	/// The header version is neither 3 nor 4
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::header::AdxHeader;
	/// use adx_id3::layout::{AdxVersion, HeaderLayout};
	///
	/// # fn main() -> adx_id3::error::Result<()> {
	/// # let bytes = [0x80, 0x00, 0x00, 0x2C, 0x03, 0x12, 0x04, 0x02, 0, 0, 0xAC, 0x44, 0, 1, 0, 0, 0x01, 0xF4, 0x04, 0x00];
	/// let header = AdxHeader::parse(&bytes)?;
	/// let layout = HeaderLayout::for_header(&header)?;
	///
	/// assert_eq!(layout.version, AdxVersion::V4);
	/// // Stereo, 8 bytes of history + 4 bytes of padding
	/// assert_eq!(layout.loop_offset, 32);
	/// # Ok(()) }
	/// ```
	pub fn for_header(header: &AdxHeader) -> Result<Self> {
		let Some(version) = AdxVersion::from_u8(header.version) else {
			log::debug!("Encountered unsupported ADX version {}", header.version);
			err!(UnsupportedAdxVersion(header.version));
		};

		let loop_offset = match version {
			AdxVersion::V3 => COMMON_HEADER_SIZE,
			AdxVersion::V4 => {
				let history_size = (usize::from(header.channel_count) * 4).max(8);
				COMMON_HEADER_SIZE + history_size + 4
			},
		};

		Ok(Self {
			version,
			loop_offset,
		})
	}
}

/// The result of locating the loop block in a header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LoopLocation {
	/// The byte offset immediately after the loop block
	///
	/// If there is no loop block, this is the end of the base header ([`HeaderLayout::loop_offset`]).
	/// An ID3v2 tag, if any, begins here.
	pub header_extent: usize,
	/// Whether the header contains a loop block
	pub has_loop: bool,
	/// Number of loop records, `0` if there is no loop block
	pub loop_count: u16,
}

/// Find the end of the loop block
///
/// `data` is the header as read from the start of the file. Only the loop block prefix
/// (alignment samples and loop count) has to be present.
///
/// NOTE: The loop count isn't checked against the header size, a loop block may extend past it.
///       Use [`ParsingMode::Strict`] to reject those headers.
///
/// # Errors
///
/// * The loop block prefix lies outside of `data`
/// * `parsing_mode` is [`ParsingMode::Strict`], and the loop block runs past the header size
pub fn locate_loop_block(
	data: &[u8],
	header: &AdxHeader,
	layout: HeaderLayout,
	parsing_mode: ParsingMode,
) -> Result<LoopLocation> {
	let base = layout.loop_offset;
	let header_size = usize::from(header.header_size);

	if base + LOOP_BLOCK_PREFIX_SIZE >= header_size {
		log::debug!("Header size ({header_size}) too small for a loop block");
		return Ok(LoopLocation {
			header_extent: base,
			has_loop: false,
			loop_count: 0,
		});
	}

	let Some(loop_count) = data.be_u16_at(base + 2) else {
		err!(InsufficientData("loop block"));
	};

	let header_extent = base + LOOP_BLOCK_PREFIX_SIZE + usize::from(loop_count) * LOOP_RECORD_SIZE;
	// The loop block has to end before the copyright string does
	if header_extent + COPYRIGHT_PREFIX_SIZE > header_size {
		log::warn!(
			"Loop block ({loop_count} loops) extends past the header size ({header_extent} > \
			 {})",
			header_size.saturating_sub(COPYRIGHT_PREFIX_SIZE)
		);

		if parsing_mode == ParsingMode::Strict {
			err!(SizeMismatch);
		}
	}

	log::debug!("Found a loop block with {loop_count} loops, header extent: {header_extent}");

	Ok(LoopLocation {
		header_extent,
		has_loop: true,
		loop_count,
	})
}
