use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::header::{AdxHeader, verify_magic};
use crate::id3::id3v2_tag_len;
use crate::layout::{HeaderLayout, LoopLocation, locate_loop_block};
use crate::loops::LoopBlock;
use crate::macros::err;
use crate::util::io::{read_exact_or_insufficient, read_up_to};

use std::io::Read;

// The header size field doesn't cover the magic and itself
const SIZE_FIELD_END: usize = 4;

/// Everything known about an ADX header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderInfo {
	/// The common header
	pub header: AdxHeader,
	/// The version-specific layout
	pub layout: HeaderLayout,
	/// Where the loop block (and any ID3v2 tag) is
	pub location: LoopLocation,
	/// The loop block, if the header has one
	pub loop_block: Option<LoopBlock>,
}

/// Decode the header at the start of `data`
///
/// # Errors
///
/// * `data` is not an ADX file
/// * `data` is too short to hold the header
/// * The header version is unsupported
/// * See [`locate_loop_block`]
///
/// # Examples
///
/// ```rust
/// use adx_id3::config::ParseOptions;
/// use adx_id3::read_header_info;
///
/// # fn main() -> adx_id3::error::Result<()> {
/// # let adx = [0x80, 0x00, 0x00, 0x14, 0x03, 0x12, 0x04, 0x02, 0, 0, 0xAC, 0x44, 0, 0, 0, 0, 0x01, 0xF4, 0x03, 0x00, 0, 0, 0, 0];
/// let info = read_header_info(&adx, ParseOptions::new())?;
///
/// if let Some(loop_block) = &info.loop_block {
/// 	println!("Found {} loops", loop_block.loops.len());
/// }
/// # assert!(info.loop_block.is_none());
/// # Ok(()) }
/// ```
pub fn read_header_info(data: &[u8], options: ParseOptions) -> Result<HeaderInfo> {
	let region = header_region(data)?;

	let header = AdxHeader::parse(region)?;
	let layout = HeaderLayout::for_header(&header)?;
	let location = locate_loop_block(region, &header, layout, options.parsing_mode)?;

	Ok(HeaderInfo {
		header,
		layout,
		location,
		loop_block: LoopBlock::parse(region, layout, location),
	})
}

/// Read an ID3v2 tag from an ADX file
///
/// `reader` is expected to be at the start of the file. Only the header is read, the reader is
/// left just past it.
///
/// This will return `Ok(None)` if the file has no tag. Files without a loop block can't hold a tag.
///
/// # Errors
///
/// * The input is not an ADX file
/// * The input ends before the header does
/// * The header version is unsupported
/// * The tag extends past the header (not with [`ParsingMode::Relaxed`])
/// * [`std::io::Error`]
///
/// # Examples
///
/// ```rust,no_run
/// use adx_id3::config::ParseOptions;
/// use adx_id3::read_tag;
/// use std::fs::File;
///
/// # fn main() -> adx_id3::error::Result<()> {
/// let mut file = File::open("music.adx")?;
///
/// match read_tag(&mut file, ParseOptions::new())? {
/// 	Some(tag) => println!("Found a {} byte ID3v2 tag", tag.len()),
/// 	None => println!("No tag"),
/// }
/// # Ok(()) }
/// ```
pub fn read_tag<R>(reader: &mut R, options: ParseOptions) -> Result<Option<Vec<u8>>>
where
	R: Read,
{
	let mut magic = [0; 2];
	read_exact_or_insufficient(reader, &mut magic, "header")?;
	verify_magic(magic)?;

	let mut header_size = [0; 2];
	read_exact_or_insufficient(reader, &mut header_size, "header size")?;

	let declared_size = usize::from(u16::from_be_bytes(header_size));
	log::debug!("Reading ADX header, header size: {declared_size}");

	let mut header = Vec::with_capacity(declared_size + SIZE_FIELD_END);
	header.extend(magic);
	header.extend(header_size);
	header.resize(declared_size.max(SIZE_FIELD_END), 0);

	read_exact_or_insufficient(reader, &mut header[SIZE_FIELD_END..], "header body")?;

	// The header actually ends 4 bytes after what the header size covers (the rest of the copyright)
	read_up_to(reader, &mut header, SIZE_FIELD_END as u64)?;

	Ok(find_tag(&header, options)?.map(<[u8]>::to_vec))
}

/// Read an ID3v2 tag from an in-memory ADX file
///
/// This is the same as [`read_tag`], operating on a slice rather than a reader. `data` only needs
/// to hold the header, though the entire file can be provided.
///
/// # Errors
///
/// See [`read_tag`]
///
/// # Examples
///
/// ```rust
/// use adx_id3::config::ParseOptions;
/// use adx_id3::read_tag_from_slice;
///
/// # fn main() -> adx_id3::error::Result<()> {
/// # let adx = [0x80, 0x00, 0x00, 0x14, 0x03, 0x12, 0x04, 0x02, 0, 0, 0xAC, 0x44, 0, 0, 0, 0, 0x01, 0xF4, 0x03, 0x00, 0, 0, 0, 0];
/// // This file has no loop, and therefore no tag
/// assert!(read_tag_from_slice(&adx, ParseOptions::new())?.is_none());
/// # Ok(()) }
/// ```
pub fn read_tag_from_slice(data: &[u8], options: ParseOptions) -> Result<Option<&[u8]>> {
	find_tag(header_region(data)?, options)
}

/// Restrict `data` to the header, verifying that the header is fully present
fn header_region(data: &[u8]) -> Result<&[u8]> {
	let Some(magic) = data.get(..2) else {
		err!(InsufficientData("header"));
	};

	verify_magic([magic[0], magic[1]])?;

	let Some(header_size) = data.get(2..SIZE_FIELD_END) else {
		err!(InsufficientData("header size"));
	};

	let declared_size = usize::from(u16::from_be_bytes([header_size[0], header_size[1]]));
	if declared_size > data.len() {
		err!(InsufficientData("header body"));
	}

	let end = (declared_size + SIZE_FIELD_END).min(data.len());
	Ok(&data[..end])
}

fn find_tag(header_region: &[u8], options: ParseOptions) -> Result<Option<&[u8]>> {
	let header = AdxHeader::parse(header_region)?;
	let layout = HeaderLayout::for_header(&header)?;
	let location = locate_loop_block(header_region, &header, layout, options.parsing_mode)?;

	if !location.has_loop {
		log::debug!("ADX header has no loop block, no tag present");
		return Ok(None);
	}

	let tag_start = location.header_extent;
	let Some(id3v2_region) = header_region.get(tag_start..) else {
		log::debug!("Loop block ends past the header, no tag present");
		return Ok(None);
	};

	let Some(tag_len) = id3v2_tag_len(id3v2_region) else {
		log::debug!("No ID3v2 tag found at offset {tag_start}");
		return Ok(None);
	};

	let Some(tag) = id3v2_region.get(..tag_len) else {
		if options.parsing_mode == ParsingMode::Relaxed {
			log::warn!(
				"ID3v2 tag ({tag_len} bytes) extends past the header ({} bytes available), \
				 discarding",
				id3v2_region.len()
			);
			return Ok(None);
		}

		err!(InsufficientData("tag body"));
	};

	log::debug!("Found a {tag_len} byte ID3v2 tag at offset {tag_start}");

	Ok(Some(tag))
}
