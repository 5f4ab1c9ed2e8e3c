use crate::align::{AlignmentParams, alignment_padding};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::header::{
	AdxHeader, COMMON_HEADER_SIZE, COPYRIGHT_PREFIX_SIZE, MAX_HEADER_SIZE, verify_magic,
};
use crate::layout::{HeaderLayout, locate_loop_block};
use crate::loops::{AlignmentSource, DUMMY_LOOP_BLOCK, DUMMY_LOOP_BLOCK_SIZE, shift_loop_offsets};
use crate::macros::err;
use crate::util::bytes::BigEndianFields;
use crate::util::io::{read_exact_or_insufficient, write_padding};

use std::io::{Read, Write};

/// Write an ADX file with an embedded ID3v2 tag
///
/// `reader` is expected to be at the start of an existing ADX file. The rewritten file is written
/// to `writer`, with `tag` placed directly after the header's loop block. The audio data is copied
/// over untouched.
///
/// Headers without a loop block get a disabled dummy loop, since a tag can only be found after one.
/// The header is padded so that the loop start remains aligned to a sector boundary (see
/// [`WriteOptions::sector_alignment`]), and the byte offsets of any enabled loops are moved
/// accordingly.
///
/// `tag` is written as-is, and may be empty.
///
/// NOTE: Nothing is written to `writer` until the new header is complete. Once the audio data is
///       being copied, errors will leave `writer` with a partial file.
///
/// # Errors
///
/// * `reader` is not an ADX file
/// * `reader` ends before the header does
/// * The header version is unsupported
/// * The new header would be larger than [`MAX_HEADER_SIZE`]
/// * The frame size is too small to align the loop start
/// * [`std::io::Error`]
///
/// # Examples
///
/// ```rust,no_run
/// use adx_id3::config::WriteOptions;
/// use adx_id3::write_tagged;
/// use std::fs::File;
/// use std::io::{BufReader, BufWriter};
///
/// # fn main() -> adx_id3::error::Result<()> {
/// let tag = std::fs::read("tag.id3")?;
///
/// let mut input = BufReader::new(File::open("music.adx")?);
/// let mut output = BufWriter::new(File::create("music_tagged.adx")?);
///
/// write_tagged(&mut input, &mut output, &tag, WriteOptions::new())?;
/// # Ok(()) }
/// ```
pub fn write_tagged<R, W>(
	reader: &mut R,
	writer: &mut W,
	tag: &[u8],
	options: WriteOptions,
) -> Result<()>
where
	R: Read,
	W: Write,
{
	let mut magic = [0; 2];
	read_exact_or_insufficient(reader, &mut magic, "header")?;
	verify_magic(magic)?;

	let mut header_size = [0; 2];
	read_exact_or_insufficient(reader, &mut header_size, "header size")?;

	let original_header_size = usize::from(u16::from_be_bytes(header_size));
	log::debug!("Rewriting ADX header, original header size: {original_header_size}");

	// Everything up to the copyright string is kept in memory, with room for a dummy loop block.
	// The copyright string itself is copied along with the audio data.
	let Some(header_len) = original_header_size.checked_sub(COPYRIGHT_PREFIX_SIZE) else {
		err!(InsufficientData("header body"));
	};

	if header_len < COMMON_HEADER_SIZE {
		err!(InsufficientData("header body"));
	}

	let mut header_bytes = Vec::with_capacity(header_len + DUMMY_LOOP_BLOCK_SIZE);
	header_bytes.extend(magic);
	header_bytes.extend(header_size);
	header_bytes.resize(header_len, 0);

	read_exact_or_insufficient(reader, &mut header_bytes[4..], "header body")?;

	let header = AdxHeader::parse(&header_bytes)?;
	let layout = HeaderLayout::for_header(&header)?;
	let location = locate_loop_block(&header_bytes, &header, layout, options.parsing_mode)?;

	let header_extent = location.header_extent;
	if header_extent > header_bytes.len() {
		log::debug!(
			"Loop block ends at {header_extent}, only {} header bytes are available",
			header_bytes.len()
		);
		err!(InsufficientData("loop block"));
	}

	let alignment_source = AlignmentSource::read(&header_bytes, layout, location);

	// Anything between the loop block and the copyright string (an old tag, padding) is dropped
	header_bytes.truncate(header_extent);

	if !location.has_loop {
		log::debug!("Header has no loop block, inserting a dummy loop");
		header_bytes.extend_from_slice(&DUMMY_LOOP_BLOCK);
	}

	let base_header_size = header_bytes.len() + tag.len();
	let mut padding = alignment_padding(&AlignmentParams {
		version: layout.version,
		frame_size: header.frame_size,
		channel_count: header.channel_count,
		loop_start_sample: alignment_source.loop_start_sample,
		alignment_samples: alignment_source.alignment_samples,
		base_header_size,
		sector_alignment: options.sector_alignment,
	})?;

	let copyright_prefix_size = COPYRIGHT_PREFIX_SIZE as u64;
	if padding < copyright_prefix_size {
		let missing = copyright_prefix_size - padding;
		padding += match options.sector_alignment {
			// Whole sectors only, so the loop start stays aligned
			Some(sector) => {
				let sector = u64::from(sector);
				let extra = missing.div_ceil(sector) * sector;
				log::warn!(
					"Alignment padding ({padding}) can't hold the copyright prefix, adding {extra} \
					 bytes"
				);
				extra
			},
			None => missing,
		};
	}

	let new_header_size = (base_header_size as u64).saturating_add(padding);
	if new_header_size > MAX_HEADER_SIZE as u64 {
		log::debug!("New header size ({new_header_size}) exceeds {MAX_HEADER_SIZE}");
		err!(OffsetTooBig(
			usize::try_from(new_header_size).unwrap_or(usize::MAX)
		));
	}

	// Checked above, fits in an i16
	let new_header_size = new_header_size as u16;
	header_bytes.set_be_u16_at(2, new_header_size);

	let delta = i32::from(new_header_size) - original_header_size as i32;
	if delta > 0 && location.has_loop {
		shift_loop_offsets(&mut header_bytes, layout, location.loop_count, delta);
	}

	log::debug!(
		"New header size: {new_header_size} (tag: {} bytes, padding: {padding} bytes)",
		tag.len()
	);

	writer.write_all(&header_bytes)?;
	writer.write_all(tag)?;
	write_padding(writer, padding - copyright_prefix_size)?;

	// The copyright string, followed by the audio data
	let copied = std::io::copy(reader, writer)?;
	log::debug!("Copied {copied} bytes of audio data");

	Ok(())
}
