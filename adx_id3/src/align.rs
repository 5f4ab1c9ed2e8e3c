//! Loop start sector alignment
//!
//! CRI's tooling expects the frame holding the loop start to begin on a CD-ROM sector boundary.
//! When the header grows, it has to be padded so that this still holds.
//!
//! Adapted from VGAudio by Alex Barney (MIT).

use crate::error::Result;
use crate::layout::AdxVersion;
use crate::macros::err;

/// Everything needed to compute the padding that follows the header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AlignmentParams {
	/// The header version
	pub version: AdxVersion,
	/// Size of a single frame, in bytes
	pub frame_size: u8,
	/// Number of channels
	pub channel_count: u8,
	/// The first sample of the loop
	pub loop_start_sample: i32,
	/// The loop block's alignment samples
	pub alignment_samples: u16,
	/// Size of everything preceding the padding (base header, loop block and tag)
	pub base_header_size: usize,
	/// The boundary to align to, `None` to skip alignment
	pub sector_alignment: Option<u16>,
}

/// Compute the number of padding bytes that follow the header
///
/// The padding places the frame holding the loop start on a sector boundary. This includes the
/// two bytes of the `(c)CRI` copyright string that precede the header size offset.
///
/// # Errors
///
/// `frame_size` is too small to hold any samples (<= 2)
///
/// # Examples
///
/// ```rust
/// use adx_id3::align::{AlignmentParams, alignment_padding};
/// use adx_id3::layout::AdxVersion;
///
/// # fn main() -> adx_id3::error::Result<()> {
/// let params = AlignmentParams {
/// 	version: AdxVersion::V4,
/// 	frame_size: 18,
/// 	channel_count: 2,
/// 	loop_start_sample: 0,
/// 	alignment_samples: 0,
/// 	base_header_size: 56,
/// 	sector_alignment: Some(2048),
/// };
///
/// // 56 + 4 = 60 bytes before the loop start, 1988 more to reach the sector boundary
/// assert_eq!(alignment_padding(&params)?, 1988);
/// # Ok(()) }
/// ```
pub fn alignment_padding(params: &AlignmentParams) -> Result<u64> {
	let frame_size = i64::from(params.frame_size);
	let samples_per_frame = frame_size * 2 - 4;
	if samples_per_frame <= 0 {
		err!(BadFrameSize(params.frame_size));
	}

	let loop_start_bytes = sample_count_to_byte_count(
		i64::from(params.loop_start_sample),
		frame_size,
		samples_per_frame,
	);

	let start_loop_offset = loop_start_bytes * i64::from(params.channel_count)
		+ params.base_header_size as i64
		+ 4;

	let Some(sector) = params.sector_alignment.map(i64::from) else {
		log::debug!("Sector alignment disabled, start loop offset: {start_loop_offset}");
		return Ok(0);
	};

	let mut padding = next_multiple(start_loop_offset, sector) - start_loop_offset;

	// Version 3 pushes the loop start one sector back for every full frame of alignment samples
	if params.version == AdxVersion::V3 {
		padding += i64::from(params.alignment_samples) / samples_per_frame * sector;
	}

	log::debug!("Start loop offset: {start_loop_offset}, alignment padding: {padding}");

	// `next_multiple` only moves forward, so this can't be negative
	Ok(padding as u64)
}

fn sample_count_to_byte_count(sample_count: i64, frame_size: i64, samples_per_frame: i64) -> i64 {
	let nibbles = sample_count_to_nibble_count(sample_count, frame_size, samples_per_frame);
	(nibbles / 2) + (nibbles & 1)
}

fn sample_count_to_nibble_count(sample_count: i64, frame_size: i64, samples_per_frame: i64) -> i64 {
	let nibbles_per_frame = frame_size * 2;

	let frames = sample_count / samples_per_frame;
	let extra_samples = sample_count % samples_per_frame;
	let extra_nibbles = if extra_samples == 0 {
		0
	} else {
		extra_samples + 4
	};

	nibbles_per_frame * frames + extra_nibbles
}

fn next_multiple(value: i64, multiple: i64) -> i64 {
	if multiple <= 0 || value % multiple == 0 {
		return value;
	}

	value + multiple - value % multiple
}
