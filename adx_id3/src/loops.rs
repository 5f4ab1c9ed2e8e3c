//! The ADX loop block
//!
//! The loop block directly follows the base header:
//!
//! | Offset | Field             | Type |
//! |--------|-------------------|------|
//! | 0x00   | Alignment samples | u16  |
//! | 0x02   | Loop count        | u16  |
//! | 0x04   | Loop records      | ...  |
//!
//! Each loop record is 20 bytes, see [`LoopPoint`].

use crate::layout::{HeaderLayout, LoopLocation};
use crate::util::bytes::BigEndianFields;

/// Size of the alignment samples and loop count fields
pub const LOOP_BLOCK_PREFIX_SIZE: usize = 4;

/// Size of a single loop record
pub const LOOP_RECORD_SIZE: usize = 20;

/// Size of the loop block inserted into headers without one
pub const DUMMY_LOOP_BLOCK_SIZE: usize = LOOP_BLOCK_PREFIX_SIZE + LOOP_RECORD_SIZE;

/// A loop block with no alignment samples and a single, disabled, zeroed loop
pub(crate) const DUMMY_LOOP_BLOCK: [u8; DUMMY_LOOP_BLOCK_SIZE] = {
	let mut block = [0; DUMMY_LOOP_BLOCK_SIZE];
	block[3] = 1;
	block
};

// Offsets within a loop record
const RECORD_ENABLED: usize = 0x00;
const RECORD_START_SAMPLE: usize = 0x04;
const RECORD_START_BYTE: usize = 0x08;
const RECORD_END_SAMPLE: usize = 0x0C;
const RECORD_END_BYTE: usize = 0x10;

/// A single loop record
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopPoint {
	/// Non-zero if the loop is enabled
	pub enabled: u32,
	/// The first sample of the loop
	pub start_sample: i32,
	/// The file offset of the frame holding [`LoopPoint::start_sample`]
	pub start_byte: i32,
	/// The last sample of the loop
	pub end_sample: i32,
	/// The file offset of the frame holding [`LoopPoint::end_sample`]
	pub end_byte: i32,
}

impl LoopPoint {
	fn parse(record: &[u8]) -> Option<Self> {
		Some(Self {
			enabled: record.be_u32_at(RECORD_ENABLED)?,
			start_sample: record.be_i32_at(RECORD_START_SAMPLE)?,
			start_byte: record.be_i32_at(RECORD_START_BYTE)?,
			end_sample: record.be_i32_at(RECORD_END_SAMPLE)?,
			end_byte: record.be_i32_at(RECORD_END_BYTE)?,
		})
	}

	/// Whether the loop is enabled
	pub fn is_enabled(&self) -> bool {
		self.enabled != 0
	}
}

/// A decoded loop block
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoopBlock {
	/// Number of samples the loop start is pushed back by (version 3)
	pub alignment_samples: u16,
	/// The loop records
	///
	/// NOTE: Only the records that are actually present in the header are decoded, this may be
	///       fewer than the declared loop count.
	pub loops: Vec<LoopPoint>,
}

impl LoopBlock {
	/// Decode the loop block at [`HeaderLayout::loop_offset`]
	///
	/// Returns `None` if the header has no loop block.
	pub(crate) fn parse(data: &[u8], layout: HeaderLayout, location: LoopLocation) -> Option<Self> {
		if !location.has_loop {
			return None;
		}

		let alignment_samples = data.be_u16_at(layout.loop_offset)?;
		let loops = records(data, layout, location.loop_count)
			.filter_map(|offset| LoopPoint::parse(data.get(offset..)?))
			.collect();

		Some(Self {
			alignment_samples,
			loops,
		})
	}
}

/// The sample positions the alignment padding is derived from
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct AlignmentSource {
	pub(crate) alignment_samples: u16,
	pub(crate) loop_start_sample: i32,
}

impl AlignmentSource {
	/// Read the alignment samples and the start of the first loop
	///
	/// Missing fields (no loop block, or no records) read as `0`, which is exactly what the dummy
	/// loop block would hold.
	pub(crate) fn read(data: &[u8], layout: HeaderLayout, location: LoopLocation) -> Self {
		if !location.has_loop {
			return Self::default();
		}

		let loop_start_sample = match location.loop_count {
			0 => 0,
			_ => data
				.be_i32_at(layout.loop_offset + LOOP_BLOCK_PREFIX_SIZE + RECORD_START_SAMPLE)
				.unwrap_or_default(),
		};

		Self {
			alignment_samples: data.be_u16_at(layout.loop_offset).unwrap_or_default(),
			loop_start_sample,
		}
	}
}

/// Offsets of every loop record that is fully present in `data`
fn records(data: &[u8], layout: HeaderLayout, loop_count: u16) -> impl Iterator<Item = usize> {
	let first = layout.loop_offset + LOOP_BLOCK_PREFIX_SIZE;
	let available = data.len().saturating_sub(first) / LOOP_RECORD_SIZE;

	(0..usize::from(loop_count).min(available)).map(move |idx| first + idx * LOOP_RECORD_SIZE)
}

/// Move the byte offsets of every enabled loop forward by `delta`
///
/// Disabled records are left alone, their byte offsets are meaningless. Records that run past
/// the end of `data` are skipped.
pub(crate) fn shift_loop_offsets(
	data: &mut [u8],
	layout: HeaderLayout,
	loop_count: u16,
	delta: i32,
) {
	let offsets = records(data, layout, loop_count).collect::<Vec<_>>();

	for offset in offsets {
		let Some(loop_point) = LoopPoint::parse(&data[offset..]) else {
			continue;
		};

		if !loop_point.is_enabled() {
			log::debug!("Skipping disabled loop record at {offset:#X}");
			continue;
		}

		let start_byte = loop_point.start_byte.wrapping_add(delta);
		let end_byte = loop_point.end_byte.wrapping_add(delta);

		log::debug!(
			"Shifting loop record at {offset:#X}: start byte {} -> {start_byte}, end byte {} -> \
			 {end_byte}",
			loop_point.start_byte,
			loop_point.end_byte
		);

		data.set_be_i32_at(offset + RECORD_START_BYTE, start_byte);
		data.set_be_i32_at(offset + RECORD_END_BYTE, end_byte);
	}
}
