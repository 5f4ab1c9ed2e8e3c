//! Big-endian field access over header buffers
//!
//! Every multi-byte ADX field is big-endian. All reads and writes go through here, so the byte
//! order only has to be right once.

use byteorder::{BigEndian, ByteOrder};

pub(crate) trait BigEndianFields {
	fn be_u16_at(&self, offset: usize) -> Option<u16>;
	fn be_u32_at(&self, offset: usize) -> Option<u32>;
	fn be_i32_at(&self, offset: usize) -> Option<i32>;
	fn be_i16_at(&self, offset: usize) -> Option<i16>;

	/// Returns `false` if the field is out of bounds, leaving the buffer untouched
	fn set_be_u16_at(&mut self, offset: usize, value: u16) -> bool;
	/// Returns `false` if the field is out of bounds, leaving the buffer untouched
	fn set_be_i32_at(&mut self, offset: usize, value: i32) -> bool;
}

impl BigEndianFields for [u8] {
	fn be_u16_at(&self, offset: usize) -> Option<u16> {
		self.get(offset..offset.checked_add(2)?)
			.map(BigEndian::read_u16)
	}

	fn be_u32_at(&self, offset: usize) -> Option<u32> {
		self.get(offset..offset.checked_add(4)?)
			.map(BigEndian::read_u32)
	}

	fn be_i32_at(&self, offset: usize) -> Option<i32> {
		self.get(offset..offset.checked_add(4)?)
			.map(BigEndian::read_i32)
	}

	fn be_i16_at(&self, offset: usize) -> Option<i16> {
		self.get(offset..offset.checked_add(2)?)
			.map(BigEndian::read_i16)
	}

	fn set_be_u16_at(&mut self, offset: usize, value: u16) -> bool {
		let Some(end) = offset.checked_add(2) else {
			return false;
		};

		match self.get_mut(offset..end) {
			Some(field) => {
				BigEndian::write_u16(field, value);
				true
			},
			None => false,
		}
	}

	fn set_be_i32_at(&mut self, offset: usize, value: i32) -> bool {
		let Some(end) = offset.checked_add(4) else {
			return false;
		};

		match self.get_mut(offset..end) {
			Some(field) => {
				BigEndian::write_i32(field, value);
				true
			},
			None => false,
		}
	}
}
