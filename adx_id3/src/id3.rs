//! Structural ID3v2 tag detection
//!
//! Only the tag header and footer are inspected, frame contents are never validated.
//! See <https://id3.org/id3v2.4.0-structure>.

use crate::util::bytes::BigEndianFields;

/// Size of an ID3v2 header, and of its optional footer
pub const ID3V2_HEADER_SIZE: usize = 10;

const ID3V2_HEADER_MAGIC: u32 = 0x4944_3300; // "ID3\0"
const ID3V2_FOOTER_MAGIC: u32 = 0x3344_4900; // "3DI\0"

// The 4th byte is the major version, which isn't part of the signature
const SIGNATURE_MASK: u32 = 0xFFFF_FF00;

fn has_signature(data: &[u8], magic: u32) -> bool {
	data.be_u32_at(0)
		.is_some_and(|value| value & SIGNATURE_MASK == magic)
}

/// Get the total length of the ID3v2 tag at the start of `data`
///
/// The length includes the header, the tag body, and the footer (if one immediately follows the
/// body). Returns `None` if `data` does not start with a structurally valid ID3v2 header.
///
/// NOTE: The body itself is not required to be present in `data`. Callers should check the length
///       against what they have available.
///
/// # Examples
///
/// ```rust
/// use adx_id3::id3v2_tag_len;
///
/// // An ID3v2.4 header with an empty body
/// let tag = [b'I', b'D', b'3', 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
/// assert_eq!(id3v2_tag_len(&tag), Some(10));
///
/// // Not a tag
/// assert_eq!(id3v2_tag_len(b"(c)CRI\0\0\0\0"), None);
/// ```
pub fn id3v2_tag_len(data: &[u8]) -> Option<usize> {
	if data.len() < ID3V2_HEADER_SIZE || !has_signature(data, ID3V2_HEADER_MAGIC) {
		return None;
	}

	// [major, minor], neither can be 0xFF
	if data[3] == 0xFF || data[4] == 0xFF {
		log::debug!("ID3v2 header has an invalid version: {}.{}", data[3], data[4]);
		return None;
	}

	let size_bytes = &data[6..ID3V2_HEADER_SIZE];
	if size_bytes.iter().any(|&b| b >= 0x80) {
		log::debug!("ID3v2 header size is not synchsafe: {:02X?}", size_bytes);
		return None;
	}

	let body_size = size_bytes
		.iter()
		.fold(0_usize, |size, &b| (size << 7) | usize::from(b));

	let tag_len = ID3V2_HEADER_SIZE + body_size;

	let has_footer = data
		.get(tag_len..tag_len + ID3V2_HEADER_SIZE)
		.is_some_and(|footer| has_signature(footer, ID3V2_FOOTER_MAGIC));

	if has_footer {
		log::debug!("Found an ID3v2 footer");
		return Some(tag_len + ID3V2_HEADER_SIZE);
	}

	Some(tag_len)
}
