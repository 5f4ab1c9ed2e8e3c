//! Helpers for the forward-only sources and sinks used by the reader and writer

use crate::error::{AdxError, ErrorKind, Result};

use std::io::{Read, Write};

/// Fill `buf` completely, reporting a short read as [`ErrorKind::InsufficientData`]
///
/// `step` names what was being read, and ends up in the error message.
pub(crate) fn read_exact_or_insufficient<R>(
	reader: &mut R,
	buf: &mut [u8],
	step: &'static str,
) -> Result<()>
where
	R: Read,
{
	match reader.read_exact(buf) {
		Ok(()) => Ok(()),
		Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
			log::debug!("Input ended while reading the {step}");
			Err(AdxError::new(ErrorKind::InsufficientData(step)))
		},
		Err(e) => Err(e.into()),
	}
}

/// Append up to `max` bytes from `reader` to `buf`, stopping early at EOF
pub(crate) fn read_up_to<R>(reader: &mut R, buf: &mut Vec<u8>, max: u64) -> Result<usize>
where
	R: Read,
{
	Ok(reader.by_ref().take(max).read_to_end(buf)?)
}

/// Write `count` zero bytes
pub(crate) fn write_padding<W>(writer: &mut W, count: u64) -> Result<()>
where
	W: Write,
{
	let written = std::io::copy(&mut std::io::repeat(0).take(count), writer)?;
	debug_assert_eq!(written, count);

	Ok(())
}
