use crate::config::ParsingMode;

/// Options to control how ADX headers are rewritten
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) sector_alignment: Option<u16>,
	pub(crate) parsing_mode: ParsingMode,
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	sector_alignment: Some(2048),
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl WriteOptions {
	/// Sector size of a CD-ROM, in bytes
	pub const DISC_SECTOR_ALIGNMENT: u16 = 2048;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			sector_alignment: Some(Self::DISC_SECTOR_ALIGNMENT),
			parsing_mode: ParsingMode::BestAttempt,
		}
	}

	/// The boundary the loop start is aligned to, in bytes
	///
	/// A value of `0` disables alignment entirely. The header will then only grow by the
	/// bytes needed to hold the tag.
	///
	/// NOTE: Values other than [`WriteOptions::DISC_SECTOR_ALIGNMENT`] produce files that
	///       CRI's own tooling will not consider aligned.
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::config::WriteOptions;
	///
	/// // This file is never going to be burned onto a disc
	/// let options = WriteOptions::new().sector_alignment(0);
	/// ```
	pub fn sector_alignment(mut self, sector_alignment: u16) -> Self {
		match sector_alignment {
			0 => self.sector_alignment = None,
			_ => self.sector_alignment = Some(sector_alignment),
		}
		self
	}

	/// The parsing mode used while decoding the source header
	///
	/// See [`ParsingMode`] for details.
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::config::{ParsingMode, WriteOptions};
	///
	/// let options = WriteOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		self
	}
}
