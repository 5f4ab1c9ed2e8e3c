/// Options to control how ADX headers are parsed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use adx_id3::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		self
	}
}

/// The parsing strictness mode
///
/// This can be set with [`ParseOptions::parsing_mode`] or [`WriteOptions::parsing_mode`](crate::config::WriteOptions::parsing_mode).
///
/// # Examples
///
/// ```rust
/// use adx_id3::config::{ParseOptions, ParsingMode};
/// use adx_id3::read_tag_from_slice;
///
/// # fn main() -> adx_id3::error::Result<()> {
/// # let adx = [0x80, 0x00, 0x00, 0x14, 0x03, 0x12, 0x04, 0x02, 0, 0, 0xAC, 0x44, 0, 0, 0, 0, 0x01, 0xF4, 0x03, 0x00, 0, 0, 0, 0];
/// // We only want to read headers with a consistent loop block
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// let tag = read_tag_from_slice(&adx, parsing_options)?;
/// # assert!(tag.is_none());
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// ## Examples of behavior
	///
	/// * A loop count that runs past the declared header size - The parser will error
	/// * A tag body that runs past the header - The parser will error
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// ## Examples of behavior
	///
	/// * A loop count that runs past the declared header size - Accepted as-is
	/// * A tag body that runs past the header - The parser will error
	#[default]
	BestAttempt,
	/// Least eager to error
	///
	/// ## Examples of behavior
	///
	/// * A loop count that runs past the declared header size - Accepted as-is
	/// * A tag body that runs past the header - Treated as if no tag is present
	Relaxed,
}
