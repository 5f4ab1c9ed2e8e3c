//! Read and embed ID3v2 tags in CRI ADX headers.
//!
//! ADX has no metadata of its own. A tag can still be stored in the header, directly after the loop
//! block, where decoders will skip over it. This crate finds tags placed there, and rewrites files
//! to hold new ones while keeping the loop start sector aligned.
//!
//! Only the ID3v2 header (and optional footer) is inspected, tags are otherwise treated as opaque
//! bytes. Use an ID3v2 library to build or decode them.
//!
//! # Supported Versions
//!
//! Headers of version 3 and 4 are supported. All other versions are rejected.
//!
//! # Examples
//!
//! ## Reading a tag
//!
//! ```rust,no_run
//! # fn main() -> adx_id3::error::Result<()> {
//! use adx_id3::config::ParseOptions;
//! use adx_id3::read_tag;
//! use std::fs::File;
//!
//! let mut file = File::open("music.adx")?;
//! if let Some(tag) = read_tag(&mut file, ParseOptions::new())? {
//! 	println!("Found a {} byte ID3v2 tag", tag.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Embedding a tag
//!
//! The source file is never modified in place, the tagged file is written to a separate sink.
//!
//! ```rust,no_run
//! # fn main() -> adx_id3::error::Result<()> {
//! use adx_id3::config::WriteOptions;
//! use adx_id3::write_tagged;
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//!
//! let tag = std::fs::read("tag.id3")?;
//!
//! let mut input = BufReader::new(File::open("music.adx")?);
//! let mut output = BufWriter::new(File::create("music_tagged.adx")?);
//!
//! write_tagged(&mut input, &mut output, &tag, WriteOptions::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting a header
//!
//! ```rust,no_run
//! # fn main() -> adx_id3::error::Result<()> {
//! use adx_id3::config::ParseOptions;
//! use adx_id3::read_header_info;
//!
//! let data = std::fs::read("music.adx")?;
//! let info = read_header_info(&data, ParseOptions::new())?;
//!
//! println!("ADX version {:?}, {} channels", info.layout.version, info.header.channel_count);
//! if let Some(loop_block) = info.loop_block {
//! 	for loop_point in loop_block.loops.iter().filter(|l| l.is_enabled()) {
//! 		println!("Loop: {} -> {}", loop_point.start_sample, loop_point.end_sample);
//! 	}
//! }
//! # Ok(())
//! # }
//! ```

pub mod align;
pub mod config;
pub mod error;
pub mod header;
pub mod id3;
pub mod layout;
pub mod loops;
pub(crate) mod macros;
mod read;
mod util;
mod write;

pub use crate::id3::id3v2_tag_len;
pub use crate::read::{HeaderInfo, read_header_info, read_tag, read_tag_from_slice};
pub use crate::write::write_tagged;
