use crate::util::{AdxBuilder, FRAME_SIZE, Loop, id3v2_tag, id3v2_tag_with_footer, temp_file};
use adx_id3::align::{AlignmentParams, alignment_padding};
use adx_id3::config::{ParseOptions, ParsingMode, WriteOptions};
use adx_id3::error::ErrorKind;
use adx_id3::header::COPYRIGHT_SIZE;
use adx_id3::layout::AdxVersion;
use adx_id3::{read_header_info, read_tag, read_tag_from_slice, write_tagged};

use std::io::Seek;

fn write(input: &[u8], tag: &[u8], options: WriteOptions) -> Vec<u8> {
	let mut output = Vec::new();
	write_tagged(&mut &input[..], &mut output, tag, options).unwrap();
	output
}

#[test_log::test]
fn round_trip() {
	let loops = [Loop::enabled(0, 2048)];
	let builders = [
		AdxBuilder::new(3, 1),
		AdxBuilder::new(3, 2).looped(0, &loops),
		AdxBuilder::new(4, 2),
		AdxBuilder::new(4, 2).looped(0, &loops),
		AdxBuilder::new(4, 6).looped(0, &loops),
	];

	for builder in builders {
		let input = builder.build();

		for tag in [id3v2_tag(0), id3v2_tag(200), id3v2_tag_with_footer()] {
			let output = write(&input, &tag, WriteOptions::new());

			assert_eq!(
				read_tag_from_slice(&output, ParseOptions::new()).unwrap(),
				Some(&tag[..])
			);
			assert_eq!(
				read_tag(&mut &output[..], ParseOptions::new()).unwrap(),
				Some(tag)
			);

			// The copyright string and audio are carried over untouched
			let info = read_header_info(&output, ParseOptions::new()).unwrap();
			let data_offset = info.header.data_offset();
			assert_eq!(&output[data_offset - COPYRIGHT_SIZE..data_offset], b"(c)CRI");
			assert_eq!(&output[data_offset..], builder.audio());
		}
	}
}

#[test_log::test]
fn common_header_is_preserved() {
	let input = AdxBuilder::new(4, 2).looped(0, &[Loop::enabled(0, 2048)]).build();
	let output = write(&input, &id3v2_tag(10), WriteOptions::new());

	let before = read_header_info(&input, ParseOptions::new()).unwrap().header;
	let after = read_header_info(&output, ParseOptions::new()).unwrap().header;

	assert_ne!(before.header_size, after.header_size);
	assert_eq!(&input[..2], &output[..2]);
	assert_eq!(&input[4..32], &output[4..32]);
	assert_eq!(
		(before.sample_rate, before.sample_count, before.channel_count),
		(after.sample_rate, after.sample_count, after.channel_count)
	);
}

#[test_log::test]
fn dummy_loop_is_disabled() {
	let input = AdxBuilder::new(3, 1).build();
	let output = write(&input, &id3v2_tag(5), WriteOptions::new());

	let info = read_header_info(&output, ParseOptions::new()).unwrap();
	assert!(info.location.has_loop);
	assert_eq!(info.location.loop_count, 1);

	let loop_block = info.loop_block.unwrap();
	assert_eq!(loop_block.alignment_samples, 0);
	assert_eq!(loop_block.loops.len(), 1);

	let dummy = loop_block.loops[0];
	assert!(!dummy.is_enabled());
	assert_eq!(
		(dummy.start_sample, dummy.start_byte, dummy.end_sample, dummy.end_byte),
		(0, 0, 0, 0)
	);
}

#[test_log::test]
fn opaque_tag_length() {
	let input = AdxBuilder::new(3, 1).build();
	let tag = (0..128_u32).map(|i| (i * 37 + 11) as u8).collect::<Vec<_>>();

	let output = write(&input, &tag, WriteOptions::new());

	// Common header + dummy loop block + tag
	let base_header_size = 20 + 24 + 128;
	let padding = alignment_padding(&AlignmentParams {
		version: AdxVersion::V3,
		frame_size: FRAME_SIZE,
		channel_count: 1,
		loop_start_sample: 0,
		alignment_samples: 0,
		base_header_size,
		sector_alignment: Some(WriteOptions::DISC_SECTOR_ALIGNMENT),
	})
	.unwrap();

	let info = read_header_info(&output, ParseOptions::new()).unwrap();
	assert_eq!(
		u64::from(info.header.header_size),
		base_header_size as u64 + padding
	);

	let input_info = read_header_info(&input, ParseOptions::new()).unwrap();
	let audio_len = input.len() - input_info.header.data_offset();
	assert_eq!(output.len(), info.header.data_offset() + audio_len);
	assert_eq!(&output[44..172], &tag[..]);

	// Not an ID3v2 tag, so it can't be found again
	assert!(
		read_tag_from_slice(&output, ParseOptions::new())
			.unwrap()
			.is_none()
	);
}

#[test_log::test]
fn loop_start_stays_aligned() {
	let loop_start_sample = 1000;
	// 1000 samples at 18 byte frames = 564 bytes per channel
	let loop_start_bytes = 564 * 2;

	let input = AdxBuilder::new(4, 2)
		.looped(0, &[Loop::enabled(loop_start_sample, 4096)])
		.build();

	for body_len in [0, 50, 3000] {
		let output = write(&input, &id3v2_tag(body_len), WriteOptions::new());

		let info = read_header_info(&output, ParseOptions::new()).unwrap();
		assert_eq!(
			(info.header.data_offset() + loop_start_bytes) % 2048,
			0,
			"{body_len} byte tag body"
		);
	}
}

#[test_log::test]
fn loop_offsets_shift() {
	let input = AdxBuilder::new(4, 2)
		.looped(0, &[
			Loop::enabled(0, 4096),
			Loop {
				enabled: false,
				start_sample: 0,
				start_byte: 100,
				end_sample: 0,
				end_byte: 200,
			},
		])
		.build();

	// 40 byte body, 50 byte tag
	let output = write(&input, &id3v2_tag(40), WriteOptions::new());

	let before = read_header_info(&input, ParseOptions::new()).unwrap();
	let after = read_header_info(&output, ParseOptions::new()).unwrap();

	let delta = i32::from(after.header.header_size) - i32::from(before.header.header_size);
	assert!(delta > 0);

	let loops = after.loop_block.unwrap().loops;
	assert_eq!(loops[0].start_byte, 4096 + delta);
	assert_eq!(loops[0].end_byte, 4096 + 18_000 + delta);
	assert_eq!(loops[0].start_sample, 0);

	// Disabled loops are left alone
	assert_eq!(loops[1].start_byte, 100);
	assert_eq!(loops[1].end_byte, 200);
}

#[test_log::test]
fn retag() {
	let input = AdxBuilder::new(4, 2).build();

	let first = id3v2_tag(1000);
	let tagged = write(&input, &first, WriteOptions::new());

	let second = id3v2_tag(20);
	let retagged = write(&tagged, &second, WriteOptions::new());

	assert_eq!(
		read_tag_from_slice(&retagged, ParseOptions::new()).unwrap(),
		Some(&second[..])
	);

	// The old tag is replaced, not kept alongside the new one
	let info = read_header_info(&retagged, ParseOptions::new()).unwrap();
	assert_eq!(info.header.data_offset(), 2048);
	assert_eq!(info.location.loop_count, 1);
	assert_eq!(retagged.len(), tagged.len());
	assert!(retagged[..2048].iter().all(|&b| b != b'Z'));
}

#[test_log::test]
fn aligned_v4_is_unchanged() {
	// Stereo, loop start at 1000 samples (564 bytes per channel)
	// 56 byte header + 4 + 1128 = 1188, 860 bytes of padding to reach 2048
	let input = AdxBuilder::new(4, 2)
		.looped(0, &[Loop::enabled(1000, 2048)])
		.extra(&[0; 858])
		.build();

	let output = write(&input, &[], WriteOptions::new());

	let info = read_header_info(&output, ParseOptions::new()).unwrap();
	assert_eq!(info.header.data_offset(), 920);
	assert_eq!(output, input);
}

#[test_log::test]
fn aligned_v3_is_unchanged() {
	// Stereo, loop start at 1000 samples (564 bytes per channel), 64 alignment samples
	// 44 byte header + 4 + 1128 = 1176, 872 bytes of padding to reach 2048, plus 2 sectors for the
	// 2 frames of alignment samples
	let input = AdxBuilder::new(3, 2)
		.looped(64, &[Loop::enabled(1000, 6144)])
		.extra(&[0; 872 + 2 * 2048 - 2])
		.build();

	let output = write(&input, &[], WriteOptions::new());

	let info = read_header_info(&output, ParseOptions::new()).unwrap();
	assert_eq!(info.header.data_offset(), 5016);
	assert_eq!(output, input);
}

#[test_log::test]
fn deterministic() {
	let input = AdxBuilder::new(3, 2)
		.looped(31, &[Loop::enabled(64, 2048)])
		.build();
	let tag = id3v2_tag(77);

	assert_eq!(
		write(&input, &tag, WriteOptions::new()),
		write(&input, &tag, WriteOptions::new())
	);
}

#[test_log::test]
fn empty_tag() {
	let input = AdxBuilder::new(4, 2).build();
	let output = write(&input, &[], WriteOptions::new());

	let info = read_header_info(&output, ParseOptions::new()).unwrap();
	assert!(info.location.has_loop);
	assert_eq!(info.header.data_offset(), 2048);

	assert!(
		read_tag_from_slice(&output, ParseOptions::new())
			.unwrap()
			.is_none()
	);
}

#[test_log::test]
fn alignment_disabled() {
	let input = AdxBuilder::new(4, 2).build();
	let tag = id3v2_tag(10);

	let output = write(&input, &tag, WriteOptions::new().sector_alignment(0));

	// Base header + dummy loop block + tag + the full copyright string
	assert_eq!(
		output.len(),
		32 + 24 + tag.len() + 6 + input.len() - (32 + 6)
	);
	assert_eq!(
		read_tag_from_slice(&output, ParseOptions::new()).unwrap(),
		Some(&tag[..])
	);
}

#[test_log::test]
fn not_an_adx() {
	let mut input = AdxBuilder::new(3, 1).build();
	input[..2].copy_from_slice(&[0x7F, 0x00]);

	let mut output = Vec::new();
	let err = write_tagged(&mut &input[..], &mut output, &id3v2_tag(0), WriteOptions::new())
		.unwrap_err();

	assert!(matches!(err.kind(), ErrorKind::NotAnAdx));
	assert!(output.is_empty());
}

#[test_log::test]
fn truncated_input() {
	let input = AdxBuilder::new(4, 2).looped(0, &[Loop::enabled(0, 2048)]).build();

	for (len, step) in [(1, "header"), (3, "header size"), (40, "header body")] {
		let mut output = Vec::new();
		let err = write_tagged(&mut &input[..len], &mut output, &[], WriteOptions::new())
			.unwrap_err();

		match err.kind() {
			ErrorKind::InsufficientData(found) => assert_eq!(*found, step, "length {len}"),
			other => panic!("Expected InsufficientData for length {len}, got {other:?}"),
		}
		assert!(output.is_empty());
	}
}

#[test_log::test]
fn tag_too_large() {
	let input = AdxBuilder::new(3, 1).build();

	let mut output = Vec::new();
	let err = write_tagged(
		&mut &input[..],
		&mut output,
		&id3v2_tag(33_000),
		WriteOptions::new(),
	)
	.unwrap_err();

	assert!(matches!(err.kind(), ErrorKind::OffsetTooBig(size) if *size > 32767));
	assert!(output.is_empty());
}

#[test_log::test]
fn unsupported_version() {
	let mut input = AdxBuilder::new(4, 2).build();
	input[18] = 2;

	let mut output = Vec::new();
	let err =
		write_tagged(&mut &input[..], &mut output, &[], WriteOptions::new()).unwrap_err();

	assert!(matches!(err.kind(), ErrorKind::UnsupportedAdxVersion(2)));
	assert!(output.is_empty());
}

#[test_log::test]
fn strict_loop_count() {
	let mut input = AdxBuilder::new(3, 1)
		.looped(0, &[Loop::enabled(0, 2048)])
		.build();
	input[22..24].copy_from_slice(&2_u16.to_be_bytes());

	let mut output = Vec::new();
	let options = WriteOptions::new().parsing_mode(ParsingMode::Strict);
	let err = write_tagged(&mut &input[..], &mut output, &[], options).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::SizeMismatch));

	// Not enough of the header to hold the second loop
	let err = write_tagged(&mut &input[..], &mut output, &[], WriteOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InsufficientData("loop block")));
	assert!(output.is_empty());
}

#[test_log::test]
fn file_round_trip() {
	let builder = AdxBuilder::new(4, 2).looped(0, &[Loop::enabled(0, 2048)]);
	let mut input = temp_file(&builder.build());
	let mut output = tempfile::tempfile().unwrap();

	let tag = id3v2_tag(500);
	write_tagged(&mut input, &mut output, &tag, WriteOptions::new()).unwrap();

	output.rewind().unwrap();
	assert_eq!(read_tag(&mut output, ParseOptions::new()).unwrap(), Some(tag));

	let mut audio = Vec::new();
	std::io::Read::read_to_end(&mut output, &mut audio).unwrap();
	assert_eq!(audio, builder.audio());
}
