//! Property tests for frame ranges, sequences and compatibility

use frameseq_core::codec::{format_sequence, parse_sequence};
use frameseq_core::{FileInfo, FileType, FrameRange, FrameSequence};
use proptest::prelude::*;

/// Sequences whose every frame renders with visible padding
fn sequence_strategy() -> impl Strategy<Value = FrameSequence> {
    prop_oneof![Just(0usize), 2usize..7].prop_flat_map(|pad| {
        let limit: i64 = if pad == 0 {
            1_000_000
        } else {
            10i64.pow(pad as u32 - 1)
        };
        prop::collection::vec((-limit + 1..limit, -limit + 1..limit), 1..8).prop_map(
            move |pairs| {
                let ranges = pairs
                    .into_iter()
                    .map(|(min, max)| FrameRange::new(min, max))
                    .collect();
                FrameSequence::from_ranges(ranges, pad)
            },
        )
    })
}

fn file_name_strategy() -> impl Strategy<Value = FileInfo> {
    let directory = prop_oneof![Just("/r/"), Just("/s/")];
    let base = prop_oneof![Just("a"), Just("b.")];
    let number = prop_oneof![
        Just(String::new()),
        "[0-9]{1,5}",
        "0[0-9]{1,4}",
        "#{1,4}",
    ];
    let extension = prop_oneof![Just(".exr"), Just(".png"), Just("")];
    let directory_flag = prop::bool::weighted(0.1);
    (directory, base, number, extension, directory_flag).prop_map(
        |(directory, base, number, extension, is_directory)| {
            let path = format!("{directory}{base}{number}{extension}");
            if is_directory {
                FileInfo::with_type(path, FileType::Directory)
            } else {
                FileInfo::new(path)
            }
        },
    )
}

proptest! {
    #[test]
    fn test_sequence_text_round_trip(sequence in sequence_strategy()) {
        let text = format_sequence(&sequence);
        let parsed = parse_sequence(&text).unwrap();
        prop_assert_eq!(&parsed, &sequence);
        prop_assert_eq!(format_sequence(&parsed), text);
    }

    #[test]
    fn test_sorted_range_bounds(min in -10_000i64..10_000, max in -10_000i64..10_000) {
        let mut range = FrameRange::new(min, max);
        range.sort();
        prop_assert!(range.min <= range.max);
        prop_assert!(range.contains(range.max));
        prop_assert!(range.contains(range.min));
        prop_assert!(!range.contains(range.min - 1));
        prop_assert!(!range.contains(range.max + 1));
    }

    #[test]
    fn test_from_frames_preserves_sorted_unique_frames(
        frames in prop::collection::btree_set(-500i64..500, 0..64)
    ) {
        let frames: Vec<i64> = frames.into_iter().collect();
        let sequence = FrameSequence::from_frames(frames.iter().copied());
        prop_assert_eq!(sequence.frames().collect::<Vec<_>>(), frames.clone());
        prop_assert_eq!(sequence.len(), frames.len() as u64);
        // Runs are maximal, so neighbouring ranges never touch
        for pair in sequence.ranges().windows(2) {
            prop_assert!(pair[0].max + 1 < pair[1].min);
        }
    }

    #[test]
    fn test_frame_and_index_agree(sequence in sequence_strategy()) {
        for index in 0..sequence.len().min(64) {
            let frame = sequence.frame(index).unwrap();
            let first = sequence.index_of(frame).unwrap();
            prop_assert!(first <= index);
            prop_assert_eq!(sequence.frame(first), Some(frame));
        }
        prop_assert_eq!(sequence.frame(sequence.len()), None);
    }

    #[test]
    fn test_compatibility_is_symmetric(a in file_name_strategy(), b in file_name_strategy()) {
        prop_assert_eq!(a.is_compatible(&b), b.is_compatible(&a));
    }

    #[test]
    fn test_compatibility_is_symmetric_after_grouping(
        a in file_name_strategy(),
        b in file_name_strategy(),
        siblings in prop::collection::vec("[0-9]{1,5}", 0..6),
    ) {
        let mut grouped = a.clone();
        let names: Vec<String> = siblings
            .iter()
            .map(|number| format!("{}{number}{}", a.path().base_name(), a.path().extension()))
            .collect();
        grouped.eval_sequence_with(&names).unwrap();
        prop_assert_eq!(grouped.is_compatible(&b), b.is_compatible(&grouped));
    }
}
