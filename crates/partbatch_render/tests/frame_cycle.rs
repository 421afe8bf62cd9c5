//! # Frame Cycle Verification
//!
//! Drives part tables through several frames the way a renderer does:
//! walk the model with a transform stack, pack every instance, upload,
//! clear, repeat.
//!
//! Run with: cargo test -p partbatch_render --test frame_cycle

use partbatch_core::{
    decode_entry, Mat3, Mat4, PartBatchConfig, PartTable, Quaternion, TransformEntry,
    TransformStack, Vec3, ENTRY_BYTE_SIZE,
};
use partbatch_render::{InstanceBatcher, PartRange};

const HEAD: usize = 0;
const BODY: usize = 1;
const LEFT_ARM: usize = 2;
const RIGHT_ARM: usize = 3;
const CAPE: usize = 6;

/// Walks a small articulated model. The cape is only present when `caped`.
fn write_model(table: &mut PartTable, origin: Vec3, swing: f32, caped: bool) {
    let mut stack = TransformStack::new();
    stack.translate(origin);

    stack.push();
    stack.translate(Vec3::new(0.0, 1.5, 0.0));
    table.set(HEAD, Some(&stack));
    stack.pop();

    table.set(BODY, Some(&stack));

    for (id, side) in [(LEFT_ARM, 1.0f32), (RIGHT_ARM, -1.0)] {
        stack.push();
        stack.translate(Vec3::new(side * 0.4, 1.2, 0.0));
        stack.rotate(Quaternion::from_axis_angle(Vec3::X, side * swing));
        table.set(id, Some(&stack));
        stack.pop();
    }

    if caped {
        table.set(CAPE, Some(&stack));
    } else {
        table.set_null(CAPE);
    }
}

fn entry(bytes: &[u8], range: PartRange, part: usize) -> &[u8] {
    let start = range.byte_offset() + part * ENTRY_BYTE_SIZE;
    &bytes[start..start + ENTRY_BYTE_SIZE]
}

#[test]
fn verify_multi_instance_frame() {
    let config = PartBatchConfig::from_toml_str(
        "initial_capacity = 4\nstaging_entries = 8\nmax_entries_per_frame = 1024",
    )
    .unwrap();
    let mut batcher = InstanceBatcher::new(&config);
    let mut tables = vec![PartTable::from_config(&config), PartTable::from_config(&config)];
    let default = TransformEntry::new(Mat4::from_scale(Vec3::new(0.0, 0.0, 0.0)), Mat3::IDENTITY);

    batcher.begin_frame();
    write_model(&mut tables[0], Vec3::new(10.0, 0.0, 0.0), 0.3, true);
    write_model(&mut tables[1], Vec3::new(-10.0, 0.0, 0.0), -0.3, false);

    let ranges: Vec<PartRange> = tables
        .iter()
        .map(|t| batcher.push_table(t, &default).unwrap())
        .collect();
    let (bytes, stats) = batcher.end_frame();

    assert_eq!(ranges[0], PartRange { first_entry: 0, entry_count: 7 });
    assert_eq!(ranges[1], PartRange { first_entry: 7, entry_count: 7 });
    assert_eq!(bytes.len(), 14 * ENTRY_BYTE_SIZE);
    assert_eq!(stats.staging_grows, 1);

    // Explicit parts
    let head = decode_entry(entry(bytes, ranges[0], HEAD));
    assert_eq!(head.position.col(3), [10.0, 1.5, 0.0, 1.0]);
    let body = decode_entry(entry(bytes, ranges[1], BODY));
    assert_eq!(body.position.col(3), [-10.0, 0.0, 0.0, 1.0]);

    // Gaps at ids 4 and 5 take the default
    for part in [4, 5] {
        assert_eq!(decode_entry(entry(bytes, ranges[0], part)), default);
    }

    // Null cape on the second instance
    assert!(entry(bytes, ranges[1], CAPE).iter().all(|&b| b == 0));
    assert_eq!(
        decode_entry(entry(bytes, ranges[0], CAPE)).position.col(3),
        [10.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn verify_tables_reused_across_frames() {
    let config = PartBatchConfig::default();
    let mut batcher = InstanceBatcher::new(&config);
    let mut table = PartTable::from_config(&config);

    for frame in 0..5u8 {
        batcher.begin_frame();
        let caped = frame % 2 == 0;
        write_model(&mut table, Vec3::new(f32::from(frame), 0.0, 0.0), 0.1, caped);
        let capacity = table.capacity();

        let range = batcher.push_table(&table, &TransformEntry::IDENTITY).unwrap();
        let (bytes, _) = batcher.end_frame();
        assert_eq!(range.entry_count, CAPE + 1);
        assert_eq!(
            entry(bytes, range, CAPE).iter().all(|&b| b == 0),
            !caped,
            "frame {frame}"
        );

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), capacity);
    }
}

#[test]
fn verify_partial_frame_after_clear() {
    let mut batcher = InstanceBatcher::default();
    let mut table = PartTable::new();

    batcher.begin_frame();
    write_model(&mut table, Vec3::ZERO, 0.0, true);
    batcher.push_table(&table, &TransformEntry::IDENTITY).unwrap();
    table.clear();

    // Next frame only the head is written; nothing from the old frame leaks
    batcher.begin_frame();
    table.set(HEAD, Some(&TransformEntry::IDENTITY));
    let range = batcher.push_table(&table, &TransformEntry::IDENTITY).unwrap();
    let (bytes, _) = batcher.end_frame();

    assert_eq!(range.entry_count, 1);
    assert_eq!(bytes.len(), ENTRY_BYTE_SIZE);
    for id in 1..=CAPE {
        assert!(!table.is_written(id));
    }
}
