//! Integration tests: whole-pipeline laws, lossless round trips, stride
//! and skip reuse, ring eviction bounds, and cost monotonicity.

use fovea_core::{
    CostEstimator, EncodedFrame, FrameBuffer, FrameHistory, HISTORY_DEPTH, RegionSet, reconstruct,
};

// ── Helpers ──────────────────────────────────────────────────────

/// A 3-channel frame whose bytes follow a recognizable ramp, offset so
/// different frames are distinguishable.
fn ramp_frame(width: u32, height: u32, offset: u8) -> FrameBuffer {
    let len = width as usize * height as usize * 3;
    let data = (0..len)
        .map(|i| ((i % 241) as u8).wrapping_add(offset))
        .collect();
    FrameBuffer::from_raw(width, height, 3, data).unwrap()
}

/// Encode `frame` under `descriptor` (empty string = no descriptor file,
/// i.e. the synthetic full-frame policy) and push it onto the ring.
fn advance(ring: &mut FrameHistory, frame: &FrameBuffer, descriptor: &str) {
    let set = if descriptor.is_empty() {
        RegionSet::full_frame(frame.width, frame.height)
    } else {
        RegionSet::parse(descriptor, frame.width, frame.height).unwrap()
    };
    ring.push(EncodedFrame::encode(frame, &set).unwrap());
}

// ── Lossless paths ───────────────────────────────────────────────

#[test]
fn no_descriptor_reproduces_input_exactly() {
    let frame = ramp_frame(16, 8, 0);
    let mut ring = FrameHistory::new();
    advance(&mut ring, &frame, "");

    let entry = ring.current().unwrap();
    for row in 0..8 {
        for pair in 0..8 {
            assert!(entry.classes.code(row, pair).is_full());
        }
    }
    assert_eq!(entry.pixels.data, frame.data);

    let decoded = reconstruct(&ring).unwrap();
    assert_eq!(decoded.image, frame);
}

#[test]
fn four_by_four_full_frame_scenario() {
    // Descriptor 0,4,4,0,1,1 on a 4x4 frame: whole frame after the y
    // flip, mask 1 never strides on even columns, skip off.
    let frame = ramp_frame(4, 4, 0);
    let mut ring = FrameHistory::new();
    advance(&mut ring, &frame, "0,4,4,0,1,1");

    let entry = ring.current().unwrap();
    for row in 0..4 {
        for pair in 0..2 {
            assert!(entry.classes.code(row, pair).is_full());
        }
    }
    assert_eq!(entry.pixels.data, frame.data);
    assert_eq!(reconstruct(&ring).unwrap().image, frame);
}

#[test]
fn empty_descriptor_means_full_frame_not_black() {
    let frame = ramp_frame(8, 4, 0);
    let mut ring = FrameHistory::new();
    advance(&mut ring, &frame, "\n\n");

    let decoded = reconstruct(&ring).unwrap();
    assert_eq!(decoded.image, frame);
}

// ── Reuse laws ───────────────────────────────────────────────────

#[test]
fn stride_pairs_equal_nearest_preceding_full_pair() {
    let frame = ramp_frame(16, 4, 0);
    let mut ring = FrameHistory::new();
    advance(&mut ring, &frame, "0,4,16,0,2,1");

    let entry = ring.current().unwrap();
    let decoded = reconstruct(&ring).unwrap();
    for row in 0..4u32 {
        let mut last_full: Option<u32> = None;
        for pair in 0..8u32 {
            let code = entry.classes.code(row as usize, pair as usize);
            if code.is_full() {
                last_full = Some(pair);
            } else {
                let prev = last_full.expect("stride pair with no full pair before it");
                assert_eq!(
                    decoded.image.pixel(pair * 2, row),
                    decoded.image.pixel(prev * 2, row)
                );
                assert_eq!(
                    decoded.image.pixel(pair * 2 + 1, row),
                    decoded.image.pixel(prev * 2 + 1, row)
                );
            }
        }
    }
}

#[test]
fn skip_zone_reuses_previous_frame() {
    let width = 12;
    let height = 6;
    let first = ramp_frame(width, height, 0);
    let second = ramp_frame(width, height, 90);

    let mut ring = FrameHistory::new();
    advance(&mut ring, &first, "");
    // Left half of the second frame skips, right half captures.
    advance(&mut ring, &second, "0,6,5,0,1,2\n6,6,12,0,1,1");

    let first_decoded = {
        let mut solo = FrameHistory::new();
        advance(&mut solo, &first, "");
        reconstruct(&solo).unwrap().image
    };

    let decoded = reconstruct(&ring).unwrap();
    for y in 0..height {
        for x in 0..6 {
            assert_eq!(decoded.image.pixel(x, y), first_decoded.pixel(x, y));
        }
        for x in 6..width {
            assert_eq!(decoded.image.pixel(x, y), second.pixel(x, y));
        }
    }
}

// ── History window bounds ────────────────────────────────────────

#[test]
fn skip_never_reaches_past_three_frames_back() {
    let width = 8;
    let height = 2;
    let captured = ramp_frame(width, height, 7);
    let skip_descriptor = "0,2,8,0,1,2";

    let mut ring = FrameHistory::new();
    advance(&mut ring, &captured, "");
    for _ in 0..3 {
        advance(&mut ring, &ramp_frame(width, height, 0), skip_descriptor);
    }

    // Ring: [skip, skip, skip, captured]; three back still resolves.
    assert_eq!(ring.len(), HISTORY_DEPTH);
    let decoded = reconstruct(&ring).unwrap();
    assert_eq!(decoded.image, captured);

    // A fifth frame evicts the captured one; nothing resolves now.
    advance(&mut ring, &ramp_frame(width, height, 0), skip_descriptor);
    let decoded = reconstruct(&ring).unwrap();
    assert!(decoded.image.data.iter().all(|&b| b == 0));
    assert_eq!(decoded.touches.pixels, 0);
}

// ── Cost accounting ──────────────────────────────────────────────

#[test]
fn cumulative_cost_grows_monotonically() {
    let width = 8;
    let height = 4;
    let mut ring = FrameHistory::new();
    let mut estimator = CostEstimator::new();
    let descriptors = ["", "0,4,8,0,2,1", "0,4,8,0,1,2", "", "0,2,3,0,1,1"];

    let mut last_bits = 0;
    for (i, descriptor) in descriptors.iter().enumerate() {
        let frame = ramp_frame(width, height, i as u8);
        advance(&mut ring, &frame, descriptor);
        let write = ring.current().unwrap().write_touches();
        let decoded = reconstruct(&ring).unwrap();
        estimator.record(write, decoded.touches);

        let bits = estimator.totals().combined().bits();
        assert!(bits >= last_bits, "cost shrank at frame {i}");
        last_bits = bits;
    }
    assert_eq!(estimator.frames(), 5);
}

#[test]
fn read_cost_models_ring_wide_cache_fills() {
    let frame = ramp_frame(8, 4, 0);
    let mut ring = FrameHistory::new();

    advance(&mut ring, &frame, "");
    let touches = reconstruct(&ring).unwrap().touches;
    // One retained frame: per row, 1 offset and 4 code fills.
    assert_eq!(touches.offsets, 4);
    assert_eq!(touches.codes, 16);

    advance(&mut ring, &frame, "");
    let touches = reconstruct(&ring).unwrap().touches;
    // Two retained frames double the modeled cache traffic.
    assert_eq!(touches.offsets, 8);
    assert_eq!(touches.codes, 32);
}
