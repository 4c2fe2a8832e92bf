//! Tests for the fixed-point helpers, tables and building blocks

use lcw_delay::delay::resampler::resample;
use lcw_delay::delay::smoother::*;
use lcw_delay::delay::window::window;
use lcw_delay::resources::fir::*;
use lcw_delay::utils::fixed::*;
use lcw_delay::utils::ring_buffer::RingBuffer;

#[test]
fn fixed_conversions() {
    assert_eq!(sq7_24_from_f32(1.0), SQ7_24_ONE);
    assert_eq!(sq7_24_from_f32(-0.5), -(1 << 23));
    assert_eq!(sq7_24_to_f32(1 << 23), 0.5);
    assert_eq!(sq3_28_to_sq15_16(SQ3_28_ONE), SQ15_16_ONE);
    assert_eq!(mul_shift(SQ7_24_ONE, -SQ15_16_ONE / 2, SQ15_16_BITS), -SQ7_24_ONE / 2);
    assert_eq!(mul_shift_u(1 << 24, 3 << 23, 24), 3 << 23);
}

#[test]
fn ring_buffer_returns_latest_write() {
    for bits in 0..12 {
        let mut line = vec![0; 1 << bits];
        let mut buffer = RingBuffer::new(&mut line);

        for s in 1..=40 {
            buffer.write(s);
            assert_eq!(buffer.read(0), s);
            assert_eq!(buffer.at(buffer.write_ptr() as isize), s);
            assert!(buffer.write_ptr() < buffer.capacity());
        }
    }
}

#[test]
fn ring_buffer_grows_backwards() {
    let mut line = vec![0; 8];
    let mut buffer = RingBuffer::new(&mut line);

    for s in 0..10 {
        buffer.write(s);
    }

    for k in 0..8 {
        assert_eq!(buffer.read(k), 9 - k as i32);
    }
    assert_eq!(buffer.read(8), buffer.read(0));
    assert_eq!(buffer.read(-1), buffer.read(7));
    assert_eq!(buffer.mask(), 7);
}

#[test]
fn ring_buffer_clear_keeps_position() {
    let mut line = vec![0; 16];
    let mut buffer = RingBuffer::new(&mut line);

    for s in 1..6 {
        buffer.write(s);
    }
    let position = buffer.write_ptr();
    buffer.clear();

    assert_eq!(buffer.write_ptr(), position);
    assert!((0..16).all(|k| buffer.read(k) == 0));
}

#[test]
#[should_panic]
fn ring_buffer_rejects_non_power_of_two() {
    let mut line = vec![0; 12];
    RingBuffer::new(&mut line);
}

#[test]
fn window_is_symmetric() {
    for t in 0..=SQ15_16_ONE {
        let a = window(t);
        let b = window(SQ15_16_ONE - t);
        assert!((a - b).abs() <= 4, "window({t}) = {a}, mirrored {b}");
    }
}

#[test]
fn window_peaks_in_the_middle() {
    let peak = window(SQ15_16_ONE / 2);

    assert_eq!(window(0), 0);
    assert_eq!(window(SQ15_16_ONE), 0);
    assert_eq!(peak, SQ15_16_ONE);
    assert!((0..SQ15_16_ONE).all(|t| window(t) <= peak && window(t) >= 0));
}

#[test]
fn window_matches_triangle_at_quarter_points() {
    let triangle = |t: i32| SQ15_16_ONE - (2 * t - SQ15_16_ONE).abs();

    for t in [0, 1, 2, 3].map(|q| q * SQ15_16_ONE / 4) {
        assert_eq!(window(t), triangle(t));
    }
}

#[test]
fn window_halves_overlap_to_unity() {
    for t in 0..SQ15_16_ONE / 2 {
        let sum = window(t) + window(t + SQ15_16_ONE / 2);
        assert!((sum - SQ15_16_ONE).abs() <= 4, "sum at {t} is {sum}");
    }
}

#[test]
fn fir_rows_have_unity_gain() {
    let bank = fir_bank();

    for k in 0..FIR_TABLE_SIZE {
        let sum: i32 = bank.row(k).iter().map(|&c| c as i32).sum();
        assert_eq!(sum, SQ3_12_ONE, "row {k}");
    }
}

#[test]
fn fir_row_zero_is_impulse() {
    let row = fir_bank().row(0);

    for (j, &c) in row.iter().enumerate() {
        let expected = if j == FIR_TAP / 2 { SQ3_12_ONE } else { 0 };
        assert_eq!(c as i32, expected, "tap {j}");
    }
}

#[test]
fn fir_rows_mirror_each_other() {
    let bank = fir_bank();

    // Half a sample is symmetric around the gap between taps 8 and 9.
    let half = bank.row(FIR_TABLE_SIZE / 2);
    for j in 0..FIR_TAP / 2 - 1 {
        assert!((half[FIR_TAP / 2 - j] - half[FIR_TAP / 2 + 1 + j]).abs() <= 1);
    }

    // The peak tap moves one step towards older samples past half a sample.
    let early = bank.row(1);
    let late = bank.row(FIR_TABLE_SIZE - 1);
    assert!(early[FIR_TAP / 2] > early[FIR_TAP / 2 + 1]);
    assert!(late[FIR_TAP / 2 + 1] > late[FIR_TAP / 2]);
}

#[test]
fn fir_taps_follow_length_fraction() {
    let bank = fir_bank();
    let length = 5000 << UQ8_BITS;

    assert_eq!(bank.taps(length), bank.row(0));
    assert_eq!(bank.taps(length + 0x80), bank.row(FIR_TABLE_SIZE / 2));
    assert_eq!(bank.taps(length + 0xFF), bank.row(FIR_TABLE_SIZE - 1));
    assert_eq!(bank.taps(length + 0x07), bank.row(0));
}

#[test]
fn resample_keeps_dc() {
    let bank = fir_bank();

    for value in [SQ7_24_ONE, -SQ7_24_ONE / 3, 12345, -1, 0, 100 * SQ7_24_ONE] {
        let mut line = vec![0; 64];
        let mut buffer = RingBuffer::new(&mut line);
        for _ in 0..64 {
            buffer.write(value);
        }

        for k in 0..FIR_TABLE_SIZE {
            for index in [-20, 0, 17, 63] {
                assert_eq!(resample(&buffer, index, bank.row(k)), value);
            }
        }
    }
}

#[test]
fn resample_interpolates_between_neighbours() {
    let bank = fir_bank();
    let mut line = vec![0; 64];
    let mut buffer = RingBuffer::new(&mut line);

    // Linear ramp, one step per sample, newest sample at offset 0.
    for n in 0..64 {
        buffer.write(n * 4096);
    }

    // Centre tap lands on offset 20, a fraction `f` further back lowers the value by
    // `f` steps.
    let base = buffer.write_ptr() as isize + 20 - (FIR_TAP / 2) as isize;
    let at = buffer.read(20);
    for k in 0..FIR_TABLE_SIZE {
        let expected = at - (k as i32 * 4096) / FIR_TABLE_SIZE as i32;
        let value = resample(&buffer, base, bank.row(k));
        assert!((value - expected).abs() <= 64, "row {k}: {value} vs {expected}");
    }
}

#[test]
fn converge_never_overshoots() {
    for (src, dst) in [
        (MIN_GRAIN_SIZE << 8, MAX_GRAIN_SIZE << 8),
        (MAX_GRAIN_SIZE << 8, MIN_GRAIN_SIZE << 8),
        (4096 << 8, 8192 << 8),
        (9000 << 8, 8999 << 8),
    ] {
        let mut value = src;
        let mut distance = src.abs_diff(dst);

        for _ in 0..20000 {
            let next = converge(value, dst);
            let next_distance = next.abs_diff(dst);

            if src < dst {
                assert!(next >= value && next <= dst);
            } else {
                assert!(next <= value && next >= dst);
            }
            assert!(next_distance < distance || distance == 0);
            assert!(value.abs_diff(next) <= max_step(distance));

            value = next;
            distance = next_distance;
        }

        assert_eq!(value, dst);
    }
}

#[test]
fn converge_is_symmetric() {
    let dst = 20000 << 8;
    let mut up = dst - (7000 << 8);
    let mut down = dst + (7000 << 8);

    for _ in 0..10000 {
        up = converge(up, dst);
        down = converge(down, dst);
        assert_eq!(dst - up, down - dst);
    }
}

#[test]
fn converge_closes_a_small_share_per_step() {
    let src = 4096 << 8;
    let dst = 8192 << 8;
    let step = converge(src, dst) - src;
    let share = step as f32 / (dst - src) as f32;

    assert!((share - 0.0024).abs() < 0.0001, "share is {share}");
}

#[test]
fn smoother_ignores_out_of_range_requests() {
    let mut smoother = DelaySmoother::new();
    assert_eq!(smoother.target(), MIN_GRAIN_SIZE);
    assert_eq!(smoother.length(), MIN_GRAIN_SIZE << 8);

    smoother.update(10000);
    assert_eq!(smoother.target(), 10000);

    for requested in [0, MIN_GRAIN_SIZE - 1, MAX_GRAIN_SIZE + 1, u32::MAX] {
        smoother.update(requested);
        assert_eq!(smoother.target(), 10000);
    }

    smoother.update(MAX_GRAIN_SIZE);
    assert_eq!(smoother.target(), MAX_GRAIN_SIZE);
    smoother.update(MIN_GRAIN_SIZE);
    assert_eq!(smoother.target(), MIN_GRAIN_SIZE);

    smoother.reset();
    assert_eq!(smoother.length(), MIN_GRAIN_SIZE << 8);
    assert_eq!(smoother.samples(), MIN_GRAIN_SIZE);
}

#[test]
fn smoother_settles_on_target() {
    let mut smoother = DelaySmoother::new();

    for _ in 0..20000 {
        smoother.update(30000);
    }

    assert_eq!(smoother.length(), 30000 << 8);
    assert_eq!(smoother.samples(), 30000);
}
