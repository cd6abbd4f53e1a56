//! Real-time FIR convolution filter
//!
//! A fixed-length convolution over a circular history buffer, evaluated once
//! per audio sample. The newest sample is written at the head and the head
//! moves backwards, so tap `k` always lines up with the sample `k` steps in
//! the past without moving any data.
//!
//! Two dot-product kernels are provided:
//! - [`ConvolutionFilter::convolve_reference`]: one accumulator, two plain loops
//! - [`ConvolutionFilter::convolve_tuned`]: four independent accumulators with
//!   two-way unrolling, which breaks the add dependency chain
//!
//! `process` uses the tuned kernel unless the `reference-convolution` feature
//! is enabled. Results agree up to floating-point reassociation.
//!
//! ```
//! use enginesim_core::dsp::ConvolutionFilter;
//!
//! let mut filter = ConvolutionFilter::default();
//! filter.initialize(4);
//! filter.set_impulse_response(&[0.0, 1.0]); // one-sample delay
//!
//! assert_eq!(filter.process(1.0), 0.0);
//! assert_eq!(filter.process(0.0), 1.0);
//! assert_eq!(filter.process(0.0), 0.0);
//!
//! filter.destroy();
//! ```

use crate::types::Sample;

/// Independent partial sums in the tuned kernel
const ACCUMULATORS: usize = 4;
/// Accumulator passes per unrolled block
const UNWIND_FACTOR: usize = 2;
/// Taps consumed per unrolled block
const BLOCK: usize = ACCUMULATORS * UNWIND_FACTOR;

/// Buffers that exist only between `initialize` and `destroy`
#[derive(Debug)]
struct FilterState {
    /// Sample history; the newest sample lives at `shift_offset`
    shift_register: Box<[Sample]>,
    /// Filter kernel, tap 0 applies to the newest sample
    impulse_response: Box<[Sample]>,
    /// Current head of the circular buffer
    shift_offset: usize,
}

/// Circular-buffer FIR convolution filter
///
/// Must be paired: `initialize` before use, `destroy` before drop.
/// Calling `process` on an uninitialized filter or initializing twice panics.
#[derive(Debug, Default)]
pub struct ConvolutionFilter {
    state: Option<FilterState>,
}

impl ConvolutionFilter {
    /// Create an empty (uninitialized) filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate zeroed history and kernel buffers of `sample_count` taps
    ///
    /// Panics if the filter is already initialized or `sample_count` is zero.
    #[track_caller]
    pub fn initialize(&mut self, sample_count: usize) {
        assert!(
            self.state.is_none(),
            "ConvolutionFilter: initialize called on an already initialized filter"
        );
        assert!(sample_count > 0, "ConvolutionFilter: sample count must be positive");

        self.state = Some(FilterState {
            shift_register: vec![0.0; sample_count].into_boxed_slice(),
            impulse_response: vec![0.0; sample_count].into_boxed_slice(),
            shift_offset: 0,
        });
    }

    /// Release both buffers
    ///
    /// Panics if the filter is not initialized.
    #[track_caller]
    pub fn destroy(&mut self) {
        assert!(
            self.state.take().is_some(),
            "ConvolutionFilter: destroy called on a filter that is not initialized"
        );
    }

    /// Whether the buffers are currently allocated
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Number of taps (0 when uninitialized)
    pub fn sample_count(&self) -> usize {
        self.state
            .as_ref()
            .map(|s| s.impulse_response.len())
            .unwrap_or(0)
    }

    /// Current head position of the circular buffer
    pub fn shift_offset(&self) -> usize {
        self.state().shift_offset
    }

    /// The filter kernel
    pub fn impulse_response(&self) -> &[Sample] {
        &self.state().impulse_response
    }

    /// Mutable access to the filter kernel, for the caller to populate
    pub fn impulse_response_mut(&mut self) -> &mut [Sample] {
        &mut self.state_mut().impulse_response
    }

    /// Copy `taps` into the kernel
    ///
    /// Taps beyond the filter length are ignored; kernel slots past the end
    /// of `taps` are zeroed.
    pub fn set_impulse_response(&mut self, taps: &[Sample]) {
        let kernel = &mut self.state_mut().impulse_response;
        let used = taps.len().min(kernel.len());
        if taps.len() > kernel.len() {
            log::debug!(
                "ConvolutionFilter: truncating {}-tap impulse response to {} taps",
                taps.len(),
                kernel.len()
            );
        }
        kernel[..used].copy_from_slice(&taps[..used]);
        kernel[used..].fill(0.0);
    }

    /// Clear the sample history (the kernel is kept)
    pub fn reset(&mut self) {
        let state = self.state_mut();
        state.shift_register.fill(0.0);
        state.shift_offset = 0;
    }

    /// Push one sample and return the convolution output
    ///
    /// Panics if the filter is not initialized.
    #[inline]
    #[track_caller]
    pub fn process(&mut self, sample: Sample) -> Sample {
        let Some(state) = self.state.as_mut() else {
            panic!("ConvolutionFilter: process called before initialize");
        };

        state.shift_register[state.shift_offset] = sample;

        #[cfg(feature = "reference-convolution")]
        let result = state.convolve_reference();
        #[cfg(not(feature = "reference-convolution"))]
        let result = state.convolve_tuned();

        // Next write lands one slot earlier
        let count = state.shift_register.len();
        state.shift_offset = (state.shift_offset + count - 1) % count;

        result
    }

    /// Process a block of samples in-place
    #[track_caller]
    pub fn process_buffer(&mut self, buffer: &mut [Sample]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Dot product of the kernel and current history, single accumulator
    ///
    /// Does not advance the filter. Always compiled so it can be checked
    /// against the tuned kernel.
    pub fn convolve_reference(&self) -> Sample {
        self.state().convolve_reference()
    }

    /// Dot product of the kernel and current history, split accumulators
    pub fn convolve_tuned(&self) -> Sample {
        self.state().convolve_tuned()
    }

    #[track_caller]
    fn state(&self) -> &FilterState {
        match self.state.as_ref() {
            Some(state) => state,
            None => panic!("ConvolutionFilter: used before initialize or after destroy"),
        }
    }

    #[track_caller]
    fn state_mut(&mut self) -> &mut FilterState {
        match self.state.as_mut() {
            Some(state) => state,
            None => panic!("ConvolutionFilter: used before initialize or after destroy"),
        }
    }
}

impl Drop for ConvolutionFilter {
    fn drop(&mut self) {
        if !std::thread::panicking() {
            debug_assert!(
                self.state.is_none(),
                "ConvolutionFilter dropped while initialized; call destroy() first"
            );
        }
    }
}

impl FilterState {
    /// Split point: taps `[0, size)` read history `[offset, len)`,
    /// taps `[size, len)` read history `[0, offset)`
    #[inline(always)]
    fn segments(&self) -> ((&[Sample], &[Sample]), (&[Sample], &[Sample])) {
        let size = self.shift_register.len() - self.shift_offset;
        let (newer_taps, older_taps) = self.impulse_response.split_at(size);
        let (wrapped, unwrapped) = self.shift_register.split_at(self.shift_offset);
        ((newer_taps, unwrapped), (older_taps, wrapped))
    }

    fn convolve_reference(&self) -> Sample {
        let ((taps_a, hist_a), (taps_b, hist_b)) = self.segments();

        let mut result = 0.0;
        for (h, x) in taps_a.iter().zip(hist_a) {
            result += h * x;
        }
        for (h, x) in taps_b.iter().zip(hist_b) {
            result += h * x;
        }
        result
    }

    #[inline]
    fn convolve_tuned(&self) -> Sample {
        let ((taps_a, hist_a), (taps_b, hist_b)) = self.segments();

        let mut acc = [0.0; ACCUMULATORS];
        let residual = accumulate(taps_a, hist_a, &mut acc) + accumulate(taps_b, hist_b, &mut acc);

        acc[0] + acc[1] + acc[2] + acc[3] + residual
    }
}

/// Unrolled multiply-accumulate of two equal-length slices
///
/// Full blocks feed the shared accumulators; the tail that does not fill a
/// block is summed separately and returned.
#[inline(always)]
fn accumulate(taps: &[Sample], history: &[Sample], acc: &mut [Sample; ACCUMULATORS]) -> Sample {
    debug_assert_eq!(taps.len(), history.len());

    let mut tap_blocks = taps.chunks_exact(BLOCK);
    let mut history_blocks = history.chunks_exact(BLOCK);

    for (h, x) in tap_blocks.by_ref().zip(history_blocks.by_ref()) {
        for j in 0..UNWIND_FACTOR {
            let base = j * ACCUMULATORS;
            acc[0] += h[base] * x[base];
            acc[1] += h[base + 1] * x[base + 1];
            acc[2] += h[base + 2] * x[base + 2];
            acc[3] += h[base + 3] * x[base + 3];
        }
    }

    tap_blocks
        .remainder()
        .iter()
        .zip(history_blocks.remainder())
        .fold(0.0, |residual, (h, x)| residual + h * x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn filter_with(taps: &[Sample]) -> ConvolutionFilter {
        let mut filter = ConvolutionFilter::new();
        filter.initialize(taps.len());
        filter.set_impulse_response(taps);
        filter
    }

    /// Deterministic pseudo-random signal in [-1, 1]
    fn signal(len: usize, seed: u32) -> Vec<Sample> {
        let mut state = seed.wrapping_mul(2_654_435_761).max(1);
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                (state as f32 / u32::MAX as f32) * 2.0 - 1.0
            })
            .collect()
    }

    /// Direct-form convolution used as ground truth
    fn direct_convolution(taps: &[Sample], input: &[Sample]) -> Vec<Sample> {
        (0..input.len())
            .map(|n| {
                taps.iter()
                    .enumerate()
                    .filter(|(k, _)| *k <= n)
                    .map(|(k, h)| h * input[n - k])
                    .sum::<Sample>()
            })
            .collect()
    }

    #[test]
    fn test_initialize_zeroes_buffers() {
        let mut filter = ConvolutionFilter::new();
        assert!(!filter.is_initialized());
        assert_eq!(filter.sample_count(), 0);

        filter.initialize(16);
        assert!(filter.is_initialized());
        assert_eq!(filter.sample_count(), 16);
        assert_eq!(filter.shift_offset(), 0);
        assert!(filter.impulse_response().iter().all(|&h| h == 0.0));
        assert_eq!(filter.process(1.0), 0.0);

        filter.destroy();
        assert!(!filter.is_initialized());
    }

    #[test]
    fn test_impulse_reproduces_shifted_kernel() {
        let n = 12;
        for k in 0..n {
            let mut filter = ConvolutionFilter::new();
            filter.initialize(n);
            filter.impulse_response_mut()[k] = 1.0;

            for call in 0..(2 * n) {
                let input = if call == 0 { 1.0 } else { 0.0 };
                let out = filter.process(input);
                let expected = if call == k { 1.0 } else { 0.0 };
                assert!(
                    (out - expected).abs() < EPS,
                    "k={} call={} out={}",
                    k,
                    call + 1,
                    out
                );
            }

            filter.destroy();
        }
    }

    #[test]
    fn test_linearity() {
        let taps = signal(37, 7);
        let x1 = signal(200, 11);
        let x2 = signal(200, 23);

        let mut f1 = filter_with(&taps);
        let mut f2 = filter_with(&taps);
        let mut f_sum = filter_with(&taps);

        for i in 0..x1.len() {
            let a = f1.process(x1[i]);
            let b = f2.process(x2[i]);
            let c = f_sum.process(x1[i] + x2[i]);
            assert!((a + b - c).abs() < 1e-4, "sample {}: {} + {} != {}", i, a, b, c);
        }

        f1.destroy();
        f2.destroy();
        f_sum.destroy();
    }

    #[test]
    fn test_matches_direct_convolution() {
        let taps = signal(19, 3);
        let input = signal(100, 5);
        let expected = direct_convolution(&taps, &input);

        let mut filter = filter_with(&taps);
        for (i, &x) in input.iter().enumerate() {
            let out = filter.process(x);
            assert!((out - expected[i]).abs() < 1e-4, "sample {}", i);
        }
        filter.destroy();
    }

    #[test]
    fn test_wraparound_only_recent_samples_matter() {
        let n = 8;
        let taps = signal(n, 41);

        // Two filters that see different old samples but the same newest N
        let mut a = filter_with(&taps);
        let mut b = filter_with(&taps);

        let old_a = signal(n, 1);
        let old_b = signal(n, 2);
        let recent = signal(n, 3);

        for i in 0..n {
            a.process(old_a[i]);
            b.process(old_b[i]);
        }

        let mut out_a = 0.0;
        let mut out_b = 0.0;
        for &x in &recent {
            out_a = a.process(x);
            out_b = b.process(x);
        }

        // After 2N samples only the last N contributed
        assert!((out_a - out_b).abs() < EPS);
        let expected: Sample = taps
            .iter()
            .enumerate()
            .map(|(k, h)| h * recent[n - 1 - k])
            .sum();
        assert!((out_a - expected).abs() < 1e-4);

        a.destroy();
        b.destroy();
    }

    #[test]
    fn test_head_moves_backwards() {
        let mut filter = ConvolutionFilter::new();
        filter.initialize(4);
        assert_eq!(filter.shift_offset(), 0);
        filter.process(0.0);
        assert_eq!(filter.shift_offset(), 3);
        filter.process(0.0);
        assert_eq!(filter.shift_offset(), 2);
        filter.process(0.0);
        filter.process(0.0);
        assert_eq!(filter.shift_offset(), 0);
        filter.destroy();
    }

    #[test]
    fn test_reference_and_tuned_agree() {
        // Lengths around the unroll block size and at every head position
        for n in [1, 2, 3, 7, 8, 9, 15, 16, 17, 31, 64, 100] {
            let taps = signal(n, n as u32);
            let input = signal(3 * n + 5, 99);
            let mut filter = filter_with(&taps);

            for &x in &input {
                filter.process(x);
                let reference = filter.convolve_reference();
                let tuned = filter.convolve_tuned();
                assert!(
                    (reference - tuned).abs() < 1e-4,
                    "n={} offset={}: {} vs {}",
                    n,
                    filter.shift_offset(),
                    reference,
                    tuned
                );
            }

            filter.destroy();
        }
    }

    #[test]
    fn test_set_impulse_response_truncates_and_pads() {
        let mut filter = ConvolutionFilter::new();
        filter.initialize(4);

        filter.set_impulse_response(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(filter.impulse_response(), &[1.0, 2.0, 3.0, 4.0]);

        filter.set_impulse_response(&[0.5]);
        assert_eq!(filter.impulse_response(), &[0.5, 0.0, 0.0, 0.0]);

        filter.destroy();
    }

    #[test]
    fn test_reset_clears_history() {
        let mut filter = filter_with(&[1.0, 1.0, 1.0]);
        filter.process(1.0);
        filter.process(1.0);

        filter.reset();
        assert_eq!(filter.shift_offset(), 0);
        assert_eq!(filter.process(0.0), 0.0);
        assert_eq!(filter.impulse_response(), &[1.0, 1.0, 1.0]);

        filter.destroy();
    }

    #[test]
    fn test_process_buffer() {
        let mut filter = filter_with(&[0.5, 0.5]);
        let mut buffer = [1.0, 1.0, 0.0, 0.0];
        filter.process_buffer(&mut buffer);
        assert_eq!(buffer, [0.5, 1.0, 0.5, 0.0]);
        filter.destroy();
    }

    #[test]
    fn test_reinitialize_after_destroy() {
        let mut filter = ConvolutionFilter::new();
        filter.initialize(4);
        filter.destroy();
        filter.initialize(8);
        assert_eq!(filter.sample_count(), 8);
        filter.destroy();
    }

    #[test]
    #[should_panic(expected = "already initialized")]
    fn test_double_initialize_panics() {
        let mut filter = ConvolutionFilter::new();
        filter.initialize(4);
        filter.initialize(4);
    }

    #[test]
    #[should_panic(expected = "before initialize")]
    fn test_process_before_initialize_panics() {
        let mut filter = ConvolutionFilter::new();
        filter.process(1.0);
    }

    #[test]
    #[should_panic(expected = "process called before initialize")]
    fn test_process_after_destroy_panics() {
        let mut filter = ConvolutionFilter::new();
        filter.initialize(4);
        filter.destroy();
        filter.process_buffer(&mut [1.0, 0.0]);
    }

    #[test]
    #[should_panic(expected = "not initialized")]
    fn test_double_destroy_panics() {
        let mut filter = ConvolutionFilter::new();
        filter.initialize(4);
        filter.destroy();
        filter.destroy();
    }

    #[test]
    #[should_panic(expected = "must be positive")]
    fn test_zero_length_panics() {
        let mut filter = ConvolutionFilter::new();
        filter.initialize(0);
    }
}
