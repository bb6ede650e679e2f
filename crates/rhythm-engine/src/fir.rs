//! FIR Bandpass Filter Design and Application

use crate::SignalError;
use std::f64::consts::PI;

/// Normalized sinc: sin(pi x) / (pi x)
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-12 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Design a Hamming-windowed bandpass FIR filter.
///
/// Rejects frequencies outside `[low_hz, high_hz]`. The coefficients are
/// left unscaled: there is no unity-gain normalization at band center.
/// Requires `taps >= 1` and `0 < low_hz < high_hz < sample_rate_hz / 2`.
pub fn design_bandpass(
    taps: usize,
    low_hz: f64,
    high_hz: f64,
    sample_rate_hz: f64,
) -> Result<Vec<f64>, SignalError> {
    let nyquist = sample_rate_hz / 2.0;
    if taps == 0 || low_hz <= 0.0 || low_hz >= high_hz || high_hz >= nyquist {
        return Err(SignalError::InvalidFilterSpec {
            taps,
            low_hz,
            high_hz,
            sample_rate_hz,
        });
    }

    // Cutoffs normalized to the Nyquist frequency
    let lo = low_hz / nyquist;
    let hi = high_hz / nyquist;
    let mid = (taps as f64 - 1.0) / 2.0;

    let mut coef = Vec::with_capacity(taps);
    for n in 0..taps {
        let x = n as f64 - mid;
        // Ideal bandpass response: difference of two lowpass sincs
        let ideal = hi * sinc(hi * x) - lo * sinc(lo * x);
        let window = if taps == 1 {
            1.0
        } else {
            0.54 - 0.46 * (2.0 * PI * n as f64 / (taps as f64 - 1.0)).cos()
        };
        coef.push(ideal * window);
    }

    Ok(coef)
}

/// Convolve a raw signal with filter coefficients, keeping only the region
/// where the kernel fully overlaps the input ("valid" mode).
///
/// The output holds `signal.len() - coef.len() + 1` samples; the edges
/// where the kernel hangs over the signal are dropped.
pub fn apply(signal: &[i32], coef: &[f64]) -> Result<Vec<f64>, SignalError> {
    assert!(!coef.is_empty(), "Filter kernel must not be empty");
    if signal.len() < coef.len() {
        return Err(SignalError::InsufficientSignalLength {
            signal_len: signal.len(),
            taps: coef.len(),
        });
    }

    let taps = coef.len();
    let out_len = signal.len() - taps + 1;
    let mut filtered = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let mut acc = 0.0;
        // Kernel runs reversed over the window, as in discrete convolution
        for (j, &c) in coef.iter().enumerate() {
            acc += signal[i + taps - 1 - j] as f64 * c;
        }
        filtered.push(acc);
    }

    Ok(filtered)
}
