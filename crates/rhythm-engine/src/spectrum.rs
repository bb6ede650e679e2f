//! Spectral Decomposition into Rhythm Bands

use crate::bands::RhythmBands;
use crate::SignalError;
use rustfft::{num_complex::Complex, FftPlanner};

/// Spectral analyzer that bins DFT amplitudes into rhythm bands
pub struct SpectralAnalyzer {
    /// FFT planner for efficient computation
    planner: FftPlanner<f64>,
    /// Sampling frequency (Hz)
    sample_rate: f64,
}

impl SpectralAnalyzer {
    /// Create a new analyzer for signals at the given sample rate
    pub fn new(sample_rate: f64) -> Self {
        Self {
            planner: FftPlanner::new(),
            sample_rate,
        }
    }

    /// Fraction of total spectral amplitude falling into each band.
    ///
    /// Computes the half spectrum of the real-valued signal and walks the
    /// bins in ascending frequency, accumulating each amplitude into the
    /// band whose interval contains it. The result has one entry per band,
    /// in band order, summing to 1.0. Amplitudes are summed directly, not
    /// squared: the fractions are shares of total amplitude, not of power.
    ///
    /// An all-zero signal has zero total amplitude and yields NaN entries;
    /// the caller sees the degenerate input instead of a silent zero
    /// vector.
    pub fn analyze(
        &mut self,
        signal: &[f64],
        bands: &RhythmBands,
    ) -> Result<Vec<f64>, SignalError> {
        if signal.is_empty() {
            return Err(SignalError::EmptySignal);
        }

        let n = signal.len();
        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&v| Complex::new(v, 0.0)).collect();
        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        // Bins 0..=n/2 of a real signal, spaced at sample_rate / n
        let freq_step = self.sample_rate / n as f64;

        let mut accum = vec![0.0; bands.len()];
        let mut total = 0.0;
        let mut cursor = 0;

        for (k, value) in buffer.iter().take(n / 2 + 1).enumerate() {
            let freq = k as f64 * freq_step;
            loop {
                match bands.get(cursor) {
                    Some(band) if freq > band.upper_hz => cursor += 1,
                    Some(_) => break,
                    None => {
                        return Err(SignalError::FrequencyOutOfBands {
                            freq_hz: freq,
                            limit_hz: bands.upper_bound(),
                        })
                    }
                }
            }
            let ampl = value.norm();
            accum[cursor] += ampl;
            total += ampl;
        }

        for fraction in accum.iter_mut() {
            *fraction /= total;
        }

        Ok(accum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::RhythmBand;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_fractions_sum_to_one() {
        let mut analyzer = SpectralAnalyzer::new(200.0);
        let bands = RhythmBands::standard();
        let signal = sine(10.0, 200.0, 400);

        let fractions = analyzer.analyze(&signal, &bands).unwrap();
        assert_eq!(fractions.len(), 5);

        let sum: f64 = fractions.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "fractions sum to {sum}");
        for f in &fractions {
            assert!((0.0..=1.0).contains(f), "fraction {f} out of range");
        }
    }

    #[test]
    fn test_pure_tone_lands_in_its_band() {
        let mut analyzer = SpectralAnalyzer::new(200.0);
        let bands = RhythmBands::standard();

        // 10 Hz is an alpha rhythm; 400 samples put it exactly on bin 20
        let fractions = analyzer.analyze(&sine(10.0, 200.0, 400), &bands).unwrap();
        assert!(
            fractions[2] > 0.9,
            "alpha fraction {} should dominate",
            fractions[2]
        );
    }

    #[test]
    fn test_constant_signal_is_all_delta() {
        let mut analyzer = SpectralAnalyzer::new(200.0);
        let bands = RhythmBands::standard();

        let fractions = analyzer.analyze(&vec![3.0; 256], &bands).unwrap();
        assert!((fractions[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_signal_is_an_error() {
        let mut analyzer = SpectralAnalyzer::new(200.0);
        let bands = RhythmBands::standard();
        assert!(matches!(
            analyzer.analyze(&[], &bands),
            Err(SignalError::EmptySignal)
        ));
    }

    #[test]
    fn test_zero_signal_propagates_nan() {
        let mut analyzer = SpectralAnalyzer::new(200.0);
        let bands = RhythmBands::standard();

        let fractions = analyzer.analyze(&vec![0.0; 64], &bands).unwrap();
        assert!(fractions.iter().all(|f| f.is_nan()));
    }

    #[test]
    fn test_bin_above_last_band_is_an_error() {
        let mut analyzer = SpectralAnalyzer::new(200.0);
        // Only delta defined; bins above 4 Hz have nowhere to go
        let bands = RhythmBands::new(vec![RhythmBand::new("delta", 4.0)]).unwrap();

        let err = analyzer.analyze(&sine(10.0, 200.0, 400), &bands).unwrap_err();
        assert!(matches!(err, SignalError::FrequencyOutOfBands { .. }));
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let mut analyzer = SpectralAnalyzer::new(200.0);
        let bands = RhythmBands::standard();
        let signal = sine(7.0, 200.0, 300);

        let a = analyzer.analyze(&signal, &bands).unwrap();
        let b = analyzer.analyze(&signal, &bands).unwrap();
        assert_eq!(a, b);
    }
}
