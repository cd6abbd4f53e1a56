//! Exhaust system state and its acoustic path
//!
//! Each exhaust system knows its own index within the engine. When it is
//! given an impulse response it owns a [`ConvolutionFilter`] that models the
//! resonance of the pipe; the filter is released with the exhaust system.

use serde::{Deserialize, Serialize};

use super::gas_system::{GasSystem, Mix, AMBIENT_TEMPERATURE, ATMOSPHERIC_PRESSURE};
use crate::dsp::ConvolutionFilter;
use crate::lifecycle::Lifecycle;
use crate::types::Sample;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhaustSystemParameters {
    /// Collector volume, m³
    pub collector_volume: f64,
    /// Output gain of the acoustic path
    pub audio_volume: f32,
    /// Pipe impulse response; empty disables the acoustic filter
    pub impulse_response: Vec<Sample>,
}

impl Default for ExhaustSystemParameters {
    fn default() -> Self {
        Self {
            collector_volume: 0.002,
            audio_volume: 1.0,
            impulse_response: Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ExhaustSystem {
    lifecycle: Lifecycle,
    index: usize,
    audio_volume: f32,
    system: GasSystem,
    acoustics: ConvolutionFilter,
}

impl ExhaustSystem {
    /// Assigned by the engine at initialization
    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    #[track_caller]
    pub fn initialize(&mut self, params: &ExhaustSystemParameters) {
        self.lifecycle.begin("ExhaustSystem");
        self.audio_volume = params.audio_volume;
        self.system = GasSystem::new(params.collector_volume);
        self.system
            .fill(ATMOSPHERIC_PRESSURE, AMBIENT_TEMPERATURE, Mix::air());

        if !params.impulse_response.is_empty() {
            self.initialize_acoustics(&params.impulse_response);
        }
    }

    /// Allocate the acoustic filter with `impulse_response` as its kernel
    #[track_caller]
    pub fn initialize_acoustics(&mut self, impulse_response: &[Sample]) {
        self.acoustics.initialize(impulse_response.len());
        self.acoustics.set_impulse_response(impulse_response);
        log::debug!(
            "Exhaust {}: acoustic filter with {} taps",
            self.index,
            impulse_response.len()
        );
    }

    /// Release the gas volume and the acoustic filter
    #[track_caller]
    pub fn destroy(&mut self) {
        self.lifecycle.release("ExhaustSystem");
        if self.acoustics.is_initialized() {
            self.acoustics.destroy();
        }
        self.system = GasSystem::default();
    }

    pub fn has_acoustics(&self) -> bool {
        self.acoustics.is_initialized()
    }

    /// Run one pressure sample through the exhaust's acoustic path
    ///
    /// Without an impulse response the sample passes through unfiltered.
    #[inline]
    pub fn process_audio(&mut self, sample: Sample) -> Sample {
        let filtered = if self.acoustics.is_initialized() {
            self.acoustics.process(sample)
        } else {
            sample
        };
        filtered * self.audio_volume
    }

    pub fn audio_volume(&self) -> f32 {
        self.audio_volume
    }

    pub fn system(&self) -> &GasSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut GasSystem {
        &mut self.system
    }
}
