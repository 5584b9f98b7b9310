//! Microphone capture reduced to a byte spectrum.
//!
//! The cpal callback only downmixes and pushes samples into a lock-free ring.
//! Everything else happens on the render thread when the level is queried:
//! drain the ring into the analysis window, window it, FFT, smooth, and map
//! decibels to bytes the way a Web Audio `AnalyserNode` does.

use std::f32::consts::PI;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Sample, SampleFormat};
use glitchwave_core::SpectrumSource;
use ringbuf::traits::{Consumer as _, Producer as _, Split as _};
use ringbuf::HeapRb;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

pub const FFT_SIZE: usize = 256;
pub const BIN_COUNT: usize = FFT_SIZE / 2;
pub const SMOOTHING: f32 = 0.8;
pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;

// ---------------------------------------------------------------------------
// Analyser
// ---------------------------------------------------------------------------

pub struct Analyser {
    samples: Vec<f32>,
    write_pos: usize,
    window: Vec<f32>,
    fft: Arc<dyn rustfft::Fft<f32>>,
    fft_buf: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
}

impl Default for Analyser {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyser {
    pub fn new() -> Self {
        let n = FFT_SIZE as f32;
        let window = (0..FFT_SIZE)
            .map(|i| {
                let x = i as f32 / n;
                0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
            })
            .collect();
        let fft = FftPlanner::<f32>::new().plan_fft_forward(FFT_SIZE);
        Self {
            samples: vec![0.0; FFT_SIZE],
            write_pos: 0,
            window,
            fft,
            fft_buf: vec![Complex { re: 0.0, im: 0.0 }; FFT_SIZE],
            smoothed: vec![0.0; BIN_COUNT],
        }
    }

    pub fn push(&mut self, sample: f32) {
        self.samples[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % FFT_SIZE;
    }

    /// Analyse the most recent [`FFT_SIZE`] samples into `out`.
    pub fn byte_frequency_data(&mut self, out: &mut [u8]) {
        for i in 0..FFT_SIZE {
            let s = self.samples[(self.write_pos + i) % FFT_SIZE];
            self.fft_buf[i] = Complex {
                re: s * self.window[i],
                im: 0.0,
            };
        }
        self.fft.process(&mut self.fft_buf);

        let scale = 1.0 / FFT_SIZE as f32;
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let mag = self.fft_buf[k].norm() * scale;
            *smoothed = SMOOTHING * *smoothed + (1.0 - SMOOTHING) * mag;
        }

        for (dst, &mag) in out.iter_mut().zip(&self.smoothed) {
            *dst = magnitude_to_byte(mag);
        }
    }
}

/// Map a linear magnitude onto `[MIN_DECIBELS, MAX_DECIBELS]` → `0..=255`.
pub fn magnitude_to_byte(mag: f32) -> u8 {
    if mag <= 0.0 {
        return 0;
    }
    let db = 20.0 * mag.log10();
    let scaled = 255.0 * (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS);
    scaled.floor().clamp(0.0, 255.0) as u8
}

// ---------------------------------------------------------------------------
// MicAnalyser: live input
// ---------------------------------------------------------------------------

pub struct MicAnalyser {
    // Keeps the input stream alive for as long as the analyser exists.
    _stream: cpal::Stream,
    cons: ringbuf::HeapCons<f32>,
    analyser: Analyser,
}

impl SpectrumSource for MicAnalyser {
    fn byte_frequency_data(&mut self, out: &mut [u8]) {
        while let Some(s) = self.cons.try_pop() {
            self.analyser.push(s);
        }
        self.analyser.byte_frequency_data(out);
    }

    fn bin_count(&self) -> usize {
        BIN_COUNT
    }
}

pub fn open_microphone(device_query: Option<&str>) -> anyhow::Result<MicAnalyser> {
    let host = cpal::default_host();
    let device = select_input_device(&host, device_query)?;
    let supported = device
        .default_input_config()
        .context("get default input config")?;
    let sample_rate_hz = supported.sample_rate().0;
    let channels = supported.channels() as usize;
    let config: cpal::StreamConfig = supported.clone().into();

    // Half a second of headroom between queries.
    let rb = HeapRb::<f32>::new((sample_rate_hz as usize / 2).max(FFT_SIZE));
    let (mut prod, cons) = rb.split();

    let err_fn = |err| log::warn!("audio stream error: {err}");

    let stream = match supported.sample_format() {
        SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _| push_interleaved(data, channels, &mut prod),
            err_fn,
            None,
        )?,
        SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _| push_interleaved(data, channels, &mut prod),
            err_fn,
            None,
        )?,
        SampleFormat::U16 => device.build_input_stream(
            &config,
            move |data: &[u16], _| push_interleaved(data, channels, &mut prod),
            err_fn,
            None,
        )?,
        fmt => return Err(anyhow!("unsupported sample format: {fmt:?}")),
    };

    stream.play().context("start input stream")?;
    log::info!(
        "microphone open: {} ({sample_rate_hz} Hz, {channels} ch)",
        device.name().unwrap_or_else(|_| "<unknown>".to_string())
    );

    Ok(MicAnalyser {
        _stream: stream,
        cons,
        analyser: Analyser::new(),
    })
}

pub fn list_input_devices() -> anyhow::Result<()> {
    let host = cpal::default_host();
    let devices = host.input_devices().context("enumerate input devices")?;

    let mut out = io::stdout();
    writeln!(out, "Input devices:")?;
    for dev in devices {
        let name = dev.name().unwrap_or_else(|_| "<unknown>".to_string());
        writeln!(out, "  - {name}")?;
    }
    Ok(())
}

fn select_input_device(host: &cpal::Host, device_query: Option<&str>) -> anyhow::Result<cpal::Device> {
    let Some(want) = device_query.map(str::to_lowercase) else {
        return host
            .default_input_device()
            .ok_or_else(|| anyhow!("no default input device found"));
    };

    host.input_devices()
        .context("enumerate input devices")?
        .find(|d| {
            d.name()
                .map(|n| n.to_lowercase().contains(&want))
                .unwrap_or(false)
        })
        .ok_or_else(|| anyhow!("no input device matching: {want}"))
}

fn push_interleaved<T: Sample<Float = f32> + Copy>(
    data: &[T],
    channels: usize,
    prod: &mut ringbuf::HeapProd<f32>,
) {
    for frame in data.chunks(channels) {
        let acc: f32 = frame.iter().map(|s| s.to_float_sample()).sum();
        // A full ring drops the newest samples until the next query drains it.
        let _ = prod.try_push(acc / channels as f32);
    }
}
