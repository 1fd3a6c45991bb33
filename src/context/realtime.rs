use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread::{self, Thread};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};
use tracing::{debug, error, info};

use crate::{
    context::{AudioContext, ToneSpec},
    graph::{tone::boxed_tone, GraphNode, VoiceMixer},
    Result, SfxError, MAX_BLOCK_SIZE,
};

/// Tones waiting for the audio callback to pick them up.
const TONE_QUEUE_CAPACITY: usize = 64;

type ToneQueue = Producer<Box<dyn GraphNode>>;

/// Realtime context on the default output device.
///
/// The cpal stream is not `Send` on every host, so it is built and kept alive
/// by a dedicated `saavy-sfx-output` thread. Tones are built on the caller's
/// thread and handed to the audio callback through a lock-free ring buffer;
/// the callback only mixes. Audio time is the number of frames the callback
/// has rendered so far.
pub struct CpalContext {
    sample_rate: f32,
    frames: Arc<AtomicU64>,
    queue: Mutex<ToneQueue>,
    closed: Arc<AtomicBool>,
    output_thread: Thread,
}

impl CpalContext {
    pub fn new() -> Result<Self> {
        let (producer, consumer) = RingBuffer::new(TONE_QUEUE_CAPACITY);
        let frames = Arc::new(AtomicU64::new(0));
        let closed = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<f32>>(1);

        let frames_cb = frames.clone();
        let closed_thread = closed.clone();
        let handle = thread::Builder::new()
            .name("saavy-sfx-output".into())
            .spawn(move || match open_stream(consumer, frames_cb) {
                Ok((stream, sample_rate)) => {
                    let _ = ready_tx.send(Ok(sample_rate));
                    // The stream plays for as long as this thread holds it
                    while !closed_thread.load(Ordering::Acquire) {
                        thread::park();
                    }
                    drop(stream);
                    debug!("audio output stream closed");
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                }
            })
            .map_err(|e| SfxError::OutputThread(e.to_string()))?;

        let sample_rate = ready_rx
            .recv()
            .map_err(|e| SfxError::OutputThread(e.to_string()))??;

        Ok(Self {
            sample_rate,
            frames,
            queue: Mutex::new(producer),
            closed,
            output_thread: handle.thread().clone(),
        })
    }
}

impl AudioContext for CpalContext {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn current_time(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }

    fn start_tone(&self, tone: ToneSpec) -> Result<()> {
        self.start_tones(&[tone])
    }

    fn start_tones(&self, tones: &[ToneSpec]) -> Result<()> {
        for tone in tones {
            tone.validate()?;
        }
        let nodes = tones
            .iter()
            .map(|tone| boxed_tone(tone, self.sample_rate))
            .collect();

        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        push_all(&mut queue, nodes)
    }
}

/// Queue every node, or none of them if they do not all fit.
fn push_all(queue: &mut ToneQueue, nodes: Vec<Box<dyn GraphNode>>) -> Result<()> {
    if queue.slots() < nodes.len() {
        return Err(SfxError::QueueFull);
    }
    for node in nodes {
        queue.push(node).map_err(|_| SfxError::QueueFull)?;
    }
    Ok(())
}

impl Drop for CpalContext {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::Release);
        self.output_thread.unpark();
    }
}

fn open_stream(
    consumer: Consumer<Box<dyn GraphNode>>,
    frames: Arc<AtomicU64>,
) -> Result<(cpal::Stream, f32)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or(SfxError::NoOutputDevice)?;
    let config = device.default_output_config()?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    let sample_format = config.sample_format();
    info!(
        device = %device.name().unwrap_or_else(|_| "<unnamed>".into()),
        sample_rate,
        channels,
        ?sample_format,
        "opening audio output"
    );

    let output = Output {
        consumer,
        mixer: VoiceMixer::new(),
        render_buf: vec![0.0; MAX_BLOCK_SIZE],
        frames,
        channels,
        sample_rate,
    };

    let stream_config: cpal::StreamConfig = config.into();
    let stream = match sample_format {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, output)?,
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, output)?,
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, output)?,
        other => return Err(SfxError::UnsupportedSampleFormat(format!("{other:?}"))),
    };

    stream.play()?;
    Ok((stream, sample_rate))
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut output: Output,
) -> Result<cpal::Stream>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| output.fill(data),
        |err| error!("audio stream error: {err}"),
        None,
    )?;
    Ok(stream)
}

/// State owned by the audio callback.
struct Output {
    consumer: Consumer<Box<dyn GraphNode>>,
    mixer: VoiceMixer,
    render_buf: Vec<f32>,
    frames: Arc<AtomicU64>,
    channels: usize,
    sample_rate: f32,
}

impl Output {
    fn fill<T>(&mut self, data: &mut [T])
    where
        T: cpal::SizedSample + cpal::FromSample<f32>,
    {
        while let Ok(tone) = self.consumer.pop() {
            self.mixer.add(tone);
        }

        let total_frames = data.len() / self.channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            let block = &mut self.render_buf[..frames_to_render];
            self.mixer.render(block, self.sample_rate);

            // Mono to every channel
            let out_off = frames_written * self.channels;
            for (i, &s) in block.iter().enumerate() {
                let value = T::from_sample(s.clamp(-1.0, 1.0));
                for ch in 0..self.channels {
                    data[out_off + i * self.channels + ch] = value;
                }
            }

            frames_written += frames_to_render;
        }

        self.frames.fetch_add(total_frames as u64, Ordering::Release);
    }
}
