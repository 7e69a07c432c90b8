//! The "hello VAG" program: upload one sample, retrigger it every few
//! seconds and show the upload diagnostics on screen.
//!
//! ```text
//! setup:  parse VAG → pitch → SPU init → upload → voice attr → display init
//! frame:  countdown (key on at 0) → 7 overlay lines → flush → present
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use log::{debug, error, info};

use crate::constants::{
    MASTER_VOLUME, REPLAY_INTERVAL_FRAMES, TRANSFER_POLL_US, TRANSFER_TIMEOUT_US, VOICE_VOLUME,
};
use crate::display::{Display, GraphicsDevice, VideoMode};
use crate::error::Result;
use crate::spu::{compute_pitch, Pitch, SoundDevice, Spu, Upload, VoiceConfig, VoiceMask, Volume};
use crate::vag::{VagAsset, Validation};

// ── Configuration ──────────────────────────────────────────────────────────

/// Knobs of the demo. `Default` matches the stock program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoConfig {
    pub video_mode: VideoMode,
    /// Voices the sample is assigned to and keyed on.
    pub voices: VoiceMask,
    /// Frames between two key-on events.
    pub replay_interval: u16,
    pub master_volume: Volume,
    pub voice_volume: Volume,
    pub validation: Validation,
    pub transfer_timeout_us: u32,
    pub transfer_poll_us: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            video_mode: VideoMode::default(),
            voices: VoiceMask::CH0,
            replay_interval: REPLAY_INTERVAL_FRAMES,
            master_volume: Volume::both(MASTER_VOLUME),
            voice_volume: Volume::both(VOICE_VOLUME),
            validation: Validation::Strict,
            transfer_timeout_us: TRANSFER_TIMEOUT_US,
            transfer_poll_us: TRANSFER_POLL_US,
        }
    }
}

// ── Countdown ──────────────────────────────────────────────────────────────

/// Result of one [`Countdown::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// The counter was at zero: key on this frame.
    pub fired: bool,
    /// Counter value to display this frame.
    pub value: u16,
}

/// Frame countdown that fires when it reaches zero, reloads, and is
/// decremented once per frame.
///
/// It starts at zero, so the first frame fires. With interval `n` it fires
/// exactly once every `n` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    interval: u16,
    remaining: u16,
}

impl Countdown {
    pub const fn new(interval: u16) -> Self {
        Countdown {
            interval,
            remaining: 0,
        }
    }

    pub fn tick(&mut self) -> Tick {
        let fired = self.remaining == 0;
        if fired {
            self.remaining = self.interval;
        }
        let value = self.remaining;
        self.remaining = self.remaining.saturating_sub(1);
        Tick { fired, value }
    }

    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    pub fn interval(&self) -> u16 {
        self.interval
    }
}

// ── Diagnostics overlay ────────────────────────────────────────────────────

/// Values shown on the overlay every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostics {
    /// Pitch register value the voice was configured with.
    pub pitch: Pitch,
    /// Unclamped `compute_pitch` result; this is what the overlay prints.
    pub raw_pitch: u32,
    pub sample_rate: u32,
    pub upload: Upload,
    /// Payload size the header declared.
    pub declared_size: u32,
}

impl Diagnostics {
    /// Write the seven overlay lines.
    pub fn render<G: GraphicsDevice>(&self, display: &mut Display<G>, counter: u16) {
        let u = &self.upload;
        display.write_line(format_args!(
            "Pitch             : {:08x}-{}Hz",
            self.raw_pitch,
            self.sample_rate
        ));
        display.write_line(format_args!("Set Start addr    : {:08x}", u.address().get()));
        display.write_line(format_args!("Return start addr : {:08x}", u.returned_start.get()));
        display.write_line(format_args!("Get Start  addr   : {:08x}", u.queried_start.get()));
        display.write_line(format_args!("Send size         : {:08x}", self.declared_size));
        display.write_line(format_args!("Return size       : {:08x}", u.transferred));
        display.write_line(format_args!("Counter       : {}", counter));
    }
}

// ── Demo ───────────────────────────────────────────────────────────────────

pub struct Demo<S, G, D> {
    spu: Spu<S, D>,
    display: Display<G>,
    voice: VoiceConfig,
    diagnostics: Diagnostics,
    countdown: Countdown,
    triggers: u64,
    frames: u64,
}

impl<S, G, D> Demo<S, G, D>
where
    S: SoundDevice,
    G: GraphicsDevice,
    D: DelayNs,
{
    /// Bring up sound and video and load `asset` into sound RAM.
    ///
    /// Any failure is logged and returned before a single frame is shown.
    pub fn setup(sound: S, graphics: G, delay: D, asset: &[u8], config: DemoConfig) -> Result<Self> {
        let asset = VagAsset::parse(asset, config.validation).map_err(|e| {
            error!("cannot load sample: {}", e);
            e
        })?;
        let pitch = Pitch::from_sample_rate(asset.sample_rate());

        let mut spu = Spu::new(sound, delay)
            .with_master_volume(config.master_volume)
            .with_transfer_timeout(config.transfer_timeout_us, config.transfer_poll_us);
        spu.init();

        let upload = spu.upload_sample(asset.payload)?;

        let voice = VoiceConfig::one_shot(config.voices, pitch, upload.address())
            .with_volume(config.voice_volume);
        spu.commit_voice(&voice);

        let mut display = Display::new(graphics, config.video_mode);
        display.init();

        info!(
            "'{}' at {}, pitch {:#06x}, replay every {} frames",
            asset.header.name(),
            upload.address(),
            pitch.get(),
            config.replay_interval
        );

        Ok(Demo {
            spu,
            display,
            voice,
            diagnostics: Diagnostics {
                pitch,
                raw_pitch: compute_pitch(asset.sample_rate()),
                sample_rate: asset.sample_rate(),
                upload,
                declared_size: asset.data_size(),
            },
            countdown: Countdown::new(config.replay_interval),
            triggers: 0,
            frames: 0,
        })
    }

    /// Run one frame.
    pub fn frame(&mut self) -> Tick {
        let tick = self.countdown.tick();
        if tick.fired {
            self.spu.trigger(self.voice.voices);
            self.triggers += 1;
            debug!("key on #{} at frame {}", self.triggers, self.frames);
        }

        self.diagnostics.render(&mut self.display, tick.value);
        self.display.flush_text();
        self.display.present();
        self.frames += 1;
        tick
    }

    /// Run frames until `stop` is set. Returns the number of frames run.
    pub fn run(&mut self, stop: &AtomicBool) -> u64 {
        let start = self.frames;
        while !stop.load(Ordering::Relaxed) {
            self.frame();
        }
        let ran = self.frames - start;
        info!("stopped after {} frames, {} key-ons", ran, self.triggers);
        ran
    }

    /// Run exactly `count` frames.
    pub fn run_frames(&mut self, count: u64) {
        for _ in 0..count {
            self.frame();
        }
    }

    pub fn spu(&self) -> &Spu<S, D> {
        &self.spu
    }

    pub fn display(&self) -> &Display<G> {
        &self.display
    }

    pub fn voice(&self) -> &VoiceConfig {
        &self.voice
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Key-on events so far.
    pub fn triggers(&self) -> u64 {
        self.triggers
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Give back the devices and delay.
    pub fn release(self) -> (S, G, D) {
        let (sound, delay) = self.spu.release();
        (sound, self.display.release(), delay)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spu::{SpuAddr, SpuAllocator};
    use crate::testing::MockGpu;

    fn render_first_line(sample_rate: u32) -> std::string::String {
        let block = SpuAllocator::<1>::new().alloc(16).unwrap();
        let diagnostics = Diagnostics {
            pitch: Pitch::from_sample_rate(sample_rate),
            raw_pitch: compute_pitch(sample_rate),
            sample_rate,
            upload: Upload {
                block,
                returned_start: SpuAddr(0x1010),
                queried_start: SpuAddr(0x1010),
                requested: 16,
                transferred: 16,
            },
            declared_size: 16,
        };
        let mut display = Display::new(MockGpu::new(), VideoMode::Ntsc);
        diagnostics.render(&mut display, 0);
        display.console().text().lines().next().unwrap_or("").into()
    }

    #[test]
    fn overlay_pitch_is_the_unclamped_formula() {
        assert_eq!(render_first_line(22_050), "Pitch             : 00000800-22050Hz");
        // 200000 << 12 / 44100 = 18575, above the 0x3FFF register ceiling.
        assert_eq!(render_first_line(200_000), "Pitch             : 0000488f-200000Hz");
        assert_eq!(Pitch::from_sample_rate(200_000).get(), 0x3FFF);
    }

    #[test]
    fn countdown_fires_on_first_tick() {
        let mut c = Countdown::new(180);
        assert_eq!(c.tick(), Tick { fired: true, value: 180 });
        assert_eq!(c.tick(), Tick { fired: false, value: 179 });
        assert_eq!(c.remaining(), 178);
    }

    #[test]
    fn countdown_period() {
        let mut c = Countdown::new(180);
        for k in 1..=4u32 {
            let fired = (0..180).filter(|_| c.tick().fired).count();
            assert_eq!(fired, 1, "period {}", k);
            assert_eq!(c.remaining(), 0);
        }
    }

    #[test]
    fn countdown_shows_one_on_last_frame() {
        let mut c = Countdown::new(3);
        let values: [u16; 6] = core::array::from_fn(|_| c.tick().value);
        assert_eq!(values, [3, 2, 1, 3, 2, 1]);
    }

    #[test]
    fn zero_interval_fires_every_frame() {
        let mut c = Countdown::new(0);
        for _ in 0..5 {
            assert_eq!(c.tick(), Tick { fired: true, value: 0 });
        }
    }

    #[test]
    fn default_config() {
        let cfg = DemoConfig::default();
        assert_eq!(cfg.voices, VoiceMask::CH0);
        assert_eq!(cfg.replay_interval, 180);
        assert_eq!(cfg.master_volume, Volume::both(0x3FFF));
        assert_eq!(cfg.voice_volume, Volume::both(0x1000));
        assert_eq!(cfg.validation, Validation::Strict);
    }
}
