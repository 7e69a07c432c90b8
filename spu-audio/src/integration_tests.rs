//! End-to-end tests: asset bytes in, voice registers and overlay text out.
//!
//! ```text
//! VAG bytes → Demo::setup → MockSpu (RAM, voice attr)
//!          → Demo::frame  → MockSpu (key on) + MockGpu (text, present)
//! ```

#[cfg(test)]
mod tests {
    use core::sync::atomic::AtomicBool;
    use std::vec::Vec;

    use crate::constants::SPU_RAM_USER_START;
    use crate::demo::{Demo, DemoConfig};
    use crate::display::VideoMode;
    use crate::error::{AssetError, Error};
    use crate::spu::{Key, SpuAddr, VoiceMask, Volume};
    use crate::testing::{MockGpu, MockSpu, NoDelay, SpuCall};
    use crate::vag::{VagHeader, Validation, VAG_HEADER_LEN};

    fn make_asset(sample_rate: u32, payload_len: usize) -> Vec<u8> {
        let header = VagHeader::new(payload_len as u32, sample_rate, "hello_poly");
        let mut bytes = Vec::from(header.to_bytes());
        bytes.extend((0..payload_len).map(|i| (i % 251) as u8));
        bytes
    }

    fn setup(asset: &[u8], config: DemoConfig) -> crate::Result<Demo<MockSpu, MockGpu, NoDelay>> {
        Demo::setup(MockSpu::new(), MockGpu::new(), NoDelay::default(), asset, config)
    }

    // ---------------------------------------------------------------
    // Setup
    // ---------------------------------------------------------------

    #[test]
    fn sample_lands_in_sound_ram_and_voice_points_at_it() {
        let asset = make_asset(22_050, 1000);
        let demo = setup(&asset, DemoConfig::default()).unwrap();

        let addr = demo.diagnostics().upload.address();
        assert!(!addr.is_null());
        assert_eq!(addr, SpuAddr(SPU_RAM_USER_START));

        let spu = demo.spu().device();
        let start = addr.get() as usize;
        assert_eq!(&spu.ram[start..start + 1000], &asset[VAG_HEADER_LEN..]);

        let voices = spu.voice_attrs();
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].voices, VoiceMask::CH0);
        assert_eq!(voices[0].pitch.get(), 2048);
        assert_eq!(voices[0].start, addr);
        assert_eq!(voices[0].volume, Volume::both(0x1000));
    }

    #[test]
    fn nothing_plays_before_first_frame() {
        let asset = make_asset(44_100, 64);
        let demo = setup(&asset, DemoConfig::default()).unwrap();
        assert_eq!(demo.spu().device().key_ons(), 0);
        assert_eq!(demo.display().device().vsyncs(), 0);
    }

    #[test]
    fn trailing_bytes_are_not_uploaded() {
        let mut asset = make_asset(22_050, 16);
        asset.extend([0xEE; 32]);
        let demo = setup(&asset, DemoConfig::default()).unwrap();
        assert_eq!(demo.diagnostics().upload.transferred, 16);
        let start = demo.diagnostics().upload.address().get() as usize;
        assert_eq!(demo.spu().device().ram[start + 16], 0);
    }

    #[test]
    fn truncated_asset_fails_before_touching_hardware() {
        let err = setup(&[0u8; 20], DemoConfig::default()).err();
        assert_eq!(err, Some(Error::MalformedAsset(AssetError::Truncated { len: 20 })));
    }

    #[test]
    fn oversized_declared_payload_is_rejected() {
        let mut asset = make_asset(22_050, 100);
        asset.truncate(VAG_HEADER_LEN + 40);
        let err = setup(&asset, DemoConfig::default()).err();
        assert_eq!(
            err,
            Some(Error::MalformedAsset(AssetError::PayloadOutOfBounds {
                declared: 100,
                available: 40
            }))
        );
    }

    #[test]
    fn bad_tag_strict_and_lenient() {
        let mut asset = make_asset(22_050, 32);
        asset[0..4].copy_from_slice(b"RIFF");

        let err = setup(&asset, DemoConfig::default()).err();
        assert_eq!(
            err,
            Some(Error::MalformedAsset(AssetError::BadTag { found: *b"RIFF" }))
        );

        let lenient = DemoConfig {
            validation: Validation::Lenient,
            ..DemoConfig::default()
        };
        assert!(setup(&asset, lenient).is_ok());
    }

    #[test]
    fn rejected_transfer_aborts_setup() {
        let asset = make_asset(22_050, 1000);
        let mut sound = MockSpu::new();
        sound.reject_start = true;
        let err = Demo::setup(sound, MockGpu::new(), NoDelay::default(), &asset, DemoConfig::default())
            .err();
        assert_eq!(
            err,
            Some(Error::TransferRejected {
                addr: SpuAddr(SPU_RAM_USER_START),
                returned: SpuAddr::NULL
            })
        );
    }

    #[test]
    fn upload_timeout_aborts_setup() {
        let asset = make_asset(22_050, 32);
        let mut sound = MockSpu::new();
        sound.never_complete = true;
        let config = DemoConfig {
            transfer_timeout_us: 500,
            transfer_poll_us: 100,
            ..DemoConfig::default()
        };
        let err = Demo::setup(sound, MockGpu::new(), NoDelay::default(), &asset, config).err();
        assert_eq!(err, Some(Error::TransferTimeout { waited_us: 500 }));
    }

    #[test]
    fn multi_voice_config() {
        let asset = make_asset(11_025, 32);
        let voices = VoiceMask::voice(0) | VoiceMask::voice(5);
        let config = DemoConfig {
            voices,
            ..DemoConfig::default()
        };
        let mut demo = setup(&asset, config).unwrap();
        assert_eq!(demo.voice().pitch.get(), 1024);

        demo.frame();
        assert!(demo
            .spu()
            .device()
            .calls
            .contains(&SpuCall::Key(Key::On, voices)));
    }

    // ---------------------------------------------------------------
    // Frame loop
    // ---------------------------------------------------------------

    #[test]
    fn one_key_on_per_period() {
        let asset = make_asset(22_050, 1000);
        let mut demo = setup(&asset, DemoConfig::default()).unwrap();

        for k in 1..=3u64 {
            demo.run_frames(180);
            assert_eq!(demo.triggers(), k);
            assert_eq!(demo.spu().device().key_ons() as u64, k);
            assert_eq!(demo.countdown().remaining(), 0);
        }
        assert_eq!(demo.frames(), 540);
        assert_eq!(demo.display().device().vsyncs(), 540);
    }

    #[test]
    fn overlay_shows_upload_diagnostics() {
        let asset = make_asset(22_050, 1000);
        let mut demo = setup(&asset, DemoConfig::default()).unwrap();
        demo.frame();
        demo.frame();

        let texts = demo.display().device().texts();
        assert_eq!(texts.len(), 2);
        assert_eq!(
            texts[0],
            "Pitch             : 00000800-22050Hz\n\
             Set Start addr    : 00001010\n\
             Return start addr : 00001010\n\
             Get Start  addr   : 00001010\n\
             Send size         : 000003e8\n\
             Return size       : 000003e8\n\
             Counter       : 180\n"
        );
        assert!(texts[1].ends_with("Counter       : 179\n"));
    }

    #[test]
    fn buffers_alternate_every_frame() {
        let asset = make_asset(22_050, 64);
        let config = DemoConfig {
            video_mode: VideoMode::Pal,
            ..DemoConfig::default()
        };
        let mut demo = setup(&asset, config).unwrap();
        for n in 1..=5u64 {
            demo.frame();
            assert_eq!(demo.display().active() as u64, n % 2);
        }
        assert_eq!(demo.display().disp_env(1).screen.y, 8);
    }

    #[test]
    fn run_stops_when_flag_is_set() {
        let asset = make_asset(22_050, 64);
        let mut demo = setup(&asset, DemoConfig::default()).unwrap();
        let stop = AtomicBool::new(true);
        assert_eq!(demo.run(&stop), 0);
        assert_eq!(demo.triggers(), 0);
    }

    #[test]
    fn release_returns_devices() {
        let asset = make_asset(22_050, 64);
        let mut demo = setup(&asset, DemoConfig::default()).unwrap();
        demo.frame();
        let (sound, gpu, _) = demo.release();
        assert_eq!(sound.key_ons(), 1);
        assert_eq!(gpu.vsyncs(), 1);
    }
}
