// Decode, normalize and encode tests for the config record
mod utils;

use nincfg_core::record::layout::{self, flag_bits, video_bits, RECORD_SIZE};
use nincfg_core::record::{
    DisplayMode, Fixup, ForceStandard, HostDisabledFlag, Language, VideoFixup,
};
use nincfg_core::session::EditSession;
use nincfg_core::{ConfigRecord, DecodeError};
use utils::{u32_at, video_raw, RawRecord};

#[test]
fn test_wrong_length_is_size_mismatch() {
    let result = ConfigRecord::decode(&[0u8; 100]);
    assert_eq!(
        result,
        Err(DecodeError::SizeMismatch { expected: RECORD_SIZE, actual: 100 })
    );

    let mut long = RawRecord::new().bytes();
    long.push(0);
    assert!(matches!(
        ConfigRecord::decode(&long),
        Err(DecodeError::SizeMismatch { .. })
    ));
}

#[test]
fn test_wrong_magic_is_bad_magic() {
    let bytes = RawRecord::new().magic(0xDEAD_BEEF).bytes();
    assert_eq!(
        ConfigRecord::decode(&bytes),
        Err(DecodeError::BadMagic { found: 0xDEAD_BEEF })
    );
}

#[test]
fn test_wrong_version_is_unsupported() {
    let bytes = RawRecord::new().version(9).bytes();
    let err = ConfigRecord::decode(&bytes).unwrap_err();
    assert_eq!(err, DecodeError::UnsupportedVersion { found: 9, supported: 10 });
    assert_eq!(err.code(), "unsupported_version");
}

#[test]
fn test_size_checked_before_magic() {
    // Short buffer with garbage magic still reports the size first
    let err = ConfigRecord::decode(&[0xFF; 8]).unwrap_err();
    assert_eq!(err.code(), "size_mismatch");
}

#[test]
fn test_clean_record_has_no_fixups() {
    let (_, fixups) = ConfigRecord::decode_with_report(&RawRecord::new().bytes()).unwrap();
    assert!(fixups.is_empty(), "unexpected fixups: {:?}", fixups);
}

#[test]
fn test_round_trip_is_stable() {
    let raws = [
        RawRecord::new(),
        RawRecord::new()
            .config(flag_bits::MC_MULTI | flag_bits::FORCE_PROG | flag_bits::DEBUGGER)
            .video_mode(video_raw(video_bits::DISPLAY_CODE_FORCE, 3))
            .language(4)
            .memcard(3)
            .video_scale(104)
            .video_offset(-7)
            .gamepad_slot(2),
        RawRecord::new()
            .config(flag_bits::WIIU_WIDE | flag_bits::CHEATS | (1 << 25))
            .video_mode(video_raw(5, 0) | video_bits::PROG)
            .language(42)
            .memcard(9)
            .video_scale(77)
            .video_offset(100)
            .gamepad_slot(17)
            .cheat_path("/codes/GALE01.gct")
            .game_path("/games/GALE01/game.iso")
            .game_id(0x4741_4C45)
            .network_profile(3)
            .max_pads(4),
    ];

    for raw in raws {
        let first = raw.decode();
        let second = ConfigRecord::decode(&first.encode()).unwrap();
        assert_eq!(first, second);
        let (_, fixups) = ConfigRecord::decode_with_report(&second.encode()).unwrap();
        assert!(fixups.is_empty(), "normalization not idempotent: {:?}", fixups);
    }
}

#[test]
fn test_multi_without_emulation_is_dropped() {
    let raw = RawRecord::new().config(flag_bits::MC_MULTI);
    let (record, fixups) = ConfigRecord::decode_with_report(&raw.bytes()).unwrap();
    assert!(!record.flags().memcard_multi);
    assert!(!record.flags().memcard_emu);
    assert!(fixups.contains(&Fixup::MultiCardDropped));
}

#[test]
fn test_auto_language_commits_byte_for_byte() {
    let raw = RawRecord::new().language(layout::LANGUAGE_AUTO_RAW);
    let record = raw.decode();
    assert_eq!(record.language(), Language::Auto);
    assert_eq!(record.language(), *Language::ALL.last().unwrap());

    let mut session = EditSession::new(record);
    let bytes = session.commit().unwrap();
    assert_eq!(u32_at(&bytes, layout::OFFSET_LANGUAGE), 0xFFFF_FFFF);
    assert_eq!(bytes, raw.bytes());
}

#[test]
fn test_host_disabled_fields_cleared() {
    let all_disabled = flag_bits::CHEATS
        | flag_bits::DEBUGGER
        | flag_bits::DEBUG_WAIT
        | flag_bits::LED
        | flag_bits::AUTO_BOOT
        | flag_bits::OS_REPORT
        | flag_bits::LOG
        | flag_bits::USB
        | flag_bits::BBA_EMU
        | flag_bits::NATIVE_SI;
    let raw = RawRecord::new()
        .config(flag_bits::MEMCARD_EMU | all_disabled)
        .cheat_path("/codes/GALE01.gct")
        .game_path("/games/GALE01/game.iso")
        .game_id(0x4741_4C45)
        .network_profile(2)
        .max_pads(4);

    let (record, fixups) = ConfigRecord::decode_with_report(&raw.bytes()).unwrap();
    assert!(!record.flags().is_host_disabled_set());
    assert!(record.flags().memcard_emu);
    assert!(record.cheat_path().iter().all(|&b| b == 0));
    assert!(record.game_path().iter().all(|&b| b == 0));
    assert_eq!(record.game_id(), 0);
    assert_eq!(record.network_profile(), 0);
    assert_eq!(record.max_pads(), 0);

    for flag in HostDisabledFlag::ALL {
        assert!(fixups.contains(&Fixup::HostFlagCleared(flag)), "{:?} not reported", flag);
    }
    assert!(fixups.iter().all(|fixup| !fixup.is_repair()));

    let encoded = record.encode();
    assert_eq!(u32_at(&encoded, layout::OFFSET_CONFIG), flag_bits::MEMCARD_EMU);
}

#[test]
fn test_single_widescreen_bit_sets_both() {
    for bit in [flag_bits::FORCE_WIDE, flag_bits::WIIU_WIDE] {
        let record = RawRecord::new().config(bit).decode();
        assert!(record.flags().force_wide);
        assert!(record.flags().wiiu_wide);
    }
}

#[test]
fn test_progressive_bit_follows_flag() {
    let record = RawRecord::new()
        .config(flag_bits::FORCE_PROG)
        .decode();
    assert!(record.video_mode().is_progressive());

    let record = RawRecord::new()
        .video_mode(video_raw(video_bits::DISPLAY_CODE_AUTO, 0) | video_bits::PROG)
        .decode();
    assert!(!record.flags().force_progressive);
    assert!(!record.video_mode().is_progressive());
}

#[test]
fn test_both_force_codes_collapse_to_force_df() {
    let raw = RawRecord::new().video_mode(video_raw(5, 2));
    let (record, fixups) = ConfigRecord::decode_with_report(&raw.bytes()).unwrap();
    assert_eq!(record.video_mode().display(), DisplayMode::ForceDisableFiltering);
    assert_eq!(record.video_mode().force_standard(), Some(ForceStandard::Pal60));
    assert!(fixups.contains(&Fixup::Video(VideoFixup::CollapsedForceModes)));
}

#[test]
fn test_or_of_both_raw_force_words_is_unknown() {
    // 0x0002_0000 | 0x0005_0000 leaves a high half of 7, not a display code
    let raw = RawRecord::new().video_mode(0x0007_0002);
    let (record, fixups) = ConfigRecord::decode_with_report(&raw.bytes()).unwrap();
    assert_eq!(record.video_mode().display(), DisplayMode::Auto);
    assert_eq!(record.video_mode().force_standard(), None);
    assert!(fixups.contains(&Fixup::Video(VideoFixup::UnknownDisplay { raw: 7 })));
    assert!(!fixups.contains(&Fixup::Video(VideoFixup::CollapsedForceModes)));
}

#[test]
fn test_out_of_range_values_pulled_back() {
    let record = RawRecord::new()
        .language(42)
        .memcard(9)
        .video_scale(77)
        .video_offset(-50)
        .gamepad_slot(17)
        .decode();
    assert_eq!(record.language(), Language::Auto);
    assert_eq!(record.memcard_size().code(), 5);
    assert_eq!(record.video_scale(), 76);
    assert_eq!(record.video_offset(), -20);
    assert_eq!(record.gamepad_slot(), None);
}

#[test]
fn test_unknown_bits_and_padding_pass_through() {
    let raw = RawRecord::new()
        .config(flag_bits::MEMCARD_EMU | flag_bits::CHEAT_PATH | (1 << 30))
        .video_mode(video_raw(video_bits::DISPLAY_CODE_NONE, 2) | (1 << 5))
        .padding([0xAB, 0xCD]);
    let encoded = raw.decode().encode();
    assert_eq!(encoded, raw.bytes());
}

#[test]
fn test_encode_layout() {
    let record = RawRecord::new()
        .config(flag_bits::MEMCARD_EMU | flag_bits::SKIP_IPL)
        .video_mode(video_raw(video_bits::DISPLAY_CODE_FORCE, 4))
        .language(1)
        .memcard(2)
        .video_scale(104)
        .video_offset(-3)
        .gamepad_slot(3)
        .decode();
    let bytes = record.encode();
    assert_eq!(bytes.len(), RECORD_SIZE);
    assert_eq!(u32_at(&bytes, layout::OFFSET_MAGIC), layout::MAGIC);
    assert_eq!(u32_at(&bytes, layout::OFFSET_VERSION), 10);
    assert_eq!(
        u32_at(&bytes, layout::OFFSET_CONFIG),
        flag_bits::MEMCARD_EMU | flag_bits::SKIP_IPL
    );
    assert_eq!(u32_at(&bytes, layout::OFFSET_VIDEO_MODE), 0x0002_0004);
    assert_eq!(u32_at(&bytes, layout::OFFSET_LANGUAGE), 1);
    assert_eq!(bytes[layout::OFFSET_MEM_CARD], 2);
    assert_eq!(bytes[layout::OFFSET_VIDEO_SCALE], 104);
    assert_eq!(bytes[layout::OFFSET_VIDEO_OFFSET] as i8, -3);
    assert_eq!(u32_at(&bytes, layout::OFFSET_GAMEPAD_SLOT), 3);
}
