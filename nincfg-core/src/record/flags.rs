//! Config flag word as named booleans.

use super::layout::flag_bits;

/// The 32-bit config word, split into named options.
///
/// Bits the editor does not name are kept in `unknown` and written back untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigFlags {
    pub memcard_emu: bool,
    /// Multi-card mode; only meaningful together with `memcard_emu`.
    pub memcard_multi: bool,
    pub force_wide: bool,
    /// Loader-side twin of `force_wide`; the two are always equal after normalization.
    pub wiiu_wide: bool,
    pub force_progressive: bool,
    pub remove_read_limit: bool,
    pub arcade_mode: bool,
    pub cc_rumble: bool,
    pub skip_ipl: bool,

    // Not available on this host, cleared on load.
    pub cheats: bool,
    pub debugger: bool,
    pub debug_wait: bool,
    pub led: bool,
    pub auto_boot: bool,
    pub os_report: bool,
    pub log: bool,
    pub usb: bool,
    pub bba_emu: bool,
    pub native_si: bool,

    pub unknown: u32,
}

/// A flag that has no meaning on this host and is forced off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostDisabledFlag {
    Cheats,
    Debugger,
    DebugWait,
    DriveLed,
    AutoBoot,
    OsReport,
    Log,
    Usb,
    BbaEmulation,
    NativeSerial,
}

impl HostDisabledFlag {
    pub const ALL: [HostDisabledFlag; 10] = [
        Self::Cheats,
        Self::Debugger,
        Self::DebugWait,
        Self::DriveLed,
        Self::AutoBoot,
        Self::OsReport,
        Self::Log,
        Self::Usb,
        Self::BbaEmulation,
        Self::NativeSerial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cheats => "cheats",
            Self::Debugger => "debugger",
            Self::DebugWait => "debug wait",
            Self::DriveLed => "drive LED",
            Self::AutoBoot => "auto boot",
            Self::OsReport => "OS report",
            Self::Log => "log",
            Self::Usb => "USB",
            Self::BbaEmulation => "BBA emulation",
            Self::NativeSerial => "native SI",
        }
    }
}

impl ConfigFlags {
    pub fn from_bits(bits: u32) -> Self {
        let has = |mask: u32| bits & mask != 0;
        Self {
            memcard_emu: has(flag_bits::MEMCARD_EMU),
            memcard_multi: has(flag_bits::MC_MULTI),
            force_wide: has(flag_bits::FORCE_WIDE),
            wiiu_wide: has(flag_bits::WIIU_WIDE),
            force_progressive: has(flag_bits::FORCE_PROG),
            remove_read_limit: has(flag_bits::REMOVE_READ_LIMIT),
            arcade_mode: has(flag_bits::ARCADE_MODE),
            cc_rumble: has(flag_bits::CC_RUMBLE),
            skip_ipl: has(flag_bits::SKIP_IPL),
            cheats: has(flag_bits::CHEATS),
            debugger: has(flag_bits::DEBUGGER),
            debug_wait: has(flag_bits::DEBUG_WAIT),
            led: has(flag_bits::LED),
            auto_boot: has(flag_bits::AUTO_BOOT),
            os_report: has(flag_bits::OS_REPORT),
            log: has(flag_bits::LOG),
            usb: has(flag_bits::USB),
            bba_emu: has(flag_bits::BBA_EMU),
            native_si: has(flag_bits::NATIVE_SI),
            unknown: bits & !flag_bits::KNOWN,
        }
    }

    pub fn to_bits(&self) -> u32 {
        let pairs = [
            (self.memcard_emu, flag_bits::MEMCARD_EMU),
            (self.memcard_multi, flag_bits::MC_MULTI),
            (self.force_wide, flag_bits::FORCE_WIDE),
            (self.wiiu_wide, flag_bits::WIIU_WIDE),
            (self.force_progressive, flag_bits::FORCE_PROG),
            (self.remove_read_limit, flag_bits::REMOVE_READ_LIMIT),
            (self.arcade_mode, flag_bits::ARCADE_MODE),
            (self.cc_rumble, flag_bits::CC_RUMBLE),
            (self.skip_ipl, flag_bits::SKIP_IPL),
            (self.cheats, flag_bits::CHEATS),
            (self.debugger, flag_bits::DEBUGGER),
            (self.debug_wait, flag_bits::DEBUG_WAIT),
            (self.led, flag_bits::LED),
            (self.auto_boot, flag_bits::AUTO_BOOT),
            (self.os_report, flag_bits::OS_REPORT),
            (self.log, flag_bits::LOG),
            (self.usb, flag_bits::USB),
            (self.bba_emu, flag_bits::BBA_EMU),
            (self.native_si, flag_bits::NATIVE_SI),
        ];
        pairs
            .iter()
            .filter(|(set, _)| *set)
            .fold(self.unknown, |bits, (_, mask)| bits | mask)
    }

    fn host_disabled_mut(&mut self, flag: HostDisabledFlag) -> &mut bool {
        match flag {
            HostDisabledFlag::Cheats => &mut self.cheats,
            HostDisabledFlag::Debugger => &mut self.debugger,
            HostDisabledFlag::DebugWait => &mut self.debug_wait,
            HostDisabledFlag::DriveLed => &mut self.led,
            HostDisabledFlag::AutoBoot => &mut self.auto_boot,
            HostDisabledFlag::OsReport => &mut self.os_report,
            HostDisabledFlag::Log => &mut self.log,
            HostDisabledFlag::Usb => &mut self.usb,
            HostDisabledFlag::BbaEmulation => &mut self.bba_emu,
            HostDisabledFlag::NativeSerial => &mut self.native_si,
        }
    }

    /// Force every host-disabled flag off, returning the ones that were set.
    pub fn clear_host_disabled(&mut self) -> Vec<HostDisabledFlag> {
        let mut cleared = Vec::new();
        for flag in HostDisabledFlag::ALL {
            let slot = self.host_disabled_mut(flag);
            if *slot {
                *slot = false;
                cleared.push(flag);
            }
        }
        cleared
    }

    pub fn is_host_disabled_set(&self) -> bool {
        self.cheats
            || self.debugger
            || self.debug_wait
            || self.led
            || self.auto_boot
            || self.os_report
            || self.log
            || self.usb
            || self.bba_emu
            || self.native_si
    }
}
