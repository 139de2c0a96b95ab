// Copyright (c) 2019-2022 Rene van der Meer
//
// Permission is hereby granted, free of charge, to any person obtaining a
// copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
// THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Control and status items.
//!
//! Every controllable feature of the DS3231 maps to a single bit (or bit
//! group) in one of three registers: control, status, or hours. The tables
//! in this module resolve a [`Command`] to its register address, bit mask
//! and - for writes - the command bits to set, after validating the
//! requested [`Setting`] against the item's accepted values.
//!
//! Not every combination is valid. The alarm and oscillator-stopped flags
//! can only be cleared by software, never forced on; the busy flag is
//! read-only; a temperature conversion can only be started, not stopped.
//! Validation happens before any bus traffic, so an invalid request leaves
//! the device untouched.

use crate::registers::{
    CTL_A1IE, CTL_A2IE, CTL_BBSQW, CTL_CONV, CTL_EOSC, CTL_INTCN, CTL_RS, HOURS_12H, REG_AGING,
    REG_CONTROL, REG_HOURS, REG_STATUS, STS_A1F, STS_A2F, STS_BSY, STS_EN32KHZ, STS_OSF,
};

/// Controllable and readable device items.
///
/// Used with [`Ds3231::control`] and [`Ds3231::status`] to identify the
/// requested item. Every item can be read; the writable settings for each
/// are listed per variant.
///
/// [`Ds3231::control`]: ../rtc/struct.Ds3231.html#method.control
/// [`Ds3231::status`]: ../rtc/struct.Ds3231.html#method.status
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Command {
    /// EOSC bit. When [`On`], the oscillator stops while the device runs
    /// from the battery, halting timekeeping. On Vcc the oscillator always
    /// runs regardless. Accepts [`On`] and [`Off`].
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`Off`]: enum.Setting.html#variant.Off
    ClockHalt,
    /// BBSQW bit. When [`On`] with [`InterruptEnable`] [`Off`], the square
    /// wave output stays enabled on battery power. Accepts [`On`] and
    /// [`Off`].
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`Off`]: enum.Setting.html#variant.Off
    /// [`InterruptEnable`]: #variant.InterruptEnable
    SquareWaveEnable,
    /// RS1/RS2 bits selecting the square wave output frequency. Accepts
    /// the four `Rate` settings.
    SquareWaveType,
    /// 12-hour mode bit in the hours register. Switching the mode also
    /// rewrites the stored hour so the time stays numerically consistent.
    /// Accepts [`On`] (12-hour) and [`Off`] (24-hour).
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`Off`]: enum.Setting.html#variant.Off
    TwelveHour,
    /// CONV bit. Setting this [`On`] forces a temperature conversion and
    /// TCXO update. Check [`BusyFlag`] first; the bit stays on until the
    /// conversion completes and can't be cleared by software. Accepts
    /// [`On`] only.
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`BusyFlag`]: #variant.BusyFlag
    TemperatureConvert,
    /// INTCN bit. [`Off`] routes the square wave to the INT/SQW pin;
    /// [`On`] routes the alarm interrupts there instead. Accepts [`On`]
    /// and [`Off`].
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`Off`]: enum.Setting.html#variant.Off
    InterruptEnable,
    /// A1IE bit, gating alarm 1's interrupt output. Accepts [`On`] and
    /// [`Off`].
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`Off`]: enum.Setting.html#variant.Off
    Alarm1InterruptEnable,
    /// A2IE bit, gating alarm 2's interrupt output. Accepts [`On`] and
    /// [`Off`].
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`Off`]: enum.Setting.html#variant.Off
    Alarm2InterruptEnable,
    /// OSF bit. Reads [`On`] when the oscillator is, or has been, stopped,
    /// casting doubt on the timekeeping data. Stays on until cleared by
    /// software. Accepts [`Off`] only.
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`Off`]: enum.Setting.html#variant.Off
    HaltedFlag,
    /// EN32KHZ bit. When [`On`], the 32kHz pin outputs a 32.768 kHz square
    /// wave; when [`Off`], the pin goes high-impedance. Accepts [`On`] and
    /// [`Off`].
    ///
    /// [`On`]: enum.Setting.html#variant.On
    /// [`Off`]: enum.Setting.html#variant.Off
    Output32kHz,
    /// BSY bit, set while the device executes TCXO functions. Read-only.
    BusyFlag,
    /// A1F bit, set when the time matched the alarm 1 registers. Stays on
    /// until cleared by software. Accepts [`Off`] only.
    ///
    /// [`Off`]: enum.Setting.html#variant.Off
    Alarm1Flag,
    /// A2F bit, the alarm 2 counterpart of [`Alarm1Flag`]. Accepts [`Off`]
    /// only.
    ///
    /// [`Off`]: enum.Setting.html#variant.Off
    /// [`Alarm1Flag`]: #variant.Alarm1Flag
    Alarm2Flag,
    /// Aging offset register, a two's complement correction added to the
    /// oscillator's capacitance array. Passed through as a full byte in
    /// both directions. Accepts [`AgingOffset`].
    ///
    /// [`AgingOffset`]: enum.Setting.html#variant.AgingOffset
    AgingOffset,
}

/// Values written to, or read back from, a [`Command`].
///
/// [`Command`]: enum.Command.html
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Setting {
    /// Bit set.
    On,
    /// Bit cleared.
    Off,
    /// 1 Hz square wave.
    RateHz1,
    /// 1.024 kHz square wave.
    RateKhz1,
    /// 4.096 kHz square wave.
    RateKhz4,
    /// 8.192 kHz square wave.
    RateKhz8,
    /// Raw aging offset register value.
    AgingOffset(u8),
}

// Resolved register target for a read-modify-write: clear `mask`, then OR
// in `bits`.
pub(crate) struct Target {
    pub(crate) address: u8,
    pub(crate) mask: u8,
    pub(crate) bits: u8,
}

// Maps a command/setting pair to its register target, or None when the
// combination isn't in the accepted set.
pub(crate) fn resolve_write(command: Command, setting: Setting) -> Option<Target> {
    let (address, mask) = resolve_read(command);

    let bits = match command {
        Command::ClockHalt
        | Command::SquareWaveEnable
        | Command::TwelveHour
        | Command::InterruptEnable
        | Command::Alarm1InterruptEnable
        | Command::Alarm2InterruptEnable
        | Command::Output32kHz => match setting {
            Setting::On => mask,
            Setting::Off => 0,
            _ => return None,
        },
        Command::SquareWaveType => match setting {
            Setting::RateHz1 => 0x00 << 3,
            Setting::RateKhz1 => 0x01 << 3,
            Setting::RateKhz4 => 0x02 << 3,
            Setting::RateKhz8 => 0x03 << 3,
            _ => return None,
        },
        // A conversion can be started but not stopped.
        Command::TemperatureConvert => match setting {
            Setting::On => mask,
            _ => return None,
        },
        // Flags can only be cleared, never forced on.
        Command::HaltedFlag | Command::Alarm1Flag | Command::Alarm2Flag => match setting {
            Setting::Off => 0,
            _ => return None,
        },
        Command::AgingOffset => match setting {
            Setting::AgingOffset(value) => value,
            _ => return None,
        },
        Command::BusyFlag => return None,
    };

    Some(Target {
        address,
        mask,
        bits,
    })
}

// Register address and bit mask for reading a command's current state.
pub(crate) fn resolve_read(command: Command) -> (u8, u8) {
    match command {
        Command::ClockHalt => (REG_CONTROL, CTL_EOSC),
        Command::SquareWaveEnable => (REG_CONTROL, CTL_BBSQW),
        Command::SquareWaveType => (REG_CONTROL, CTL_RS),
        Command::TwelveHour => (REG_HOURS, HOURS_12H),
        Command::TemperatureConvert => (REG_CONTROL, CTL_CONV),
        Command::InterruptEnable => (REG_CONTROL, CTL_INTCN),
        Command::Alarm1InterruptEnable => (REG_CONTROL, CTL_A1IE),
        Command::Alarm2InterruptEnable => (REG_CONTROL, CTL_A2IE),
        Command::HaltedFlag => (REG_STATUS, STS_OSF),
        Command::Output32kHz => (REG_STATUS, STS_EN32KHZ),
        Command::BusyFlag => (REG_STATUS, STS_BSY),
        Command::Alarm1Flag => (REG_STATUS, STS_A1F),
        Command::Alarm2Flag => (REG_STATUS, STS_A2F),
        Command::AgingOffset => (REG_AGING, 0xff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_off_items() {
        let target = resolve_write(Command::ClockHalt, Setting::On).unwrap();
        assert_eq!(target.address, REG_CONTROL);
        assert_eq!(target.mask, CTL_EOSC);
        assert_eq!(target.bits, CTL_EOSC);

        let target = resolve_write(Command::Output32kHz, Setting::Off).unwrap();
        assert_eq!(target.address, REG_STATUS);
        assert_eq!(target.bits, 0);

        assert!(resolve_write(Command::ClockHalt, Setting::RateHz1).is_none());
        assert!(resolve_write(Command::ClockHalt, Setting::AgingOffset(1)).is_none());
    }

    #[test]
    fn square_wave_rates() {
        for (setting, bits) in [
            (Setting::RateHz1, 0x00),
            (Setting::RateKhz1, 0x08),
            (Setting::RateKhz4, 0x10),
            (Setting::RateKhz8, 0x18),
        ] {
            let target = resolve_write(Command::SquareWaveType, setting).unwrap();
            assert_eq!(target.mask, CTL_RS);
            assert_eq!(target.bits, bits);
        }

        assert!(resolve_write(Command::SquareWaveType, Setting::On).is_none());
    }

    #[test]
    fn flags_only_accept_off() {
        for command in [Command::HaltedFlag, Command::Alarm1Flag, Command::Alarm2Flag] {
            assert!(resolve_write(command, Setting::Off).is_some());
            assert!(resolve_write(command, Setting::On).is_none());
        }
    }

    #[test]
    fn conversion_only_starts() {
        assert!(resolve_write(Command::TemperatureConvert, Setting::On).is_some());
        assert!(resolve_write(Command::TemperatureConvert, Setting::Off).is_none());
    }

    #[test]
    fn busy_flag_is_read_only() {
        assert!(resolve_write(Command::BusyFlag, Setting::On).is_none());
        assert!(resolve_write(Command::BusyFlag, Setting::Off).is_none());
        assert_eq!(resolve_read(Command::BusyFlag), (REG_STATUS, STS_BSY));
    }

    #[test]
    fn aging_offset_full_byte() {
        let target = resolve_write(Command::AgingOffset, Setting::AgingOffset(0xf3)).unwrap();
        assert_eq!(target.address, REG_AGING);
        assert_eq!(target.mask, 0xff);
        assert_eq!(target.bits, 0xf3);
    }
}
