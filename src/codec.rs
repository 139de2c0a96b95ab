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

//! Codec for the DS3231's packed register image.
//!
//! The device stores date, time and alarm values as BCD spread across
//! one-byte registers, with several fields overlaid on control bits: the
//! hours register doubles as the 12/24-hour mode selector and PM indicator,
//! the month register carries the century overflow, and the day/date
//! registers switch meaning based on a selector bit. The functions in this
//! module translate between that register image and a plain [`DateTime`]
//! value. None of them touch the bus; they operate on buffers that have
//! already been read from (or will be written to) the device by
//! [`Ds3231`].
//!
//! Packing always starts from a zeroed buffer, so no bits leak through
//! from a previous operation, and every call owns its own buffer, making
//! the codec reentrant.
//!
//! ## Hours and 12-hour mode
//!
//! When bit 6 of an hours register is set, the register holds a 5-bit
//! 1-12 value plus a PM flag in bit 5. When clear, it holds a 6-bit 0-23
//! value. Packing for a device in 12-hour mode accepts hours in either
//! convention: values above 12 are folded into 1-12 with PM set, so both
//! `17:00` and `5 PM` produce the same register image.
//!
//! ## Years and the century bit
//!
//! The device only stores the last two digits of the year, plus a century
//! overflow bit in the month register. [`ClockConfig::century`] supplies the
//! missing digits; with the default base of 20, representable years run
//! from 2000 through 2199.
//!
//! [`Ds3231`]: ../rtc/struct.Ds3231.html

use std::fmt;

use crate::bcd;
use crate::registers::{DAY_DATE_SELECT, HOURS_12H, HOURS_PM, MONTH_CENTURY};

/// Plain date/time value shared between the caller and the codec.
///
/// All fields are public and unvalidated; keeping them within the
/// documented ranges is the caller's responsibility. The value carries no
/// identity of its own - it's scratch state populated right before a write
/// or right after a read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct DateTime {
    /// Four-digit year, derived from the century base and the century
    /// overflow bit. See [`ClockConfig::century`].
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of the month (1-31). Not validated against the days in the
    /// month; the device handles month lengths and leap years itself.
    pub date: u8,
    /// Day of the week (1-7). The day assigned to 1 is an application
    /// convention; 0 means "unset", and selects date-based over day-based
    /// encoding when writing an alarm.
    pub weekday: u8,
    /// Hour of the day, 1-12 or 0-23 depending on the clock mode.
    pub hour: u8,
    /// Minutes past the hour (0-59).
    pub minute: u8,
    /// Seconds past the minute (0-59).
    pub second: u8,
    /// PM indicator. Only ever true in 12-hour mode; in 24-hour mode it
    /// reads as false regardless of the stored hour.
    pub pm: bool,
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.date, self.hour, self.minute, self.second
        )?;

        if self.pm {
            write!(f, " PM")?;
        }

        Ok(())
    }
}

/// Clock handling configuration.
///
/// The century base and the two feature switches are fixed at construction
/// time. Disabling a feature mirrors a device that's only ever operated in
/// one convention: with `twelve_hour` off, hours always decode through the
/// 24-hour path and the PM flag stays false; with `day_of_week` off, the
/// weekday register is skipped and alarms always use date encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    /// Century base used to expand the device's two-digit year. Years run
    /// from `century * 100` through `century * 100 + 199`. Defaults to 20.
    pub century: u8,
    /// Enables 12-hour (AM/PM) clock support. Defaults to true.
    pub twelve_hour: bool,
    /// Enables day-of-week support. Defaults to true.
    pub day_of_week: bool,
}

impl Default for ClockConfig {
    fn default() -> ClockConfig {
        ClockConfig {
            century: 20,
            twelve_hour: true,
            day_of_week: true,
        }
    }
}

/// Unpacks the 7-byte timekeeping register group into a [`DateTime`].
pub fn unpack_time(regs: &[u8; 7], config: &ClockConfig) -> DateTime {
    let mut time = DateTime {
        second: bcd::decode(regs[0]),
        minute: bcd::decode(regs[1]),
        ..DateTime::default()
    };

    let (hour, pm) = unpack_hours(regs[2], config);
    time.hour = hour;
    time.pm = pm;

    if config.day_of_week {
        time.weekday = bcd::decode(regs[3]);
    }
    time.date = bcd::decode(regs[4]);
    time.month = bcd::decode(regs[5] & 0x1f);

    time.year = u16::from(bcd::decode(regs[6])) + u16::from(config.century) * 100;
    if regs[5] & MONTH_CENTURY != 0 {
        time.year += 100;
    }

    time
}

/// Packs a [`DateTime`] into the 7-byte timekeeping register group.
///
/// `twelve_hour` is the mode the device is currently running in, read from
/// the live hours register rather than inferred from `time`, so a write
/// never flips the device's clock mode as a side effect.
pub fn pack_time(time: &DateTime, twelve_hour: bool, config: &ClockConfig) -> [u8; 7] {
    let mut regs = [0u8; 7];

    regs[0] = bcd::encode(time.second);
    regs[1] = bcd::encode(time.minute);
    regs[2] = pack_hours(time.hour, time.pm, twelve_hour && config.twelve_hour);

    if config.day_of_week {
        regs[3] = bcd::encode(time.weekday);
    }
    regs[4] = bcd::encode(time.date);
    regs[5] = bcd::encode(time.month);

    let mut year = time.year.wrapping_sub(u16::from(config.century) * 100);
    if year > 99 {
        // A full century elapsed past the base.
        regs[5] |= MONTH_CENTURY;
        year -= 100;
    }
    regs[6] = bcd::encode(year as u8);

    regs
}

/// Unpacks the 4-byte alarm 1 register group into `time`.
///
/// Only the seconds, minutes, hour and day/date fields are updated. The
/// day/date selector bit determines which of `weekday` and `date` receives
/// the stored value; the other is set to 0.
pub fn unpack_alarm1(regs: &[u8; 4], time: &mut DateTime, config: &ClockConfig) {
    time.second = bcd::decode(regs[0] & 0x7f);
    unpack_alarm_fields(regs[1], regs[2], regs[3], time, config);
}

/// Unpacks the 3-byte alarm 2 register group into `time`.
///
/// Alarm 2 has no seconds register; `time.second` keeps its prior value.
pub fn unpack_alarm2(regs: &[u8; 3], time: &mut DateTime, config: &ClockConfig) {
    unpack_alarm_fields(regs[0], regs[1], regs[2], time, config);
}

/// Packs `time` into the 4-byte alarm 1 register group.
///
/// `weekday` of 0 selects date matching; any other value selects
/// day-of-week matching. The match-enable bits are left clear - they belong
/// to the alarm type, set separately through a read-modify-write.
pub fn pack_alarm1(time: &DateTime, twelve_hour: bool, config: &ClockConfig) -> [u8; 4] {
    let fields = pack_alarm_fields(time, twelve_hour, config);

    [bcd::encode(time.second), fields[0], fields[1], fields[2]]
}

/// Packs `time` into the 3-byte alarm 2 register group (no seconds).
pub fn pack_alarm2(time: &DateTime, twelve_hour: bool, config: &ClockConfig) -> [u8; 3] {
    pack_alarm_fields(time, twelve_hour, config)
}

// Minutes, hours and day/date are laid out identically in both alarm
// groups, so both directions share these helpers.
fn unpack_alarm_fields(
    minutes: u8,
    hours: u8,
    day_date: u8,
    time: &mut DateTime,
    config: &ClockConfig,
) {
    time.minute = bcd::decode(minutes & 0x7f);

    let (hour, pm) = unpack_hours(hours, config);
    time.hour = hour;
    time.pm = pm;

    if config.day_of_week && day_date & DAY_DATE_SELECT != 0 {
        time.weekday = bcd::decode(day_date & 0x0f);
        time.date = 0;
    } else {
        time.date = bcd::decode(day_date & 0x3f);
        time.weekday = 0;
    }
}

fn pack_alarm_fields(time: &DateTime, twelve_hour: bool, config: &ClockConfig) -> [u8; 3] {
    let mut fields = [0u8; 3];

    fields[0] = bcd::encode(time.minute);
    fields[1] = pack_hours(time.hour, time.pm, twelve_hour && config.twelve_hour);

    if config.day_of_week && time.weekday != 0 {
        fields[2] = bcd::encode(time.weekday) | DAY_DATE_SELECT;
    } else {
        fields[2] = bcd::encode(time.date);
    }

    fields
}

fn unpack_hours(value: u8, config: &ClockConfig) -> (u8, bool) {
    if config.twelve_hour && value & HOURS_12H != 0 {
        (bcd::decode(value & 0x1f), value & HOURS_PM != 0)
    } else {
        (bcd::decode(value & 0x3f), false)
    }
}

fn pack_hours(hour: u8, pm: bool, twelve_hour: bool) -> u8 {
    if twelve_hour {
        let (hour, pm) = if hour > 12 { (hour - 12, true) } else { (hour, pm) };

        let mut value = bcd::encode(hour) | HOURS_12H;
        if pm {
            value |= HOURS_PM;
        }

        value
    } else {
        bcd::encode(hour)
    }
}

/// Rewrites a 24-hour hours register byte to its 12-hour equivalent.
///
/// Leaves the mode bit untouched; committing the mode change is the
/// caller's read-modify-write.
pub(crate) fn hours_to_twelve(value: u8) -> u8 {
    if value & HOURS_12H != 0 {
        // Already in 12-hour mode.
        return value;
    }

    let hour = bcd::decode(value & 0x3f);
    if hour > 12 {
        bcd::encode(hour - 12) | HOURS_PM
    } else {
        value
    }
}

/// Rewrites a 12-hour hours register byte to its 24-hour equivalent.
pub(crate) fn hours_to_twenty_four(value: u8) -> u8 {
    if value & HOURS_12H != 0 && value & HOURS_PM != 0 {
        bcd::encode(bcd::decode(value & 0x1f) + 12)
    } else {
        value
    }
}

/// Calculates the day of the week (1-7, where 1 = Sunday) for the
/// specified date.
///
/// Uses Sakamoto's method with a per-month offset table. Valid for years
/// after 1752, months 1-12 and dates 1-31.
pub fn day_of_week(year: u16, month: u8, date: u8) -> u8 {
    const OFFSET: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];

    // January and February count as months of the previous year.
    let year = if month < 3 { year - 1 } else { year };

    ((year + year / 4 - year / 100 + year / 400 + OFFSET[usize::from(month) - 1] + u16::from(date))
        % 7
        + 1) as u8
}
