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

//! Alarm trigger types.
//!
//! Each alarm register carries a match-disable bit in bit 7 (A1M1-A1M4 for
//! alarm 1, A2M2-A2M4 for alarm 2), and the last register of each group
//! selects day-of-week over day-of-month matching in bit 6. Together these
//! bits determine which fields have to equal the alarm's stored values for
//! it to trigger. The two alarms support different granularities - only
//! alarm 1 can match on seconds - so each gets its own type.

use std::fmt;

/// Trigger types for alarm 1.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Alarm1Type {
    /// Triggers once per second.
    EverySecond,
    /// Triggers when the seconds match.
    Seconds,
    /// Triggers when the minutes and seconds match.
    MinutesSeconds,
    /// Triggers when the hours, minutes and seconds match.
    HoursMinutesSeconds,
    /// Triggers when the date, hours, minutes and seconds match.
    DateHoursMinutesSeconds,
    /// Triggers when the day of the week, hours, minutes and seconds match.
    DayHoursMinutesSeconds,
}

impl Alarm1Type {
    // Match-disable bits, ordered seconds, minutes, hours, day/date. A set
    // bit takes the field out of the comparison.
    pub(crate) fn match_bits(self) -> [bool; 4] {
        match self {
            Alarm1Type::EverySecond => [true, true, true, true],
            Alarm1Type::Seconds => [false, true, true, true],
            Alarm1Type::MinutesSeconds => [false, false, true, true],
            Alarm1Type::HoursMinutesSeconds => [false, false, false, true],
            Alarm1Type::DateHoursMinutesSeconds => [false, false, false, false],
            Alarm1Type::DayHoursMinutesSeconds => [false, false, false, false],
        }
    }

    pub(crate) fn day_select(self) -> bool {
        self == Alarm1Type::DayHoursMinutesSeconds
    }

    // Reconstructs the type from register bits. Returns None for the bit
    // combinations the device can hold but no defined type produces.
    pub(crate) fn from_bits(match_bits: [bool; 4], day_select: bool) -> Option<Alarm1Type> {
        match (match_bits, day_select) {
            ([true, true, true, true], false) => Some(Alarm1Type::EverySecond),
            ([false, true, true, true], false) => Some(Alarm1Type::Seconds),
            ([false, false, true, true], false) => Some(Alarm1Type::MinutesSeconds),
            ([false, false, false, true], false) => Some(Alarm1Type::HoursMinutesSeconds),
            ([false, false, false, false], false) => Some(Alarm1Type::DateHoursMinutesSeconds),
            ([false, false, false, false], true) => Some(Alarm1Type::DayHoursMinutesSeconds),
            _ => None,
        }
    }
}

impl fmt::Display for Alarm1Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Alarm1Type::EverySecond => write!(f, "every second"),
            Alarm1Type::Seconds => write!(f, "seconds match"),
            Alarm1Type::MinutesSeconds => write!(f, "minutes and seconds match"),
            Alarm1Type::HoursMinutesSeconds => write!(f, "hours, minutes and seconds match"),
            Alarm1Type::DateHoursMinutesSeconds => {
                write!(f, "date, hours, minutes and seconds match")
            }
            Alarm1Type::DayHoursMinutesSeconds => {
                write!(f, "day, hours, minutes and seconds match")
            }
        }
    }
}

/// Trigger types for alarm 2.
///
/// Alarm 2 has no seconds register; its finest granularity is once per
/// minute, at the top of the minute.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Alarm2Type {
    /// Triggers once per minute, at 00 seconds.
    EveryMinute,
    /// Triggers when the minutes match.
    Minutes,
    /// Triggers when the hours and minutes match.
    HoursMinutes,
    /// Triggers when the date, hours and minutes match.
    DateHoursMinutes,
    /// Triggers when the day of the week, hours and minutes match.
    DayHoursMinutes,
}

impl Alarm2Type {
    // Match-disable bits, ordered minutes, hours, day/date.
    pub(crate) fn match_bits(self) -> [bool; 3] {
        match self {
            Alarm2Type::EveryMinute => [true, true, true],
            Alarm2Type::Minutes => [false, true, true],
            Alarm2Type::HoursMinutes => [false, false, true],
            Alarm2Type::DateHoursMinutes => [false, false, false],
            Alarm2Type::DayHoursMinutes => [false, false, false],
        }
    }

    pub(crate) fn day_select(self) -> bool {
        self == Alarm2Type::DayHoursMinutes
    }

    pub(crate) fn from_bits(match_bits: [bool; 3], day_select: bool) -> Option<Alarm2Type> {
        match (match_bits, day_select) {
            ([true, true, true], false) => Some(Alarm2Type::EveryMinute),
            ([false, true, true], false) => Some(Alarm2Type::Minutes),
            ([false, false, true], false) => Some(Alarm2Type::HoursMinutes),
            ([false, false, false], false) => Some(Alarm2Type::DateHoursMinutes),
            ([false, false, false], true) => Some(Alarm2Type::DayHoursMinutes),
            _ => None,
        }
    }
}

impl fmt::Display for Alarm2Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Alarm2Type::EveryMinute => write!(f, "every minute"),
            Alarm2Type::Minutes => write!(f, "minutes match"),
            Alarm2Type::HoursMinutes => write!(f, "hours and minutes match"),
            Alarm2Type::DateHoursMinutes => write!(f, "date, hours and minutes match"),
            Alarm2Type::DayHoursMinutes => write!(f, "day, hours and minutes match"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALARM1_TYPES: [Alarm1Type; 6] = [
        Alarm1Type::EverySecond,
        Alarm1Type::Seconds,
        Alarm1Type::MinutesSeconds,
        Alarm1Type::HoursMinutesSeconds,
        Alarm1Type::DateHoursMinutesSeconds,
        Alarm1Type::DayHoursMinutesSeconds,
    ];

    const ALARM2_TYPES: [Alarm2Type; 5] = [
        Alarm2Type::EveryMinute,
        Alarm2Type::Minutes,
        Alarm2Type::HoursMinutes,
        Alarm2Type::DateHoursMinutes,
        Alarm2Type::DayHoursMinutes,
    ];

    #[test]
    fn alarm1_bits_round_trip() {
        for alarm_type in ALARM1_TYPES {
            assert_eq!(
                Alarm1Type::from_bits(alarm_type.match_bits(), alarm_type.day_select()),
                Some(alarm_type)
            );
        }
    }

    #[test]
    fn alarm2_bits_round_trip() {
        for alarm_type in ALARM2_TYPES {
            assert_eq!(
                Alarm2Type::from_bits(alarm_type.match_bits(), alarm_type.day_select()),
                Some(alarm_type)
            );
        }
    }

    #[test]
    fn undefined_combinations_are_rejected() {
        // Partial masks that skip a finer-grained field are meaningless.
        assert_eq!(Alarm1Type::from_bits([true, false, false, false], false), None);
        assert_eq!(Alarm1Type::from_bits([true, true, true, true], true), None);
        assert_eq!(Alarm2Type::from_bits([true, false, false], false), None);
        assert_eq!(Alarm2Type::from_bits([true, true, true], true), None);
    }
}
