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

//! Register map and bit masks for the DS3231.
//!
//! Addresses and bit positions are taken from the Maxim DS3231 datasheet.
//! All date/time registers store their values as packed BCD.

/// 7-bit I2C slave address, hardwired in the device.
pub const ADDR_DEVICE: u8 = 0x68;

// Timekeeping registers.
pub const REG_SECONDS: u8 = 0x00;
pub const REG_HOURS: u8 = 0x02;

// First register of each alarm group. Alarm 1 spans four registers
// (seconds, minutes, hours, day/date), alarm 2 three (no seconds).
pub const REG_ALARM1: u8 = 0x07;
pub const REG_ALARM2: u8 = 0x0b;

pub const REG_CONTROL: u8 = 0x0e;
pub const REG_STATUS: u8 = 0x0f;
pub const REG_AGING: u8 = 0x10;
pub const REG_TEMP_MSB: u8 = 0x11;

/// Total number of addressable registers (0x00-0x12).
pub const REGISTER_COUNT: u8 = 0x13;

// Hours register: bit 6 selects 12-hour mode, and bit 5 doubles as the
// PM indicator (12-hour mode) or the twenty-hours digit (24-hour mode).
pub const HOURS_12H: u8 = 0x40;
pub const HOURS_PM: u8 = 0x20;

// Day/date registers: bit 6 selects day-of-week over day-of-month.
pub const DAY_DATE_SELECT: u8 = 0x40;

// Month register carries the century overflow in bit 7.
pub const MONTH_CENTURY: u8 = 0x80;

// Bit 7 of every register in an alarm group disables the match on that
// register's field (A1M1-A1M4, A2M2-A2M4).
pub const ALARM_MATCH: u8 = 0x80;

// Control register bits.
pub const CTL_EOSC: u8 = 0x80;
pub const CTL_BBSQW: u8 = 0x40;
pub const CTL_CONV: u8 = 0x20;
pub const CTL_RS: u8 = 0x18;
pub const CTL_INTCN: u8 = 0x04;
pub const CTL_A2IE: u8 = 0x02;
pub const CTL_A1IE: u8 = 0x01;

// Status register bits.
pub const STS_OSF: u8 = 0x80;
pub const STS_EN32KHZ: u8 = 0x08;
pub const STS_BSY: u8 = 0x04;
pub const STS_A2F: u8 = 0x02;
pub const STS_A1F: u8 = 0x01;
