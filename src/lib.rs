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

//! Driver for the Maxim DS3231 real-time clock.
//!
//! The DS3231 is a low-cost, highly accurate I2C RTC with an integrated
//! temperature-compensated crystal oscillator. It keeps seconds through
//! year with leap-year correction, runs in either 12-hour or 24-hour mode,
//! offers two programmable time-of-day alarms, a frequency-programmable
//! square wave output and a 32kHz output, and stays on time from a backup
//! battery when main power drops.
//!
//! This crate gives register-level access to all of the chip's features:
//!
//! - Read and write the clock time registers ([`rtc::Ds3231::read_time`],
//!   [`rtc::Ds3231::write_time`]).
//! - Read and write the alarm registers and trigger types, and poll for
//!   triggers with optional callbacks.
//! - Control and query device features - square wave output, 12/24-hour
//!   mode, interrupt enables, oscillator and alarm flags, aging offset -
//!   through [`rtc::Ds3231::control`] and [`rtc::Ds3231::status`].
//! - Raw register access over the whole register file
//!   ([`rtc::Ds3231::read_ram`], [`rtc::Ds3231::write_ram`]).
//! - Temperature readout at 0.25°C resolution.
//!
//! The driver works on any bus implementing the `embedded-hal` 1.0
//! [`I2c`] trait. The [`codec`] module - the conversion
//! layer between the chip's packed BCD register image and plain
//! [`codec::DateTime`] values - is usable on its own, without a bus.
//!
//! ## Example
//!
//! ```no_run
//! use ds3231::codec::{day_of_week, DateTime};
//! use ds3231::rtc::Ds3231;
//! use rppal::i2c::I2c;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rtc = Ds3231::new(I2c::new()?);
//!
//! let mut time = DateTime {
//!     year: 2024,
//!     month: 3,
//!     date: 1,
//!     hour: 11,
//!     minute: 59,
//!     second: 50,
//!     ..DateTime::default()
//! };
//! time.weekday = day_of_week(time.year, time.month, time.date);
//!
//! rtc.write_time(&time)?;
//! println!("{}", rtc.read_time()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Interrupts
//!
//! The INT/SQW pin's electrical configuration and any interrupt service
//! routine belong to the application. Keep bus traffic out of the ISR -
//! I2C transfers are usually interrupt-driven themselves and can't nest -
//! and either poll [`rtc::Ds3231::check_alarm1`]/[`check_alarm2`] from the
//! normal execution context, or clear the alarm flag there after the ISR
//! has signaled.
//!
//! [`I2c`]: ../embedded_hal/i2c/trait.I2c.html
//! [`check_alarm2`]: rtc/struct.Ds3231.html#method.check_alarm2

// Used by rustdoc to link other crates to ds3231's docs
#![doc(html_root_url = "https://docs.rs/ds3231/0.1.0")]

pub mod alarm;
pub mod bcd;
pub mod codec;
pub mod control;
mod registers;
pub mod rtc;
