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

//! Interface for the DS3231 real-time clock.
//!
//! [`Ds3231`] talks to the device at its hardwired 7-bit address (0x68)
//! through any I2C bus that implements the `embedded-hal`
//! [`I2c`] trait. Every operation performs a blocking bus
//! transaction and returns after it completes or fails. The driver keeps no
//! cache of device state; each call reads or writes the registers it needs.
//!
//! ## Concurrency
//!
//! One execution path at a time. Operations don't overlap safely across
//! threads or interrupt contexts - most I2C implementations rely on an
//! interrupt-driven protocol that can't nest - so alarm polling through
//! [`check_alarm1`]/[`check_alarm2`] belongs in the normal execution
//! context, at whatever cadence suits the application.
//!
//! ## Errors
//!
//! Transport failures are propagated as [`Error::I2c`] without any internal
//! retry; every operation leaves the device in a state where the caller can
//! simply retry at the call site. Invalid control requests fail with
//! [`Error::InvalidValue`] before any bus traffic.
//!
//! [`Ds3231`]: struct.Ds3231.html
//! [`I2c`]: ../../embedded_hal/i2c/trait.I2c.html
//! [`check_alarm1`]: struct.Ds3231.html#method.check_alarm1
//! [`check_alarm2`]: struct.Ds3231.html#method.check_alarm2
//! [`Error::I2c`]: enum.Error.html#variant.I2c
//! [`Error::InvalidValue`]: enum.Error.html#variant.InvalidValue

use std::error;
use std::fmt;
use std::result;

use embedded_hal::i2c::I2c;

use crate::alarm::{Alarm1Type, Alarm2Type};
use crate::codec::{self, ClockConfig, DateTime};
use crate::control::{self, Command, Setting};
use crate::registers::{
    ADDR_DEVICE, ALARM_MATCH, DAY_DATE_SELECT, REGISTER_COUNT, REG_ALARM1, REG_ALARM2,
    REG_SECONDS, REG_TEMP_MSB,
};

/// Errors that can occur when accessing the DS3231.
#[derive(Debug)]
pub enum Error<E> {
    /// I2C bus error.
    ///
    /// The underlying bus transaction failed or transferred fewer bytes
    /// than requested. The operation isn't retried internally.
    I2c(E),
    /// Invalid value for the requested control item.
    ///
    /// The combination isn't in the accepted set - for instance, forcing a
    /// flag on that hardware only lets software clear. Rejected before any
    /// bus traffic.
    InvalidValue,
    /// The alarm registers hold a bit combination that doesn't correspond
    /// to any defined trigger type.
    UnknownAlarmType,
    /// RAM access outside the device's register space.
    AddressRange,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::I2c(ref err) => write!(f, "I2C bus error: {:?}", err),
            Error::InvalidValue => write!(f, "Invalid value for the requested control item"),
            Error::UnknownAlarmType => write!(f, "Undefined alarm trigger type"),
            Error::AddressRange => write!(f, "Address range outside the device's register space"),
        }
    }
}

impl<E: fmt::Debug> error::Error for Error<E> {}

/// Result type returned from methods that can have `rtc::Error`s.
pub type Result<T, E> = result::Result<T, Error<E>>;

/// Provides access to a DS3231 connected to an I2C bus.
///
/// The generic parameter is the bus; any `embedded-hal` 1.0
/// [`I2c`] implementation works. The device address is fixed
/// at 0x68, hardwired in the chip.
///
/// ```no_run
/// use ds3231::rtc::Ds3231;
/// use rppal::i2c::I2c;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut rtc = Ds3231::new(I2c::new()?);
/// println!("{}", rtc.read_time()?);
/// # Ok(())
/// # }
/// ```
///
/// [`I2c`]: ../../embedded_hal/i2c/trait.I2c.html
pub struct Ds3231<I2C> {
    i2c: I2C,
    config: ClockConfig,
    alarm1_callback: Option<Box<dyn FnMut()>>,
    alarm2_callback: Option<Box<dyn FnMut()>>,
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Constructs a new `Ds3231` with the default [`ClockConfig`].
    ///
    /// [`ClockConfig`]: ../codec/struct.ClockConfig.html
    pub fn new(i2c: I2C) -> Ds3231<I2C> {
        Ds3231::with_config(i2c, ClockConfig::default())
    }

    /// Constructs a new `Ds3231` with the specified [`ClockConfig`].
    ///
    /// [`ClockConfig`]: ../codec/struct.ClockConfig.html
    pub fn with_config(i2c: I2C, config: ClockConfig) -> Ds3231<I2C> {
        Ds3231 {
            i2c,
            config,
            alarm1_callback: None,
            alarm2_callback: None,
        }
    }

    /// Consumes the driver, returning the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Returns the active clock configuration.
    pub fn config(&self) -> ClockConfig {
        self.config
    }

    /// Returns the century base used to expand the device's two-digit
    /// year.
    pub fn century(&self) -> u8 {
        self.config.century
    }

    /// Sets the century base. Dates start from `century * 100` and span
    /// 199 years.
    pub fn set_century(&mut self, century: u8) {
        self.config.century = century;
    }

    /// Reads the current date and time.
    pub fn read_time(&mut self) -> Result<DateTime, I2C::Error> {
        let mut regs = [0u8; 7];
        self.read_registers(REG_SECONDS, &mut regs)?;

        Ok(codec::unpack_time(&regs, &self.config))
    }

    /// Writes `time` as the current date and time.
    ///
    /// The hour is stored in whichever clock mode the device is currently
    /// running in; the live mode is queried first so the write never flips
    /// it. In 12-hour mode, hours above 12 are folded into 1-12 with PM
    /// set. Writing the time also restarts a halted clock.
    pub fn write_time(&mut self, time: &DateTime) -> Result<(), I2C::Error> {
        let twelve_hour = self.twelve_hour_mode()?;
        let regs = codec::pack_time(time, twelve_hour, &self.config);

        #[cfg(feature = "log")]
        log::trace!("writing time registers {:02x?}", regs);

        self.write_registers(REG_SECONDS, &regs)
    }

    /// Returns `false` when the oscillator is configured to stop on
    /// battery power.
    pub fn is_running(&mut self) -> Result<bool, I2C::Error> {
        Ok(self.status(Command::ClockHalt)? != Setting::On)
    }

    /// Reads the alarm 1 trigger time into `time`.
    ///
    /// Updates the seconds, minutes, hour and day/date fields; whichever
    /// of `weekday` and `date` the stored selector bit doesn't pick is set
    /// to 0. The remaining fields keep their prior values.
    pub fn read_alarm1(&mut self, time: &mut DateTime) -> Result<(), I2C::Error> {
        let mut regs = [0u8; 4];
        self.read_registers(REG_ALARM1, &mut regs)?;
        codec::unpack_alarm1(&regs, time, &self.config);

        Ok(())
    }

    /// Reads the alarm 2 trigger time into `time`.
    ///
    /// Alarm 2 has no seconds register, so `time.second` keeps its prior
    /// value.
    pub fn read_alarm2(&mut self, time: &mut DateTime) -> Result<(), I2C::Error> {
        let mut regs = [0u8; 3];
        self.read_registers(REG_ALARM2, &mut regs)?;
        codec::unpack_alarm2(&regs, time, &self.config);

        Ok(())
    }

    /// Writes `time` as the alarm 1 trigger time and sets the trigger
    /// type.
    ///
    /// A `weekday` of 0 stores a date-based trigger; any other value
    /// stores a day-of-week trigger. The day-vs-date selection of
    /// `alarm_type` takes precedence, so pass a matching combination.
    pub fn write_alarm1(
        &mut self,
        time: &DateTime,
        alarm_type: Alarm1Type,
    ) -> Result<(), I2C::Error> {
        let twelve_hour = self.twelve_hour_mode()?;
        let regs = codec::pack_alarm1(time, twelve_hour, &self.config);
        self.write_registers(REG_ALARM1, &regs)?;

        self.set_alarm1_type(alarm_type)
    }

    /// Writes `time` as the alarm 2 trigger time and sets the trigger
    /// type.
    pub fn write_alarm2(
        &mut self,
        time: &DateTime,
        alarm_type: Alarm2Type,
    ) -> Result<(), I2C::Error> {
        let twelve_hour = self.twelve_hour_mode()?;
        let regs = codec::pack_alarm2(time, twelve_hour, &self.config);
        self.write_registers(REG_ALARM2, &regs)?;

        self.set_alarm2_type(alarm_type)
    }

    /// Sets the alarm 1 trigger type.
    ///
    /// Read-modify-writes the alarm register group, leaving the stored
    /// trigger time untouched.
    pub fn set_alarm1_type(&mut self, alarm_type: Alarm1Type) -> Result<(), I2C::Error> {
        let mut regs = [0u8; 4];
        self.read_registers(REG_ALARM1, &mut regs)?;

        for (reg, disable) in regs.iter_mut().zip(alarm_type.match_bits()) {
            if disable {
                *reg |= ALARM_MATCH;
            } else {
                *reg &= !ALARM_MATCH;
            }
        }

        if alarm_type.day_select() {
            regs[3] |= DAY_DATE_SELECT;
        } else {
            regs[3] &= !DAY_DATE_SELECT;
        }

        self.write_registers(REG_ALARM1, &regs)
    }

    /// Sets the alarm 2 trigger type.
    pub fn set_alarm2_type(&mut self, alarm_type: Alarm2Type) -> Result<(), I2C::Error> {
        let mut regs = [0u8; 3];
        self.read_registers(REG_ALARM2, &mut regs)?;

        for (reg, disable) in regs.iter_mut().zip(alarm_type.match_bits()) {
            if disable {
                *reg |= ALARM_MATCH;
            } else {
                *reg &= !ALARM_MATCH;
            }
        }

        if alarm_type.day_select() {
            regs[2] |= DAY_DATE_SELECT;
        } else {
            regs[2] &= !DAY_DATE_SELECT;
        }

        self.write_registers(REG_ALARM2, &regs)
    }

    /// Returns the alarm 1 trigger type stored in the device.
    ///
    /// Returns [`Error::UnknownAlarmType`] when the registers hold a bit
    /// combination no defined type produces, rather than guessing the
    /// nearest type.
    ///
    /// [`Error::UnknownAlarmType`]: enum.Error.html#variant.UnknownAlarmType
    pub fn alarm1_type(&mut self) -> Result<Alarm1Type, I2C::Error> {
        let mut regs = [0u8; 4];
        self.read_registers(REG_ALARM1, &mut regs)?;

        let mut match_bits = [false; 4];
        for (bit, reg) in match_bits.iter_mut().zip(regs) {
            *bit = reg & ALARM_MATCH != 0;
        }

        Alarm1Type::from_bits(match_bits, regs[3] & DAY_DATE_SELECT != 0)
            .ok_or(Error::UnknownAlarmType)
    }

    /// Returns the alarm 2 trigger type stored in the device.
    pub fn alarm2_type(&mut self) -> Result<Alarm2Type, I2C::Error> {
        let mut regs = [0u8; 3];
        self.read_registers(REG_ALARM2, &mut regs)?;

        let mut match_bits = [false; 3];
        for (bit, reg) in match_bits.iter_mut().zip(regs) {
            *bit = reg & ALARM_MATCH != 0;
        }

        Alarm2Type::from_bits(match_bits, regs[2] & DAY_DATE_SELECT != 0)
            .ok_or(Error::UnknownAlarmType)
    }

    /// Checks whether alarm 1 has triggered.
    ///
    /// When the trigger flag is set, it's cleared and the alarm 1 callback
    /// (if any) is invoked before returning `true`. Polling this at a
    /// regular cadence gives interrupt-like behavior without the
    /// restrictions of an interrupt handler.
    pub fn check_alarm1(&mut self) -> Result<bool, I2C::Error> {
        if self.status(Command::Alarm1Flag)? != Setting::On {
            return Ok(false);
        }

        self.control(Command::Alarm1Flag, Setting::Off)?;

        #[cfg(feature = "log")]
        log::debug!("alarm 1 triggered");

        if let Some(ref mut callback) = self.alarm1_callback {
            callback();
        }

        Ok(true)
    }

    /// Checks whether alarm 2 has triggered.
    pub fn check_alarm2(&mut self) -> Result<bool, I2C::Error> {
        if self.status(Command::Alarm2Flag)? != Setting::On {
            return Ok(false);
        }

        self.control(Command::Alarm2Flag, Setting::Off)?;

        #[cfg(feature = "log")]
        log::debug!("alarm 2 triggered");

        if let Some(ref mut callback) = self.alarm2_callback {
            callback();
        }

        Ok(true)
    }

    /// Sets the callback invoked by [`check_alarm1`] when the alarm has
    /// triggered.
    ///
    /// [`check_alarm1`]: #method.check_alarm1
    pub fn set_alarm1_callback<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.alarm1_callback = Some(Box::new(callback));
    }

    /// Removes the alarm 1 callback.
    pub fn clear_alarm1_callback(&mut self) {
        self.alarm1_callback = None;
    }

    /// Sets the callback invoked by [`check_alarm2`] when the alarm has
    /// triggered.
    ///
    /// [`check_alarm2`]: #method.check_alarm2
    pub fn set_alarm2_callback<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.alarm2_callback = Some(Box::new(callback));
    }

    /// Removes the alarm 2 callback.
    pub fn clear_alarm2_callback(&mut self) {
        self.alarm2_callback = None;
    }

    /// Sets the control item `command` to `setting`.
    ///
    /// The accepted settings per item are listed on [`Command`]. Anything
    /// outside the accepted set returns [`Error::InvalidValue`] without
    /// touching the bus. Valid requests perform a single read-modify-write
    /// of the item's register, preserving the unrelated bits.
    ///
    /// Switching [`Command::TwelveHour`] rewrites the stored hour inside
    /// the same read-modify-write, before the mode bit is committed, so no
    /// inconsistent intermediate state is ever observable on the device:
    /// a 24-hour value above 12 becomes its 12-hour PM form, and a 12-hour
    /// PM value becomes its 24-hour form.
    ///
    /// [`Command`]: ../control/enum.Command.html
    /// [`Command::TwelveHour`]: ../control/enum.Command.html#variant.TwelveHour
    /// [`Error::InvalidValue`]: enum.Error.html#variant.InvalidValue
    pub fn control(&mut self, command: Command, setting: Setting) -> Result<(), I2C::Error> {
        let target = match control::resolve_write(command, setting) {
            Some(target) => target,
            None => return Err(Error::InvalidValue),
        };

        let mut regs = [0u8; 1];
        self.read_registers(target.address, &mut regs)?;

        if command == Command::TwelveHour && self.config.twelve_hour {
            regs[0] = match setting {
                Setting::On => codec::hours_to_twelve(regs[0]),
                _ => codec::hours_to_twenty_four(regs[0]),
            };
        }

        regs[0] &= !target.mask;
        regs[0] |= target.bits;

        #[cfg(feature = "log")]
        log::trace!("control {:?} -> register 0x{:02x} = 0x{:02x}", command, target.address, regs[0]);

        self.write_registers(target.address, &regs)
    }

    /// Returns the current setting of the control item `command`.
    ///
    /// [`Command::SquareWaveType`] returns one of the four `Rate`
    /// settings, [`Command::AgingOffset`] the full register byte; every
    /// other item reads back as [`Setting::On`] or [`Setting::Off`].
    ///
    /// [`Command::SquareWaveType`]: ../control/enum.Command.html#variant.SquareWaveType
    /// [`Command::AgingOffset`]: ../control/enum.Command.html#variant.AgingOffset
    /// [`Setting::On`]: ../control/enum.Setting.html#variant.On
    /// [`Setting::Off`]: ../control/enum.Setting.html#variant.Off
    pub fn status(&mut self, command: Command) -> Result<Setting, I2C::Error> {
        let (address, mask) = control::resolve_read(command);

        let mut regs = [0u8; 1];
        self.read_registers(address, &mut regs)?;

        Ok(match command {
            Command::SquareWaveType => match (regs[0] & mask) >> 3 {
                0 => Setting::RateHz1,
                1 => Setting::RateKhz1,
                2 => Setting::RateKhz4,
                _ => Setting::RateKhz8,
            },
            Command::AgingOffset => Setting::AgingOffset(regs[0]),
            _ => {
                if regs[0] & mask != 0 {
                    Setting::On
                } else {
                    Setting::Off
                }
            }
        })
    }

    /// Reads `buffer.len()` raw register bytes starting at `address`.
    ///
    /// The requested span has to fit in the device's register space
    /// (0x00-0x12); anything else returns [`Error::AddressRange`] before
    /// any bus traffic. Returns the number of bytes read.
    ///
    /// [`Error::AddressRange`]: enum.Error.html#variant.AddressRange
    pub fn read_ram(&mut self, address: u8, buffer: &mut [u8]) -> Result<usize, I2C::Error> {
        check_ram_span(address, buffer.len())?;
        self.read_registers(address, buffer)?;

        Ok(buffer.len())
    }

    /// Writes the bytes in `data` to raw registers starting at `address`.
    ///
    /// Bounds-checked like [`read_ram`]. Returns the number of bytes
    /// written.
    ///
    /// [`read_ram`]: #method.read_ram
    pub fn write_ram(&mut self, address: u8, data: &[u8]) -> Result<usize, I2C::Error> {
        check_ram_span(address, data.len())?;
        self.write_registers(address, data)?;

        Ok(data.len())
    }

    /// Reads the temperature register in degrees Celsius.
    ///
    /// The device updates the reading every 64 seconds. Resolution is
    /// 0.25°C: an integer upper byte plus a quarter-degree fraction in the
    /// top two bits of the lower byte.
    pub fn temperature(&mut self) -> Result<f32, I2C::Error> {
        let mut regs = [0u8; 2];
        self.read_registers(REG_TEMP_MSB, &mut regs)?;

        // Sign-extending shift keeps negative temperatures intact.
        let quarters = i16::from_be_bytes(regs) >> 6;

        Ok(f32::from(quarters) * 0.25)
    }

    // The current clock mode of the device, read from the live hours
    // register rather than from any value the caller supplied.
    fn twelve_hour_mode(&mut self) -> Result<bool, I2C::Error> {
        if !self.config.twelve_hour {
            return Ok(false);
        }

        Ok(self.status(Command::TwelveHour)? == Setting::On)
    }

    fn read_registers(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), I2C::Error> {
        self.i2c
            .write_read(ADDR_DEVICE, &[address], buffer)
            .map_err(Error::I2c)
    }

    fn write_registers(&mut self, address: u8, data: &[u8]) -> Result<(), I2C::Error> {
        let mut buffer = [0u8; REGISTER_COUNT as usize + 1];
        buffer[0] = address;
        buffer[1..=data.len()].copy_from_slice(data);

        self.i2c
            .write(ADDR_DEVICE, &buffer[..=data.len()])
            .map_err(Error::I2c)
    }
}

fn check_ram_span<E>(address: u8, len: usize) -> Result<(), E> {
    if len == 0 || usize::from(address) + len > usize::from(REGISTER_COUNT) {
        return Err(Error::AddressRange);
    }

    Ok(())
}

impl<I2C: fmt::Debug> fmt::Debug for Ds3231<I2C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ds3231")
            .field("i2c", &self.i2c)
            .field("config", &self.config)
            .field("alarm1_callback", &self.alarm1_callback.is_some())
            .field("alarm2_callback", &self.alarm2_callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};

    use super::*;

    const ADDR: u8 = 0x68;

    fn sample_time() -> DateTime {
        DateTime {
            year: 2024,
            month: 3,
            date: 14,
            weekday: 5,
            hour: 15,
            minute: 30,
            second: 42,
            pm: false,
        }
    }

    #[test]
    fn read_time_24h() {
        let mut rtc = Ds3231::new(I2cMock::new(&[I2cTrans::write_read(
            ADDR,
            vec![0x00],
            vec![0x42, 0x30, 0x15, 0x05, 0x14, 0x03, 0x24],
        )]));

        assert_eq!(rtc.read_time().unwrap(), sample_time());

        rtc.release().done();
    }

    #[test]
    fn read_time_12h() {
        let mut rtc = Ds3231::new(I2cMock::new(&[I2cTrans::write_read(
            ADDR,
            vec![0x00],
            vec![0x00, 0x00, 0x65, 0x01, 0x01, 0x01, 0x21],
        )]));

        let time = rtc.read_time().unwrap();
        assert_eq!(time.hour, 5);
        assert!(time.pm);

        rtc.release().done();
    }

    #[test]
    fn write_time_24h() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            // Live clock mode query.
            I2cTrans::write_read(ADDR, vec![0x02], vec![0x15]),
            I2cTrans::write(
                ADDR,
                vec![0x00, 0x42, 0x30, 0x15, 0x05, 0x14, 0x03, 0x24],
            ),
        ]));

        rtc.write_time(&sample_time()).unwrap();

        rtc.release().done();
    }

    #[test]
    fn write_time_12h_folds_hour() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            // Device reports 12-hour mode; hour 15 becomes 3 PM.
            I2cTrans::write_read(ADDR, vec![0x02], vec![0x65]),
            I2cTrans::write(
                ADDR,
                vec![0x00, 0x42, 0x30, 0x63, 0x05, 0x14, 0x03, 0x24],
            ),
        ]));

        rtc.write_time(&sample_time()).unwrap();

        rtc.release().done();
    }

    #[test]
    fn mode_change_rewrites_hour() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            // 13:xx in 24-hour mode becomes 1 PM when switching to 12-hour.
            I2cTrans::write_read(ADDR, vec![0x02], vec![0x13]),
            I2cTrans::write(ADDR, vec![0x02, 0x61]),
            // ... and back to 13:xx when switching to 24-hour.
            I2cTrans::write_read(ADDR, vec![0x02], vec![0x61]),
            I2cTrans::write(ADDR, vec![0x02, 0x13]),
        ]));

        rtc.control(Command::TwelveHour, Setting::On).unwrap();
        rtc.control(Command::TwelveHour, Setting::Off).unwrap();

        rtc.release().done();
    }

    #[test]
    fn alarm1_type_round_trip() {
        // (type, register image with the trigger time zeroed)
        let cases: [(Alarm1Type, [u8; 4]); 6] = [
            (Alarm1Type::EverySecond, [0x80, 0x80, 0x80, 0x80]),
            (Alarm1Type::Seconds, [0x00, 0x80, 0x80, 0x80]),
            (Alarm1Type::MinutesSeconds, [0x00, 0x00, 0x80, 0x80]),
            (Alarm1Type::HoursMinutesSeconds, [0x00, 0x00, 0x00, 0x80]),
            (Alarm1Type::DateHoursMinutesSeconds, [0x00, 0x00, 0x00, 0x00]),
            (Alarm1Type::DayHoursMinutesSeconds, [0x00, 0x00, 0x00, 0x40]),
        ];

        for (alarm_type, image) in cases {
            let mut rtc = Ds3231::new(I2cMock::new(&[
                I2cTrans::write_read(ADDR, vec![0x07], vec![0x00; 4]),
                I2cTrans::write(ADDR, {
                    let mut write = vec![0x07];
                    write.extend_from_slice(&image);
                    write
                }),
                I2cTrans::write_read(ADDR, vec![0x07], image.to_vec()),
            ]));

            rtc.set_alarm1_type(alarm_type).unwrap();
            assert_eq!(rtc.alarm1_type().unwrap(), alarm_type);

            rtc.release().done();
        }
    }

    #[test]
    fn alarm2_type_round_trip() {
        let cases: [(Alarm2Type, [u8; 3]); 5] = [
            (Alarm2Type::EveryMinute, [0x80, 0x80, 0x80]),
            (Alarm2Type::Minutes, [0x00, 0x80, 0x80]),
            (Alarm2Type::HoursMinutes, [0x00, 0x00, 0x80]),
            (Alarm2Type::DateHoursMinutes, [0x00, 0x00, 0x00]),
            (Alarm2Type::DayHoursMinutes, [0x00, 0x00, 0x40]),
        ];

        for (alarm_type, image) in cases {
            let mut rtc = Ds3231::new(I2cMock::new(&[
                I2cTrans::write_read(ADDR, vec![0x0b], vec![0x00; 3]),
                I2cTrans::write(ADDR, {
                    let mut write = vec![0x0b];
                    write.extend_from_slice(&image);
                    write
                }),
                I2cTrans::write_read(ADDR, vec![0x0b], image.to_vec()),
            ]));

            rtc.set_alarm2_type(alarm_type).unwrap();
            assert_eq!(rtc.alarm2_type().unwrap(), alarm_type);

            rtc.release().done();
        }
    }

    #[test]
    fn alarm_type_preserves_trigger_time() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            I2cTrans::write_read(ADDR, vec![0x07], vec![0x30, 0x45, 0x06, 0x21]),
            I2cTrans::write(ADDR, vec![0x07, 0x30, 0x45, 0x06, 0xa1]),
        ]));

        rtc.set_alarm1_type(Alarm1Type::HoursMinutesSeconds).unwrap();

        rtc.release().done();
    }

    #[test]
    fn undefined_alarm_type_is_an_error() {
        let mut rtc = Ds3231::new(I2cMock::new(&[I2cTrans::write_read(
            ADDR,
            vec![0x07],
            vec![0x80, 0x00, 0x00, 0x00],
        )]));

        assert!(matches!(rtc.alarm1_type(), Err(Error::UnknownAlarmType)));

        rtc.release().done();
    }

    #[test]
    fn write_alarm2_sets_time_and_type() {
        let time = DateTime {
            minute: 30,
            hour: 6,
            weekday: 2,
            ..DateTime::default()
        };

        let mut rtc = Ds3231::new(I2cMock::new(&[
            // Live clock mode query.
            I2cTrans::write_read(ADDR, vec![0x02], vec![0x00]),
            I2cTrans::write(ADDR, vec![0x0b, 0x30, 0x06, 0x42]),
            // Trigger type read-modify-write.
            I2cTrans::write_read(ADDR, vec![0x0b], vec![0x30, 0x06, 0x42]),
            I2cTrans::write(ADDR, vec![0x0b, 0x30, 0x06, 0x42]),
        ]));

        rtc.write_alarm2(&time, Alarm2Type::DayHoursMinutes).unwrap();

        rtc.release().done();
    }

    #[test]
    fn read_alarm2_keeps_prior_seconds() {
        let mut rtc = Ds3231::new(I2cMock::new(&[I2cTrans::write_read(
            ADDR,
            vec![0x0b],
            vec![0x30, 0x06, 0x42],
        )]));

        let mut time = DateTime {
            second: 55,
            ..DateTime::default()
        };
        rtc.read_alarm2(&mut time).unwrap();

        assert_eq!(time.second, 55);
        assert_eq!(time.minute, 30);
        assert_eq!(time.hour, 6);
        assert_eq!(time.weekday, 2);
        assert_eq!(time.date, 0);

        rtc.release().done();
    }

    #[test]
    fn check_alarm1_clears_flag_and_invokes_callback() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            // Flag set: poll, then clear through a read-modify-write.
            I2cTrans::write_read(ADDR, vec![0x0f], vec![0x01]),
            I2cTrans::write_read(ADDR, vec![0x0f], vec![0x01]),
            I2cTrans::write(ADDR, vec![0x0f, 0x00]),
            // Flag clear: poll only.
            I2cTrans::write_read(ADDR, vec![0x0f], vec![0x00]),
        ]));

        let triggered = Rc::new(Cell::new(0));
        let counter = Rc::clone(&triggered);
        rtc.set_alarm1_callback(move || counter.set(counter.get() + 1));

        assert!(rtc.check_alarm1().unwrap());
        assert_eq!(triggered.get(), 1);

        assert!(!rtc.check_alarm1().unwrap());
        assert_eq!(triggered.get(), 1);

        rtc.release().done();
    }

    #[test]
    fn aging_offset_full_byte_passthrough() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            I2cTrans::write_read(ADDR, vec![0x10], vec![0x00]),
            I2cTrans::write(ADDR, vec![0x10, 0x05]),
            I2cTrans::write_read(ADDR, vec![0x10], vec![0x05]),
        ]));

        rtc.control(Command::AgingOffset, Setting::AgingOffset(5))
            .unwrap();
        assert_eq!(
            rtc.status(Command::AgingOffset).unwrap(),
            Setting::AgingOffset(5)
        );

        rtc.release().done();
    }

    #[test]
    fn square_wave_type_decodes_rate() {
        let mut rtc = Ds3231::new(I2cMock::new(&[I2cTrans::write_read(
            ADDR,
            vec![0x0e],
            vec![0x10],
        )]));

        assert_eq!(
            rtc.status(Command::SquareWaveType).unwrap(),
            Setting::RateKhz4
        );

        rtc.release().done();
    }

    #[test]
    fn invalid_control_performs_no_io() {
        let mut rtc = Ds3231::new(I2cMock::new(&[]));

        assert!(matches!(
            rtc.control(Command::BusyFlag, Setting::On),
            Err(Error::InvalidValue)
        ));
        assert!(matches!(
            rtc.control(Command::Alarm1Flag, Setting::On),
            Err(Error::InvalidValue)
        ));
        assert!(matches!(
            rtc.control(Command::SquareWaveType, Setting::Off),
            Err(Error::InvalidValue)
        ));

        rtc.release().done();
    }

    #[test]
    fn ram_span_is_bounds_checked() {
        let mut rtc = Ds3231::new(I2cMock::new(&[]));

        let mut buffer = [0u8; 4];
        assert!(matches!(
            rtc.read_ram(0x10, &mut buffer),
            Err(Error::AddressRange)
        ));
        assert!(matches!(rtc.read_ram(0x00, &mut []), Err(Error::AddressRange)));
        assert!(matches!(
            rtc.write_ram(0x12, &[0x00, 0x00]),
            Err(Error::AddressRange)
        ));

        rtc.release().done();
    }

    #[test]
    fn ram_passthrough() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            I2cTrans::write_read(ADDR, vec![0x11], vec![0xaa, 0xbb]),
            I2cTrans::write(ADDR, vec![0x08, 0x01, 0x02, 0x03]),
        ]));

        let mut buffer = [0u8; 2];
        assert_eq!(rtc.read_ram(0x11, &mut buffer).unwrap(), 2);
        assert_eq!(buffer, [0xaa, 0xbb]);

        assert_eq!(rtc.write_ram(0x08, &[0x01, 0x02, 0x03]).unwrap(), 3);

        rtc.release().done();
    }

    #[test]
    fn temperature_quarter_degrees() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            I2cTrans::write_read(ADDR, vec![0x11], vec![0x19, 0x40]),
            I2cTrans::write_read(ADDR, vec![0x11], vec![0xe6, 0xc0]),
        ]));

        assert_eq!(rtc.temperature().unwrap(), 25.25);
        assert_eq!(rtc.temperature().unwrap(), -25.25);

        rtc.release().done();
    }

    #[test]
    fn is_running_tracks_clock_halt() {
        let mut rtc = Ds3231::new(I2cMock::new(&[
            I2cTrans::write_read(ADDR, vec![0x0e], vec![0x00]),
            I2cTrans::write_read(ADDR, vec![0x0e], vec![0x80]),
        ]));

        assert!(rtc.is_running().unwrap());
        assert!(!rtc.is_running().unwrap());

        rtc.release().done();
    }
}
