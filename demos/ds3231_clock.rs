// ds3231_clock.rs - Sets and retrieves the time on a Maxim Integrated DS3231
// RTC connected to a Raspberry Pi's I2C bus.

use std::error::Error;
use std::thread;
use std::time::Duration;

use rppal::i2c::I2c;

use ds3231::codec::{day_of_week, DateTime};
use ds3231::rtc::Ds3231;

fn main() -> Result<(), Box<dyn Error>> {
    let mut rtc = Ds3231::new(I2c::new()?);

    // Set the time to 11:59:50, March 1 2024. The device's clock mode is
    // left as-is; the hour is stored in whichever mode is active.
    let mut time = DateTime {
        year: 2024,
        month: 3,
        date: 1,
        hour: 11,
        minute: 59,
        second: 50,
        ..DateTime::default()
    };
    time.weekday = day_of_week(time.year, time.month, time.date);

    rtc.write_time(&time)?;

    loop {
        // The PM indicator is only ever set in 12-hour mode.
        println!("{}", rtc.read_time()?);

        thread::sleep(Duration::from_secs(1));
    }
}
