// ds3231_alarm.rs - Configures alarm 1 on a Maxim Integrated DS3231 RTC and
// polls for the trigger.

use std::error::Error;
use std::thread;
use std::time::Duration;

use rppal::i2c::I2c;

use ds3231::alarm::Alarm1Type;
use ds3231::codec::DateTime;
use ds3231::rtc::Ds3231;

fn main() -> Result<(), Box<dyn Error>> {
    let mut rtc = Ds3231::new(I2c::new()?);

    // Trigger 10 seconds past the start of every minute. A weekday of 0
    // selects date-based matching, but the trigger type only compares the
    // seconds field here, so the rest of the value is ignored.
    let alarm = DateTime {
        second: 10,
        ..DateTime::default()
    };

    rtc.write_alarm1(&alarm, Alarm1Type::Seconds)?;
    rtc.set_alarm1_callback(|| println!("alarm 1 triggered"));

    // Polling replaces the INT/SQW line; no interrupt configuration needed.
    loop {
        rtc.check_alarm1()?;

        thread::sleep(Duration::from_millis(500));
    }
}
