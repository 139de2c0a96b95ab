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

//! Binary-coded decimal conversion.
//!
//! Every date/time register on the DS3231 stores its value as packed BCD,
//! with the ones digit in the low nibble and the tens digit in the high
//! nibble. Both conversions are branch-free and total over the 0-99 range
//! the device can represent. Values outside that range are meaningless on
//! this hardware, and the result of converting them is unspecified.

/// Converts a packed BCD byte (0x00-0x99) to its binary value (0-99).
#[inline]
pub const fn decode(value: u8) -> u8 {
    // Each high nibble unit is worth 10 in decimal but 16 in binary.
    value - 6 * (value >> 4)
}

/// Converts a binary value (0-99) to a packed BCD byte (0x00-0x99).
#[inline]
pub const fn encode(value: u8) -> u8 {
    value + 6 * (value / 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        for value in 0..100 {
            assert_eq!(decode(encode(value)), value);
        }
    }

    #[test]
    fn known_values() {
        assert_eq!(encode(0), 0x00);
        assert_eq!(encode(9), 0x09);
        assert_eq!(encode(10), 0x10);
        assert_eq!(encode(59), 0x59);
        assert_eq!(encode(99), 0x99);

        assert_eq!(decode(0x00), 0);
        assert_eq!(decode(0x23), 23);
        assert_eq!(decode(0x59), 59);
        assert_eq!(decode(0x99), 99);
    }
}
