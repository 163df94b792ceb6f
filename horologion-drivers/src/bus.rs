//! Shift-register tube bus
//!
//! Four BCD digits live behind two daisy-chained shift registers. An
//! update deasserts the latch, clocks both bytes out MSB-first, then
//! reasserts the latch so all four tubes change in the same instant - no
//! partial-digit flicker. Pure bit-banging, bounded in microseconds, safe
//! to call from effect ticks.

use horologion_core::frame::{DisplayFrame, FrameError};
use horologion_core::traits::TubeDisplay;

use crate::pins::OutputPin;

/// The shift-register display bus. Owns the latch/clock/data pins and the
/// currently latched frame.
pub struct ShiftRegisterBus<L, C, D> {
    latch: L,
    clock: C,
    data: D,
    current: DisplayFrame,
}

impl<L, C, D> ShiftRegisterBus<L, C, D>
where
    L: OutputPin,
    C: OutputPin,
    D: OutputPin,
{
    /// Take ownership of the bus pins. The registers keep whatever they
    /// powered up with until the first write.
    pub fn new(mut latch: L, mut clock: C, data: D) -> Self {
        // Idle bus: latch asserted, clock parked low.
        latch.set_high();
        clock.set_low();
        Self {
            latch,
            clock,
            data,
            current: DisplayFrame::default(),
        }
    }

    /// Validate and latch four raw digits.
    ///
    /// Rejected input performs no bus activity at all and leaves the
    /// previously latched frame untouched.
    pub fn write_digits(&mut self, d1: u8, d2: u8, d3: u8, d4: u8) -> Result<(), FrameError> {
        let frame = DisplayFrame::new([d1, d2, d3, d4])?;
        self.write_frame(frame);
        Ok(())
    }

    fn shift_out(&mut self, byte: u8) {
        for bit in (0..8).rev() {
            self.data.set_state(byte & (1 << bit) != 0);
            self.clock.set_high();
            self.clock.set_low();
        }
    }
}

impl<L, C, D> TubeDisplay for ShiftRegisterBus<L, C, D>
where
    L: OutputPin,
    C: OutputPin,
    D: OutputPin,
{
    fn write_frame(&mut self, frame: DisplayFrame) {
        // Hold the latch low so the tubes keep the old frame while bits
        // move through the chain.
        self.latch.set_low();
        let [first, second] = frame.to_shift_bytes();
        self.shift_out(first);
        self.shift_out(second);
        self.latch.set_high();
        self.current = frame;
    }

    fn current_frame(&self) -> DisplayFrame {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    /// One recorded pin edge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Edge {
        Latch(bool),
        Clock(bool),
        Data(bool),
    }

    /// A pin that appends every edge to a shared waveform log.
    struct LogPin<'a> {
        log: &'a RefCell<Vec<Edge>>,
        tag: fn(bool) -> Edge,
    }

    impl OutputPin for LogPin<'_> {
        fn set_high(&mut self) {
            self.log.borrow_mut().push((self.tag)(true));
        }

        fn set_low(&mut self) {
            self.log.borrow_mut().push((self.tag)(false));
        }
    }

    fn bus_on<'a>(
        log: &'a RefCell<Vec<Edge>>,
    ) -> ShiftRegisterBus<LogPin<'a>, LogPin<'a>, LogPin<'a>> {
        let bus = ShiftRegisterBus::new(
            LogPin {
                log,
                tag: Edge::Latch,
            },
            LogPin {
                log,
                tag: Edge::Clock,
            },
            LogPin {
                log,
                tag: Edge::Data,
            },
        );
        // Drop the idle-state edges from construction.
        log.borrow_mut().clear();
        bus
    }

    /// Replay the waveform the way the register chain sees it: sample the
    /// data line on every rising clock edge inside the latch-low window.
    fn decode(log: &[Edge]) -> Vec<u8> {
        let mut bits = Vec::new();
        let mut data = false;
        let mut latched_low = false;
        for &edge in log {
            match edge {
                Edge::Data(level) => data = level,
                Edge::Clock(true) => {
                    assert!(latched_low, "clocked a bit outside the latch window");
                    bits.push(data);
                }
                Edge::Clock(false) => {}
                Edge::Latch(level) => latched_low = !level,
            }
        }
        // MSB-first groups of eight.
        bits.chunks(8)
            .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| byte << 1 | u8::from(bit)))
            .collect()
    }

    #[test]
    fn wire_order_is_low_pair_first_msb_first() {
        let log = RefCell::new(Vec::new());
        let mut bus = bus_on(&log);

        bus.write_digits(1, 2, 3, 4).unwrap();
        // Digit 3 in the low nibble, digit 4 in the high nibble, then
        // digits 1/2 the same way.
        assert_eq!(decode(&log.borrow()), [0x43, 0x21]);
    }

    #[test]
    fn update_is_framed_by_the_latch() {
        let log = RefCell::new(Vec::new());
        let mut bus = bus_on(&log);

        bus.write_digits(0, 9, 5, 7).unwrap();
        let log = log.borrow();
        assert_eq!(*log.first().unwrap(), Edge::Latch(false));
        assert_eq!(*log.last().unwrap(), Edge::Latch(true));
        // Exactly 16 rising clock edges between the two latch edges.
        let rising = log
            .iter()
            .filter(|e| matches!(e, Edge::Clock(true)))
            .count();
        assert_eq!(rising, 16);
    }

    #[test]
    fn rejection_performs_no_bus_activity() {
        let log = RefCell::new(Vec::new());
        let mut bus = bus_on(&log);
        bus.write_digits(1, 2, 3, 4).unwrap();
        log.borrow_mut().clear();

        assert_eq!(
            bus.write_digits(1, 2, 3, 10),
            Err(FrameError::InvalidDigit)
        );
        assert!(log.borrow().is_empty());
        // The previously latched frame is untouched.
        assert_eq!(bus.current_frame().digits(), [1, 2, 3, 4]);
    }

    #[test]
    fn current_frame_tracks_successful_writes_only() {
        let log = RefCell::new(Vec::new());
        let mut bus = bus_on(&log);

        assert_eq!(bus.current_frame(), DisplayFrame::default());
        bus.write_digits(2, 3, 5, 9).unwrap();
        assert_eq!(bus.current_frame().digits(), [2, 3, 5, 9]);
    }
}
