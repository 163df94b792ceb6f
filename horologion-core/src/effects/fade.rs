//! Cross-fade between two frames
//!
//! Nixie hardware cannot blend two digits on one tube. The fade instead
//! shows the outgoing and incoming frame alternately, one half-step each,
//! with complementary brightness envelopes; the eye integrates the 20 ms
//! pair into a smooth change. The envelope peaks at ~1.9x the steady level
//! because each frame is lit only half the time.

use crate::frame::DisplayFrame;
use crate::traits::{AnodePower, TubeDisplay};

/// Half-step duration: each frame of the pair is shown this long.
pub const HALF_STEP_MS: u32 = 10;

/// Peak brightness boost, as a fraction over the steady level.
const BOOST_NUM: u32 = 19;
const BOOST_DEN: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Outgoing,
    Incoming,
}

/// An in-flight cross-fade.
///
/// Owns the display and the brightness level exclusively until [`poll`]
/// reports completion; the scheduler runs nothing else meanwhile.
///
/// [`poll`]: CrossFade::poll
#[derive(Debug, Clone)]
pub struct CrossFade {
    from: DisplayFrame,
    to: DisplayFrame,
    steady: u8,
    peak: u32,
    step: u32,
    total: u32,
    phase: Phase,
    next_at: u64,
}

impl CrossFade {
    /// Capture the current frame and brightness and begin fading toward
    /// `to`. The first half-step runs on the next poll.
    pub fn begin<D, P>(
        to: DisplayFrame,
        duration_ms: u32,
        now: u64,
        display: &D,
        power: &P,
    ) -> Self
    where
        D: TubeDisplay,
        P: AnodePower,
    {
        let steady = power.brightness();
        let peak = (u32::from(steady) * BOOST_NUM / BOOST_DEN).min(255);
        // One outgoing/incoming pair per two half-steps.
        let total = (duration_ms / (2 * HALF_STEP_MS)).max(1);
        Self {
            from: display.current_frame(),
            to,
            steady,
            peak,
            step: 0,
            total,
            phase: Phase::Outgoing,
            next_at: now,
        }
    }

    /// The frame this fade will leave latched.
    pub fn target(&self) -> DisplayFrame {
        self.to
    }

    /// Advance the fade by at most one half-step. Returns `true` once the
    /// incoming frame is latched and the steady brightness restored.
    pub fn poll<D, P>(&mut self, now: u64, display: &mut D, power: &mut P) -> bool
    where
        D: TubeDisplay,
        P: AnodePower,
    {
        if now < self.next_at {
            return false;
        }
        self.next_at = now + u64::from(HALF_STEP_MS);

        match self.phase {
            Phase::Outgoing => {
                // Old frame, envelope falling from peak toward zero.
                let level = self.peak * (self.total - self.step) / self.total;
                power.set_brightness(level as u8);
                display.write_frame(self.from);
                self.phase = Phase::Incoming;
                false
            }
            Phase::Incoming => {
                self.step += 1;
                // New frame, envelope rising from zero toward peak.
                let level = self.peak * self.step / self.total;
                power.set_brightness(level as u8);
                display.write_frame(self.to);
                self.phase = Phase::Outgoing;
                if self.step >= self.total {
                    power.set_brightness(self.steady);
                    display.write_frame(self.to);
                    true
                } else {
                    false
                }
            }
        }
    }
}
