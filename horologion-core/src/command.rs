//! Console command intents
//!
//! The transport (telnet, UART, whatever carries the lines) lives outside
//! this crate; only parsed intents cross into the engine. Parsing never
//! panics - unrecognized input is answered with [`HELP`] by the caller.

/// Help line answered to any unrecognized input.
pub const HELP: &str = "available commands: 'hv on', 'hv off', \
'(br)ightness <0-255>', 'time', 'random [stop]', 'roll [stop]', \
'power up', 'power down', 'restart'";

/// A parsed command intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Assert the high-voltage enable line
    HvOn,
    /// Deassert the high-voltage enable line
    HvOff,
    /// Set the anode level directly (already clamped)
    Brightness(u8),
    /// Force an immediate display refresh of the current time
    ShowTime,
    /// Start the cathode-depolarization cycle
    CycleStart,
    /// Stop the cathode-depolarization cycle
    CycleStop,
    /// Start the roll animation
    RollStart,
    /// Stop the roll animation
    RollStop,
    /// Force a brightness ramp up to the day level
    PowerUp,
    /// Force a brightness ramp down to zero
    PowerDown,
    /// Reboot the device
    Restart,
}

impl Command {
    /// Parse one console line. `None` means "answer with [`HELP`]".
    ///
    /// Brightness arguments are clamped to 0-255 here, at the parsing
    /// boundary; the power rail never sees out-of-range input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "hv on" => return Some(Self::HvOn),
            "hv off" => return Some(Self::HvOff),
            "time" => return Some(Self::ShowTime),
            "random" => return Some(Self::CycleStart),
            "random stop" => return Some(Self::CycleStop),
            "roll" => return Some(Self::RollStart),
            "roll stop" => return Some(Self::RollStop),
            "power up" => return Some(Self::PowerUp),
            "power down" => return Some(Self::PowerDown),
            "restart" => return Some(Self::Restart),
            _ => {}
        }

        let arg = line
            .strip_prefix("brightness ")
            .or_else(|| line.strip_prefix("br "))?;
        let level = arg.trim().parse::<i32>().ok()?;
        Some(Self::Brightness(level.clamp(0, 255) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_commands() {
        assert_eq!(Command::parse("hv on"), Some(Command::HvOn));
        assert_eq!(Command::parse("hv off"), Some(Command::HvOff));
        assert_eq!(Command::parse("time"), Some(Command::ShowTime));
        assert_eq!(Command::parse("random"), Some(Command::CycleStart));
        assert_eq!(Command::parse("random stop"), Some(Command::CycleStop));
        assert_eq!(Command::parse("roll"), Some(Command::RollStart));
        assert_eq!(Command::parse("roll stop"), Some(Command::RollStop));
        assert_eq!(Command::parse("power up"), Some(Command::PowerUp));
        assert_eq!(Command::parse("power down"), Some(Command::PowerDown));
        assert_eq!(Command::parse("restart"), Some(Command::Restart));
    }

    #[test]
    fn parses_brightness_long_and_short() {
        assert_eq!(
            Command::parse("brightness 127"),
            Some(Command::Brightness(127))
        );
        assert_eq!(Command::parse("br 0"), Some(Command::Brightness(0)));
    }

    #[test]
    fn clamps_brightness_at_the_boundary() {
        assert_eq!(
            Command::parse("brightness 999"),
            Some(Command::Brightness(255))
        );
        assert_eq!(Command::parse("br -12"), Some(Command::Brightness(0)));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(Command::parse("  hv on \r"), Some(Command::HvOn));
        assert_eq!(Command::parse("br  42 "), Some(Command::Brightness(42)));
    }

    #[test]
    fn garbage_yields_help() {
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("hv"), None);
        assert_eq!(Command::parse("brightness"), None);
        assert_eq!(Command::parse("brightness full"), None);
        assert_eq!(Command::parse("frobnicate"), None);
    }
}
