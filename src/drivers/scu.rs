//! System Control Unit driver for the LPC43xx; controls pin multiplexing.
//!
//! Each physical pin P<group>_<pin> has one SFS word selecting which of up to
//! eight functions the pin exposes, plus its electrical options. The GPIO
//! driver delegates here to route logical GPIO bits to physical pins.

use bitflags::bitflags;
use num_derive::FromPrimitive;

use crate::mcu::register::write_reg_scu_sfs;
use crate::{BIT, BIT_RNG};

/// Pull-resistor options for a pin, as encoded by the SFS mode field.
///
/// The values are the raw two-bit field contents (EPD/EPUN), so they pass
/// through to the hardware unchanged. `NoPull` is the default used when a
/// caller does not care about resistors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum GpioResistorConfiguration {
    PullUp = 0,
    Repeater = 1,
    NoPull = 2,
    PullDown = 3,
}

impl GpioResistorConfiguration {
    pub const fn bits(&self) -> u32 {
        *self as u32
    }
}

// SFS field layout, per the LPC43xx SCU chapter.
const SCU_FUNCTION_MASK: u32 = BIT_RNG!(0, 2);
const SCU_PULL_RESISTOR_SHIFT: u32 = 3;

bitflags! {
    /// Single-bit SFS option fields.
    struct ScuPinFlags: u32 {
        const USE_FAST_SLEW = BIT!(5);
        const INPUT_BUFFER_ENABLED = BIT!(6);
        const DISABLE_GLITCH_FILTER = BIT!(7);
    }
}

/// Packs an SFS configuration word from its fields.
const fn pin_configuration(
    function: u8,
    resistors: GpioResistorConfiguration,
    flags: ScuPinFlags,
) -> u32 {
    (function as u32 & SCU_FUNCTION_MASK)
        | (resistors.bits() << SCU_PULL_RESISTOR_SHIFT)
        | flags.bits()
}

/// Lowest-level API to apply a raw configuration word to a pin's SFS
/// register. Usually you want one of the `configure_pin_<...>` functions
/// instead.
///
/// # Parameters
///
/// * `group` - The SCU group of the pin; the first number, X, in the LPC
///   PX_Y naming scheme.
/// * `pin` - The SCU pin number; the second number, Y, in PX_Y.
/// * `configuration` - The raw SFS word to apply.
#[cfg_attr(test, mry::mry)]
pub fn configure_pin(group: u8, pin: u8, configuration: u32) {
    write_reg_scu_sfs(configuration, group, pin);
}

/// Configures a pin with the options that make the most sense for a normal
/// (<30 MHz) GPIO: input buffer on, normal slew rate, glitch filter on, and
/// the requested pull resistors.
#[cfg_attr(test, mry::mry)]
pub fn configure_pin_gpio(
    group: u8,
    pin: u8,
    function: u8,
    resistors: GpioResistorConfiguration,
) {
    configure_pin(
        group,
        pin,
        pin_configuration(function, resistors, ScuPinFlags::INPUT_BUFFER_ENABLED),
    );
}

/// Configures a pin for fast (>30 MHz) IO: input buffer on, fast slew, and
/// the glitch filter disabled.
#[cfg_attr(test, mry::mry)]
pub fn configure_pin_fast_io(
    group: u8,
    pin: u8,
    function: u8,
    resistors: GpioResistorConfiguration,
) {
    configure_pin(
        group,
        pin,
        pin_configuration(
            function,
            resistors,
            ScuPinFlags::INPUT_BUFFER_ENABLED
                .union(ScuPinFlags::USE_FAST_SLEW)
                .union(ScuPinFlags::DISABLE_GLITCH_FILTER),
        ),
    );
}

/// Configures a pin for a common UART, which wants the GPIO profile with no
/// pull resistors.
pub fn configure_pin_uart(group: u8, pin: u8, function: u8) {
    configure_pin_gpio(group, pin, function, GpioResistorConfiguration::NoPull);
}
