//! LPC43xx GPIO driver.
//!
//! GPIO bits are addressed by a logical [`GpioPin`] (port, pin) identity.
//! Port-wide operations work on 32-bit masks against the per-port register
//! block; pin-granular operations are thin wrappers over the port-wide ones
//! with a single-bit mask, so the two can never diverge. Routing a logical
//! pin to physical silicon goes through the topology tables below and the
//! [`scu`](crate::drivers::scu) driver.
//!
//! The hardware's mask register (used by [`gpio_set_port_value`] and
//! [`gpio_get_port_value`]) is shared state per port, so those operations
//! require a [`CriticalSection`] token; see their docs.

use critical_section::CriticalSection;

use crate::drivers::scu::{configure_pin_gpio, GpioResistorConfiguration};
use crate::mcu::register::{
    read_reg_gpio_dir, read_reg_gpio_masked_pins, read_reg_gpio_pin_word, write_reg_gpio_clear,
    write_reg_gpio_dir, write_reg_gpio_mask, write_reg_gpio_masked_pins, write_reg_gpio_pin_word,
    write_reg_gpio_set, write_reg_gpio_toggle,
};
use crate::BIT;

/// Number of GPIO ports on the LPC43xx.
pub const GPIO_MAX_PORTS: u8 = 6;

/// Number of bits per GPIO port. Not every logical bit has a physical pin;
/// see the topology tables.
pub const GPIO_MAX_PORT_BITS: u8 = 20;

/// SCU function that selects GPIO on ports 0 through 4.
const SCU_GPIO_FUNCTION: u8 = 0;

/// SCU function that selects GPIO for port 5 pins, whose SCU slots default
/// to another function set. A quirk of this specific port; do not generalize.
const SCU_GPIO5_FUNCTION: u8 = 4;

/// The one port that needs [`SCU_GPIO5_FUNCTION`].
const GPIO_PORT_WITH_ALTERNATE_FUNCTION: u8 = 5;

/// Simple pair of identifiers for a GPIO bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioPin {
    pub port: u8,
    pub pin: u8,
}

/// Convenience function that converts a port and pin number into a GpioPin.
pub const fn gpio_pin(port: u8, pin: u8) -> GpioPin {
    GpioPin { port, pin }
}

/// Failures surfaced by GPIO operations. Validation is local and
/// synchronous; there is no retry or recovery path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// Port index is out of range.
    InvalidPort,
    /// Pin index is out of range, or the pin has no physical route.
    InvalidPin,
}

fn validate_port(port: u8) -> Result<(), GpioError> {
    if port >= GPIO_MAX_PORTS {
        return Err(GpioError::InvalidPort);
    }

    Ok(())
}

fn validate_port_and_pin(pin: GpioPin) -> Result<(), GpioError> {
    validate_port(pin.port)?;

    if pin.pin >= GPIO_MAX_PORT_BITS {
        return Err(GpioError::InvalidPin);
    }

    Ok(())
}

/// Mapping of each GPIO bit to its SCU group. `None` marks logical slots
/// with no physical pin on this package.
///
/// This table is the LPC4330/GreatFET pin table encoded as data; correctness
/// comes from cross-checking every entry against the datasheet, not from any
/// runtime logic. The J-header comments name the expansion-header position
/// of each routed pin.
const SCU_GROUP_FOR_PIN: [[Option<u8>; GPIO_MAX_PORT_BITS as usize]; GPIO_MAX_PORTS as usize] = [
    // GPIO0
    [
        Some(0), // GPIO0[0]  J1_4
        Some(0), // GPIO0[1]  J1_6
        Some(1), // GPIO0[2]  J1_28
        Some(1), // GPIO0[3]  J1_30
        Some(1), // GPIO0[4]  J1_7
        Some(6), // GPIO0[5]  J2_34
        Some(3), // GPIO0[6]  J2_38
        Some(2), // GPIO0[7]  J2_14
        Some(1), // GPIO0[8]  J1_10
        Some(1), // GPIO0[9]  J1_12
        Some(1), // GPIO0[10] J1_40
        Some(1), // GPIO0[11] J1_39
        Some(1), // GPIO0[12] J1_32
        Some(1), // GPIO0[13] J1_31
        Some(2), // GPIO0[14] J7_14
        Some(1), // GPIO0[15] J1_37
        None,    // GPIO0[16]
        None,    // GPIO0[17]
        None,    // GPIO0[18]
        None,    // GPIO0[19]
    ],
    // GPIO1
    [
        Some(1), // GPIO1[0]  J1_15
        Some(1), // GPIO1[1]  J1_18
        Some(1), // GPIO1[2]  J1_17
        Some(1), // GPIO1[3]  J1_20
        Some(1), // GPIO1[4]  J1_22
        Some(1), // GPIO1[5]  J1_21
        Some(1), // GPIO1[6]  J1_26
        Some(1), // GPIO1[7]  J1_25
        Some(1), // GPIO1[8]  J1_13
        Some(1), // GPIO1[9]  J1_16
        Some(2), // GPIO1[10] J7_6
        Some(2), // GPIO1[11] J7_13
        Some(2), // GPIO1[12] J7_7
        Some(2), // GPIO1[13] J7_8
        Some(3), // GPIO1[14] J2_28
        Some(3), // GPIO1[15] J2_37
        None,    // GPIO1[16]
        None,    // GPIO1[17]
        None,    // GPIO1[18]
        None,    // GPIO1[19]
    ],
    // GPIO2
    [
        Some(4), // GPIO2[0]  J2_4
        None,    // GPIO2[1]
        Some(4), // GPIO2[2]  J2_8
        Some(4), // GPIO2[3]  J2_9
        Some(4), // GPIO2[4]  J2_7
        Some(4), // GPIO2[5]  J2_6
        Some(4), // GPIO2[6]  J2_10
        Some(5), // GPIO2[7]  J1_29
        None,    // GPIO2[8]
        Some(5), // GPIO2[9]  J1_8
        Some(5), // GPIO2[10] J1_9
        Some(5), // GPIO2[11] J1_14
        Some(5), // GPIO2[12] J1_19
        Some(5), // GPIO2[13] J1_24
        Some(5), // GPIO2[14] J1_23
        Some(5), // GPIO2[15] J1_27
        None,    // GPIO2[16]
        None,    // GPIO2[17]
        None,    // GPIO2[18]
        None,    // GPIO2[19]
    ],
    // GPIO3
    [
        Some(6), // GPIO3[0]  J7_18
        Some(6), // GPIO3[1]  J7_17
        Some(6), // GPIO3[2]  J2_36
        Some(6), // GPIO3[3]  J7_2
        Some(6), // GPIO3[4]  J7_3
        Some(6), // GPIO3[5]  J7_16
        Some(6), // GPIO3[6]  J7_15
        None,    // GPIO3[7]
        Some(7), // GPIO3[8]  J2_27
        Some(7), // GPIO3[9]  J2_25
        Some(7), // GPIO3[10] J2_23
        None,    // GPIO3[11]
        None,    // GPIO3[12]
        None,    // GPIO3[13]
        None,    // GPIO3[14]
        Some(7), // GPIO3[15] J2_16
        None,    // GPIO3[16]
        None,    // GPIO3[17]
        None,    // GPIO3[18]
        None,    // GPIO3[19]
    ],
    // GPIO4
    [
        None,    // GPIO4[0]
        None,    // GPIO4[1]
        None,    // GPIO4[2]
        None,    // GPIO4[3]
        None,    // GPIO4[4]
        None,    // GPIO4[5]
        None,    // GPIO4[6]
        None,    // GPIO4[7]
        None,    // GPIO4[8]
        None,    // GPIO4[9]
        None,    // GPIO4[10]
        Some(9), // GPIO4[11] J1_34
        None,    // GPIO4[12]
        None,    // GPIO4[13]
        None,    // GPIO4[14]
        None,    // GPIO4[15]
        None,    // GPIO4[16]
        None,    // GPIO4[17]
        None,    // GPIO4[18]
        None,    // GPIO4[19]
    ],
    // GPIO5
    [
        Some(2), // GPIO5[0]  J1_35
        Some(2), // GPIO5[1]  J2_35
        Some(2), // GPIO5[2]  J2_33
        Some(2), // GPIO5[3]  J2_20
        Some(2), // GPIO5[4]  J2_19
        Some(2), // GPIO5[5]  J2_18
        Some(2), // GPIO5[6]  J2_15
        Some(2), // GPIO5[7]  J2_13
        Some(3), // GPIO5[8]  J2_24
        Some(3), // GPIO5[9]  J2_22
        Some(3), // GPIO5[10] J2_30
        None,    // GPIO5[11]
        Some(4), // GPIO5[12] J2_3
        Some(4), // GPIO5[13] J1_3
        Some(4), // GPIO5[14] J1_5
        Some(6), // GPIO5[15] J2_31
        Some(6), // GPIO5[16] J2_29
        None,    // GPIO5[17]
        Some(9), // GPIO5[18] J1_33
        None,    // GPIO5[19]
    ],
];

/// Mapping of each GPIO bit to its SCU pin number within the group above.
/// Structurally parallel to [`SCU_GROUP_FOR_PIN`]: an entry is `Some` here
/// exactly when it is `Some` there.
const SCU_PIN_FOR_PIN: [[Option<u8>; GPIO_MAX_PORT_BITS as usize]; GPIO_MAX_PORTS as usize] = [
    // GPIO0
    [
        Some(0),  // GPIO0[0]  J1_4
        Some(1),  // GPIO0[1]  J1_6
        Some(15), // GPIO0[2]  J1_28
        Some(16), // GPIO0[3]  J1_30
        Some(0),  // GPIO0[4]  J1_7
        Some(6),  // GPIO0[5]  J2_34
        Some(6),  // GPIO0[6]  J2_38
        Some(7),  // GPIO0[7]  J2_14
        Some(1),  // GPIO0[8]  J1_10
        Some(2),  // GPIO0[9]  J1_12
        Some(3),  // GPIO0[10] J1_40
        Some(4),  // GPIO0[11] J1_39
        Some(17), // GPIO0[12] J1_32
        Some(18), // GPIO0[13] J1_31
        Some(10), // GPIO0[14] J7_14
        Some(20), // GPIO0[15] J1_37
        None,     // GPIO0[16]
        None,     // GPIO0[17]
        None,     // GPIO0[18]
        None,     // GPIO0[19]
    ],
    // GPIO1
    [
        Some(7),  // GPIO1[0]  J1_15
        Some(8),  // GPIO1[1]  J1_18
        Some(9),  // GPIO1[2]  J1_17
        Some(10), // GPIO1[3]  J1_20
        Some(11), // GPIO1[4]  J1_22
        Some(12), // GPIO1[5]  J1_21
        Some(13), // GPIO1[6]  J1_26
        Some(14), // GPIO1[7]  J1_25
        Some(5),  // GPIO1[8]  J1_13
        Some(6),  // GPIO1[9]  J1_16
        Some(9),  // GPIO1[10] J7_6
        Some(11), // GPIO1[11] J7_13
        Some(12), // GPIO1[12] J7_7
        Some(13), // GPIO1[13] J7_8
        Some(4),  // GPIO1[14] J2_28
        Some(5),  // GPIO1[15] J2_37
        None,     // GPIO1[16]
        None,     // GPIO1[17]
        None,     // GPIO1[18]
        None,     // GPIO1[19]
    ],
    // GPIO2
    [
        Some(0), // GPIO2[0]  J2_4
        None,    // GPIO2[1]
        Some(2), // GPIO2[2]  J2_8
        Some(3), // GPIO2[3]  J2_9
        Some(4), // GPIO2[4]  J2_7
        Some(5), // GPIO2[5]  J2_6
        Some(6), // GPIO2[6]  J2_10
        Some(7), // GPIO2[7]  J1_29
        None,    // GPIO2[8]
        Some(0), // GPIO2[9]  J1_8
        Some(1), // GPIO2[10] J1_9
        Some(2), // GPIO2[11] J1_14
        Some(3), // GPIO2[12] J1_19
        Some(4), // GPIO2[13] J1_24
        Some(5), // GPIO2[14] J1_23
        Some(6), // GPIO2[15] J1_27
        None,    // GPIO2[16]
        None,    // GPIO2[17]
        None,    // GPIO2[18]
        None,    // GPIO2[19]
    ],
    // GPIO3
    [
        Some(1),  // GPIO3[0]  J7_18
        Some(2),  // GPIO3[1]  J7_17
        Some(3),  // GPIO3[2]  J2_36
        Some(4),  // GPIO3[3]  J7_2
        Some(5),  // GPIO3[4]  J7_3
        Some(9),  // GPIO3[5]  J7_16
        Some(10), // GPIO3[6]  J7_15
        None,     // GPIO3[7]
        Some(0),  // GPIO3[8]  J2_27
        Some(1),  // GPIO3[9]  J2_25
        Some(2),  // GPIO3[10] J2_23
        None,     // GPIO3[11]
        None,     // GPIO3[12]
        None,     // GPIO3[13]
        None,     // GPIO3[14]
        Some(7),  // GPIO3[15] J2_16
        None,     // GPIO3[16]
        None,     // GPIO3[17]
        None,     // GPIO3[18]
        None,     // GPIO3[19]
    ],
    // GPIO4
    [
        None,    // GPIO4[0]
        None,    // GPIO4[1]
        None,    // GPIO4[2]
        None,    // GPIO4[3]
        None,    // GPIO4[4]
        None,    // GPIO4[5]
        None,    // GPIO4[6]
        None,    // GPIO4[7]
        None,    // GPIO4[8]
        None,    // GPIO4[9]
        None,    // GPIO4[10]
        Some(6), // GPIO4[11] J1_34
        None,    // GPIO4[12]
        None,    // GPIO4[13]
        None,    // GPIO4[14]
        None,    // GPIO4[15]
        None,    // GPIO4[16]
        None,    // GPIO4[17]
        None,    // GPIO4[18]
        None,    // GPIO4[19]
    ],
    // GPIO5
    [
        Some(0),  // GPIO5[0]  J1_35
        Some(1),  // GPIO5[1]  J2_35
        Some(2),  // GPIO5[2]  J2_33
        Some(3),  // GPIO5[3]  J2_20
        Some(4),  // GPIO5[4]  J2_19
        Some(5),  // GPIO5[5]  J2_18
        Some(6),  // GPIO5[6]  J2_15
        Some(8),  // GPIO5[7]  J2_13
        Some(1),  // GPIO5[8]  J2_24
        Some(2),  // GPIO5[9]  J2_22
        Some(7),  // GPIO5[10] J2_30
        None,     // GPIO5[11]
        Some(8),  // GPIO5[12] J2_3
        Some(9),  // GPIO5[13] J1_3
        Some(10), // GPIO5[14] J1_5
        Some(7),  // GPIO5[15] J2_31
        Some(8),  // GPIO5[16] J2_29
        None,     // GPIO5[17]
        Some(5),  // GPIO5[18] J1_33
        None,     // GPIO5[19]
    ],
];

/// Returns the SCU group number for the given GPIO bit, or `None` if the
/// logical bit has no physical pin. Purely a table lookup; no side effects.
pub fn gpio_get_group_number(pin: GpioPin) -> Result<Option<u8>, GpioError> {
    validate_port_and_pin(pin)?;

    Ok(SCU_GROUP_FOR_PIN[pin.port as usize][pin.pin as usize])
}

/// Returns the SCU pin number for the given GPIO bit, or `None` if the
/// logical bit has no physical pin.
pub fn gpio_get_pin_number(pin: GpioPin) -> Result<Option<u8>, GpioError> {
    validate_port_and_pin(pin)?;

    Ok(SCU_PIN_FOR_PIN[pin.port as usize][pin.pin as usize])
}

/// Configures the system's pinmux to route the given GPIO pin to a physical
/// pin, and sets up its pull resistors.
///
/// # Parameters
///
/// * `pin` - The logical GPIO bit to route.
/// * `resistor_mode` - Pull-resistor configuration, handed to the SCU
///   unchanged.
///
/// # Errors
///
/// * `InvalidPort` / `InvalidPin` if the identity is out of range.
/// * `InvalidPin` if the logical slot exists but has no physical pin; the
///   SCU is not touched in that case.
pub fn gpio_configure_pinmux_and_resistors(
    pin: GpioPin,
    resistor_mode: GpioResistorConfiguration,
) -> Result<(), GpioError> {
    // Get the SCU group/pin so we can pinmux. Unrouted bits fail out before
    // any hardware access.
    let scu_group = gpio_get_group_number(pin)?.ok_or(GpioError::InvalidPin)?;
    let scu_pin = gpio_get_pin_number(pin)?.ok_or(GpioError::InvalidPin)?;

    // Select the pinmux function to apply.
    let scu_function = if pin.port == GPIO_PORT_WITH_ALTERNATE_FUNCTION {
        SCU_GPIO5_FUNCTION
    } else {
        SCU_GPIO_FUNCTION
    };

    // Finally, configure the SCU.
    configure_pin_gpio(scu_group, scu_pin, scu_function, resistor_mode);

    Ok(())
}

/// Configures the system's pinmux to route the given GPIO pin to a physical
/// pin, with no pull resistors.
pub fn gpio_configure_pinmux(pin: GpioPin) -> Result<(), GpioError> {
    gpio_configure_pinmux_and_resistors(pin, GpioResistorConfiguration::NoPull)
}

/// Configures the system's pinmux to route all possible GPIO pins for a
/// given port.
///
/// This is a bulk convenience, not a transaction: every pin index is tried
/// and per-pin failures are dropped, since unrouted bits are expected on
/// every port.
pub fn gpio_configure_port_pinmuxes(port: u8) -> Result<(), GpioError> {
    validate_port(port)?;

    for pin in 0..GPIO_MAX_PORT_BITS {
        let _ = gpio_configure_pinmux(gpio_pin(port, pin));
    }

    Ok(())
}

/// Configures a GPIO port's pins to be either inputs or outputs.
///
/// Plain read-modify-write on the direction register: bits selected by
/// `mask` are cleared, then `output_bits` is ORed in; unselected bits are
/// untouched. NOT atomic against interrupt-context writers to the same
/// port's direction register, unlike the masked pin-value path.
///
/// # Parameters
///
/// * `port` - The number of the port to be configured.
/// * `mask` - A bit-mask which selects which port bits are to be configured.
/// * `output_bits` - A word with a bit set for each output.
pub fn gpio_set_port_direction(port: u8, mask: u32, output_bits: u32) -> Result<(), GpioError> {
    validate_port(port)?;

    let mut to_apply = read_reg_gpio_dir(port);

    to_apply &= !mask;
    to_apply |= output_bits;

    write_reg_gpio_dir(to_apply, port);

    Ok(())
}

/// Retrieves the direction of a given port's pins.
///
/// Returns a word with a 1 set for each pin that's an output, and a zero
/// for each input.
pub fn gpio_get_port_direction(port: u8) -> Result<u32, GpioError> {
    validate_port(port)?;

    Ok(read_reg_gpio_dir(port))
}

/// Configures a single GPIO pin as an input or an output.
pub fn gpio_set_pin_direction(pin: GpioPin, is_output: bool) -> Result<(), GpioError> {
    validate_port_and_pin(pin)?;

    let mask = BIT!(pin.pin);
    gpio_set_port_direction(pin.port, mask, if is_output { mask } else { 0 })
}

/// Retrieves the direction of a single GPIO pin: 1 = output, 0 = input.
pub fn gpio_get_pin_direction(pin: GpioPin) -> Result<u32, GpioError> {
    validate_port_and_pin(pin)?;

    Ok((gpio_get_port_direction(pin.port)? >> pin.pin) & 1)
}

/// Sets a GPIO port's pin values through the hardware pin-masking feature.
///
/// Writes `mask` to the port's mask register, then `value` to the
/// masked-pins register; the hardware applies only the selected bits, in a
/// single access, without a read-modify-write.
///
/// # Parameters
///
/// * `_cs` - Proof of mutual exclusion. The mask register is one piece of
///   hardware state per port; two contexts interleaving masked operations on
///   the same port corrupt each other's mask, so the caller must hold a
///   critical section across the operation.
/// * `port` - The number of the port to be configured.
/// * `mask` - A bit-mask which selects which port bits are to be modified.
/// * `value` - The values to apply to the selected bits.
pub fn gpio_set_port_value(
    _cs: CriticalSection<'_>,
    port: u8,
    mask: u32,
    value: u32,
) -> Result<(), GpioError> {
    validate_port(port)?;

    write_reg_gpio_mask(mask, port);
    write_reg_gpio_masked_pins(value, port);

    Ok(())
}

/// Reads a GPIO port's pin values as filtered by `mask`.
///
/// Writes the port's shared mask register before reading back the
/// masked-pins register; the same caller obligation as
/// [`gpio_set_port_value`] applies, hence the [`CriticalSection`] token.
pub fn gpio_get_port_value(
    _cs: CriticalSection<'_>,
    port: u8,
    mask: u32,
) -> Result<u32, GpioError> {
    validate_port(port)?;

    write_reg_gpio_mask(mask, port);

    Ok(read_reg_gpio_masked_pins(port))
}

/// Sets a collection of bits in a GPIO port.
///
/// Single write to the dedicated set register; the hardware performs the OR
/// atomically and no shared mask state is involved.
pub fn gpio_set_port_bits(port: u8, mask: u32) -> Result<(), GpioError> {
    validate_port(port)?;

    write_reg_gpio_set(mask, port);

    Ok(())
}

/// Clears a collection of bits in a GPIO port.
pub fn gpio_clear_port_bits(port: u8, mask: u32) -> Result<(), GpioError> {
    validate_port(port)?;

    write_reg_gpio_clear(mask, port);

    Ok(())
}

/// Toggles a collection of bits in a GPIO port.
pub fn gpio_toggle_port_bits(port: u8, mask: u32) -> Result<(), GpioError> {
    validate_port(port)?;

    write_reg_gpio_toggle(mask, port);

    Ok(())
}

/// Sets a given GPIO pin to output 1/high.
pub fn gpio_set_pin(pin: GpioPin) -> Result<(), GpioError> {
    validate_port_and_pin(pin)?;

    gpio_set_port_bits(pin.port, BIT!(pin.pin))
}

/// Sets a given GPIO pin to output 0/low.
pub fn gpio_clear_pin(pin: GpioPin) -> Result<(), GpioError> {
    validate_port_and_pin(pin)?;

    gpio_clear_port_bits(pin.port, BIT!(pin.pin))
}

/// Toggles a given GPIO pin's value.
pub fn gpio_toggle_pin(pin: GpioPin) -> Result<(), GpioError> {
    validate_port_and_pin(pin)?;

    gpio_toggle_port_bits(pin.port, BIT!(pin.pin))
}

/// Sets a given GPIO pin to output the provided value.
///
/// Uses the pin's dedicated word-access register, which touches no shared
/// mask state: 0 clears the pin, any other value sets it.
pub fn gpio_set_pin_value(pin: GpioPin, value: u8) -> Result<(), GpioError> {
    validate_port_and_pin(pin)?;

    write_reg_gpio_pin_word(value as u32, pin.port, pin.pin);

    Ok(())
}

/// Reads a given GPIO pin's value: 0 for a logic low, 1 for a logic high.
pub fn gpio_get_pin_value(pin: GpioPin) -> Result<u8, GpioError> {
    validate_port_and_pin(pin)?;

    Ok(if read_reg_gpio_pin_word(pin.port, pin.pin) != 0 {
        1
    } else {
        0
    })
}

/// Fast method for reading a GPIO pin; intended for tight loops.
///
/// Skips all validation and loads the pin's word-access register directly:
/// all ones if the bit is high, zero if it is low (a property of that
/// hardware register, not a normalized boolean). Callers must only pass pins
/// already known valid; an out-of-range identity reads an unspecified
/// address.
pub fn gpio_fast_get_pin_value(pin: GpioPin) -> u32 {
    read_reg_gpio_pin_word(pin.port, pin.pin)
}
