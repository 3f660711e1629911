//! LPC43xx memory map and volatile register accessors.
//!
//! Every hardware access in this crate goes through one of the functions in
//! this module, each a single volatile load or store at an address computed
//! from the constants below. Under `cfg(test)` the accessors are wrapped by
//! `mry`, so unit tests can record and stub hardware traffic.

extern crate paste;

/// Base of the GPIO peripheral's address range.
pub const GPIO_BASE_ADDR: u32 = 0x400f_4000;

/// Offset of the per-pin word-access region. One u32 per pin; a pin's word
/// reads as all ones when the pin is high and zero when low.
pub const GPIO_PIN_WORD_OFFSET: u32 = 0x1000;

/// Bytes covered by one port inside the pin-word region (32 words).
pub const GPIO_PIN_WORD_SIZE: u32 = 32 * 4;

/// Offset of the per-port register region. Register planes (direction, mask,
/// pins, ...) sit 32 words apart; a port's word within a plane at port * 4.
pub const GPIO_PORT_OFFSET: u32 = 0x2000;

/// Base of the SCU (pin multiplexer) register range.
pub const SCU_BASE_ADDR: u32 = 0x4008_6000;

/// Bytes covered by one SCU pin group (32 SFS words).
pub const SCU_GROUP_SIZE: u32 = 32 * 4;

/// Address of a port's word within one GPIO register plane.
pub const fn gpio_port_reg_addr(plane: u32, port: u8) -> u32 {
    GPIO_BASE_ADDR + GPIO_PORT_OFFSET + plane + (port as u32 * 4)
}

/// Address of the word-access register for a single pin.
pub const fn gpio_pin_word_addr(port: u8, pin: u8) -> u32 {
    GPIO_BASE_ADDR + GPIO_PIN_WORD_OFFSET + (port as u32 * GPIO_PIN_WORD_SIZE) + (pin as u32 * 4)
}

/// Address of the SFS (pin configuration) register for an SCU group/pin.
pub const fn scu_sfs_addr(group: u8, pin: u8) -> u32 {
    SCU_BASE_ADDR + (group as u32 * SCU_GROUP_SIZE) + (pin as u32 * 4)
}

macro_rules! regrw_gpio_port {
    ( $x:ident, $plane:expr ) => {
        paste::paste! {
            #[cfg_attr(test, mry::mry)]
            pub fn [<read_ $x>](port: u8) -> u32 {
                unsafe {
                    core::ptr::read_volatile(gpio_port_reg_addr($plane, port) as *const u32)
                }
            }

            #[cfg_attr(test, mry::mry)]
            pub fn [<write_ $x>](value: u32, port: u8) {
                unsafe {
                    core::ptr::write_volatile(gpio_port_reg_addr($plane, port) as *mut u32, value)
                }
            }
        }
    };
}

/****************************************************
 GPIO port register planes: begin GPIO_BASE + 0x2000
 *****************************************************/
regrw_gpio_port!(reg_gpio_dir, 0x000); // data direction, 1 = output
regrw_gpio_port!(reg_gpio_mask, 0x080); // mask for masked pin access
regrw_gpio_port!(reg_gpio_pins, 0x100); // raw pin values
regrw_gpio_port!(reg_gpio_masked_pins, 0x180); // pin values filtered by mask
regrw_gpio_port!(reg_gpio_set, 0x200); // write 1s to set pins
regrw_gpio_port!(reg_gpio_clear, 0x280); // write 1s to clear pins
regrw_gpio_port!(reg_gpio_toggle, 0x300); // write 1s to toggle pins

/****************************************************
 GPIO pin word-access region: begin GPIO_BASE + 0x1000
 *****************************************************/

#[cfg_attr(test, mry::mry)]
pub fn read_reg_gpio_pin_word(port: u8, pin: u8) -> u32 {
    unsafe { core::ptr::read_volatile(gpio_pin_word_addr(port, pin) as *const u32) }
}

#[cfg_attr(test, mry::mry)]
pub fn write_reg_gpio_pin_word(value: u32, port: u8, pin: u8) {
    unsafe { core::ptr::write_volatile(gpio_pin_word_addr(port, pin) as *mut u32, value) }
}

/****************************************************
 SCU pin configuration (SFSPx_y): begin 0x4008_6000
 *****************************************************/

#[cfg_attr(test, mry::mry)]
pub fn write_reg_scu_sfs(value: u32, group: u8, pin: u8) {
    unsafe { core::ptr::write_volatile(scu_sfs_addr(group, pin) as *mut u32, value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The datasheet addresses the register map must reproduce: GPIO port
    /// direction words start at 0x400F6000, the pin-word region at
    /// 0x400F5000, and SFS registers at 0x40086000 in 0x80-sized groups.
    #[test]
    fn test_gpio_port_reg_addresses() {
        assert_eq!(gpio_port_reg_addr(0x000, 0), 0x400f_6000); // DIR0
        assert_eq!(gpio_port_reg_addr(0x000, 3), 0x400f_600c); // DIR3
        assert_eq!(gpio_port_reg_addr(0x080, 0), 0x400f_6080); // MASK0
        assert_eq!(gpio_port_reg_addr(0x100, 5), 0x400f_6114); // PIN5
        assert_eq!(gpio_port_reg_addr(0x300, 1), 0x400f_6304); // NOT1 (toggle)
    }

    #[test]
    fn test_gpio_pin_word_addresses() {
        assert_eq!(gpio_pin_word_addr(0, 0), 0x400f_5000);
        assert_eq!(gpio_pin_word_addr(2, 5), 0x400f_5114);
        assert_eq!(gpio_pin_word_addr(5, 19), 0x400f_52cc);
    }

    #[test]
    fn test_scu_sfs_addresses() {
        assert_eq!(scu_sfs_addr(0, 0), 0x4008_6000);
        assert_eq!(scu_sfs_addr(1, 15), 0x4008_60bc);
        assert_eq!(scu_sfs_addr(9, 5), 0x4008_6494);
    }
}
