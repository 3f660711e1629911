//! Platform drivers for the NXP LPC43xx microcontroller family.
//!
//! The crate currently covers the GPIO peripheral and the slice of the SCU
//! (System Control Unit) needed to route GPIO bits to physical pins:
//!
//! * [`drivers::gpio`] - logical (port, pin) identities, the GPIO-to-SCU
//!   topology table, and direction/value register operations.
//! * [`drivers::scu`] - pin-multiplexer configuration the GPIO driver
//!   delegates to.
//! * [`mcu::register`] - the memory map and the volatile register accessors
//!   everything above funnels through.
//!
//! All operations are bounded, synchronous memory accesses; the crate never
//! blocks and provides no locking of its own. Operations that touch the
//! shared per-port mask register take a [`critical_section::CriticalSection`]
//! token so the caller decides how to exclude concurrent contexts.

#![cfg_attr(not(test), no_std)]

pub mod common;
pub mod drivers;
pub mod mcu;
