pub mod gpio;
pub mod scu;
