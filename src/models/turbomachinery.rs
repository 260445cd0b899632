//! Turbomachinery models.
//!
//! Machines here resolve their states through a
//! [`Flasher`](crate::thermo::Flasher), so any fluid and equation of state
//! the flasher supports can be used.

pub mod compressor;
