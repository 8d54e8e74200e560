pub mod neighbourhood;
pub mod position;
pub mod range;
pub mod scan;
pub mod volume;

#[cfg(feature = "ffi")]
pub mod ffi;

pub(crate) mod utilities;
