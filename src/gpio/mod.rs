mod analog_in;

pub use analog_in::*;
