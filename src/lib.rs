//! # pingen
//!
//! Generates DirectIO pin headers from Arduino board variant files.
//!
//! Board packages describe their digital pins in one of two C dialects: SAM-style
//! `variant.cpp` files with one bracketed `PinDescription` record per pin, and
//! AVR-style `pins_arduino.h` files with parallel port and bit-mask tables. The
//! [`pingen::variants`] parsers recover the (pin, port, bit) triples from either,
//! and [`pingen::header`] writes them out as `_define_pin(...)` declarations.

pub mod pingen;
