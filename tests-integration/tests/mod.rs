#![cfg(feature = "std")]

pub mod applications;
