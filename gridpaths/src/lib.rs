#![doc = include_str!("../README.md")]

pub mod grid;
pub mod mask;
pub mod neighbors;
pub mod search;
pub mod stats;
