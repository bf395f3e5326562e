#![doc = include_str!("../README.md")]

pub mod char_class;
pub mod nom_helpers;
