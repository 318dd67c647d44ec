// src/utils/mod.rs
mod strings;
mod wire;

pub(crate) use strings::*;
pub(crate) use wire::*;
