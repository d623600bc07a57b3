//! sys-harness-lib: asset verification and toolchain orchestration for `sys`
//!
//! This crate provides the two independent checks a CI job runs before
//! shipping the `sys` program:
//! - `assets`: verify the runtime asset directory exists and every file in it
//!   is readable and non-empty
//! - `toolchain`: drive the external compiler toolchain to build, cross-compile
//!   and clean its build cache

pub mod assets;
pub mod config;
pub mod consts;
pub mod platform;
pub mod toolchain;
pub mod util;
