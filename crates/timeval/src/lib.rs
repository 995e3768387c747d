//! Conversion between millisecond doubles and fixed-point timestamps.
//!
//! Bindings usually hand time around as a floating-point count of
//! milliseconds since the Unix epoch, with `±inf` meaning "never" and
//! "always". Transport code wants a [`Timespec`] instead. This crate converts
//! between the two:
//!
//! - [`millis_to_timespec`] truncates to whole microseconds and maps `±inf`
//!   to the infinite sentinels. NaN and values outside the representable
//!   range are rejected.
//! - [`timespec_to_millis`] first moves the timestamp onto the realtime
//!   clock, then maps the sentinels back to `±inf`.
//!
//! [`Converter`] carries the clock source and a [`ConverterConfig`] for
//! callers that need deterministic clocks or a different overflow policy.
//!
//! ## License
//!
//! This project is licensed under the [MIT](./LICENSE.MIT) or
//! [Apache-2.0](./LICENSE.Apache-2.0) license. You can choose between one of
//! them if you use this work.
//!
//! `SPDX-License-Identifier: MIT OR Apache-2.0`
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod convert;
mod converter;
pub mod error;

pub use config::{ConverterConfig, OverflowPolicy};
pub use convert::convert_clock_kind;
pub use converter::{Converter, ConverterBuilder};
pub use error::{Result, TimevalError};
pub use timespec::{Clock, ClockKind, FixedClock, SystemClock, TimeValue, Timespec};

/// Sentinel for the infinite future on `clock`.
#[inline]
pub const fn infinite_future(clock: ClockKind) -> Timespec {
    Timespec::infinite_future(clock)
}

/// Sentinel for the infinite past on `clock`.
#[inline]
pub const fn infinite_past(clock: ClockKind) -> Timespec {
    Timespec::infinite_past(clock)
}

/// Convert milliseconds since the epoch to a realtime [`Timespec`].
///
/// Uses the default [`ConverterConfig`]: out-of-range values are an error.
pub fn millis_to_timespec(millis: f64) -> Result<Timespec> {
    Converter::new(ConverterConfig::default()).millis_to_timespec(millis)
}

/// Convert a [`Timespec`] on any clock to milliseconds since the epoch.
///
/// Non-realtime timestamps are moved onto the realtime clock using the
/// system clocks.
pub fn timespec_to_millis(timespec: Timespec) -> f64 {
    Converter::new(ConverterConfig::default()).timespec_to_millis(timespec)
}
