//! Fixed-point timestamps tagged with a clock kind.
//!
//! A [`Timespec`] stores whole seconds and sub-second nanoseconds together
//! with the [`ClockKind`] the reading belongs to. Two reserved bit patterns
//! stand for the unbounded future and the unbounded past; the [`TimeValue`]
//! view exposes them as proper variants so callers never have to compare
//! against the raw sentinels.
//!
//! Supports:
//! - Construction from nanoseconds, microseconds, milliseconds and
//!   [`std::time::Duration`]
//! - Saturating arithmetic that propagates infinite values
//! - Ordering within a single clock kind
//! - Injectable clock sources ([`SystemClock`], [`FixedClock`])
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

pub mod clock;
mod timespec;

pub use clock::{Clock, ClockKind, FixedClock, SystemClock};
pub use timespec::{MAX_FINITE_NANOS, NANOS_PER_SECOND, TimeValue, Timespec};
