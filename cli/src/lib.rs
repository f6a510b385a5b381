// SPDX-License-Identifier: MIT OR Apache-2.0

//! Challenchess CLI support: option loading, URL-style query parsing and
//! ASCII rendering shared by the binary and its tests.

pub mod config;
pub mod query;
pub mod render;
