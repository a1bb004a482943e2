// Copyright 2026 the Glyphmask Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional `bytemuck` trait impls.

#![allow(
    unsafe_code,
    reason = "The `bytemuck` marker traits are `unsafe` and require `unsafe impl`."
)]

use bytemuck::{Pod, Zeroable};

use crate::{F26Dot6, Point};

// Safety: `F26Dot6` is `repr(transparent)` over `i32`, for which any bit pattern is valid.
unsafe impl Pod for F26Dot6 {}

// Safety: `F26Dot6` is `repr(transparent)` over `i32` and zero is a valid value.
unsafe impl Zeroable for F26Dot6 {}

// Safety: `Point` is `repr(C)` with two `F26Dot6` fields and no padding.
unsafe impl Pod for Point {}

// Safety: `Point` is `repr(C)` over two zeroable fields.
unsafe impl Zeroable for Point {}
