// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend implementations.

pub(crate) mod flatvec;
pub(crate) mod quadtree;
