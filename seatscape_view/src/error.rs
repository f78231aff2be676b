// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors produced by coordinate conversion.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum TransformError {
    /// The transform has a zero (or non-finite) scale and cannot be inverted.
    #[error("transform with scale {scale} is not invertible")]
    NonInvertible {
        /// The offending scale factor.
        scale: f64,
    },
}
