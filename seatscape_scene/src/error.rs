// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::model::{ItemId, RegionId};

/// Problems found by [`Scene::validate`](crate::Scene::validate).
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum SceneError {
    /// Scene size is not finite and positive.
    #[error("scene size {width}x{height} must be finite and positive")]
    InvalidSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },
    /// Scale bounds are not finite, not positive, or out of order.
    #[error("scale bounds [{min_scale}, {max_scale}] must be finite, positive and ordered")]
    InvalidScaleBounds {
        /// Requested lower bound.
        min_scale: f64,
        /// Requested upper bound.
        max_scale: f64,
    },
    /// A region has non-finite or negative-size bounds.
    #[error("region {region:?} has invalid bounds")]
    InvalidRegionBounds {
        /// The offending region.
        region: RegionId,
    },
    /// An item has non-finite or negative-size bounds.
    #[error("item {item:?} has invalid bounds")]
    InvalidItemBounds {
        /// The offending item.
        item: ItemId,
    },
    /// The focal feature has non-finite or negative-size bounds.
    #[error("focal feature has invalid bounds")]
    InvalidFocalFeatureBounds,
}
