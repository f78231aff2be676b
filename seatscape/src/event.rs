// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use seatscape_scene::{ItemId, ItemKey, ItemStatus};

/// Something the host should react to, drained with
/// [`Engine::take_events`](crate::Engine::take_events).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineEvent {
    /// A tap toggled an item.
    SelectionChanged {
        /// Stable id of the item.
        id: ItemId,
        /// Where the item lives in the scene.
        key: ItemKey,
        /// The new selection flag.
        selected: bool,
    },
    /// Scale or scale bounds changed since the last notification.
    ScaleChanged {
        /// Current scale.
        scale: f64,
        /// Lower bound.
        min_scale: f64,
        /// Upper bound.
        max_scale: f64,
    },
    /// The transform or the scene changed; draw a new frame.
    NeedsRedraw,
    /// A tap landed on an item that cannot be selected.
    TapUnavailable {
        /// The item tapped.
        key: ItemKey,
        /// Why it cannot be selected.
        status: ItemStatus,
    },
    /// Every selection was cleared.
    SelectionCleared {
        /// Number of items that were selected.
        count: usize,
    },
}
