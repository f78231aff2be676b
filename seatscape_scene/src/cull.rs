// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport culling and level-of-detail selection.
//!
//! The culler maps the current scale to a [`DetailTier`] and returns, per
//! visible region, the items a renderer should draw at that tier. Region and
//! item visibility use strict AABB intersection against the visible scene
//! rectangle.
//!
//! With a [`SceneIndex`] the per-item scan is replaced by a quad-tree query.
//! Index results are still filtered by the region test, so both paths return
//! the same items in the same order.

use kurbo::{Rect, Size};
use seatscape_view::{Transform, TransformError};

use crate::index::{IndexConfig, SceneIndex};
use crate::model::{ItemKey, Scene};

/// Scale thresholds for each tier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LodThresholds {
    /// Below this scale only region blocks are drawn.
    pub block: f64,
    /// Below this scale (and at or above `block`) items are thinned out.
    pub reduced: f64,
    /// Above this scale item labels become visible.
    pub labels: f64,
    /// At the reduced tier only items at every `reduced_stride`-th position
    /// of their region are drawn.
    pub reduced_stride: usize,
}

impl Default for LodThresholds {
    fn default() -> Self {
        Self {
            block: 0.25,
            reduced: 1.0,
            labels: 2.0,
            reduced_stride: 2,
        }
    }
}

impl LodThresholds {
    /// The tier for `scale`.
    #[must_use]
    pub fn tier(&self, scale: f64) -> DetailTier {
        if scale < self.block {
            DetailTier::Block
        } else if scale < self.reduced {
            DetailTier::Reduced
        } else {
            DetailTier::Full
        }
    }

    /// Returns `true` if labels are drawn at `scale`.
    #[must_use]
    pub fn labels_visible(&self, scale: f64) -> bool {
        scale > self.labels
    }
}

/// How much of the scene is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DetailTier {
    /// Regions only, drawn as blocks.
    Block,
    /// A regular subset of items.
    Reduced,
    /// Every visible item.
    Full,
}

/// A region that survived culling, with its items for the current tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleRegion {
    /// Index into [`Scene::regions`].
    pub region: usize,
    /// Indices into the region's items, ascending.
    pub items: Vec<usize>,
}

impl VisibleRegion {
    /// Item keys, ascending.
    pub fn keys(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.items
            .iter()
            .map(move |&item| ItemKey::new(self.region, item))
    }
}

/// Output of one culling pass.
#[derive(Clone, Debug, PartialEq)]
pub struct CullResult {
    /// Tier chosen from the scale.
    pub tier: DetailTier,
    /// Whether labels are drawn.
    pub labels_visible: bool,
    /// The visible scene-space rectangle that was tested.
    pub visible_rect: Rect,
    /// Visible regions in scene order.
    pub regions: Vec<VisibleRegion>,
    /// Whether the focal feature intersects the visible rectangle.
    pub focal_feature_visible: bool,
}

impl CullResult {
    /// Number of items across all visible regions.
    #[must_use]
    pub fn item_total(&self) -> usize {
        self.regions.iter().map(|r| r.items.len()).sum()
    }

    /// Every item key, ascending.
    pub fn keys(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.regions.iter().flat_map(VisibleRegion::keys)
    }
}

/// Viewport culler with an optional spatial index.
#[derive(Clone, Debug, Default)]
pub struct Culler {
    thresholds: LodThresholds,
    index_config: IndexConfig,
    index: Option<SceneIndex>,
}

impl Culler {
    /// Creates a culler. Call [`Culler::prepare`] once a scene is bound.
    #[must_use]
    pub fn new(thresholds: LodThresholds, index_config: IndexConfig) -> Self {
        Self {
            thresholds,
            index_config,
            index: None,
        }
    }

    /// Tier thresholds.
    #[must_use]
    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    /// (Re)builds the spatial index for `scene` if the configuration asks for one.
    pub fn prepare(&mut self, scene: &Scene) {
        self.index = SceneIndex::build_for(scene, &self.index_config);
    }

    /// Drops the spatial index.
    pub fn reset(&mut self) {
        self.index = None;
    }

    /// The spatial index, if built.
    #[must_use]
    pub fn index(&self) -> Option<&SceneIndex> {
        self.index.as_ref()
    }

    /// Culls for a transform and viewport.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NonInvertible`] if the transform cannot be inverted.
    pub fn cull_view(
        &self,
        scene: &Scene,
        transform: &Transform,
        viewport: Size,
    ) -> Result<CullResult, TransformError> {
        let visible =
            transform.screen_rect_to_scene(Rect::from_origin_size((0.0, 0.0), viewport))?;
        Ok(self.cull(scene, visible, transform.scale))
    }

    /// Culls against a visible scene-space rectangle at `scale`.
    #[must_use]
    pub fn cull(&self, scene: &Scene, visible: Rect, scale: f64) -> CullResult {
        let tier = self.thresholds.tier(scale);
        let focal_feature_visible = scene
            .focal_feature()
            .is_some_and(|f| f.bounds.intersects(&visible));

        let mut regions: Vec<VisibleRegion> = scene
            .regions()
            .iter()
            .enumerate()
            .filter(|(_, region)| region.bounds.intersects(&visible))
            .map(|(region, _)| VisibleRegion {
                region,
                items: Vec::new(),
            })
            .collect();

        if tier != DetailTier::Block {
            // The reduced subset is keyed to item position in its region, not to
            // what happens to be on screen, so panning never swaps the set.
            let stride = match tier {
                DetailTier::Reduced => self.thresholds.reduced_stride.max(1),
                _ => 1,
            };
            match &self.index {
                Some(index) => fill_from_index(&mut regions, index, visible, stride),
                None => fill_linear(&mut regions, scene, visible, stride),
            }
        }

        CullResult {
            tier,
            labels_visible: self.thresholds.labels_visible(scale),
            visible_rect: visible,
            regions,
            focal_feature_visible,
        }
    }
}

fn fill_linear(regions: &mut [VisibleRegion], scene: &Scene, visible: Rect, stride: usize) {
    for vr in regions {
        if let Some(region) = scene.regions().get(vr.region) {
            vr.items = region
                .items
                .iter()
                .enumerate()
                .filter(|(i, item)| i % stride == 0 && item.bounds.intersects(&visible))
                .map(|(i, _)| i)
                .collect();
        }
    }
}

/// Distributes sorted index hits over the (sorted) surviving regions.
fn fill_from_index(
    regions: &mut [VisibleRegion],
    index: &SceneIndex,
    visible: Rect,
    stride: usize,
) {
    let hits = index.query_rect(visible);
    let mut hits = hits.into_iter().peekable();
    for vr in regions {
        while hits.next_if(|k| k.region < vr.region).is_some() {}
        while let Some(key) = hits.next_if(|k| k.region == vr.region) {
            if key.item % stride == 0 {
                vr.items.push(key.item);
            }
        }
    }
}
