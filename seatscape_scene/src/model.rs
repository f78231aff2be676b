// Copyright 2025 the Seatscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene data: regions of selectable items inside a bounded plane.

use std::cell::OnceCell;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use seatscape_index::Aabb2D;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Stable identifier of an [`Item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

/// Stable identifier of a [`Region`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub u64);

/// Positional address of an item: region index, then item index within it.
///
/// The derived ordering (region first, then item) is the tie-break order for
/// overlapping items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    /// Index into [`Scene::regions`].
    pub region: usize,
    /// Index into [`Region::items`].
    pub item: usize,
}

impl ItemKey {
    /// Creates a key.
    #[must_use]
    pub const fn new(region: usize, item: usize) -> Self {
        Self { region, item }
    }
}

/// Axis-aligned box given as origin and size, in scene units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Bounds {
    /// Creates bounds from origin and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// As a Kurbo rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// As an index box.
    #[must_use]
    pub fn to_aabb(&self) -> Aabb2D {
        Aabb2D::from_xywh(self.x, self.y, self.width, self.height)
    }

    /// Closed containment: `x ∈ [bx, bx + bw]` and `y ∈ [by, by + bh]`.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x
            && pt.x <= self.x + self.width
            && pt.y >= self.y
            && pt.y <= self.y + self.height
    }

    /// Strict intersection with a rectangle; touching edges do not count.
    #[must_use]
    pub fn intersects(&self, rect: &Rect) -> bool {
        self.x < rect.x1
            && rect.x0 < self.x + self.width
            && self.y < rect.y1
            && rect.y0 < self.y + self.height
    }

    fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Availability of an item, as provided by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    /// Can be selected.
    #[default]
    Selectable,
    /// Already claimed.
    Taken,
    /// Held back by the host.
    Blocked,
    /// Physically unusable.
    OutOfService,
}

impl ItemStatus {
    /// Returns `true` only for [`ItemStatus::Selectable`].
    #[must_use]
    pub fn is_selectable(self) -> bool {
        matches!(self, Self::Selectable)
    }
}

/// A selectable element (for a venue: a seat).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable id.
    pub id: ItemId,
    /// Short label shown at the most detailed zoom levels.
    #[serde(default)]
    pub label: String,
    /// Scene-space bounds.
    pub bounds: Bounds,
    /// Availability.
    #[serde(default)]
    pub status: ItemStatus,
    /// Current selection flag. The only field the engine mutates.
    #[serde(default)]
    pub selected: bool,
}

impl Item {
    /// Creates an unselected, selectable item.
    #[must_use]
    pub fn new(id: u64, bounds: Bounds) -> Self {
        Self {
            id: ItemId(id),
            label: String::new(),
            bounds,
            status: ItemStatus::Selectable,
            selected: false,
        }
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// A group of items (for a venue: a section or block).
///
/// Region bounds are a culling hint and need not enclose every item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Stable id.
    pub id: RegionId,
    /// Display name, shown at the block tier.
    #[serde(default)]
    pub name: String,
    /// Scene-space hint bounds.
    pub bounds: Bounds,
    /// Items in draw and tie-break order.
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Region {
    /// Creates an empty region.
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            id: RegionId(id),
            name: name.into(),
            bounds,
            items: Vec::new(),
        }
    }

    /// Appends an item.
    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }
}

/// A non-selectable landmark drawn for orientation (for a venue: the stage).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocalFeature {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Scene-space bounds.
    pub bounds: Bounds,
}

/// The whole plane: `[0, width] × [0, height]` in scene units.
///
/// Read-only to the engine except for [`Item::selected`], which changes only
/// through [`Scene::set_selected`] and [`Scene::clear_selection`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scene {
    id: String,
    #[serde(default)]
    name: String,
    width: f64,
    height: f64,
    #[serde(default)]
    regions: Vec<Region>,
    #[serde(default)]
    focal_feature: Option<FocalFeature>,
    min_scale: f64,
    max_scale: f64,
    #[serde(skip)]
    directory: OnceCell<HashMap<ItemId, ItemKey>>,
}

impl Scene {
    /// Creates an empty scene of the given size with scale bounds `[0.1, 10]`.
    #[must_use]
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            width,
            height,
            regions: Vec::new(),
            focal_feature: None,
            min_scale: 0.1,
            max_scale: 10.0,
            directory: OnceCell::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the scale bounds.
    #[must_use]
    pub fn with_scale_bounds(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Appends a region.
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.regions.push(region);
        self.directory = OnceCell::new();
        self
    }

    /// Sets the focal feature.
    #[must_use]
    pub fn with_focal_feature(mut self, feature: FocalFeature) -> Self {
        self.focal_feature = Some(feature);
        self
    }

    /// Host identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scene width in scene units.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Scene height in scene units.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// `(min_scale, max_scale)` requested by the scene.
    #[must_use]
    pub fn scale_bounds(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Regions in order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The landmark, if any.
    #[must_use]
    pub fn focal_feature(&self) -> Option<&FocalFeature> {
        self.focal_feature.as_ref()
    }

    /// Total number of items across all regions.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.regions.iter().map(|r| r.items.len()).sum()
    }

    /// The item at `key`.
    #[must_use]
    pub fn item(&self, key: ItemKey) -> Option<&Item> {
        self.regions.get(key.region)?.items.get(key.item)
    }

    /// Every item with its key, in region-then-item order.
    pub fn items(&self) -> impl Iterator<Item = (ItemKey, &Item)> + '_ {
        self.regions.iter().enumerate().flat_map(|(r, region)| {
            region
                .items
                .iter()
                .enumerate()
                .map(move |(i, item)| (ItemKey::new(r, i), item))
        })
    }

    /// Selected items in region-then-item order.
    pub fn selected_items(&self) -> impl Iterator<Item = (ItemKey, &Item)> + '_ {
        self.items().filter(|(_, item)| item.selected)
    }

    /// Looks up an item by id. Duplicate ids resolve to the first occurrence.
    #[must_use]
    pub fn find_item(&self, id: ItemId) -> Option<ItemKey> {
        self.directory
            .get_or_init(|| {
                let mut map = HashMap::with_capacity(self.item_count());
                for (key, item) in self.items() {
                    map.entry(item.id).or_insert(key);
                }
                map
            })
            .get(&id)
            .copied()
    }

    /// Sets an item's selection flag. Returns `true` if it changed.
    pub fn set_selected(&mut self, key: ItemKey, selected: bool) -> bool {
        match self
            .regions
            .get_mut(key.region)
            .and_then(|r| r.items.get_mut(key.item))
        {
            Some(item) if item.selected != selected => {
                item.selected = selected;
                true
            }
            _ => false,
        }
    }

    /// Clears every selection flag, returning the keys that were selected.
    pub fn clear_selection(&mut self) -> Vec<ItemKey> {
        let mut cleared = Vec::new();
        for (r, region) in self.regions.iter_mut().enumerate() {
            for (i, item) in region.items.iter_mut().enumerate() {
                if item.selected {
                    item.selected = false;
                    cleared.push(ItemKey::new(r, i));
                }
            }
        }
        cleared
    }

    /// Checks geometry and scale bounds.
    ///
    /// # Errors
    ///
    /// Returns the first problem found; see [`SceneError`].
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(SceneError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.min_scale.is_finite() && self.max_scale.is_finite())
            || self.min_scale <= 0.0
            || self.min_scale > self.max_scale
        {
            return Err(SceneError::InvalidScaleBounds {
                min_scale: self.min_scale,
                max_scale: self.max_scale,
            });
        }
        if let Some(feature) = &self.focal_feature
            && !feature.bounds.is_valid()
        {
            return Err(SceneError::InvalidFocalFeatureBounds);
        }
        for region in &self.regions {
            if !region.bounds.is_valid() {
                return Err(SceneError::InvalidRegionBounds { region: region.id });
            }
            for item in &region.items {
                if !item.bounds.is_valid() {
                    return Err(SceneError::InvalidItemBounds { item: item.id });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{Bounds, Item, ItemId, ItemKey, ItemStatus, Region, Scene};
    use crate::SceneError;

    fn scene() -> Scene {
        Scene::new("hall", 100.0, 100.0)
            .with_region(
                Region::new(1, "A", Bounds::new(0.0, 0.0, 50.0, 50.0))
                    .with_item(Item::new(10, Bounds::new(0.0, 0.0, 10.0, 10.0)))
                    .with_item(Item::new(11, Bounds::new(10.0, 0.0, 10.0, 10.0))),
            )
            .with_region(
                Region::new(2, "B", Bounds::new(50.0, 0.0, 50.0, 50.0)).with_item(
                    Item::new(20, Bounds::new(50.0, 0.0, 10.0, 10.0))
                        .with_status(ItemStatus::Taken),
                ),
            )
    }

    #[test]
    fn bounds_containment_is_closed_and_intersection_strict() {
        let b = Bounds::new(10.0, 10.0, 5.0, 5.0);
        assert!(b.contains(Point::new(15.0, 15.0)));
        assert!(!b.contains(Point::new(15.1, 15.0)));
        assert!(!b.intersects(&Rect::new(15.0, 0.0, 30.0, 30.0)));
        assert!(b.intersects(&Rect::new(14.9, 0.0, 30.0, 30.0)));
    }

    #[test]
    fn find_item_uses_directory() {
        let s = scene();
        assert_eq!(s.find_item(ItemId(20)), Some(ItemKey::new(1, 0)));
        assert_eq!(s.find_item(ItemId(99)), None);
        assert_eq!(s.item_count(), 3);
    }

    #[test]
    fn selection_helpers() {
        let mut s = scene();
        assert!(s.set_selected(ItemKey::new(0, 1), true));
        assert!(!s.set_selected(ItemKey::new(0, 1), true));
        assert!(!s.set_selected(ItemKey::new(7, 0), true));
        s.set_selected(ItemKey::new(1, 0), true);
        let selected: Vec<_> = s.selected_items().map(|(k, _)| k).collect();
        assert_eq!(selected, vec![ItemKey::new(0, 1), ItemKey::new(1, 0)]);

        assert_eq!(s.clear_selection().len(), 2);
        assert_eq!(s.selected_items().count(), 0);
    }

    #[test]
    fn validate_reports_first_problem() {
        assert_eq!(scene().validate(), Ok(()));
        assert!(matches!(
            Scene::new("x", 0.0, 10.0).validate(),
            Err(SceneError::InvalidSize { .. })
        ));
        assert!(matches!(
            Scene::new("x", 10.0, 10.0)
                .with_scale_bounds(2.0, 1.0)
                .validate(),
            Err(SceneError::InvalidScaleBounds { .. })
        ));
        let bad = Scene::new("x", 10.0, 10.0).with_region(
            Region::new(1, "", Bounds::new(0.0, 0.0, 1.0, 1.0))
                .with_item(Item::new(5, Bounds::new(0.0, 0.0, -1.0, 1.0))),
        );
        assert_eq!(
            bad.validate(),
            Err(SceneError::InvalidItemBounds { item: ItemId(5) })
        );
    }
}
