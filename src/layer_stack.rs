//! Ordered layer collection with an active-layer pointer
//!
//! Index 0 is the bottom of the stack. Layer ids are handed out in increasing
//! order and are never reused, even after undo restores an older stack.

use crate::error::EditError;
use crate::layer::{Layer, LayerId};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    layers: Vec<Layer>,
    active: Option<LayerId>,
    next_id: u32,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    /// An empty stack. Charts without layers edit their dense grid instead.
    pub fn new() -> Self {
        Self { layers: Vec::new(), active: None, next_id: 1 }
    }

    /// A stack holding one layer with the given name.
    pub fn with_layer(name: impl Into<String>) -> Self {
        let mut stack = Self::new();
        stack.add_layer(Some(name.into()));
        stack
    }

    /// Rebuild a stack from deserialized layers.
    ///
    /// Ids must already be unique. The next id continues after the largest one.
    pub(crate) fn from_layers(layers: Vec<Layer>, active: Option<LayerId>) -> Self {
        let next_id = layers.iter().map(|l| l.id.0).max().unwrap_or(0) + 1;
        let active = match active {
            Some(id) if layers.iter().any(|l| l.id == id) => Some(id),
            _ => layers.last().map(|l| l.id),
        };
        Self { layers, active, next_id }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers bottom to top
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn active_id(&self) -> Option<LayerId> {
        self.active
    }

    pub fn active(&self) -> Option<&Layer> {
        self.active_index().map(|i| &self.layers[i])
    }

    pub fn active_mut(&mut self) -> Option<&mut Layer> {
        self.active_index().map(move |i| &mut self.layers[i])
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    /// Position of the active layer.
    ///
    /// # Panics
    ///
    /// Panics if the active id names a layer that is not in the stack; every
    /// mutation keeps the pointer valid, so this is a bug elsewhere.
    fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        match self.index_of(id) {
            Some(i) => Some(i),
            None => panic!("active layer {} is not in the layer stack", id),
        }
    }

    fn allocate_id(&mut self) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a new layer on top and make it active.
    ///
    /// Unnamed layers are called `Layer N` after their id.
    pub fn add_layer(&mut self, name: Option<String>) -> LayerId {
        let id = self.allocate_id();
        let name = name.unwrap_or_else(|| format!("Layer {}", id));
        debug!(layer = %id, name = %name, "adding layer");
        self.layers.push(Layer::new(id, name));
        self.active = Some(id);
        id
    }

    pub fn set_active(&mut self, id: LayerId) -> Result<(), EditError> {
        if self.index_of(id).is_none() {
            return Err(EditError::UnknownLayer(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Remove the active layer and activate the one directly below it
    /// (or the new bottom layer when the removed one was at the bottom).
    pub fn delete_active(&mut self) -> Result<Layer, EditError> {
        let index = self.active_index().ok_or(EditError::NoLayers)?;
        if self.layers.len() <= 1 {
            return Err(EditError::LastLayer);
        }
        let removed = self.layers.remove(index);
        let below = index.saturating_sub(1);
        self.active = Some(self.layers[below].id);
        debug!(layer = %removed.id, "deleted layer");
        Ok(removed)
    }

    /// Move `dragged` into the stack position held by `target`.
    ///
    /// All other layers keep their relative order.
    pub fn reorder(&mut self, dragged: LayerId, target: LayerId) -> Result<(), EditError> {
        let from = self.index_of(dragged).ok_or(EditError::UnknownLayer(dragged))?;
        let to = self.index_of(target).ok_or(EditError::UnknownLayer(target))?;
        if from == to {
            return Ok(());
        }
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        Ok(())
    }

    /// Merge the active layer into the layer directly below it.
    ///
    /// The result is a new layer at the lower layer's position, with the lower
    /// layer's name and offset, the active layer's opacity and visibility, and
    /// the union of both cell sets compared in world space. Active-layer paint
    /// wins where both layers have a cell. The merged layer becomes active.
    pub fn merge_down(&mut self) -> Result<LayerId, EditError> {
        let index = self.active_index().ok_or(EditError::NoLayers)?;
        if index == 0 {
            return Err(EditError::NoLayerBelow(self.layers[index].name.clone()));
        }

        let id = self.allocate_id();
        let upper = self.layers.remove(index);
        let lower = self.layers.remove(index - 1);

        let mut merged = Layer::new(id, lower.name.clone());
        merged.offset_x = lower.offset_x;
        merged.offset_y = lower.offset_y;
        merged.opacity = upper.opacity;
        merged.visible = upper.visible;
        for ((wx, wy), color) in lower.world_cells().chain(upper.world_cells()) {
            merged.set_world_cell(wx, wy, Some(color.clone()));
        }

        debug!(upper = %upper.id, lower = %lower.id, merged = %id, "merged layers");
        self.layers.insert(index - 1, merged);
        self.active = Some(id);
        Ok(id)
    }

    pub fn toggle_visibility(&mut self, id: LayerId) -> Result<bool, EditError> {
        let layer = self.get_mut(id).ok_or(EditError::UnknownLayer(id))?;
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    pub fn set_opacity(&mut self, id: LayerId, opacity: u8) -> Result<(), EditError> {
        if opacity > 100 {
            return Err(EditError::InvalidOpacity(opacity));
        }
        let layer = self.get_mut(id).ok_or(EditError::UnknownLayer(id))?;
        layer.opacity = opacity;
        Ok(())
    }

    pub fn rename(&mut self, id: LayerId, name: impl Into<String>) -> Result<(), EditError> {
        let layer = self.get_mut(id).ok_or(EditError::UnknownLayer(id))?;
        layer.name = name.into();
        Ok(())
    }

    /// Erase the cells of every layer, keeping the layers themselves.
    pub fn clear_all_cells(&mut self) {
        self.layers.iter_mut().for_each(Layer::clear_cells);
    }

    /// Visible layers in compositing order, bottom first.
    pub fn visible_bottom_to_top(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter().filter(|l| l.visible)
    }

    /// Replace the contents with a snapshot's stack.
    ///
    /// The id counter never moves backwards, so ids handed out after the
    /// snapshot was taken are not issued again.
    pub(crate) fn restore(&mut self, snapshot: LayerStack) {
        let next_id = self.next_id.max(snapshot.next_id);
        *self = snapshot;
        self.next_id = next_id;
    }
}
