use std::collections::BTreeMap;

use super::coordinator::DragCoordinator;
use super::types::{Container, ContainerId, Element, ElementId, ElementPhase};

/// The mapping layer between container identity and its current ordered sequence.
///
/// The coordinator never holds on to containers (or to whatever renders them). It only reads
/// sequences and swaps in new ones through this trait, keyed by [`ContainerId`].
pub trait ContainerRegistry<T> {
    /// Current sequence of `id`, or `None` if no such container exists.
    fn elements(&self, id: ContainerId) -> Option<&[Element<T>]>;

    /// Atomically replace the sequence of `id`.
    ///
    /// Returns `false` (and changes nothing) if the container does not exist.
    fn replace(&mut self, id: ContainerId, elements: Vec<Element<T>>) -> bool;

    /// All live container ids, in a stable order.
    fn container_ids(&self) -> Vec<ContainerId>;

    fn contains(&self, id: ContainerId) -> bool {
        self.elements(id).is_some()
    }

    fn len_of(&self, id: ContainerId) -> Option<usize> {
        self.elements(id).map(<[Element<T>]>::len)
    }
}

/// The stock [`ContainerRegistry`]: every container lives in one ordered arena keyed by id.
///
/// Besides what the coordinator needs, it offers the direct-edit operations of the simple
/// visualizers (push/pop/insert/remove/peek). Those never involve a drag.
#[derive(Clone, Debug)]
pub struct ContainerArena<T> {
    containers: BTreeMap<ContainerId, Container<T>>,
    next_container_serial: u64,
    next_element_serial: u64,
}

impl<T> Default for ContainerArena<T> {
    fn default() -> Self {
        Self {
            containers: BTreeMap::new(),
            next_container_serial: 1,
            next_element_serial: 1,
        }
    }
}

impl<T> ContainerArena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_element_id(&mut self) -> ElementId {
        let id = ElementId(self.next_element_serial.max(1));
        self.next_element_serial = id.0.saturating_add(1);
        id
    }

    /// Create a new container holding `values` (in order).
    pub fn create_container(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> ContainerId {
        let id = ContainerId(self.next_container_serial.max(1));
        self.next_container_serial = id.0.saturating_add(1);

        let mut container = Container::new(id, name);
        for value in values {
            let element_id = self.allocate_element_id();
            container.elements.push(Element::new(element_id, value));
        }
        log::debug!(
            "container CREATE id={id} name={:?} len={}",
            container.name,
            container.len()
        );
        self.containers.insert(id, container);
        id
    }

    /// Destroy a container.
    ///
    /// Runs the coordinator's teardown hook first, so a drag that started in (or is hovering over)
    /// this container is cancelled/re-targeted before the container disappears.
    pub fn destroy_container(
        &mut self,
        coordinator: &mut DragCoordinator<T>,
        id: ContainerId,
    ) -> Option<Container<T>>
    where
        T: Clone,
    {
        if !self.containers.contains_key(&id) {
            return None;
        }
        coordinator.container_will_be_destroyed(self, id);
        let removed = self.containers.remove(&id);
        if let Some(container) = &removed {
            log::debug!(
                "container DESTROY id={id} dropped_elements={}",
                container.len()
            );
        }
        removed
    }

    pub fn get(&self, id: ContainerId) -> Option<&Container<T>> {
        self.containers.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Container<T>> {
        self.containers.values()
    }

    pub fn container_count(&self) -> usize {
        self.containers.len()
    }

    pub fn len(&self, id: ContainerId) -> Option<usize> {
        self.containers.get(&id).map(Container::len)
    }

    /// Number of elements across all containers.
    pub fn total_len(&self) -> usize {
        self.containers.values().map(Container::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn rename(&mut self, id: ContainerId, name: impl Into<String>) -> bool {
        let Some(container) = self.containers.get_mut(&id) else {
            return false;
        };
        container.name = name.into();
        true
    }

    /// Append a value at the end (stack push / queue enqueue).
    pub fn push(&mut self, id: ContainerId, value: T) -> Option<ElementId> {
        let len = self.len(id)?;
        self.insert(id, len, value)
    }

    /// Insert a value at `index`; an index past the end appends.
    pub fn insert(&mut self, id: ContainerId, index: usize, value: T) -> Option<ElementId> {
        if !self.containers.contains_key(&id) {
            return None;
        }
        let element_id = self.allocate_element_id();
        let container = self.containers.get_mut(&id)?;
        let index = index.min(container.len());
        container.elements.insert(
            index,
            Element::new(element_id, value).with_phase(ElementPhase::Entering),
        );
        Some(element_id)
    }

    /// Remove the last element (stack pop).
    pub fn pop(&mut self, id: ContainerId) -> Option<Element<T>> {
        self.containers.get_mut(&id)?.elements.pop()
    }

    /// Remove the element at `index`. Out of range is a no-op.
    pub fn remove(&mut self, id: ContainerId, index: usize) -> Option<Element<T>> {
        let container = self.containers.get_mut(&id)?;
        (index < container.len()).then(|| container.elements.remove(index))
    }

    /// Highlight the last element (stack peek). Returns its value.
    pub fn peek(&mut self, id: ContainerId) -> Option<&T> {
        let last = self.containers.get_mut(&id)?.elements.last_mut()?;
        last.phase = ElementPhase::Peeking;
        Some(&last.value)
    }

    /// Mark the element at `index` as leaving (e.g. right before a delayed removal).
    pub fn mark_leaving(&mut self, id: ContainerId, index: usize) -> bool {
        let Some(element) = self
            .containers
            .get_mut(&id)
            .and_then(|c| c.elements.get_mut(index))
        else {
            return false;
        };
        element.phase = ElementPhase::Leaving;
        true
    }

    /// Reset every element of `id` to [`ElementPhase::Settled`].
    pub fn settle(&mut self, id: ContainerId) {
        if let Some(container) = self.containers.get_mut(&id) {
            for element in &mut container.elements {
                element.phase = ElementPhase::Settled;
            }
        }
    }

    pub fn values(&self, id: ContainerId) -> Option<Vec<T>>
    where
        T: Clone,
    {
        self.containers
            .get(&id)
            .map(|c| c.elements.iter().map(|e| e.value.clone()).collect())
    }
}

impl<T> ContainerRegistry<T> for ContainerArena<T> {
    fn elements(&self, id: ContainerId) -> Option<&[Element<T>]> {
        self.containers.get(&id).map(|c| c.elements.as_slice())
    }

    fn replace(&mut self, id: ContainerId, elements: Vec<Element<T>>) -> bool {
        let Some(container) = self.containers.get_mut(&id) else {
            return false;
        };
        container.elements = elements;
        true
    }

    fn container_ids(&self) -> Vec<ContainerId> {
        self.containers.keys().copied().collect()
    }
}
