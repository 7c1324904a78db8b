/// Stable identity of one container instance, minted by a [`super::ContainerArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ContainerId(pub u64);

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Per-element identity, independent of the element's value.
///
/// Two elements holding the same value (e.g. two `7`s) always have different ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Transient presentation state of an element.
///
/// Purely cosmetic: views use it to pick colors/animations. Transfer resolution never looks at it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ElementPhase {
    #[default]
    Settled,

    /// Just pushed/inserted by a direct edit.
    Entering,

    /// About to be removed by a direct edit (e.g. highlighted before a pop).
    Leaving,

    /// Highlighted by a peek operation.
    Peeking,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Element<T> {
    pub id: ElementId,
    pub value: T,
    pub phase: ElementPhase,
}

impl<T> Element<T> {
    pub fn new(id: ElementId, value: T) -> Self {
        Self {
            id,
            value,
            phase: ElementPhase::Settled,
        }
    }

    #[must_use]
    pub fn with_phase(mut self, phase: ElementPhase) -> Self {
        self.phase = phase;
        self
    }
}

/// One ordered sequence of elements with a stable identity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Container<T> {
    pub id: ContainerId,
    pub name: String,
    pub elements: Vec<Element<T>>,
}

impl<T> Container<T> {
    pub fn new(id: ContainerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            elements: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn position_of(&self, element: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == element)
    }
}

/// Where the pointer currently is, as reported by the container under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverTarget {
    pub container: ContainerId,

    /// Insertion position, `0..=len` (inserting at the end is valid).
    pub index: usize,
}

impl HoverTarget {
    pub fn new(container: ContainerId, index: usize) -> Self {
        Self { container, index }
    }
}

/// Outcome of resolving (or cancelling) a drag session.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution<T> {
    /// Element is back at its original slot (click without drag, explicit cancel).
    Restored {
        container: ContainerId,
        index: usize,
        element: ElementId,
    },

    /// Element was moved within its own container.
    Reordered {
        container: ContainerId,
        from: usize,
        to: usize,
        element: ElementId,
    },

    /// Element left its source container and now lives in another one.
    Moved {
        from: ContainerId,
        from_index: usize,
        to: ContainerId,
        to_index: usize,
        element: ElementId,
    },

    /// Element was dropped outside every container (or onto one that vanished) and is gone.
    Discarded {
        from: ContainerId,
        from_index: usize,
        element: Element<T>,
    },
}

impl<T> Resolution<T> {
    pub fn element_id(&self) -> ElementId {
        match self {
            Self::Restored { element, .. }
            | Self::Reordered { element, .. }
            | Self::Moved { element, .. } => *element,
            Self::Discarded { element, .. } => element.id,
        }
    }

    /// Container the element ended up in, `None` if it was discarded.
    pub fn destination(&self) -> Option<(ContainerId, usize)> {
        match self {
            Self::Restored {
                container, index, ..
            } => Some((*container, *index)),
            Self::Reordered { container, to, .. } => Some((*container, *to)),
            Self::Moved { to, to_index, .. } => Some((*to, *to_index)),
            Self::Discarded { .. } => None,
        }
    }

    pub fn is_discard(&self) -> bool {
        matches!(self, Self::Discarded { .. })
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    fn sample() -> Container<i32> {
        let mut container = Container::new(ContainerId(4), "stack");
        container.elements.push(Element::new(ElementId(1), 7));
        container
            .elements
            .push(Element::new(ElementId(2), 7).with_phase(ElementPhase::Peeking));
        container
    }

    #[test]
    fn container_snapshot_keeps_identity_and_phase() {
        let container = sample();

        let json = serde_json::to_string(&container).expect("json serialize");
        let from_json: Container<i32> = serde_json::from_str(&json).expect("json deserialize");
        assert_eq!(from_json, container);

        let ron_text = ron::to_string(&container).expect("ron serialize");
        let from_ron: Container<i32> = ron::from_str(&ron_text).expect("ron deserialize");
        assert_eq!(from_ron.elements[1].id, ElementId(2));
        assert_eq!(from_ron.elements[1].phase, ElementPhase::Peeking);
    }
}
