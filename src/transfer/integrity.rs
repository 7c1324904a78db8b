use std::hash::{Hash as _, Hasher as _};

use itertools::Itertools as _;

use super::registry::ContainerRegistry;
use super::session::DragSession;
use super::types::ElementId;

/// Human-readable list of everything wrong with the registry (plus the in-flight session, if any).
///
/// Checks:
/// - no element id appears twice, across all containers and the dragged element;
/// - the session's source and hover containers exist;
/// - the hover index is within `0..=len` of the hover container.
pub(crate) fn registry_integrity_issues<T>(
    registry: &impl ContainerRegistry<T>,
    session: Option<&DragSession<T>>,
) -> Vec<String> {
    let mut issues: Vec<String> = Vec::new();

    let mut ids: Vec<ElementId> = Vec::new();
    for container in registry.container_ids() {
        let Some(elements) = registry.elements(container) else {
            issues.push(format!("integrity: {container} listed but has no sequence"));
            continue;
        };
        ids.extend(elements.iter().map(|e| e.id));
    }
    if let Some(session) = session {
        ids.push(session.element().id);
    }

    for duplicate in ids.iter().duplicates() {
        issues.push(format!("integrity: element {duplicate} present more than once"));
    }

    if let Some(session) = session {
        if !registry.contains(session.source()) {
            issues.push(format!(
                "integrity: session {} source {} missing",
                session.id(),
                session.source()
            ));
        }
        if let Some(hover) = session.hover() {
            match registry.len_of(hover.container) {
                None => issues.push(format!(
                    "integrity: session {} hovers missing {}",
                    session.id(),
                    hover.container
                )),
                Some(len) if hover.index > len => issues.push(format!(
                    "integrity: session {} hover index {} > len {len} of {}",
                    session.id(),
                    hover.index,
                    hover.container
                )),
                Some(_) => {}
            }
        }
    }

    issues
}

pub(crate) fn hash_issues(lines: &[String]) -> u64 {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    for line in lines {
        line.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::registry::ContainerArena;
    use crate::transfer::types::Element;

    #[test]
    fn clean_arena_has_no_issues() {
        let mut arena = ContainerArena::new();
        arena.create_container("a", [1, 2, 3]);
        arena.create_container("b", [1]);
        assert!(registry_integrity_issues(&arena, None).is_empty());
    }

    #[test]
    fn detects_duplicated_element() {
        let mut arena = ContainerArena::new();
        let a = arena.create_container("a", [1, 2]);
        let b = arena.create_container("b", []);

        let stolen: Vec<Element<i32>> = arena
            .get(a)
            .map(|c| c.elements.clone())
            .unwrap_or_default();
        assert!(arena.replace(b, stolen));

        let issues = registry_integrity_issues(&arena, None);
        assert_eq!(issues.len(), 2, "{}", issues.join("\n"));
        assert_ne!(hash_issues(&issues), hash_issues(&[]));
    }
}
