//! Focus-trap boundary rules.

/// Elements that can take keyboard focus inside the overlay, before the
/// disabled / unrendered filter is applied.
pub const FOCUSABLE_SELECTOR: &str =
    "a, button, textarea, input, select, [tabindex]:not([tabindex=\"-1\"])";

/// An element matched by [`FOCUSABLE_SELECTOR`], with the facts needed to
/// filter it.
#[derive(Debug, Clone)]
pub struct FocusCandidate<E> {
    pub element: E,
    pub disabled: bool,
    /// Has a layout box (not `display: none` or inside a hidden subtree).
    pub rendered: bool,
}

/// Keep candidates that can actually receive focus, in document order.
pub fn focusable_in_order<E, I>(candidates: I) -> Vec<E>
where
    I: IntoIterator<Item = FocusCandidate<E>>,
{
    candidates
        .into_iter()
        .filter(|c| !c.disabled && c.rendered)
        .map(|c| c.element)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Forward,
    Backward,
}

/// Where Tab must send focus to keep it inside the trap.
///
/// Only the edges wrap: Tab on the last element goes to the first, Shift+Tab
/// on the first goes to the last. Anywhere else (and with no focusable
/// elements at all) the browser moves focus itself and `None` is returned.
pub fn wrap_target<'a, E: PartialEq>(
    focusables: &'a [E],
    active: Option<&E>,
    direction: TabDirection,
) -> Option<&'a E> {
    let (first, last) = (focusables.first()?, focusables.last()?);
    let active = active?;
    match direction {
        TabDirection::Forward if active == last => Some(first),
        TabDirection::Backward if active == first => Some(last),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(element: u8, disabled: bool, rendered: bool) -> FocusCandidate<u8> {
        FocusCandidate {
            element,
            disabled,
            rendered,
        }
    }

    #[test]
    fn disabled_and_hidden_are_skipped() {
        let kept = focusable_in_order([
            candidate(1, false, true),
            candidate(2, true, true),
            candidate(3, false, false),
            candidate(4, false, true),
        ]);
        assert_eq!(kept, vec![1, 4]);
    }

    #[test]
    fn wraps_only_at_edges() {
        let els = [10, 20, 30];
        assert_eq!(wrap_target(&els, Some(&30), TabDirection::Forward), Some(&10));
        assert_eq!(wrap_target(&els, Some(&10), TabDirection::Backward), Some(&30));
        assert_eq!(wrap_target(&els, Some(&20), TabDirection::Forward), None);
        assert_eq!(wrap_target(&els, Some(&10), TabDirection::Forward), None);
        assert_eq!(wrap_target(&els, Some(&30), TabDirection::Backward), None);
    }

    #[test]
    fn single_element_wraps_onto_itself() {
        let els = [7];
        assert_eq!(wrap_target(&els, Some(&7), TabDirection::Forward), Some(&7));
        assert_eq!(wrap_target(&els, Some(&7), TabDirection::Backward), Some(&7));
    }

    #[test]
    fn empty_set_is_a_no_op() {
        let els: [u8; 0] = [];
        assert_eq!(wrap_target(&els, Some(&1), TabDirection::Forward), None);
    }
}
