//! Reveal-on-scroll.
//!
//! Each section is observed until its first intersecting notification, then
//! marked visible and dropped from observation. Visibility never reverts.
//!
//! The notification source is abstracted behind [`RevealHost`] so that an
//! `IntersectionObserver` and the scroll-driven [`PollingObserver`] are
//! interchangeable.

use crate::geometry::{visible_ratio, ViewportRect};

/// Capability interface for observing and marking sections.
pub trait RevealHost {
    type Target: PartialEq;

    /// Flag a section as awaiting reveal (hidden by page styling).
    fn mark_pending(&mut self, target: &Self::Target);

    /// Flag a section as revealed.
    fn mark_visible(&mut self, target: &Self::Target);

    /// Start delivering intersection notifications for `target`.
    fn observe(&mut self, target: &Self::Target);

    /// Stop delivering notifications for `target`.
    fn unobserve(&mut self, target: &Self::Target);
}

/// One intersection notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<T> {
    pub target: T,
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl<T> Intersection<T> {
    /// A notification from a native observer entry, held to the same
    /// threshold rule as [`PollingObserver`]: the observer's own flag is set
    /// for any overlap at all.
    pub fn from_observer(
        target: T,
        is_intersecting: bool,
        ratio: f64,
        covers_viewport: bool,
        threshold: f64,
    ) -> Self {
        Self {
            target,
            is_intersecting: is_intersecting
                && meets_threshold(ratio, covers_viewport, threshold),
            ratio,
        }
    }
}

/// Whether a section showing `ratio` of itself qualifies for reveal.
///
/// A section covering the whole viewport always qualifies; one taller than
/// `viewport / threshold` could never reach the ratio otherwise.
pub fn meets_threshold(ratio: f64, covers_viewport: bool, threshold: f64) -> bool {
    covers_viewport || (ratio > 0.0 && ratio >= threshold)
}

#[derive(Debug)]
struct RevealSection<T> {
    target: T,
    revealed: bool,
}

/// One-shot reveal bookkeeping over a fixed set of sections.
pub struct RevealController<H: RevealHost> {
    host: H,
    sections: Vec<RevealSection<H::Target>>,
}

impl<H: RevealHost> RevealController<H> {
    /// Mark every target pending and start observing it.
    pub fn new(mut host: H, targets: Vec<H::Target>) -> Self {
        for target in &targets {
            host.mark_pending(target);
            host.observe(target);
        }
        let sections = targets
            .into_iter()
            .map(|target| RevealSection {
                target,
                revealed: false,
            })
            .collect();
        Self { host, sections }
    }

    /// Process a batch of notifications; returns how many sections were
    /// revealed by it.
    ///
    /// Non-intersecting entries, entries for unknown targets and repeats for
    /// already revealed sections change nothing.
    pub fn handle_intersections<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = Intersection<H::Target>>,
    {
        let mut revealed = 0;
        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            let Some(section) = self
                .sections
                .iter_mut()
                .find(|s| !s.revealed && s.target == entry.target)
            else {
                continue;
            };
            section.revealed = true;
            self.host.mark_visible(&section.target);
            self.host.unobserve(&section.target);
            revealed += 1;
        }
        if revealed > 0 {
            log::debug!("revealed {revealed} section(s)");
        }
        revealed
    }

    pub fn is_revealed(&self, target: &H::Target) -> bool {
        self.sections
            .iter()
            .any(|s| s.revealed && &s.target == target)
    }

    pub fn all_revealed(&self) -> bool {
        self.sections.iter().all(|s| s.revealed)
    }

    /// Targets still waiting for their first intersection.
    pub fn pending(&self) -> impl Iterator<Item = &H::Target> {
        self.sections
            .iter()
            .filter(|s| !s.revealed)
            .map(|s| &s.target)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// Intersection source for environments without `IntersectionObserver`.
///
/// Evaluated on demand (at setup and on throttled scroll), it reports every
/// given section as an [`Intersection`] against the current viewport.
#[derive(Debug, Clone, Copy)]
pub struct PollingObserver {
    threshold: f64,
}

impl PollingObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compare each `(target, top, height)` box against `viewport` using
    /// [`meets_threshold`].
    pub fn poll<T, I>(&self, viewport: &ViewportRect, boxes: I) -> Vec<Intersection<T>>
    where
        I: IntoIterator<Item = (T, f64, f64)>,
    {
        boxes
            .into_iter()
            .map(|(target, top, height)| {
                let ratio = visible_ratio(viewport, top, height);
                let covers = viewport.height > 0.0
                    && viewport.visible_px(top, height) >= viewport.height;
                Intersection {
                    target,
                    is_intersecting: meets_threshold(ratio, covers, self.threshold),
                    ratio,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        observed: Vec<&'static str>,
        visible: Vec<&'static str>,
    }

    impl RevealHost for Recorder {
        type Target = &'static str;

        fn mark_pending(&mut self, _target: &&'static str) {}

        fn mark_visible(&mut self, target: &&'static str) {
            self.visible.push(*target);
        }

        fn observe(&mut self, target: &&'static str) {
            self.observed.push(*target);
        }

        fn unobserve(&mut self, target: &&'static str) {
            self.observed.retain(|t| t != target);
        }
    }

    fn hit(target: &'static str, is_intersecting: bool) -> Intersection<&'static str> {
        Intersection {
            target,
            is_intersecting,
            ratio: if is_intersecting { 0.5 } else { 0.0 },
        }
    }

    #[test]
    fn first_intersection_reveals_and_unobserves() {
        let mut reveal = RevealController::new(Recorder::default(), vec!["a", "b"]);
        assert_eq!(reveal.handle_intersections([hit("a", true), hit("b", false)]), 1);
        assert!(reveal.is_revealed(&"a"));
        assert!(!reveal.is_revealed(&"b"));
        assert_eq!(reveal.host().observed, vec!["b"]);
    }

    #[test]
    fn repeat_notifications_do_not_remark() {
        let mut reveal = RevealController::new(Recorder::default(), vec!["a"]);
        reveal.handle_intersections([hit("a", true)]);
        reveal.handle_intersections([hit("a", false), hit("a", true)]);
        assert_eq!(reveal.host().visible, vec!["a"]);
        assert!(reveal.all_revealed());
    }

    #[test]
    fn observer_overlap_below_threshold_is_not_intersecting() {
        let entry = Intersection::from_observer("a", true, 0.05, false, 0.12);
        assert!(!entry.is_intersecting);
        assert!(Intersection::from_observer("a", true, 0.05, true, 0.12).is_intersecting);
        assert!(!Intersection::from_observer("a", false, 0.5, false, 0.12).is_intersecting);
    }

    #[test]
    fn unknown_targets_are_ignored() {
        let mut reveal = RevealController::new(Recorder::default(), vec!["a"]);
        assert_eq!(reveal.handle_intersections([hit("zzz", true)]), 0);
        assert_eq!(reveal.pending().count(), 1);
    }
}
