//! Scroll-spy: mark the navigation link of the section currently in view.
//!
//! The current section is the last one, in document order, whose top lies at
//! or above `scroll_offset + lookahead`. When the page is scrolled above every
//! section the first section is current.

use crate::anchors;
use crate::geometry::GeometrySampler;

/// A page region that navigation links can point at.
#[derive(Debug, Clone)]
pub struct Section<T> {
    pub id: String,
    pub target: T,
}

impl<T> Section<T> {
    pub fn new(id: impl Into<String>, target: T) -> Self {
        Self {
            id: id.into(),
            target,
        }
    }
}

/// A navigation entry pointing at a fragment.
#[derive(Debug, Clone)]
pub struct NavLink<L> {
    pub href: String,
    pub handle: L,
    active: bool,
}

impl<L> NavLink<L> {
    pub fn new(href: impl Into<String>, handle: L) -> Self {
        Self {
            href: href.into(),
            handle,
            active: false,
        }
    }

    /// Id of the section this link points at, if it is an in-page link.
    pub fn target_id(&self) -> Option<&str> {
        anchors::fragment_id(&self.href)
    }

    /// Active state as of the last [`ScrollSpy::update_active`].
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Applies the active marker to a link.
pub trait LinkMarker {
    type Link;

    fn set_active(&mut self, link: &Self::Link, active: bool);
}

/// Find the current section for the given scroll position.
pub fn current_section<'a, G: GeometrySampler>(
    sections: &'a [Section<G::Target>],
    sampler: &G,
    lookahead: f64,
) -> Option<&'a Section<G::Target>> {
    let from_top = sampler.scroll_offset() + lookahead;
    sections
        .iter()
        .rev()
        .find(|s| sampler.top_offset(&s.target) <= from_top)
        .or_else(|| sections.first())
}

/// Section tracker bound to a set of navigation links.
pub struct ScrollSpy<G: GeometrySampler, M: LinkMarker> {
    sampler: G,
    marker: M,
    sections: Vec<Section<G::Target>>,
    links: Vec<NavLink<M::Link>>,
    lookahead: f64,
}

impl<G: GeometrySampler, M: LinkMarker> ScrollSpy<G, M> {
    pub fn new(
        sampler: G,
        marker: M,
        sections: Vec<Section<G::Target>>,
        links: Vec<NavLink<M::Link>>,
        lookahead: f64,
    ) -> Self {
        Self {
            sampler,
            marker,
            sections,
            links,
            lookahead,
        }
    }

    /// Recompute the current section and re-assert every link's marker.
    ///
    /// Returns the id of the current section, or `None` when there are no
    /// sections (every link is then inactive).
    pub fn update_active(&mut self) -> Option<&str> {
        let current = current_section(&self.sections, &self.sampler, self.lookahead)
            .map(|s| s.id.as_str());
        for link in &mut self.links {
            let active = current.is_some_and(|id| anchors::links_to(&link.href, id));
            link.active = active;
            self.marker.set_active(&link.handle, active);
        }
        current
    }

    pub fn sections(&self) -> &[Section<G::Target>] {
        &self.sections
    }

    pub fn links(&self) -> &[NavLink<M::Link>] {
        &self.links
    }

    pub fn sampler(&self) -> &G {
        &self.sampler
    }

    pub fn marker(&self) -> &M {
        &self.marker
    }

    /// Links currently marked active.
    pub fn active_links(&self) -> impl Iterator<Item = &NavLink<M::Link>> {
        self.links.iter().filter(|l| l.active)
    }
}
