//! Playback state of embedded media elements.
//!
//! Only what a modal needs when it closes: whether a `<video>` is playing,
//! and how many times an `<iframe>` has (re)loaded its source. Embedded
//! players without a pause API are stopped by reassigning their `src`.

use crate::dom::{Document, TagName};
use modals_types::input::NodeId;

/// Per-element media state. Meaningful only for media tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaState {
    pub playing: bool,
    /// Number of source loads triggered by assigning `src`.
    pub loads: u32,
}

impl MediaState {
    /// A source assignment restarts loading and stops playback.
    pub fn reload(&mut self) {
        self.loads = self.loads.saturating_add(1);
        self.playing = false;
    }
}

impl Document {
    /// Start playback on a `<video>` or `<audio>` element.
    pub fn play(&mut self, id: NodeId) -> bool {
        match self.element_mut(id) {
            Some(elem) if matches!(elem.tag, TagName::Video | TagName::Audio) => {
                elem.media.playing = true;
                true
            },
            _ => false,
        }
    }

    /// Pause a `<video>` or `<audio>` element. Returns `true` if it was
    /// playing.
    pub fn pause(&mut self, id: NodeId) -> bool {
        match self.element_mut(id) {
            Some(elem) if matches!(elem.tag, TagName::Video | TagName::Audio) => {
                std::mem::replace(&mut elem.media.playing, false)
            },
            _ => false,
        }
    }

    /// Reassign an element's `src` to its current value, forcing a reload.
    pub fn reassign_src(&mut self, id: NodeId) {
        if let Some(elem) = self.element_mut(id) {
            let src = elem.src().unwrap_or_default().to_string();
            elem.set_attribute("src", &src);
        }
    }

    /// Whether a media element is currently playing.
    pub fn is_playing(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.media.playing)
    }

    /// How many times a media element has loaded its source.
    pub fn load_count(&self, id: NodeId) -> u32 {
        self.element(id).map_or(0, |e| e.media.loads)
    }

    /// First descendant of `scope` with the given tag, in document order.
    pub fn first_descendant_with_tag(&self, scope: NodeId, tag: &TagName) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&id| self.element(id).is_some_and(|e| e.tag == *tag))
    }

    /// Stop any media playing inside `scope`.
    ///
    /// The first `<iframe>` is reloaded and the first `<video>` is paused.
    pub fn stop_media_in(&mut self, scope: NodeId) {
        if let Some(frame) = self.first_descendant_with_tag(scope, &TagName::Iframe) {
            self.reassign_src(frame);
            log::trace!("reloaded iframe {frame} inside {scope}");
        }
        if let Some(video) = self.first_descendant_with_tag(scope, &TagName::Video)
            && self.pause(video)
        {
            log::trace!("paused video {video} inside {scope}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal_with_media(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
        let modal = doc.create_element("div");
        doc.append_child(doc.root, modal);
        let frame = doc.create_element("iframe");
        doc.set_attribute(frame, "src", "https://player.example/embed/1");
        doc.append_child(modal, frame);
        let video = doc.create_element("video");
        doc.append_child(modal, video);
        (modal, frame, video)
    }

    #[test]
    fn src_assignment_counts_loads() {
        let mut doc = Document::new();
        let (_, frame, _) = modal_with_media(&mut doc);
        assert_eq!(doc.load_count(frame), 1);
        doc.reassign_src(frame);
        assert_eq!(doc.load_count(frame), 2);
        assert_eq!(
            doc.element(frame).and_then(|e| e.src()),
            Some("https://player.example/embed/1")
        );
    }

    #[test]
    fn src_on_plain_element_is_not_a_load() {
        let mut doc = Document::new();
        let img = doc.create_element("img");
        doc.set_attribute(img, "src", "a.png");
        assert_eq!(doc.load_count(img), 0);
    }

    #[test]
    fn play_and_pause() {
        let mut doc = Document::new();
        let (modal, _, video) = modal_with_media(&mut doc);
        assert!(doc.play(video));
        assert!(doc.is_playing(video));
        assert!(doc.pause(video));
        assert!(!doc.pause(video));
        assert!(!doc.play(modal));
    }

    #[test]
    fn stop_media_reloads_frame_and_pauses_video() {
        let mut doc = Document::new();
        let (modal, frame, video) = modal_with_media(&mut doc);
        doc.play(video);

        doc.stop_media_in(modal);
        assert!(!doc.is_playing(video));
        assert_eq!(doc.load_count(frame), 2);
    }

    #[test]
    fn stop_media_touches_only_first_of_each() {
        let mut doc = Document::new();
        let (modal, _, first) = modal_with_media(&mut doc);
        let second = doc.create_element("video");
        doc.append_child(modal, second);
        doc.play(first);
        doc.play(second);

        doc.stop_media_in(modal);
        assert!(!doc.is_playing(first));
        assert!(doc.is_playing(second));
    }

    #[test]
    fn stop_media_without_media_is_noop() {
        let mut doc = Document::new();
        let modal = doc.create_element("div");
        doc.append_child(doc.root, modal);
        doc.stop_media_in(modal);
        assert_eq!(doc.descendants(modal).len(), 0);
    }
}
