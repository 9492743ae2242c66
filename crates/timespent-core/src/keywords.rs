use std::sync::mpsc;

/// Legend color of keywords entered at runtime.
pub const DEFAULT_KEYWORD_COLOR: &str = "grey";

/// Registered before any user input.
pub const SEED_KEYWORDS: &[(&str, &str)] = &[("\u{1F9D1}\u{1F3FB}\u{200D}\u{1F4BB}", "blue")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub text: String,
    pub color: String,
}

/// Keywords matched against event text, in registration order.
///
/// Entries live for the whole session; registering a known keyword keeps its
/// position and only resets its color.
#[derive(Debug, Clone, Default)]
pub struct KeywordRegistry {
    entries: Vec<Keyword>,
}

impl KeywordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seeds() -> Self {
        let mut registry = Self::new();
        for (text, color) in SEED_KEYWORDS {
            registry.register_with_color(text, color);
        }
        registry
    }

    /// Returns false for blank input, which is not registered.
    pub fn register(&mut self, text: &str) -> bool {
        self.register_with_color(text, DEFAULT_KEYWORD_COLOR)
    }

    pub fn register_with_color(&mut self, text: &str, color: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|entry| entry.text == text) {
            Some(entry) => entry.color = color.to_owned(),
            None => self.entries.push(Keyword {
                text: text.to_owned(),
                color: color.to_owned(),
            }),
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Input side of the keyword channel, handed to whatever reads user input.
#[derive(Debug, Clone)]
pub struct KeywordSender {
    tx: mpsc::Sender<String>,
}

impl KeywordSender {
    /// Queues a confirmed search box value. Surrounding whitespace is dropped
    /// and blank input is ignored. Returns false once the tracker is gone.
    pub fn submit(&self, input: &str) -> bool {
        let keyword = input.trim();
        if keyword.is_empty() {
            log::warn!("ignoring empty keyword");
            return true;
        }
        self.tx.send(keyword.to_owned()).is_ok()
    }
}

/// Receiving side, drained by the tracker before each pass.
#[derive(Debug)]
pub struct KeywordInbox {
    rx: mpsc::Receiver<String>,
}

impl KeywordInbox {
    pub fn drain_into(&self, registry: &mut KeywordRegistry) -> usize {
        let mut added = 0;
        for keyword in self.rx.try_iter() {
            if registry.register(&keyword) {
                log::info!("registered keyword {keyword:?}");
                added += 1;
            }
        }
        added
    }
}

pub fn keyword_channel() -> (KeywordSender, KeywordInbox) {
    let (tx, rx) = mpsc::channel();
    (KeywordSender { tx }, KeywordInbox { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(registry: &KeywordRegistry) -> Vec<(&str, &str)> {
        registry
            .iter()
            .map(|k| (k.text.as_str(), k.color.as_str()))
            .collect()
    }

    #[test]
    fn seeds_start_in_blue() {
        let registry = KeywordRegistry::with_seeds();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().map(|k| k.color.as_str()), Some("blue"));
    }

    #[test]
    fn reregistering_keeps_order_and_resets_color() {
        let mut registry = KeywordRegistry::new();
        registry.register_with_color("focus", "blue");
        registry.register("1:1");
        registry.register("focus");
        assert_eq!(texts(&registry), vec![("focus", "grey"), ("1:1", "grey")]);
    }

    #[test]
    fn blank_keywords_are_rejected() {
        let mut registry = KeywordRegistry::new();
        assert!(!registry.register("   "));
        assert!(registry.is_empty());
    }

    #[test]
    fn channel_drains_in_submission_order() {
        let (sender, inbox) = keyword_channel();
        let mut registry = KeywordRegistry::new();
        assert!(sender.submit(" review "));
        assert!(sender.submit(""));
        assert!(sender.submit("standup"));

        assert_eq!(inbox.drain_into(&mut registry), 2);
        assert_eq!(texts(&registry), vec![("review", "grey"), ("standup", "grey")]);
        assert_eq!(inbox.drain_into(&mut registry), 0);
    }

    #[test]
    fn submit_reports_closed_channel() {
        let (sender, inbox) = keyword_channel();
        drop(inbox);
        assert!(!sender.submit("late"));
    }
}
