use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Matches on the primary subtag, so `fr-FR` and `fr_CA.UTF-8` are French.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized = tag.trim().to_ascii_lowercase();
        let primary = normalized
            .split(|c: char| c == '-' || c == '_' || c == '.')
            .next()
            .unwrap_or("");
        match primary {
            "en" => Some(Self::En),
            "fr" => Some(Self::Fr),
            _ => None,
        }
    }

    /// Language of `tag`, or English when it has no translation.
    pub fn resolve(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_default()
    }

    pub fn detect() -> Self {
        let locale = env::var("LANG").unwrap_or_default();
        Self::resolve(&locale)
    }
}

pub fn tr(language: Language, key: &'static str) -> &'static str {
    match language {
        Language::Fr => match key {
            "title" => "Temps pass\u{E9}",
            "custom_title" => "Tableau personnalis\u{E9}",
            "search_placeholder" => "Recherche d'\u{E9}v\u{E9}nement",
            "waiting" => "En attente du calendrier\u{2026}",
            "export" => "Exporter",
            "checked" => "V\u{E9}rifi\u{E9}",
            _ => key,
        },
        Language::En => match key {
            "title" => "Time spent",
            "custom_title" => "Custom Table",
            "search_placeholder" => "Custom Event Search",
            "waiting" => "Waiting for the calendar\u{2026}",
            "export" => "Export",
            "checked" => "Checked",
            _ => key,
        },
    }
}
