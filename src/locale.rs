// SPDX-License-Identifier: MPL-2.0
//! Document language and text direction.
//!
//! The page-level locale is owned by [`LocaleSwitcher`], which rewrites it when
//! a `set_language` exchange succeeds. Everything else (the toast manager in
//! particular) only holds a [`watch::Receiver`] and reads the current value.

use crate::config::{Config, FALLBACK_LANGUAGE};
use crate::trigger::Exchange;
use tokio::sync::watch;
use unic_langid::{CharacterDirection, LanguageIdentifier};

/// Horizontal text direction of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    #[must_use]
    pub fn is_rtl(self) -> bool {
        self == TextDirection::Rtl
    }

    /// Direction implied by the script of a language.
    #[must_use]
    pub fn of_language(lang: &LanguageIdentifier) -> Self {
        match lang.character_direction() {
            CharacterDirection::RTL => TextDirection::Rtl,
            _ => TextDirection::Ltr,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Snapshot of the document attributes that decide layout direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocale {
    /// `lang` attribute of the root element.
    pub lang: LanguageIdentifier,
    /// `dir` attribute of the root element.
    pub dir: Option<TextDirection>,
    /// `dir` attribute of the body element.
    pub body_dir: Option<TextDirection>,
}

impl Default for DocumentLocale {
    fn default() -> Self {
        Self::new(LanguageIdentifier::default())
    }
}

impl DocumentLocale {
    /// Locale with the root `dir` derived from the language.
    #[must_use]
    pub fn new(lang: LanguageIdentifier) -> Self {
        let dir = Some(TextDirection::of_language(&lang));
        Self {
            lang,
            dir,
            body_dir: None,
        }
    }

    /// Effective direction: right-to-left if any of the root `dir`, the body
    /// `dir` or the language script says so.
    #[must_use]
    pub fn direction(&self) -> TextDirection {
        let rtl = self.dir == Some(TextDirection::Rtl)
            || self.body_dir == Some(TextDirection::Rtl)
            || TextDirection::of_language(&self.lang).is_rtl();
        if rtl {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }
}

/// Owner of the document locale.
///
/// Mirrors the page script that reacts to a successful
/// `set_language?lang=xx` exchange by rewriting `lang` and `dir`.
#[derive(Debug)]
pub struct LocaleSwitcher {
    sender: watch::Sender<DocumentLocale>,
}

impl LocaleSwitcher {
    #[must_use]
    pub fn new(initial: DocumentLocale) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Read-only view for collaborators.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DocumentLocale> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> DocumentLocale {
        self.sender.borrow().clone()
    }

    /// Switches the document to `lang`, updating `dir` to match its script.
    pub fn set_language(&self, lang: LanguageIdentifier) {
        let dir = TextDirection::of_language(&lang);
        self.sender.send_modify(|locale| {
            locale.lang = lang;
            locale.dir = Some(dir);
        });
        log::debug!("Document language set to {} ({})", self.current().lang, dir.as_str());
    }

    /// Applies a completed exchange. Returns whether the locale changed.
    pub fn apply_exchange(&self, exchange: &Exchange) -> bool {
        let path = exchange.path.as_str();
        if !exchange.successful || !path.contains("set_language") {
            return false;
        }
        match language_from_path(path) {
            Some(lang) => {
                self.set_language(lang);
                true
            }
            None => {
                log::warn!("set_language exchange without a usable lang parameter: {path}");
                false
            }
        }
    }
}

/// Extracts the `lang=` query value of a request path.
fn language_from_path(path: &str) -> Option<LanguageIdentifier> {
    let (_, query) = path.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "lang")
        .and_then(|(_, value)| value.parse().ok())
}

/// Picks the starting language: CLI flag, then config, then OS locale.
#[must_use]
pub fn resolve_language(cli_lang: Option<&str>, config: &Config) -> LanguageIdentifier {
    let candidates = [
        cli_lang.map(str::to_owned),
        config.language.clone(),
        sys_locale::get_locale(),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|tag| tag.parse::<LanguageIdentifier>().ok())
        .or_else(|| FALLBACK_LANGUAGE.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(tag: &str) -> LanguageIdentifier {
        tag.parse().unwrap()
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(DocumentLocale::new(lang("ar")).direction(), TextDirection::Rtl);
        assert_eq!(DocumentLocale::new(lang("he")).direction(), TextDirection::Rtl);
    }

    #[test]
    fn english_is_left_to_right() {
        assert_eq!(DocumentLocale::new(lang("en-US")).direction(), TextDirection::Ltr);
    }

    #[test]
    fn body_dir_forces_rtl() {
        let mut locale = DocumentLocale::new(lang("en"));
        locale.body_dir = Some(TextDirection::Rtl);
        assert!(locale.direction().is_rtl());
    }

    #[test]
    fn successful_set_language_exchange_switches_direction() {
        let switcher = LocaleSwitcher::new(DocumentLocale::new(lang("en")));
        let receiver = switcher.subscribe();

        assert!(switcher.apply_exchange(&Exchange::new("/set_language?lang=ar", true)));
        assert_eq!(receiver.borrow().lang, lang("ar"));
        assert_eq!(receiver.borrow().dir, Some(TextDirection::Rtl));

        assert!(switcher.apply_exchange(&Exchange::new("/set_language?next=%2F&lang=fr", true)));
        assert_eq!(receiver.borrow().direction(), TextDirection::Ltr);
    }

    #[test]
    fn failed_or_unrelated_exchanges_are_ignored() {
        let switcher = LocaleSwitcher::new(DocumentLocale::new(lang("en")));
        assert!(!switcher.apply_exchange(&Exchange::new("/set_language?lang=ar", false)));
        assert!(!switcher.apply_exchange(&Exchange::new("/news?lang=ar", true)));
        assert!(!switcher.apply_exchange(&Exchange::new("/set_language", true)));
        assert_eq!(switcher.current().lang, lang("en"));
    }

    #[test]
    fn cli_language_wins_over_config() {
        let config = Config {
            language: Some("fr".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_language(Some("ar"), &config), lang("ar"));
        assert_eq!(resolve_language(None, &config), lang("fr"));
    }

    #[test]
    fn unparsable_cli_language_falls_through() {
        let config = Config {
            language: Some("fr".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_language(Some("not a tag!"), &config), lang("fr"));
    }
}
