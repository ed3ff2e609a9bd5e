// SPDX-License-Identifier: MPL-2.0
use hx_toast::config::{self, Config};
use hx_toast::locale::{DocumentLocale, LocaleSwitcher};
use hx_toast::markup::{self, parse_fragment};
use hx_toast::toast::{bootstrap, InMemoryTemplates, ToastKind, ToastPhase};
use hx_toast::trigger::Exchange;
use std::time::Duration;
use tempfile::tempdir;

const ERROR_TEMPLATE: &str = r#"
<div class="flex items-center w-full max-w-xs p-4 mb-4 text-gray-500 bg-white rounded-lg shadow" role="alert">
  <div class="inline-flex items-center justify-center shrink-0 w-8 h-8 text-red-500 bg-red-100 rounded-lg">
    <svg class="w-5 h-5" aria-hidden="true" viewBox="0 0 20 20"><path d="M10 .5a9.5 9.5 0 1 0 9.5 9.5"/></svg>
  </div>
  <div class="ms-3 text-sm font-normal">Error</div>
  <button type="button" class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex h-8 w-8" aria-label="Close">
    <span class="sr-only">Close</span>
  </button>
</div>"#;

fn templates() -> InMemoryTemplates {
    InMemoryTemplates::new()
        .with(ToastKind::Error, ERROR_TEMPLATE)
        .with(ToastKind::Success, ERROR_TEMPLATE.replace("red", "green"))
}

#[tokio::test(start_paused = true)]
async fn save_failed_trigger_shows_then_removes_error_toast() {
    let switcher = LocaleSwitcher::new(DocumentLocale::new("en".parse().unwrap()));
    let system = bootstrap(&Config::default(), templates(), switcher.subscribe(), None);

    let exchange = Exchange::new("/projects/4", true)
        .with_header(
            "HX-Trigger",
            r#"{"showToast":{"kind":"error","message":"Save failed","durationMs":3000}}"#,
        )
        .unwrap();
    let id = system
        .manager
        .on_exchange_complete(&exchange)
        .await
        .unwrap()
        .expect("toast should be created");

    assert_eq!(system.manager.active_ids(), vec![id.clone()]);
    let element = system.manager.element(&id).unwrap();
    assert!(element
        .find(&|el: &markup::Element| el.has_class("text-red-500"))
        .is_some());
    assert_eq!(
        element.find(&markup::is_message_slot).unwrap().text_content(),
        "Save failed"
    );

    tokio::time::sleep(Duration::from_millis(2_999)).await;
    assert_eq!(system.manager.phase(&id), Some(ToastPhase::Visible));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(system.manager.is_empty());
    assert!(!system.manager.active_ids().contains(&id));
    assert_eq!(
        system.manager.templates().source().fetch_count(ToastKind::Error),
        1
    );
}

#[tokio::test(start_paused = true)]
async fn repeated_trigger_while_visible_keeps_one_toast() {
    let switcher = LocaleSwitcher::new(DocumentLocale::new("en".parse().unwrap()));
    let system = bootstrap(&Config::default(), templates(), switcher.subscribe(), None);
    let header = r#"{"showToast":{"kind":"success","message":"Saved"}}"#;

    for _ in 0..3 {
        let exchange = Exchange::new("/save", true)
            .with_header("HX-Trigger", header)
            .unwrap();
        assert!(system.bus.exchange_completed(exchange));
    }
    tokio::time::sleep(Duration::from_millis(5)).await;

    assert_eq!(system.manager.len(), 1);
    system.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn language_switch_mirrors_new_toasts() {
    let switcher = LocaleSwitcher::new(DocumentLocale::new("en".parse().unwrap()));
    let system = bootstrap(&Config::default(), templates(), switcher.subscribe(), None);

    assert!(switcher.apply_exchange(&Exchange::new("/set_language?lang=ar", true)));
    let id = system
        .manager
        .request(ToastKind::Success, "تم الحفظ", Duration::ZERO)
        .await
        .unwrap()
        .unwrap();

    let element = system.manager.element(&id).unwrap();
    let slot = element.find(&markup::is_message_slot).unwrap();
    assert!(slot.has_class("text-right"));
    assert!(slot.has_class("me-3"));
}

#[tokio::test(start_paused = true)]
async fn existing_container_is_reused() {
    let switcher = LocaleSwitcher::new(DocumentLocale::new("ar".parse().unwrap()));
    let existing =
        parse_fragment(r#"<div id="toast-container" class="fixed bottom-4 right-4"></div>"#).unwrap();
    let system = bootstrap(&Config::default(), templates(), switcher.subscribe(), Some(existing));

    let markup = system.manager.render();
    assert!(markup.contains("bottom-4"));
    assert!(!markup.contains("left-4"));
}

#[test]
fn config_file_drives_container_identity() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    let saved = Config {
        container_id: "flash-messages".to_string(),
        ..Config::default()
    };
    config::save_to_path(&saved, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    let _guard = runtime.enter();
    let switcher = LocaleSwitcher::new(DocumentLocale::new("en".parse().unwrap()));
    let system = bootstrap(&loaded, templates(), switcher.subscribe(), None);
    assert!(system.manager.render().contains(r#"id="flash-messages""#));
}
