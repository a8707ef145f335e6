// Integration tests (native) for the `kiki-site` crate.
// These drive the controllers the way the page does, without a browser, so
// they run under `cargo test` on the host.

use kiki_site::cat::{CatController, CatEffect, CatEvent, CatMood, CatTimer};
use kiki_site::config::SiteConfig;
use kiki_site::geometry::{Point, Size};
use kiki_site::modal::{CloseReason, ModalController, ModalEffect, ModalEvent, ModalPhase, ModalTimer, PointerKind};
use kiki_site::task::TaskId;
use kiki_site::theme::{ClassSet, MemoryStore, PreferenceStore, ThemeController, ThemePreference, ThemeSurface};

struct Page {
    theme: ThemeController<MemoryStore, ClassSet>,
    cat: CatController,
}

impl Page {
    fn load(store: MemoryStore) -> Self {
        let cfg = SiteConfig::default();
        let mut theme = ThemeController::new(cfg.theme, store, ClassSet::new());
        theme.restore();
        Self { theme, cat: CatController::new(cfg.cat) }
    }

    fn click_cat(&mut self) -> Vec<CatEffect> {
        let theme = self.theme.toggle_theme();
        self.cat.handle(CatEvent::Clicked { theme })
    }
}

fn speech(effects: &[CatEffect]) -> Option<&str> {
    effects.iter().find_map(|e| match e {
        CatEffect::SetSpeech(text) => Some(text.as_str()),
        _ => None,
    })
}

fn timer(effects: &[CatEffect], which: CatTimer) -> Option<(TaskId, u32)> {
    effects.iter().find_map(|e| match e {
        CatEffect::Schedule { timer, task, delay_ms } if *timer == which => Some((*task, *delay_ms)),
        _ => None,
    })
}

#[test]
fn fresh_visit_starts_light() {
    let page = Page::load(MemoryStore::new());
    assert_eq!(page.theme.current(), ThemePreference::Light);
    assert_eq!(page.theme.store().writes(), 1);
}

#[test]
fn returning_visit_restores_dark() {
    let page = Page::load(MemoryStore::with_entry("theme", "dark"));
    assert_eq!(page.theme.current(), ThemePreference::Dark);
    assert!(page.theme.surface().has_class("dark-theme"));
}

#[test]
fn petting_walkthrough() {
    let mut page = Page::load(MemoryStore::new());

    let fx = page.click_cat();
    assert_eq!(page.cat.pet_count(), 1);
    assert_eq!(speech(&fx), Some("dark mode!"));

    let fx = page.click_cat();
    assert_eq!(speech(&fx), Some("light mode!"));

    let fx = page.click_cat();
    assert_eq!(page.cat.pet_count(), 3);
    assert_eq!(speech(&fx), Some("cozy~"));

    page.click_cat();
    let fx = page.click_cat();
    assert_eq!(page.cat.pet_count(), 5);
    assert_eq!(speech(&fx), Some("purr purr~ ❤️"));
    assert_eq!(page.cat.mood(), CatMood::Happy);
    assert!(fx.contains(&CatEffect::SetExcited(true)));
    assert_eq!(timer(&fx, CatTimer::Happy).map(|t| t.1), Some(3_000));

    // Five toggles from light: the page ends up dark and the store agrees.
    assert_eq!(page.theme.current(), ThemePreference::Dark);
    assert_eq!(page.theme.store().get("theme").as_deref(), Some("dark"));
}

#[test]
fn fifteenth_pet_is_happy_not_secondary() {
    let mut page = Page::load(MemoryStore::new());
    let mut fx = Vec::new();
    for _ in 0..15 {
        fx = page.click_cat();
    }
    assert_eq!(speech(&fx), Some("purr purr~ ❤️"));
}

#[test]
fn overlapping_speech_keeps_latest_bubble() {
    let mut page = Page::load(MemoryStore::new());
    let first = page.click_cat();
    let idle = page.cat.handle(CatEvent::IdleTick { roll: 0.0, pick: 0 });
    assert_eq!(speech(&idle), Some("meow?"));

    let (stale, _) = timer(&first, CatTimer::Speech).unwrap();
    assert!(page.cat.handle(CatEvent::TimerElapsed { timer: CatTimer::Speech, task: stale }).is_empty());

    let (live, delay) = timer(&idle, CatTimer::Speech).unwrap();
    assert_eq!(delay, 1_500);
    let fx = page.cat.handle(CatEvent::TimerElapsed { timer: CatTimer::Speech, task: live });
    assert_eq!(speech(&fx), Some("click me to change theme!"));
}

fn modal_timer(effects: &[ModalEffect], which: ModalTimer) -> TaskId {
    effects
        .iter()
        .find_map(|e| match e {
            ModalEffect::Schedule { timer, task, .. } if *timer == which => Some(*task),
            _ => None,
        })
        .expect("timer scheduled")
}

#[test]
fn about_window_full_lifecycle() {
    let mut modal = ModalController::new(SiteConfig::default().modal);
    let fx = modal.handle(ModalEvent::Trigger);
    let reveal = modal_timer(&fx, ModalTimer::Reveal);
    modal.handle(ModalEvent::TimerElapsed { timer: ModalTimer::Reveal, task: reveal });
    assert_eq!(modal.phase(), ModalPhase::Open);

    // Drag it into the bottom-right corner and beyond.
    modal.handle(ModalEvent::Press {
        kind: PointerKind::Touch,
        pointer: Point::new(450.0, 210.0),
        window_origin: Point::new(440.0, 200.0),
        on_close_control: false,
    });
    modal.handle(ModalEvent::Move { kind: PointerKind::Touch, pointer: Point::new(5_000.0, 5_000.0) });
    let fx = modal.handle(ModalEvent::Frame {
        window: Size::new(320.0, 240.0),
        viewport: Size::new(800.0, 600.0),
    });
    assert_eq!(fx, vec![ModalEffect::SetPosition(Point::new(480.0, 360.0))]);
    modal.handle(ModalEvent::Release { kind: PointerKind::Touch });

    let fx = modal.handle(ModalEvent::Close(CloseReason::Backdrop));
    let teardown = modal_timer(&fx, ModalTimer::Teardown);
    assert!(modal.handle(ModalEvent::KeyDown { key: "Escape".into() }).is_empty());
    modal.handle(ModalEvent::TimerElapsed { timer: ModalTimer::Teardown, task: teardown });
    assert_eq!(modal.phase(), ModalPhase::Closed);
    assert_eq!(modal.instance(), None);
}

#[test]
fn reopening_starts_centred() {
    let mut modal = ModalController::new(SiteConfig::default().modal);
    modal.handle(ModalEvent::Trigger);
    modal.handle(ModalEvent::Press {
        kind: PointerKind::Mouse,
        pointer: Point::new(10.0, 10.0),
        window_origin: Point::new(0.0, 0.0),
        on_close_control: false,
    });
    modal.handle(ModalEvent::Move { kind: PointerKind::Mouse, pointer: Point::new(60.0, 60.0) });
    modal.handle(ModalEvent::Frame { window: Size::new(100.0, 100.0), viewport: Size::new(500.0, 500.0) });
    assert!(modal.position().is_some());

    modal.handle(ModalEvent::Trigger);
    modal.handle(ModalEvent::Trigger);
    assert_eq!(modal.position(), None);
    assert!(!modal.is_dragging());
}
