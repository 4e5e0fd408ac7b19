//! End-to-end tests for a mounted landing page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_page::chrome::{DeviceClass, Modal, Presenter, Theme, Toast, ToastId};
use spark_page::dom::{Document, ElementSpec};
use spark_page::state::{MemoryStore, PreferenceStore};
use spark_page::{
    ActionError, ElementId, HostCapabilities, HostServices, Page, PageConfig, Rect, Viewport,
};

// =============================================================================
// FIXTURES
// =============================================================================

struct Landing {
    doc: Document,
    toggle: ElementId,
    icon: ElementId,
    hamburger: ElementId,
    menu: ElementId,
    menu_link: ElementId,
    dead_link: ElementId,
    hero_text: ElementId,
    hero_mockup: ElementId,
    phone_mockup: ElementId,
    counter: ElementId,
    cta: ElementId,
    plans: ElementId,
    plan_card: ElementId,
    plan_button: ElementId,
    lazy: ElementId,
    filler: ElementId,
}

fn landing() -> Landing {
    let mut doc = Document::new();
    let body = doc.body();

    let header = doc.append(
        body,
        ElementSpec::new("header").id("header").rect(Rect::new(0.0, 0.0, 1280.0, 60.0)),
    );
    let toggle = doc.append(header, ElementSpec::new("button").id("themeToggle"));
    let icon = doc.append(toggle, ElementSpec::new("span").class("theme-icon"));
    let hamburger = doc.append(header, ElementSpec::new("div").id("hamburger"));
    let menu = doc.append(header, ElementSpec::new("ul").id("navLinks"));
    let item = doc.append(menu, ElementSpec::new("li"));
    let menu_link = doc.append(item, ElementSpec::new("a").attr("href", "#plans").text("Plans"));
    let dead_link = doc.append(item, ElementSpec::new("a").attr("href", "#").text("Top"));

    let hero = doc.append(
        body,
        ElementSpec::new("section").class("hero").rect(Rect::new(0.0, 60.0, 1280.0, 700.0)),
    );
    let hero_text = doc.append(
        hero,
        ElementSpec::new("div").class("hero-text").rect(Rect::new(0.0, 100.0, 600.0, 300.0)),
    );
    let hero_mockup = doc.append(hero, ElementSpec::new("img").class("hero-mockup"));
    let phone_mockup = doc.append(hero, ElementSpec::new("img").class("phone-mockup"));
    let counter = doc.append(
        hero,
        ElementSpec::new("span")
            .class("channels-counter")
            .attr("data-target", "250")
            .text("0")
            .rect(Rect::new(0.0, 450.0, 100.0, 40.0)),
    );
    let cta = doc.append(
        hero,
        ElementSpec::new("button").class("cta-button").rect(Rect::new(0.0, 500.0, 200.0, 50.0)),
    );

    let plans = doc.append(
        body,
        ElementSpec::new("section").id("plans").rect(Rect::new(0.0, 3000.0, 1280.0, 800.0)),
    );
    let plan_card = doc.append(
        plans,
        ElementSpec::new("div").class("plan-card").rect(Rect::new(0.0, 3050.0, 300.0, 400.0)),
    );
    doc.append(plan_card, ElementSpec::new("h3").class("plan-name").text(" Premium "));
    let plan_button = doc.append(plan_card, ElementSpec::new("button").class("plan-button"));
    let lazy = doc.append(
        plans,
        ElementSpec::new("img")
            .class("lazy")
            .attr("data-src", "/img/plans.png")
            .rect(Rect::new(400.0, 3100.0, 300.0, 200.0)),
    );

    let filler = doc.append(body, ElementSpec::new("div").rect(Rect::new(0.0, 5000.0, 10.0, 10.0)));

    Landing {
        doc,
        toggle,
        icon,
        hamburger,
        menu,
        menu_link,
        dead_link,
        hero_text,
        hero_mockup,
        phone_mockup,
        counter,
        cta,
        plans,
        plan_card,
        plan_button,
        lazy,
        filler,
    }
}

type Log = Rc<RefCell<Vec<String>>>;

struct RecordingPresenter(Log);

impl Presenter for RecordingPresenter {
    fn show_modal(&mut self, modal: &Modal) {
        self.0.borrow_mut().push(format!("modal {}", modal.plan));
    }

    fn close_modal(&mut self) {
        self.0.borrow_mut().push("close".to_string());
    }

    fn show_toast(&mut self, toast: &Toast) {
        self.0.borrow_mut().push(format!("show {} {} {}", toast.id, toast.message, toast.duration_ms));
    }

    fn dismiss_toast(&mut self, id: ToastId) {
        self.0.borrow_mut().push(format!("dismiss {id}"));
    }

    fn remove_toast(&mut self, id: ToastId) {
        self.0.borrow_mut().push(format!("remove {id}"));
    }
}

fn mount(doc: Document, host: HostServices) -> Page {
    Page::mount(doc, host, PageConfig::default()).unwrap()
}

fn has_class(page: &Page, el: ElementId, class: &str) -> bool {
    page.document().get(el).unwrap().has_class(class)
}

fn text(page: &Page, el: ElementId) -> String {
    page.document().get(el).unwrap().text().to_string()
}

fn style(page: &Page, el: ElementId, property: &str) -> Option<String> {
    page.document().get(el).unwrap().style(property).map(str::to_string)
}

// =============================================================================
// THEME
// =============================================================================

#[test]
fn test_theme_defaults_to_dark() {
    let page = landing();
    let icon = page.icon;
    let page = mount(page.doc, HostServices::headless());

    let root = page.document().root();
    assert_eq!(page.document().get(root).unwrap().attr("data-theme"), Some("dark"));
    assert_eq!(text(&page, icon), "🌙");
    assert_eq!(page.state().theme, Theme::Dark);
}

#[test]
fn test_theme_persists_across_sessions() {
    let store = MemoryStore::new();

    let first = landing();
    let (toggle, icon) = (first.toggle, first.icon);
    let mut page = mount(first.doc, HostServices::headless().with_preferences(store.clone()));
    page.click(icon);

    assert_eq!(page.state().theme, Theme::Light);
    assert_eq!(text(&page, icon), "☀️");
    assert_eq!(store.get("theme").as_deref(), Some("light"));

    let second = landing();
    let page = mount(second.doc, HostServices::headless().with_preferences(store.clone()));
    assert_eq!(page.state().theme, Theme::Light);
    let root = page.document().root();
    assert_eq!(page.document().get(root).unwrap().attr("data-theme"), Some("light"));

    let mut page = page;
    page.click(toggle);
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}

#[test]
fn test_unknown_stored_theme_is_dark() {
    let mut store = MemoryStore::new();
    store.set("theme", "sepia").unwrap();
    let page = mount(landing().doc, HostServices::headless().with_preferences(store));
    assert_eq!(page.state().theme, Theme::Dark);
}

#[test]
fn test_state_signal_tracks_changes() {
    let fixture = landing();
    let toggle = fixture.toggle;
    let mut page = mount(fixture.doc, HostServices::headless());

    let runs = Rc::new(Cell::new(0));
    let seen = Rc::new(RefCell::new(Vec::new()));
    let signal = page.state_signal();
    let (runs2, seen2) = (runs.clone(), seen.clone());
    let _effect = spark_signals::effect(move || {
        seen2.borrow_mut().push(signal.get().theme);
        runs2.set(runs2.get() + 1);
    });
    assert_eq!(runs.get(), 1);

    page.click(toggle);
    assert_eq!(runs.get(), 2);
    assert_eq!(seen.borrow().as_slice(), &[Theme::Dark, Theme::Light]);
}

// =============================================================================
// ONE-SHOT ACTIONS
// =============================================================================

#[test]
fn test_lazy_image_loads_on_entry() {
    let fixture = landing();
    let lazy = fixture.lazy;
    let mut page = mount(fixture.doc, HostServices::headless());
    page.ready();

    assert_eq!(page.document().get(lazy).unwrap().attr("src"), None);
    assert!(has_class(&page, lazy, "lazy"));

    // 120px preload margin: 3100 - 800 - 120 = 2180
    page.scroll_to(2200.0);
    assert_eq!(page.document().get(lazy).unwrap().attr("src"), Some("/img/plans.png"));
    assert!(!has_class(&page, lazy, "lazy"));

    page.document_mut().get_mut(lazy).unwrap().set_attr("src", "/other.png");
    page.scroll_to(0.0);
    page.scroll_to(2200.0);
    assert_eq!(page.document().get(lazy).unwrap().attr("src"), Some("/other.png"));
}

#[test]
fn test_reveal_marks_are_terminal() {
    let fixture = landing();
    let (hero_text, plan_card) = (fixture.hero_text, fixture.plan_card);
    let mut page = mount(fixture.doc, HostServices::headless());
    page.ready();

    assert!(has_class(&page, hero_text, "visible"));
    assert!(has_class(&page, hero_text, "fade-in"));
    assert!(has_class(&page, plan_card, "animate-on-scroll"));
    assert!(!has_class(&page, plan_card, "visible"));

    page.scroll_to(2800.0);
    assert!(has_class(&page, plan_card, "visible"));
    page.scroll_to(0.0);
    assert!(has_class(&page, plan_card, "visible"));
}

#[test]
fn test_counter_animates_to_target() {
    let fixture = landing();
    let counter = fixture.counter;
    let mut page = mount(fixture.doc, HostServices::headless());
    page.ready();
    assert_eq!(page.pending_frames(), 1);

    page.animation_frame(0.0);
    assert_eq!(text(&page, counter), "0");

    page.animation_frame(1000.0);
    let mid: u64 = text(&page, counter).parse().unwrap();
    assert!((100..=150).contains(&mid), "mid value {mid}");

    assert_eq!(page.animation_frame(2000.0), 0);
    assert_eq!(text(&page, counter), "250");

    page.scroll_to(3000.0);
    page.scroll_to(0.0);
    assert_eq!(page.pending_frames(), 0);
}

#[test]
fn test_fallback_fires_everything_at_ready() {
    let fixture = landing();
    let (counter, lazy, plan_card) = (fixture.counter, fixture.lazy, fixture.plan_card);
    let host = HostServices::headless().with_capabilities(HostCapabilities::empty());
    let mut page = mount(fixture.doc, host);
    page.ready();

    assert_eq!(text(&page, counter), "250");
    assert_eq!(page.pending_frames(), 0);
    assert!(has_class(&page, plan_card, "visible"));
    assert_eq!(page.document().get(lazy).unwrap().attr("src"), Some("/img/plans.png"));
    assert_eq!(page.pending_actions(), 0);
    // counter, two reveals, one image
    assert_eq!(page.fired_actions(), 4);
}

#[test]
fn test_action_failure_reaches_sink() {
    let fixture = landing();
    let lazy = fixture.lazy;
    let errors: Rc<RefCell<Vec<ActionError>>> = Rc::default();
    let sink = errors.clone();
    let host = HostServices::headless()
        .with_error_sink(move |error: ActionError| sink.borrow_mut().push(error));
    let mut page = mount(fixture.doc, host);
    page.ready();

    page.document_mut().get_mut(lazy).unwrap().remove_attr("data-src");
    page.scroll_to(2500.0);

    assert_eq!(
        errors.borrow().as_slice(),
        &[ActionError::MissingAttribute { element: lazy, attribute: "data-src".to_string() }]
    );
    assert!(has_class(&page, lazy, "lazy"));

    page.scroll_to(0.0);
    page.scroll_to(2500.0);
    assert_eq!(errors.borrow().len(), 1);
}

// =============================================================================
// CHROME
// =============================================================================

#[test]
fn test_nav_open_close() {
    let fixture = landing();
    let (hamburger, menu, filler) = (fixture.hamburger, fixture.menu, fixture.filler);
    let mut page = mount(fixture.doc, HostServices::headless());
    let body = page.document().body();

    page.click(hamburger);
    assert!(page.state().nav.is_open());
    assert!(has_class(&page, menu, "active"));
    assert!(has_class(&page, hamburger, "active"));
    assert_eq!(style(&page, body, "overflow").as_deref(), Some("hidden"));

    page.click(menu);
    assert!(page.state().nav.is_open());

    page.click(filler);
    assert!(!page.state().nav.is_open());
    assert!(!has_class(&page, menu, "active"));
    assert_eq!(style(&page, body, "overflow"), None);

    page.click(hamburger);
    page.resize(900.0, 800.0);
    assert!(page.state().nav.is_open());
    page.advance_to(250);
    assert!(!page.state().nav.is_open());
}

#[test]
fn test_anchor_scrolls_and_closes_nav() {
    let fixture = landing();
    let (hamburger, link, dead, plans) =
        (fixture.hamburger, fixture.menu_link, fixture.dead_link, fixture.plans);
    let mut page = mount(fixture.doc, HostServices::headless());
    page.ready();

    page.click(dead);
    assert_eq!(page.viewport().scroll_y, 0.0);

    page.click(hamburger);
    page.click(link);

    let target_y = page.document().get(plans).unwrap().rect().y;
    assert_eq!(page.viewport().scroll_y, target_y);
    assert!(!page.state().nav.is_open());
    assert!(page.state().header.is_scrolled());
}

#[test]
fn test_header_and_parallax_follow_scroll() {
    let fixture = landing();
    let hero_text = fixture.hero_text;
    let mut page = mount(fixture.doc, HostServices::headless());
    let header = page.document().element_by_id("header").unwrap();

    page.scroll_to(60.0);
    assert!(!has_class(&page, header, "scrolled"));

    page.scroll_to(100.0);
    assert!(has_class(&page, header, "scrolled"));
    assert_eq!(style(&page, hero_text, "transform").as_deref(), Some("translateY(6px)"));

    page.scroll_to(0.0);
    assert!(!has_class(&page, header, "scrolled"));
}

#[test]
fn test_responsive_images() {
    let fixture = landing();
    let (hero, phone) = (fixture.hero_mockup, fixture.phone_mockup);
    let host = HostServices::headless().with_viewport(Viewport::new(700.0, 900.0));
    let mut page = mount(fixture.doc, host);
    page.ready();

    assert_eq!(page.state().device, DeviceClass::Mobile);
    assert_eq!(style(&page, hero, "display").as_deref(), Some("none"));
    assert_eq!(style(&page, phone, "max-width").as_deref(), Some("160px"));

    page.resize(900.0, 900.0);
    page.advance_to(250);
    assert_eq!(style(&page, hero, "display"), None);
    assert_eq!(style(&page, phone, "max-width").as_deref(), Some("200px"));

    page.resize(1400.0, 900.0);
    page.advance_to(500);
    assert_eq!(style(&page, phone, "max-width"), None);
}

#[test]
fn test_device_classes() {
    let body_classes = |caps: HostCapabilities| {
        let page = mount(landing().doc, HostServices::headless().with_capabilities(caps));
        let body = page.document().body();
        page.document().get(body).unwrap().classes().to_vec()
    };

    assert!(body_classes(HostCapabilities::desktop()).is_empty());
    assert_eq!(
        body_classes(HostCapabilities::desktop() | HostCapabilities::TOUCH),
        vec!["touch-device".to_string()]
    );
    assert_eq!(
        body_classes(HostCapabilities::TOUCH | HostCapabilities::MOBILE_AGENT),
        vec!["touch-device".to_string(), "mobile-device".to_string()]
    );
}

// =============================================================================
// OVERLAYS
// =============================================================================

#[test]
fn test_plan_modal_and_analytics() {
    let fixture = landing();
    let (button, cta) = (fixture.plan_button, fixture.cta);
    let log: Log = Rc::default();
    let tracked: Log = Rc::default();
    let sink = tracked.clone();
    let host = HostServices::headless()
        .with_presenter(RecordingPresenter(log.clone()))
        .with_analytics(move |action: &str, category: &str| {
            sink.borrow_mut().push(format!("{category}/{action}"));
        });
    let mut page = mount(fixture.doc, host);

    page.click(button);
    assert!(page.state().modal_open);
    assert_eq!(log.borrow().as_slice(), &["modal Premium".to_string()]);

    page.dismiss_modal();
    page.dismiss_modal();
    assert!(!page.state().modal_open);
    assert_eq!(log.borrow().len(), 2);

    page.click(cta);
    assert_eq!(tracked.borrow().as_slice(), &["CTA/Button Click", "CTA/Button Click"]);
}

#[test]
fn test_plan_name_falls_back_to_default() {
    let mut doc = Document::new();
    let body = doc.body();
    let button = doc.append(body, ElementSpec::new("button").class("plan-button"));

    let log: Log = Rc::default();
    let host = HostServices::headless().with_presenter(RecordingPresenter(log.clone()));
    let mut page = mount(doc, host);
    page.click(button);
    assert_eq!(log.borrow().as_slice(), &["modal Plan".to_string()]);
}

#[test]
fn test_toast_lifecycle() {
    let log: Log = Rc::default();
    let host = HostServices::headless().with_presenter(RecordingPresenter(log.clone()));
    let mut page = mount(landing().doc, host);
    page.ready();

    page.advance_to(1199);
    assert!(log.borrow().is_empty());

    page.advance_to(1200);
    assert_eq!(log.borrow().as_slice(), &["show toast-0 Welcome! 3000".to_string()]);

    page.advance_to(4200);
    assert_eq!(log.borrow().last().map(String::as_str), Some("dismiss toast-0"));

    page.advance_to(4500);
    assert_eq!(log.borrow().last().map(String::as_str), Some("remove toast-0"));
}

#[test]
fn test_toast_timers_catch_up() {
    let log: Log = Rc::default();
    let host = HostServices::headless().with_presenter(RecordingPresenter(log.clone()));
    let mut page = mount(landing().doc, host);
    page.ready();
    page.show_toast("Saved");

    page.advance_to(60_000);
    assert_eq!(
        log.borrow().as_slice(),
        &[
            "show toast-0 Saved 3000".to_string(),
            "show toast-1 Welcome! 3000".to_string(),
            "dismiss toast-0".to_string(),
            "remove toast-0".to_string(),
            "dismiss toast-1".to_string(),
            "remove toast-1".to_string(),
        ]
    );
}

#[test]
fn test_no_welcome_toast_when_disabled() {
    let log: Log = Rc::default();
    let host = HostServices::headless().with_presenter(RecordingPresenter(log.clone()));
    let mut config = PageConfig::default();
    config.toast.welcome_message = None;
    let mut page = Page::mount(landing().doc, host, config).unwrap();
    page.ready();
    page.advance_to(10_000);
    assert!(log.borrow().is_empty());
}
