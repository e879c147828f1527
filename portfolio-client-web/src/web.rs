//! Collegamento dei controller al browser: fetch, localStorage, timer e componenti yew.

use std::rc::Rc;
use std::time::Duration;

use gloo_events::EventListener;
use gloo_net::http::Request;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::callback::Interval;
use portfolio_core::ContactRequest;
use tracing::warn;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlButtonElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::contact::{
    ContactController, ContactFields, ContactTransport, HttpReply, Notifier, Sleeper, SubmitControl,
    TransportError, CONTACT_PATH,
};
use crate::notification::{NoticeKind, NotificationCenter};
use crate::session::KeyValueStore;
use crate::typewriter::{self, Typewriter};
use crate::ui::{ProjectFilter, UiController};

pub const API_BASE: &str = "http://localhost:3000";
const HERO_TITLE: &str = "Hi, I'm a Full Stack Developer";
const TICK_MS: u32 = 100;

const FILTERS: &[(&str, &str)] = &[("all", "All"), ("web", "Web"), ("design", "Design"), ("app", "Apps")];
const PROJECTS: &[(&str, &str)] = &[
    ("Portfolio Website", "web"),
    ("E-commerce Platform", "web"),
    ("Brand Identity", "design"),
    ("Mobile Banking UI", "design"),
    ("Task Manager", "app"),
];

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

/* capacità del browser */

pub struct FetchTransport {
    url: String,
}

impl FetchTransport {
    pub fn new(base: &str) -> Self {
        Self { url: format!("{base}{CONTACT_PATH}") }
    }
}

impl ContactTransport for FetchTransport {
    async fn post_contact(&self, body: &ContactRequest) -> Result<HttpReply, TransportError> {
        // json() imposta anche Content-Type: application/json
        let resp = Request::post(&self.url)
            .json(body)
            .map_err(|e| TransportError(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| TransportError(e.to_string()))?;
        Ok(HttpReply { status, body })
    }
}

pub struct TimerSleeper;

impl Sleeper for TimerSleeper {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}

/// `localStorage` grezzo: i valori restano "true"/"false", senza JSON.
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if LocalStorage::raw().set_item(key, value).is_err() {
            warn!(key, "localStorage write failed");
        }
    }
}

#[derive(Clone)]
struct FormRefs {
    name: NodeRef,
    email: NodeRef,
    message: NodeRef,
}

impl FormRefs {
    fn input(r: &NodeRef) -> String {
        r.cast::<HtmlInputElement>().map(|el| el.value()).unwrap_or_default()
    }
}

impl ContactFields for FormRefs {
    fn read(&self) -> ContactRequest {
        let message = self
            .message
            .cast::<HtmlTextAreaElement>()
            .map(|el| el.value())
            .unwrap_or_default();
        ContactRequest::new(Self::input(&self.name), Self::input(&self.email), message)
    }

    fn reset(&self) {
        for r in [&self.name, &self.email] {
            if let Some(el) = r.cast::<HtmlInputElement>() {
                el.set_value("");
            }
        }
        if let Some(el) = self.message.cast::<HtmlTextAreaElement>() {
            el.set_value("");
        }
    }
}

struct ButtonControl(NodeRef);

impl SubmitControl for ButtonControl {
    fn label(&self) -> String {
        self.0.cast::<HtmlButtonElement>().map(|b| b.inner_html()).unwrap_or_default()
    }

    fn set_label(&self, label: &str) {
        if let Some(b) = self.0.cast::<HtmlButtonElement>() {
            b.set_inner_html(label);
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(b) = self.0.cast::<HtmlButtonElement>() {
            b.set_disabled(disabled);
        }
    }
}

/* notifiche */

#[derive(Default, PartialEq)]
pub struct NoticeBoard {
    center: NotificationCenter,
}

pub enum NoticeAction {
    Show(NoticeKind, String),
    Dismiss(u64),
    Tick,
}

impl Reducible for NoticeBoard {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut center = self.center.clone();
        let now = now_ms();
        match action {
            NoticeAction::Show(kind, text) => {
                center.show(kind, text, now);
            }
            NoticeAction::Dismiss(id) => {
                center.dismiss(id, now);
            }
            NoticeAction::Tick => {
                if center.is_empty() {
                    return self;
                }
                center.tick(now);
            }
        }
        Rc::new(Self { center })
    }
}

impl Notifier for UseReducerDispatcher<NoticeBoard> {
    fn notify(&self, kind: NoticeKind, text: &str) {
        self.dispatch(NoticeAction::Show(kind, text.to_string()));
    }
}

#[function_component(Notifications)]
fn notifications(props: &NotificationsProps) -> Html {
    html! {
        <div class="notification-container">
            { for props.board.center.notices().iter().map(|n| {
                let id = n.id;
                let board = props.board.clone();
                let onclick = Callback::from(move |_: MouseEvent| board.dispatch(NoticeAction::Dismiss(id)));
                html! {
                    <div key={id.to_string()}
                         class={classes!("notification", n.kind.css_class(), n.is_shown().then_some("show"))}
                         {onclick}>
                        <i class={n.kind.icon()}></i>
                        <span>{ n.text.clone() }</span>
                        <div class="progress"><div class="progress-bar"></div></div>
                    </div>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct NotificationsProps {
    board: UseReducerHandle<NoticeBoard>,
}

/* pagina */

#[function_component(App)]
pub fn app() -> Html {
    let ui = use_mut_ref(|| UiController::init(BrowserStore));
    let redraw = use_force_update();
    let board = use_reducer(NoticeBoard::default);
    let typed = use_state(|| 0usize);

    let controller = use_memo((), |_| ContactController::new(FetchTransport::new(API_BASE), TimerSleeper));
    let name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let message_ref = use_node_ref();
    let submit_ref = use_node_ref();
    let form = FormRefs { name: name_ref, email: email_ref, message: message_ref };

    // timer delle notifiche
    {
        let dispatcher = board.dispatcher();
        use_effect_with((), move |_| {
            let interval = Interval::new(TICK_MS, move || dispatcher.dispatch(NoticeAction::Tick));
            move || drop(interval)
        });
    }

    // effetto macchina da scrivere
    {
        let typed = typed.setter();
        use_effect_with((), move |_| {
            let writer = Typewriter::new(HERO_TITLE);
            let mut shown = 0;
            let step = typewriter::STEP.as_millis() as u32;
            let interval = Interval::new(step, move || {
                if !writer.is_done(shown) {
                    shown += 1;
                    typed.set(shown);
                }
            });
            move || drop(interval)
        });
    }

    // navbar "scrolled"
    {
        let ui = ui.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                let target = window.clone();
                EventListener::new(&window, "scroll", move |_| {
                    let y = target.scroll_y().unwrap_or(0.0);
                    if ui.borrow_mut().on_scroll(y) {
                        redraw.force_update();
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_theme = {
        let ui = ui.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            ui.borrow_mut().on_theme_toggle();
            redraw.force_update();
        })
    };

    let on_menu = {
        let ui = ui.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            ui.borrow_mut().on_menu_toggle();
            redraw.force_update();
        })
    };

    let on_nav_link = {
        let ui = ui.clone();
        let redraw = redraw.clone();
        Callback::from(move |_: MouseEvent| {
            ui.borrow_mut().on_nav_link();
            redraw.force_update();
        })
    };

    let onsubmit = {
        let controller = controller.clone();
        let form = form.clone();
        let submit_ref = submit_ref.clone();
        let notifier = board.dispatcher();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let controller = controller.clone();
            let form = form.clone();
            let control = ButtonControl(submit_ref.clone());
            let notifier = notifier.clone();
            spawn_local(async move {
                controller.submit(&form, &control, &notifier).await;
            });
        })
    };

    let session = ui.borrow().session().clone();
    let hero = Typewriter::new(HERO_TITLE);

    let filter_buttons = FILTERS.iter().map(|&(value, label)| {
        let filter = ProjectFilter::from_attr(value);
        let active = session.filter == filter;
        let ui = ui.clone();
        let redraw = redraw.clone();
        let onclick = Callback::from(move |_: MouseEvent| {
            ui.borrow_mut().on_filter(filter.clone());
            redraw.force_update();
        });
        html! {
            <button class={classes!("filter-btn", active.then_some("active"))} data-filter={value} {onclick}>
                { label }
            </button>
        }
    });

    let project_cards = PROJECTS.iter().map(|&(title, category)| {
        let visible = ui.borrow().is_visible(category);
        html! {
            <div class="project-card" data-category={category} hidden={!visible}>
                <h3>{ title }</h3>
            </div>
        }
    });

    html! {
        <div class={classes!("page", session.theme.body_class())}>
            <nav class={classes!("navbar", session.scrolled.then_some("scrolled"))}>
                <button class="theme-switcher" onclick={on_theme}>
                    <i class={session.theme.switcher_icon()}></i>
                </button>
                <div class={classes!("hamburger", session.menu_open.then_some("active"))} onclick={on_menu}>
                    <span></span><span></span><span></span>
                </div>
                <ul class={classes!("nav-links", session.menu_open.then_some("active"))}>
                    <li><a href="#home" onclick={on_nav_link.clone()}>{"Home"}</a></li>
                    <li><a href="#projects" onclick={on_nav_link.clone()}>{"Projects"}</a></li>
                    <li><a href="#contact" onclick={on_nav_link}>{"Contact"}</a></li>
                </ul>
            </nav>

            <section id="home" class="hero">
                <div class="hero-text"><h1>{ hero.frame(*typed) }</h1></div>
            </section>

            <section id="projects" class="projects">
                <div class="filters">{ for filter_buttons }</div>
                <div class="project-grid">{ for project_cards }</div>
            </section>

            <section id="contact" class="contact">
                <form id="contactForm" {onsubmit} novalidate={true}>
                    <input type="text" name="name" placeholder="Your Name" ref={form.name.clone()} />
                    <input type="email" name="email" placeholder="Your Email" ref={form.email.clone()} />
                    <textarea name="message" placeholder="Your Message" ref={form.message.clone()}></textarea>
                    <button type="submit" class="submit-btn" ref={submit_ref}>{"Send Message"}</button>
                </form>
            </section>

            <Notifications board={board} />
        </div>
    }
}
