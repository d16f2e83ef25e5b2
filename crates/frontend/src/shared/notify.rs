//! Transient notifications shown in the corner of the screen.
//!
//! Each notice dismisses itself after a few seconds. Errors are also written
//! to the console log.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

const DISMISS_AFTER_MS: u32 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice--success",
            NoticeKind::Error => "notice notice--error",
            NoticeKind::Info => "notice notice--info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    id: u64,
    kind: NoticeKind,
    title: String,
    text: Option<String>,
}

#[derive(Clone, Copy)]
pub struct NotifyService {
    notices: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u64>,
}

impl NotifyService {
    pub fn new() -> Self {
        Self {
            notices: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    fn push(&self, kind: NoticeKind, title: &str, text: Option<String>) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.notices.update(|n| {
            n.push(Notice {
                id,
                kind,
                title: title.to_string(),
                text,
            })
        });

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            svc.dismiss(id);
        });
    }

    pub fn success(&self, title: &str) {
        self.push(NoticeKind::Success, title, None);
    }

    pub fn info(&self, title: &str, text: impl Into<String>) {
        self.push(NoticeKind::Info, title, Some(text.into()));
    }

    /// Logs the failure and shows it
    pub fn error(&self, title: &str, err: impl Into<String>) {
        let err = err.into();
        log::error!("{}: {}", title, err);
        self.push(NoticeKind::Error, title, Some(err));
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|n| n.retain(|x| x.id != id));
    }
}

pub fn use_notify() -> NotifyService {
    use_context::<NotifyService>().expect("NotifyService not provided in context")
}

/// Renders active notices. Must be mounted exactly once.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = use_notify();

    view! {
        <div class="notice-host">
            <For
                each=move || svc.notices.get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.class() role="status">
                            <div class="notice__body">
                                <strong class="notice__title">{n.title}</strong>
                                {n.text.map(|t| view! { <span class="notice__text">{t}</span> })}
                            </div>
                            <button class="notice__close" on:click=move |_| svc.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}
