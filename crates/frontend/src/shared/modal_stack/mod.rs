use crate::shared::modal_frame::ModalFrame;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type Builder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;
type CloseGuard = Arc<dyn Fn() -> bool + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    builder: Builder,
    modal_class: Option<String>,
    can_close: Option<CloseGuard>,
}

/// Frame options for [`ModalStackService::push_with`]
#[derive(Clone, Default)]
pub struct ModalOptions {
    pub modal_class: Option<String>,
    /// While this returns false, overlay clicks and Escape are ignored
    pub can_close: Option<CloseGuard>,
}

impl ModalOptions {
    pub fn class(cls: &str) -> Self {
        Self {
            modal_class: Some(cls.to_string()),
            can_close: None,
        }
    }

    pub fn guarded(mut self, can_close: impl Fn() -> bool + Send + Sync + 'static) -> Self {
        self.can_close = Some(Arc::new(can_close));
        self
    }
}

/// Lets a modal close itself
#[derive(Clone)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

/// Stack of open modals. Escape closes only the topmost one.
#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: RwSignal<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    fn defer(&self, f: impl FnOnce(ModalStackService) + 'static) {
        let svc = *self;
        spawn_local(async move {
            // removal waits for the next tick so the triggering DOM event
            // finishes before its handler is dropped
            TimeoutFuture::new(0).await;
            f(svc);
        });
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    pub fn push<F>(&self, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        self.push_with(ModalOptions::default(), builder)
    }

    pub fn push_with<F>(&self, options: ModalOptions, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                builder: Arc::new(builder),
                modal_class: options.modal_class,
                can_close: options.can_close,
            });
        });

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    pub fn close_deferred(&self, id: u64) {
        self.defer(move |svc| svc.close(id));
    }

    fn pop_guarded_deferred(&self) {
        let allowed = self
            .stack
            .with_untracked(|s| s.last().and_then(|e| e.can_close.clone()))
            .map(|f| f())
            .unwrap_or(true);
        if allowed {
            self.defer(|svc| {
                svc.stack.update(|s| {
                    s.pop();
                })
            });
        }
    }
}

/// Renders the modal stack. Must be mounted exactly once, at the app root.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                if key.key() == "Escape" && svc.stack.with_untracked(|s| !s.is_empty()) {
                    svc.pop_guarded_deferred();
                }
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            // lives as long as the app
            closure.forget();
        }
    });

    view! {
        <Show when=move || svc.is_open()>
            <For
                each={move || svc.stack.get().into_iter().enumerate().collect::<Vec<_>>()}
                key=|(_, entry)| entry.id
                children=move |(idx, entry)| {
                    let id = entry.id;
                    let can_close = entry.can_close.clone();
                    let on_close = Callback::new(move |_| {
                        if can_close.as_ref().map(|f| f()).unwrap_or(true) {
                            svc.close_deferred(id);
                        }
                    });

                    let content = (entry.builder)(ModalHandle { id, svc });
                    view! {
                        <ModalFrame
                            z_index={1000 + idx as i32}
                            on_close=on_close
                            modal_class={entry.modal_class.clone().unwrap_or_default()}
                        >
                            {content}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
