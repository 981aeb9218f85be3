//! Page-wide ambient static field behind all content.

use leptos::prelude::*;

#[component]
pub fn StaticField() -> impl IntoView {
    let host = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "csr")]
    {
        use canvas::lifecycle::InitGuard;
        use canvas::static_field::{StaticFieldConfig, StaticFieldEngine};

        let guard = StoredValue::new_local(InitGuard::<StaticFieldEngine>::new());
        Effect::new(move |_| {
            if let Some(el) = host.get() {
                guard.update_value(|g| {
                    g.init(|| StaticFieldEngine::mount(&el, StaticFieldConfig::default()));
                });
            }
        });
        on_cleanup(move || {
            guard.update_value(|g| {
                g.release();
            });
        });
    }

    view! {
        <div
            node_ref=host
            class="static-field"
            aria-hidden="true"
            style="position:fixed;inset:0;pointer-events:none;z-index:-1"
        ></div>
    }
}
