//! Full-bleed woven-light knot that parts around the pointer.

use leptos::prelude::*;

#[component]
pub fn WovenLight() -> impl IntoView {
    let host = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "csr")]
    {
        use canvas::lifecycle::InitGuard;
        use canvas::woven::{WovenConfig, WovenEngine};

        let guard = StoredValue::new_local(InitGuard::<WovenEngine>::new());
        Effect::new(move |_| {
            if let Some(el) = host.get() {
                guard.update_value(|g| {
                    g.init(|| WovenEngine::mount(&el, WovenConfig::default()));
                });
            }
        });
        on_cleanup(move || {
            guard.update_value(|g| {
                g.release();
            });
        });
    }

    view! { <div node_ref=host class="woven-light" style="position:absolute;inset:0;z-index:0"></div> }
}
