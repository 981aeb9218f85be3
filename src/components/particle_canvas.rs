//! Hero backdrop: the draggable torus-knot particle field.

use leptos::prelude::*;

/// Fills its positioned parent. The field stays invisible through its warm-up
/// frames; `ready` flips once it has been revealed.
#[component]
pub fn ParticleCanvas() -> impl IntoView {
    let host = NodeRef::<leptos::html::Div>::new();
    let ready = RwSignal::new(false);

    #[cfg(feature = "csr")]
    {
        use canvas::field::{FieldConfig, ParticleFieldEngine};
        use canvas::lifecycle::InitGuard;
        use canvas::surface::detect_compact;

        let guard = StoredValue::new_local(InitGuard::<ParticleFieldEngine>::new());
        Effect::new(move |_| {
            let Some(el) = host.get() else {
                return;
            };
            let config = FieldConfig::for_device(detect_compact());
            guard.update_value(|g| {
                if g.init(|| ParticleFieldEngine::mount(&el, config, move || ready.set(true))) {
                    log::debug!("particle canvas: mounted {} particles", config.particle_count);
                }
            });
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
            class="particle-canvas"
            class:ready=move || ready.get()
            style="position:absolute;inset:0;touch-action:none;cursor:grab"
        ></div>
    }
}
