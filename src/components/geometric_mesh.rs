//! Wireframe shape showcase: click cycles the solid, hover blurs it.
//!
//! Rendering pauses while the container is scrolled out of view.

use canvas::shapes::Shape;
use leptos::prelude::*;

#[component]
pub fn GeometricMesh() -> impl IntoView {
    let host = NodeRef::<leptos::html::Div>::new();
    let shape = RwSignal::new(Shape::default());

    #[cfg(feature = "csr")]
    {
        use canvas::lifecycle::InitGuard;
        use canvas::wireframe::{WireframeConfig, WireframeEngine};

        use crate::util::visibility::VisibilityObserver;

        let guard = StoredValue::new_local(InitGuard::<WireframeEngine>::new());
        let observer = StoredValue::new_local(None::<VisibilityObserver>);
        Effect::new(move |_| {
            let Some(el) = host.get() else {
                return;
            };
            let mounted = guard
                .try_update_value(|g| g.init(|| WireframeEngine::mount(&el, WireframeConfig::default(), move |s| shape.set(s))))
                .unwrap_or(false);
            if !mounted {
                return;
            }
            let watched = VisibilityObserver::observe(&el, move |visible| {
                guard.update_value(|g| {
                    if let Some(engine) = g.get_mut() {
                        engine.set_visible(visible);
                    }
                });
            });
            match watched {
                Ok(watched) => observer.set_value(Some(watched)),
                Err(err) => {
                    // Without an observer the mesh just renders all the time.
                    log::warn!("geometric mesh: no visibility observer: {err:?}");
                    guard.update_value(|g| {
                        if let Some(engine) = g.get_mut() {
                            engine.set_visible(true);
                        }
                    });
                }
            }
        });
        on_cleanup(move || {
            observer.set_value(None);
            guard.update_value(|g| {
                g.release();
            });
        });
    }

    view! {
        <div node_ref=host class="geometric-mesh" style="position:relative;width:100%;height:500px;cursor:pointer;overflow:hidden">
            <div class="shape-label">
                <div class="shape-name">{move || shape.get().label()}</div>
                <div class="shape-hint">"CLICK TO SWITCH SHAPE"</div>
            </div>
        </div>
    }
}
