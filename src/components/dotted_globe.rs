//! Rotating halftone globe with loading and error overlays.

#[cfg(test)]
#[path = "dotted_globe_test.rs"]
mod dotted_globe_test;

use canvas::globe::GlobeStatus;
use leptos::prelude::*;

/// Overlay copy for a globe status: headline and optional detail. `None` once ready.
#[must_use]
pub fn status_text(status: &GlobeStatus) -> Option<(&'static str, Option<&'static str>)> {
    match status {
        GlobeStatus::Loading => Some(("Loading globe...", None)),
        GlobeStatus::Ready => None,
        GlobeStatus::Failed(_) => Some(("Error loading globe", Some("Failed to load map data"))),
    }
}

/// Requested globe size for a viewport width: phone, tablet, desktop.
#[must_use]
pub fn globe_size(viewport_width: f64) -> (f64, f64) {
    if viewport_width < 640.0 {
        (320.0, 280.0)
    } else if viewport_width < 768.0 {
        (500.0, 400.0)
    } else {
        (700.0, 500.0)
    }
}

#[component]
pub fn DottedGlobe(width: f64, height: f64) -> impl IntoView {
    let host = NodeRef::<leptos::html::Div>::new();
    let status = RwSignal::new(GlobeStatus::Loading);

    #[cfg(feature = "csr")]
    {
        use canvas::globe::{GlobeConfig, GlobeEngine};
        use canvas::lifecycle::InitGuard;

        let guard = StoredValue::new_local(InitGuard::<GlobeEngine>::new());
        Effect::new(move |_| {
            if let Some(el) = host.get() {
                let config = GlobeConfig { width, height, ..GlobeConfig::default() };
                guard.update_value(|g| {
                    g.init(|| GlobeEngine::mount(&el, config, move |s| status.set(s)));
                });
            }
        });
        on_cleanup(move || {
            guard.update_value(|g| {
                g.release();
            });
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (width, height);
    }

    let overlay = move || {
        status.with(|s| {
            status_text(s).map(|(headline, detail)| {
                view! {
                    <div class="globe-status" class:error=detail.is_some()>
                        <p class="headline">{headline}</p>
                        {detail.map(|d| view! { <p class="detail">{d}</p> })}
                    </div>
                }
            })
        })
    };

    view! {
        <div node_ref=host class="dotted-globe" style="position:relative;display:flex;justify-content:center;touch-action:none">
            {overlay}
            <div class="globe-hint">"Drag to rotate · Scroll to zoom"</div>
        </div>
    }
}
