//! Root application component: the single portfolio page.

use leptos::prelude::*;

use crate::components::dotted_globe::{DottedGlobe, globe_size};
use crate::components::geometric_mesh::GeometricMesh;
use crate::components::particle_canvas::ParticleCanvas;
use crate::components::static_field::StaticField;
use crate::components::woven_light::WovenLight;

/// Page layout. Sections are stacked top to bottom; the ambient field sits
/// behind everything.
#[component]
pub fn App() -> impl IntoView {
    view! {
        <StaticField/>
        <main class="folio">
            <section class="hero">
                <ParticleCanvas/>
                <div class="hero-copy">
                    <h1>"Creative Developer"</h1>
                    <p>"Drag the knot to spin it."</p>
                </div>
            </section>

            <section class="showcase">
                <header class="section-heading">
                    <span class="eyebrow">"Interactive"</span>
                    <h2>"Geometric " <span class="accent">"Exploration"</span></h2>
                    <p>"Hover to blur, click to morph between shapes."</p>
                </header>
                <GeometricMesh/>
            </section>

            <section class="location">
                <header class="section-heading">
                    <span class="eyebrow">"Location"</span>
                    <h2>"Based in " <span class="accent">"Belgium"</span></h2>
                    <p>"Working with clients worldwide from the heart of Europe."</p>
                </header>
                <GlobeSection/>
            </section>

            <section class="woven">
                <WovenLight/>
                <h2 class="woven-title">"Woven by Light"</h2>
            </section>
        </main>
    }
}

/// Globe sized for the viewport at mount.
#[component]
fn GlobeSection() -> impl IntoView {
    let (width, height) = globe_size(viewport_width());
    view! { <DottedGlobe width=width height=height/> }
}

fn viewport_width() -> f64 {
    #[cfg(feature = "csr")]
    {
        canvas::surface::window_size().0
    }
    #[cfg(not(feature = "csr"))]
    {
        f64::INFINITY
    }
}
