//! Per-instance lifecycle state machine.
//!
//! ```text
//! Unmounted ─mount─▶ LoadingResources ─ready─▶ ReadyIdle ⇄ Interacting
//!     ▲                     │                      │
//!     └──────unmount────────┴──────────────────────┘
//!                           └────fail────▶ Failed (terminal until unmount)
//! ```
//!
//! Engines without an async load or warm-up mount straight into `ReadyIdle`.
//! Mounting an already-mounted instance is a no-op, which is what keeps a
//! rapid re-render from creating a second GPU context for the same instance.

#[cfg(test)]
#[path = "lifecycle_test.rs"]
mod lifecycle_test;

use wasm_bindgen::JsValue;

use crate::gl::GlError;
use crate::surface::SurfaceError;

/// Why an engine could not mount. Callers log it and leave the container empty.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no document")]
    NoDocument,
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Gl(#[from] GlError),
    #[error("dom: {0}")]
    Js(String),
}

impl From<JsValue> for MountError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

/// A mounted engine that can release everything it owns.
///
/// After `teardown` no frame callback body runs and every listener the
/// engine registered is removed. Calling it twice is a no-op.
pub trait Teardown {
    fn teardown(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Unmounted,
    LoadingResources,
    ReadyIdle,
    Interacting,
    Failed,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Enter the mounted states. Returns `false` if already mounted.
    pub fn mount(&mut self, needs_loading: bool) -> bool {
        if self.phase != Phase::Unmounted {
            return false;
        }
        self.phase = if needs_loading { Phase::LoadingResources } else { Phase::ReadyIdle };
        log::debug!("lifecycle: mounted -> {:?}", self.phase);
        true
    }

    /// Finish loading. Returns `true` exactly once per mount.
    pub fn ready(&mut self) -> bool {
        if self.phase != Phase::LoadingResources {
            return false;
        }
        self.phase = Phase::ReadyIdle;
        log::debug!("lifecycle: ready");
        true
    }

    /// Enter the terminal failure state. Returns `true` exactly once per mount.
    pub fn fail(&mut self) -> bool {
        if !matches!(self.phase, Phase::LoadingResources | Phase::ReadyIdle) {
            return false;
        }
        self.phase = Phase::Failed;
        log::debug!("lifecycle: failed");
        true
    }

    /// Pointer-down while idle.
    pub fn begin_interaction(&mut self) -> bool {
        if self.phase != Phase::ReadyIdle {
            return false;
        }
        self.phase = Phase::Interacting;
        true
    }

    /// Pointer release.
    pub fn end_interaction(&mut self) -> bool {
        if self.phase != Phase::Interacting {
            return false;
        }
        self.phase = Phase::ReadyIdle;
        true
    }

    /// Leave the mounted states. Returns `true` if the instance was mounted.
    pub fn unmount(&mut self) -> bool {
        if self.phase == Phase::Unmounted {
            return false;
        }
        self.phase = Phase::Unmounted;
        log::debug!("lifecycle: unmounted");
        true
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.phase != Phase::Unmounted
    }

    /// Whether frames should draw: loaded and not failed.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self.phase, Phase::ReadyIdle | Phase::Interacting)
    }
}

/// Instance-scoped guard around one mounted engine.
///
/// `init` only mounts while the slot is empty, so a component that re-runs
/// its mount effect never ends up with two engines. Each component instance
/// owns its own guard; separate instances never block each other.
pub struct InitGuard<E: Teardown> {
    engine: Option<E>,
}

impl<E: Teardown> Default for InitGuard<E> {
    fn default() -> Self {
        Self { engine: None }
    }
}

impl<E: Teardown> InitGuard<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `mount` if nothing is mounted yet. Returns `true` if an engine was created.
    pub fn init(&mut self, mount: impl FnOnce() -> Option<E>) -> bool {
        if self.engine.is_some() {
            log::debug!("init guard: already initialized");
            return false;
        }
        self.engine = mount();
        self.engine.is_some()
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    pub fn get_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Tear down and drop the engine. Returns `true` if one was mounted.
    pub fn release(&mut self) -> bool {
        match self.engine.take() {
            Some(mut engine) => {
                engine.teardown();
                true
            }
            None => false,
        }
    }
}

impl<E: Teardown> Drop for InitGuard<E> {
    fn drop(&mut self) {
        self.release();
    }
}
