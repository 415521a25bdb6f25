//! Registry of optional third-party pixel hooks.
//!
//! Each integration has at most one hook. A missing hook is the normal case
//! for integrations the site has not loaded.

use std::fmt;
use std::sync::Arc;
use tracing::trace;

use analytics_core::{EventPayload, IntegrationKind, IntegrationSetting, PixelCall};

/// A loaded vendor SDK entry point.
pub trait PixelHook: Send + Sync {
    fn invoke(&self, call: &PixelCall);
}

impl<F> PixelHook for F
where
    F: Fn(&PixelCall) + Send + Sync,
{
    fn invoke(&self, call: &PixelCall) {
        self(call)
    }
}

/// One optional hook per integration.
#[derive(Clone, Default)]
pub struct PixelRegistry {
    ga4: Option<Arc<dyn PixelHook>>,
    gtm: Option<Arc<dyn PixelHook>>,
    meta: Option<Arc<dyn PixelHook>>,
    tiktok: Option<Arc<dyn PixelHook>>,
    linkedin: Option<Arc<dyn PixelHook>>,
    clarity: Option<Arc<dyn PixelHook>>,
}

impl PixelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_hook(mut self, kind: IntegrationKind, hook: Arc<dyn PixelHook>) -> Self {
        self.register(kind, hook);
        self
    }

    /// Install a hook, replacing any previous one for `kind`.
    pub fn register(&mut self, kind: IntegrationKind, hook: Arc<dyn PixelHook>) {
        *self.slot_mut(kind) = Some(hook);
    }

    pub fn remove(&mut self, kind: IntegrationKind) -> Option<Arc<dyn PixelHook>> {
        self.slot_mut(kind).take()
    }

    pub fn hook(&self, kind: IntegrationKind) -> Option<&Arc<dyn PixelHook>> {
        match kind {
            IntegrationKind::Ga4 => self.ga4.as_ref(),
            IntegrationKind::Gtm => self.gtm.as_ref(),
            IntegrationKind::Meta => self.meta.as_ref(),
            IntegrationKind::TikTok => self.tiktok.as_ref(),
            IntegrationKind::LinkedIn => self.linkedin.as_ref(),
            IntegrationKind::Clarity => self.clarity.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: IntegrationKind) -> &mut Option<Arc<dyn PixelHook>> {
        match kind {
            IntegrationKind::Ga4 => &mut self.ga4,
            IntegrationKind::Gtm => &mut self.gtm,
            IntegrationKind::Meta => &mut self.meta,
            IntegrationKind::TikTok => &mut self.tiktok,
            IntegrationKind::LinkedIn => &mut self.linkedin,
            IntegrationKind::Clarity => &mut self.clarity,
        }
    }

    /// Integrations with a hook installed, in dispatch order.
    pub fn present(&self) -> Vec<IntegrationKind> {
        IntegrationKind::ALL
            .into_iter()
            .filter(|kind| self.hook(*kind).is_some())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.present().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep only hooks whose settings row is enabled with a non-blank id.
    pub fn retain_enabled(&mut self, settings: &[IntegrationSetting]) {
        for kind in IntegrationKind::ALL {
            let active = settings
                .iter()
                .any(|s| s.kind() == Some(kind) && s.is_active());
            if !active && self.remove(kind).is_some() {
                trace!(integration = %kind, "Dropped pixel hook without active setting");
            }
        }
    }

    /// Invoke every present hook with its vendor call. Returns the number invoked.
    pub fn forward(&self, event_name: &str, payload: &EventPayload) -> usize {
        let mut invoked = 0;
        for kind in IntegrationKind::ALL {
            match self.hook(kind) {
                Some(hook) => {
                    hook.invoke(&kind.command(event_name, payload));
                    invoked += 1;
                }
                None => trace!(integration = %kind, "Pixel hook not present"),
            }
        }
        invoked
    }
}

impl fmt::Debug for PixelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelRegistry")
            .field("present", &self.present())
            .finish()
    }
}
