//! Render notification
//!
//! The rendering layer mounts `target.view_id` inside `target.layout`.
//! Notifications are synchronous and delivered in registration order.

use crate::resolver::ResolvedTarget;

pub trait RenderTarget: Send + Sync {
    fn mount(&self, target: &ResolvedTarget);
}

impl<F> RenderTarget for F
where
    F: Fn(&ResolvedTarget) + Send + Sync,
{
    fn mount(&self, target: &ResolvedTarget) {
        self(target)
    }
}
