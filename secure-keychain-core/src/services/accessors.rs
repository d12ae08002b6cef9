//! Process-wide convenience lookups
//!
//! Stateless: each call performs a fresh lookup through a short-lived
//! `NamedItemService` and caches nothing.

use crate::services::ServiceContext;
use crate::types::ItemKey;

/// Current device token, `None` when absent or unreadable
pub fn current_device_token(ctx: &ServiceContext) -> Option<String> {
    lookup(ctx, ItemKey::DEVICE_TOKEN)
}

/// Current user id, `None` when absent or unreadable
pub fn current_user_id(ctx: &ServiceContext) -> Option<String> {
    lookup(ctx, ItemKey::UID)
}

fn lookup(ctx: &ServiceContext, key: &str) -> Option<String> {
    ctx.named_item(key).ok()?.find()
}
