//! Turns an item, its lock state and the caller's grants into the ordered
//! list of actions the UI may offer.

use std::collections::HashMap;
use std::sync::Arc;

use crate::actions::catalog::{ActionContext, ActionDescriptor, ActionName};
use crate::item::Item;
use crate::locks::query::get_chain_lock;
use crate::locks::store::LockStore;
use crate::session::{Privileges, Session};

/// Default callback type hosts bind to actions.
pub type ActionCallback = Arc<dyn Fn(&Item) + Send + Sync>;

/// Callbacks keyed by action. An action without an entry is never offered.
pub type Callbacks<C = ActionCallback> = HashMap<ActionName, C>;

/// An action that is currently permitted, bound to its callback.
#[derive(Clone)]
pub struct ResolvedAction<C = ActionCallback> {
    pub label: &'static str,
    pub action_name: ActionName,
    pub callback: C,
}

impl<C> std::fmt::Debug for ResolvedAction<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedAction")
            .field("label", &self.label)
            .field("action_name", &self.action_name)
            .finish_non_exhaustive()
    }
}

/// Compute the permitted actions for `item`, in catalog order.
///
/// `related` carries items whose locks also govern `item`, such as a
/// planning item's linked events. A missing item yields an empty list.
pub fn resolve_actions<C: Clone>(
    item: Option<&Item>,
    related: &[Item],
    session: &Session,
    privileges: &Privileges,
    store: Option<&LockStore>,
    catalog: &[ActionDescriptor],
    callbacks: &HashMap<ActionName, C>,
) -> Vec<ResolvedAction<C>> {
    let Some(item) = item else {
        return Vec::new();
    };

    let lock = get_chain_lock(Some(item), related, store);
    let ctx = ActionContext {
        item,
        related,
        session,
        privileges,
        store,
        lock: lock.as_ref(),
        locked: lock.is_some(),
        restricted: lock.as_ref().is_some_and(|l| !l.is_held_by(session)),
    };

    let actions: Vec<ResolvedAction<C>> = catalog
        .iter()
        .filter_map(|descriptor| {
            let callback = callbacks.get(&descriptor.action_name)?;
            descriptor.is_eligible(&ctx).then(|| ResolvedAction {
                label: descriptor.label,
                action_name: descriptor.action_name,
                callback: callback.clone(),
            })
        })
        .collect();

    tracing::debug!(
        item_id = %item.id,
        item_type = %item.item_type,
        locked = ctx.locked,
        restricted = ctx.restricted,
        offered = actions.len(),
        "Resolved item actions"
    );

    actions
}
