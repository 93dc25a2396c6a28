//! Listener registry for attack notifications.
//!
//! Each notification has its own ordered list of callbacks. Callbacks run
//! synchronously, in registration order, on the tick that raises them.

use std::fmt;

use airstrike_core::types::ActorId;

/// Callback invoked with the actor the notification concerns.
pub type Listener = Box<dyn FnMut(ActorId) + Send + Sync>;

/// Handle returned by [`ListenerList::subscribe`], valid for that list only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Ordered callbacks for one notification. Empty by default.
#[derive(Default)]
pub struct ListenerList {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl ListenerList {
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(ActorId) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered here.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, actor: ActorId) {
        for (_, listener) in &mut self.entries {
            listener(actor);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ListenerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerList")
            .field("len", &self.entries.len())
            .finish()
    }
}

/// The three notifications a bomber raises.
#[derive(Debug, Default)]
pub struct AttackListeners {
    pub removed_from_world: ListenerList,
    pub entered_attack_range: ListenerList,
    pub exited_attack_range: ListenerList,
}
