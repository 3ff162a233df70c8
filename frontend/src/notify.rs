use std::rc::Rc;

use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

impl NotificationKind {
    pub fn duration_ms(self) -> u64 {
        match self {
            NotificationKind::Error => 4000,
            _ => 3000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: u32,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Notifications {
    pub items: Vec<Notification>,
    next_id: u32,
}

pub enum NotifyAction {
    Push(NotificationKind, String),
    Dismiss(u32),
}

impl Notifications {
    pub fn apply(&mut self, action: NotifyAction) {
        match action {
            NotifyAction::Push(kind, message) => {
                self.next_id += 1;
                self.items.push(Notification {
                    id: self.next_id,
                    kind,
                    message,
                });
            }
            NotifyAction::Dismiss(id) => self.items.retain(|n| n.id != id),
        }
    }
}

impl Reducible for Notifications {
    type Action = NotifyAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

pub type Notifier = UseReducerDispatcher<Notifications>;

pub fn success(notifier: &Notifier, message: impl Into<String>) {
    notifier.dispatch(NotifyAction::Push(NotificationKind::Success, message.into()));
}

pub fn error(notifier: &Notifier, message: impl Into<String>) {
    notifier.dispatch(NotifyAction::Push(NotificationKind::Error, message.into()));
}

pub fn info(notifier: &Notifier, message: impl Into<String>) {
    notifier.dispatch(NotifyAction::Push(NotificationKind::Info, message.into()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_increasing_ids_and_dismiss_removes() {
        let mut toasts = Notifications::default();
        toasts.apply(NotifyAction::Push(NotificationKind::Success, "saved".into()));
        toasts.apply(NotifyAction::Push(NotificationKind::Error, "oops".into()));
        assert_eq!(toasts.items.iter().map(|n| n.id).collect::<Vec<_>>(), vec![1, 2]);

        toasts.apply(NotifyAction::Dismiss(1));
        assert_eq!(toasts.items.len(), 1);
        assert_eq!(toasts.items[0].message, "oops");

        toasts.apply(NotifyAction::Push(NotificationKind::Info, "again".into()));
        assert_eq!(toasts.items.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn errors_linger_longer() {
        assert!(NotificationKind::Error.duration_ms() > NotificationKind::Success.duration_ms());
    }
}
