use std::rc::Rc;

use yew::prelude::*;

use crate::models::{Expense, User};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl Session {
    pub fn new(user: Option<User>, token: Option<String>) -> Self {
        Self {
            user,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppStore {
    pub session: Session,
    pub expenses: Vec<Expense>,
    pub loading: bool,
}

pub enum StoreAction {
    Login { user: User, token: String },
    SetUser(User),
    Logout,
    SetExpenses(Vec<Expense>),
    AddExpense(Expense),
    UpdateExpense { id: String, expense: Expense },
    RemoveExpense(String),
    SetLoading(bool),
}

impl AppStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, action: StoreAction) {
        match action {
            StoreAction::Login { user, token } => {
                self.session = Session::new(Some(user), Some(token));
            }
            StoreAction::SetUser(user) => {
                self.session.user = Some(user);
            }
            StoreAction::Logout => {
                self.session = Session::default();
                self.expenses.clear();
            }
            StoreAction::SetExpenses(expenses) => self.expenses = expenses,
            StoreAction::AddExpense(expense) => self.expenses.insert(0, expense),
            StoreAction::UpdateExpense { id, expense } => {
                if let Some(slot) = self.expenses.iter_mut().find(|e| e.id == id) {
                    *slot = expense;
                }
            }
            StoreAction::RemoveExpense(id) => self.expenses.retain(|e| e.id != id),
            StoreAction::SetLoading(loading) => self.loading = loading,
        }
    }
}

impl Reducible for AppStore {
    type Action = StoreAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

pub type StoreHandle = UseReducerHandle<AppStore>;
pub type StoreDispatcher = UseReducerDispatcher<AppStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn expense(id: &str, amount: f64) -> Expense {
        Expense {
            id: id.to_string(),
            name: format!("item {}", id),
            purpose: "Food".to_string(),
            description: String::new(),
            quantity: 1.0,
            price: amount,
            total_amount: amount,
            expense_date: Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap(),
        }
    }

    fn user() -> User {
        User {
            id: "u1".into(),
            username: "asha".into(),
            email: "asha@example.com".into(),
            profile_image: None,
        }
    }

    #[test]
    fn authenticated_iff_token_present() {
        assert!(!Session::default().is_authenticated());
        assert!(!Session::new(Some(user()), Some(String::new())).is_authenticated());
        assert!(Session::new(None, Some("t".into())).is_authenticated());
    }

    #[test]
    fn login_then_logout_clears_everything() {
        let mut store = AppStore::default();
        store.apply(StoreAction::Login { user: user(), token: "t".into() });
        store.apply(StoreAction::SetExpenses(vec![expense("a", 10.0)]));
        assert!(store.session.is_authenticated());
        assert_eq!(store.session.user_id(), Some("u1"));

        store.apply(StoreAction::Logout);
        assert!(!store.session.is_authenticated());
        assert!(store.session.user.is_none());
        assert!(store.expenses.is_empty());
    }

    #[test]
    fn writes_mutate_the_list_locally() {
        let mut store = AppStore::default();
        store.apply(StoreAction::SetExpenses(vec![expense("a", 10.0), expense("b", 20.0)]));

        store.apply(StoreAction::AddExpense(expense("c", 30.0)));
        assert_eq!(store.expenses[0].id, "c");

        store.apply(StoreAction::UpdateExpense { id: "a".into(), expense: expense("a", 99.0) });
        assert_eq!(store.expenses[1].total_amount, 99.0);
        assert_eq!(store.expenses.len(), 3);

        store.apply(StoreAction::RemoveExpense("b".into()));
        let ids: Vec<_> = store.expenses.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn updating_unknown_id_leaves_list_untouched() {
        let mut store = AppStore::default();
        store.apply(StoreAction::SetExpenses(vec![expense("a", 10.0)]));
        let before = store.expenses.clone();
        store.apply(StoreAction::UpdateExpense { id: "zz".into(), expense: expense("zz", 1.0) });
        store.apply(StoreAction::RemoveExpense("zz".into()));
        assert_eq!(store.expenses, before);
    }

    #[test]
    fn reducer_returns_a_new_state() {
        let store = Rc::new(AppStore::default());
        let next = store.clone().reduce(StoreAction::SetLoading(true));
        assert!(!store.loading);
        assert!(next.loading);
    }
}
