//! Operations behind every user action.
//!
//! Each call talks to the backend through [`ApiClient`], updates the store on
//! success and turns any failure into exactly one notification before
//! handing the error back to the caller.

use crate::api::{paths, ApiClient};
use crate::error::{ApiError, Operation};
use crate::models::{
    AuthResponse, Expense, ExpensePayload, ProfileResponse, ProfileUpdate, SigninRequest,
    SignupRequest, User,
};
use crate::notify::{self, NotificationKind, Notifier, NotifyAction};
use crate::store::{StoreAction, StoreDispatcher};

pub const SIGNED_OUT: &str = "Signed out successfully!";

#[derive(Clone, PartialEq)]
pub struct Services {
    client: ApiClient,
    store: StoreDispatcher,
    notifier: Notifier,
}

impl Services {
    pub fn new(client: ApiClient, store: StoreDispatcher, notifier: Notifier) -> Self {
        Self {
            client,
            store,
            notifier,
        }
    }

    fn fail(&self, operation: Operation, err: ApiError) -> ApiError {
        tracing::warn!(?operation, error = %err, "operation failed");
        notify::error(&self.notifier, err.user_message(operation));
        if err.is_unauthorized() && operation != Operation::Signin {
            tracing::info!("session rejected by server, signing out");
            self.store.dispatch(StoreAction::Logout);
        }
        err
    }

    fn login(&self, response: AuthResponse) -> User {
        let (user, token) = response.into_session();
        self.store.dispatch(StoreAction::Login {
            user: user.clone(),
            token,
        });
        user
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<User, ApiError> {
        match self.client.post::<_, AuthResponse>(&paths::signup(), &request).await {
            Ok(response) => {
                let user = self.login(response);
                notify::success(&self.notifier, "Account created successfully!");
                Ok(user)
            }
            Err(err) => Err(self.fail(Operation::Signup, err)),
        }
    }

    pub async fn signin(&self, request: SigninRequest) -> Result<User, ApiError> {
        match self.client.post::<_, AuthResponse>(&paths::signin(), &request).await {
            Ok(response) => {
                let user = self.login(response);
                notify::success(&self.notifier, "Welcome back!");
                Ok(user)
            }
            Err(err) => Err(self.fail(Operation::Signin, err)),
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<User, ApiError> {
        match self.client.get::<ProfileResponse>(&paths::profile(user_id)).await {
            Ok(profile) => {
                let user = profile.into_user();
                self.store.dispatch(StoreAction::SetUser(user.clone()));
                Ok(user)
            }
            Err(err) => Err(self.fail(Operation::GetProfile, err)),
        }
    }

    pub async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        let result = self
            .client
            .patch::<_, ProfileResponse>(&paths::update_profile(user_id), update)
            .await;
        match result {
            Ok(profile) => {
                let user = profile.into_user();
                self.store.dispatch(StoreAction::SetUser(user.clone()));
                notify::success(&self.notifier, "Profile updated successfully!");
                Ok(user)
            }
            Err(err) => Err(self.fail(Operation::UpdateProfile, err)),
        }
    }

    pub async fn signout(&self, user_id: Option<&str>) {
        let result = match user_id {
            Some(id) => self.client.post_empty(&paths::signout(id)).await,
            None => Ok(()),
        };
        self.store.dispatch(StoreAction::Logout);
        let (kind, message) = signout_notice(&result);
        self.notifier.dispatch(NotifyAction::Push(kind, message));
    }

    pub async fn create_expense(&self, user_id: &str, payload: &ExpensePayload) -> Result<Expense, ApiError> {
        let result = self
            .client
            .post::<_, Expense>(&paths::create_expense(user_id), payload)
            .await;
        match result {
            Ok(expense) => {
                self.store.dispatch(StoreAction::AddExpense(expense.clone()));
                notify::success(&self.notifier, "Expense created successfully!");
                Ok(expense)
            }
            Err(err) => Err(self.fail(Operation::CreateExpense, err)),
        }
    }

    pub async fn read_expenses(&self, user_id: &str) -> Result<Vec<Expense>, ApiError> {
        self.store.dispatch(StoreAction::SetLoading(true));
        let result = self
            .client
            .get::<Vec<Expense>>(&paths::read_expenses(user_id))
            .await;
        self.store.dispatch(StoreAction::SetLoading(false));
        match result {
            Ok(expenses) => {
                tracing::debug!(count = expenses.len(), "expenses loaded");
                self.store.dispatch(StoreAction::SetExpenses(expenses.clone()));
                Ok(expenses)
            }
            Err(err) => Err(self.fail(Operation::ReadExpenses, err)),
        }
    }

    pub async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        payload: &ExpensePayload,
    ) -> Result<Expense, ApiError> {
        let result = self
            .client
            .patch::<_, Expense>(&paths::update_expense(user_id, expense_id), payload)
            .await;
        match result {
            Ok(expense) => {
                self.store.dispatch(StoreAction::UpdateExpense {
                    id: expense_id.to_string(),
                    expense: expense.clone(),
                });
                notify::success(&self.notifier, "Expense updated successfully!");
                Ok(expense)
            }
            Err(err) => Err(self.fail(Operation::UpdateExpense, err)),
        }
    }

    pub async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<(), ApiError> {
        match self.client.delete(&paths::delete_expense(user_id, expense_id)).await {
            Ok(()) => {
                self.store.dispatch(StoreAction::RemoveExpense(expense_id.to_string()));
                notify::success(&self.notifier, "Expense deleted successfully!");
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::DeleteExpense, err)),
        }
    }
}

pub fn signout_notice(result: &Result<(), ApiError>) -> (NotificationKind, String) {
    if let Err(err) = result {
        tracing::warn!(error = %err, unauthorized = err.is_unauthorized(), "remote signout failed");
    }
    (NotificationKind::Success, SIGNED_OUT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signout_always_reads_as_signed_out() {
        let signed_out = (NotificationKind::Success, SIGNED_OUT.to_string());
        assert_eq!(signout_notice(&Ok(())), signed_out);
        assert_eq!(signout_notice(&Err(ApiError::from_status(401, "Token expired"))), signed_out);
        assert_eq!(signout_notice(&Err(ApiError::from_status(500, ""))), signed_out);
        assert_eq!(signout_notice(&Err(ApiError::Network("offline".into()))), signed_out);
    }
}
