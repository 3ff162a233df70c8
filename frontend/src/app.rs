use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::auth::{AuthMode, AuthScreen};
use crate::components::expense_page::ExpensePage;
use crate::components::home::HomePage;
use crate::components::layout::Layout;
use crate::components::profile::ProfilePage;
use crate::components::toast::Toaster;
use crate::config::AppConfig;
use crate::models::User;
use crate::notify::{Notifications, Notifier, NotifyAction};
use crate::services::Services;
use crate::storage;
use crate::store::{AppStore, StoreHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    Signin,
    Signup,
    Profile,
    Expenses,
}

impl Route {
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Profile | Route::Expenses)
    }

    pub fn is_auth_form(self) -> bool {
        matches!(self, Route::Signin | Route::Signup)
    }

    pub fn resolve(self, authenticated: bool) -> Route {
        if self.is_protected() && !authenticated {
            Route::Signin
        } else if self.is_auth_form() && authenticated {
            Route::Expenses
        } else {
            self
        }
    }

    pub fn redirect(self, authenticated: bool) -> Option<Route> {
        let resolved = self.resolve(authenticated);
        (resolved != self).then_some(resolved)
    }
}

#[derive(Clone, PartialEq)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: StoreHandle,
    pub notifier: Notifier,
    pub route: Route,
    pub navigate: Callback<Route>,
}

impl AppContext {
    pub fn services(&self) -> Services {
        let client = ApiClient::new(self.config.clone(), self.store.session.token.clone());
        Services::new(client, self.store.dispatcher(), self.notifier.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.store.session.user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.session.is_authenticated()
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_reducer(|| AppStore::with_session(storage::load_session()));
    let notifications = use_reducer(Notifications::default);
    let route = use_state(|| Route::Home);

    use_effect_with_deps(
        move |session| {
            tracing::debug!(authenticated = session.is_authenticated(), "session changed");
            storage::save_session(session);
            || ()
        },
        store.session.clone(),
    );

    let authenticated = store.session.is_authenticated();
    let resolved = (*route).resolve(authenticated);

    {
        let route_handle = route.clone();
        use_effect_with_deps(
            move |(requested, authenticated)| {
                if let Some(target) = requested.redirect(*authenticated) {
                    route_handle.set(target);
                }
                || ()
            },
            (*route, authenticated),
        );
    }

    let navigate = {
        let route = route.clone();
        Callback::from(move |next: Route| route.set(next))
    };

    let context = AppContext {
        config: AppConfig::from_env(),
        store,
        notifier: notifications.dispatcher(),
        route: resolved,
        navigate,
    };

    let on_dismiss = {
        let notifier = notifications.dispatcher();
        Callback::from(move |id: u32| notifier.dispatch(NotifyAction::Dismiss(id)))
    };

    let content = match resolved {
        Route::Home => html! { <HomePage /> },
        Route::Signin => html! { <AuthScreen mode={AuthMode::Signin} /> },
        Route::Signup => html! { <AuthScreen mode={AuthMode::Signup} /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::Expenses => html! { <ExpensePage /> },
    };

    html! {
        <ContextProvider<AppContext> context={context}>
            <Layout>
                { content }
            </Layout>
            <Toaster items={notifications.items.clone()} on_dismiss={on_dismiss} />
        </ContextProvider<AppContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guards_redirect_by_session() {
        assert_eq!(Route::Expenses.resolve(false), Route::Signin);
        assert_eq!(Route::Profile.resolve(false), Route::Signin);
        assert_eq!(Route::Signup.resolve(true), Route::Expenses);
        assert_eq!(Route::Signin.resolve(false), Route::Signin);
        assert_eq!(Route::Home.resolve(true), Route::Home);
        assert_eq!(Route::Home.resolve(false), Route::Home);
    }

    #[test]
    fn redirect_only_when_the_route_changes() {
        assert_eq!(Route::Expenses.redirect(false), Some(Route::Signin));
        assert_eq!(Route::Signin.redirect(true), Some(Route::Expenses));
        assert_eq!(Route::Expenses.redirect(true), None);
        assert_eq!(Route::Signin.redirect(false), None);
    }
}
