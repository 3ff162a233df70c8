use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::bind_input;
use super::icons::{icon_eye, icon_eye_off};
use crate::app::{AppContext, Route};
use crate::models::{SigninRequest, SignupRequest};
use crate::notify;
use crate::validation::{validate_signin, validate_signup};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Signin,
    Signup,
}

#[derive(Properties, PartialEq)]
pub struct AuthScreenProps {
    pub mode: AuthMode,
}

const INPUT_CLASS: &str = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

#[function_component(AuthScreen)]
pub fn auth_screen(props: &AuthScreenProps) -> Html {
    let ctx = use_context::<AppContext>();
    let Some(ctx) = ctx else {
        return html! {};
    };
    let username = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let profile_image = use_state(String::new);
    let show_password = use_state(|| false);
    let loading = use_state(|| false);

    let is_login = props.mode == AuthMode::Signin;

    let on_submit = {
        let ctx = ctx.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let profile_image = profile_image.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let username_val = username.trim().to_string();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();
            let image_val = profile_image.trim().to_string();

            let checked = if is_login {
                validate_signin(&email_val, &password_val)
            } else {
                validate_signup(&username_val, &email_val, &password_val)
            };
            if let Err(err) = checked {
                notify::error(&ctx.notifier, err.to_string());
                return;
            }

            loading.set(true);
            let services = ctx.services();
            let navigate = ctx.navigate.clone();
            let loading = loading.clone();
            let password = password.clone();
            spawn_local(async move {
                let result = if is_login {
                    services
                        .signin(SigninRequest {
                            useremail: email_val,
                            userpassword: password_val,
                        })
                        .await
                } else {
                    services
                        .signup(SignupRequest {
                            username: username_val,
                            useremail: email_val,
                            userpassword: password_val,
                            profile_image: (!image_val.is_empty()).then_some(image_val),
                        })
                        .await
                };
                loading.set(false);
                match result {
                    Ok(user) => {
                        tracing::info!(user = %user.id, "signed in");
                        navigate.emit(Route::Expenses);
                    }
                    Err(_) => password.set(String::new()),
                }
            });
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_| show_password.set(!*show_password))
    };

    let switch_mode = {
        let navigate = ctx.navigate.clone();
        Callback::from(move |_| {
            navigate.emit(if is_login { Route::Signup } else { Route::Signin })
        })
    };

    html! {
        <div class="min-h-[80vh] flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{ if is_login { "Welcome Back" } else { "Create Account" } }</h1>
                    <p class="text-sm text-muted-foreground mt-2">
                        { if is_login { "Sign in to manage your expenses." } else { "Start tracking your expenses today." } }
                    </p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    if !is_login {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Username *"}</label>
                            <input type="text" class={INPUT_CLASS} placeholder="Enter your username" value={(*username).clone()} oninput={bind_input(&username)} />
                        </div>
                    }
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email *"}</label>
                        <input type="email" class={INPUT_CLASS} placeholder="Enter your email" value={(*email).clone()} oninput={bind_input(&email)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password *"}</label>
                        <div class="relative">
                            <input
                                type={if *show_password { "text" } else { "password" }}
                                class={INPUT_CLASS}
                                placeholder="Enter your password"
                                value={(*password).clone()}
                                oninput={bind_input(&password)}
                            />
                            <button type="button" class="absolute right-3 top-2 text-muted-foreground" onclick={toggle_password}>
                                { if *show_password { icon_eye_off() } else { icon_eye() } }
                            </button>
                        </div>
                    </div>
                    if !is_login {
                        <div class="space-y-1">
                            <label class="text-sm font-medium text-foreground">{"Profile Image URL"}</label>
                            <input type="url" class={INPUT_CLASS} placeholder="https://..." value={(*profile_image).clone()} oninput={bind_input(&profile_image)} />
                        </div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else if is_login { "Sign In" } else { "Sign Up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    { if is_login { "Don't have an account?" } else { "Already have an account?" } }
                    <button class="ml-2 text-primary font-semibold" onclick={switch_mode}>
                        { if is_login { "Sign Up" } else { "Sign In" } }
                    </button>
                </div>
            </div>
        </div>
    }
}
