use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::icons::{icon_eye, icon_eye_off, icon_user};
use super::layout::page_shell;
use super::bind_input;
use crate::app::AppContext;
use crate::models::ProfileUpdate;
use crate::notify;
use crate::validation::validate_profile_update;

const INPUT_CLASS: &str = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none";

#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let ctx = use_context::<AppContext>();
    let Some(ctx) = ctx else {
        return html! {};
    };
    let current = ctx.user();
    let username = use_state(|| current.as_ref().map(|u| u.username.clone()).unwrap_or_default());
    let email = use_state(|| current.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let password = use_state(String::new);
    let profile_image = use_state(|| {
        current
            .as_ref()
            .and_then(|u| u.profile_image.clone())
            .unwrap_or_default()
    });
    let show_password = use_state(|| false);
    let saving = use_state(|| false);

    let user_id = current.as_ref().map(|u| u.id.clone());

    {
        let ctx = ctx.clone();
        let username = username.clone();
        let email = email.clone();
        let profile_image = profile_image.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if let Some(user_id) = user_id.clone() {
                    let services = ctx.services();
                    spawn_local(async move {
                        if let Ok(user) = services.get_profile(&user_id).await {
                            username.set(user.username);
                            email.set(user.email);
                            profile_image.set(user.profile_image.unwrap_or_default());
                        }
                    });
                }
                || ()
            },
            user_id.clone(),
        );
    }

    let on_submit = {
        let ctx = ctx.clone();
        let username = username.clone();
        let email = email.clone();
        let password = password.clone();
        let profile_image = profile_image.clone();
        let saving = saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(user_id) = user_id.clone() else {
                return;
            };
            if let Err(err) = validate_profile_update(&username, &email, &password) {
                notify::error(&ctx.notifier, err.to_string());
                return;
            }
            let update = ProfileUpdate::from_form(&username, &email, &password, &profile_image);
            if update == ProfileUpdate::default() {
                notify::info(&ctx.notifier, "Nothing to update.");
                return;
            }

            saving.set(true);
            let services = ctx.services();
            let password = password.clone();
            let saving = saving.clone();
            spawn_local(async move {
                if services.update_profile(&user_id, &update).await.is_ok() {
                    password.set(String::new());
                }
                saving.set(false);
            });
        })
    };

    let toggle_password = {
        let show_password = show_password.clone();
        Callback::from(move |_| show_password.set(!*show_password))
    };

    html! {
        { page_shell(
            "Profile Settings",
            html! {},
            html! {
                <div class="max-w-xl mx-auto bg-white p-6 rounded-[10px] shadow-sm border border-border">
                    <div class="flex flex-col items-center mb-6">
                        <div class="w-20 h-20 rounded-full bg-[#eef4f9] flex items-center justify-center overflow-hidden text-[#173E63]">
                            if profile_image.is_empty() {
                                { icon_user() }
                            } else {
                                <img src={(*profile_image).clone()} alt="Profile" class="w-full h-full object-cover" />
                            }
                        </div>
                        <p class="text-sm text-muted-foreground mt-3">{"Update your profile information"}</p>
                    </div>
                    <form class="space-y-4" onsubmit={on_submit}>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Username"}</label>
                            <input type="text" class={INPUT_CLASS} placeholder="Enter your username" value={(*username).clone()} oninput={bind_input(&username)} />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Email"}</label>
                            <input type="email" class={INPUT_CLASS} placeholder="Enter your email" value={(*email).clone()} oninput={bind_input(&email)} />
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"New Password (Optional)"}</label>
                            <div class="relative">
                                <input
                                    type={if *show_password { "text" } else { "password" }}
                                    class={INPUT_CLASS}
                                    placeholder="Enter new password (leave blank to keep current)"
                                    value={(*password).clone()}
                                    oninput={bind_input(&password)}
                                />
                                <button
                                    type="button"
                                    class="absolute right-3 top-2 text-muted-foreground"
                                    aria-label={if *show_password { "Hide password" } else { "Show password" }}
                                    onclick={toggle_password}
                                >
                                    { if *show_password { icon_eye_off() } else { icon_eye() } }
                                </button>
                            </div>
                        </div>
                        <div class="space-y-1">
                            <label class="text-[12px] font-bold text-muted-foreground">{"Profile Image URL"}</label>
                            <input type="url" class={INPUT_CLASS} placeholder="https://example.com/image.jpg" value={(*profile_image).clone()} oninput={bind_input(&profile_image)} />
                        </div>
                        <button type="submit" class="w-full bg-[#173E63] text-white py-2 rounded-[10px] text-[12px] font-bold" disabled={*saving}>
                            { if *saving { "Saving..." } else { "Save Changes" } }
                        </button>
                    </form>
                </div>
            }
        ) }
    }
}
