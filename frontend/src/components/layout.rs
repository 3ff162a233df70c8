use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::icons::{icon_log_out, icon_user, icon_wallet};
use crate::app::{AppContext, Route};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="min-h-screen flex flex-col bg-background">
            <Header />
            <main class="flex-1">
                { for props.children.iter() }
            </main>
            <Footer />
        </div>
    }
}

struct NavItem {
    label: &'static str,
    route: Route,
}

#[function_component(Header)]
fn header() -> Html {
    let ctx = use_context::<AppContext>();
    let Some(ctx) = ctx else {
        return html! {};
    };
    let signing_out = use_state(|| false);

    let nav_items = if ctx.is_authenticated() {
        vec![
            NavItem { label: "Home", route: Route::Home },
            NavItem { label: "Expenses", route: Route::Expenses },
            NavItem { label: "Profile", route: Route::Profile },
        ]
    } else {
        vec![
            NavItem { label: "Home", route: Route::Home },
            NavItem { label: "Sign In", route: Route::Signin },
            NavItem { label: "Sign Up", route: Route::Signup },
        ]
    };

    let on_signout = {
        let ctx = ctx.clone();
        let signing_out = signing_out.clone();
        Callback::from(move |_| {
            let services = ctx.services();
            let user_id = ctx.user().map(|u| u.id);
            let navigate = ctx.navigate.clone();
            let signing_out = signing_out.clone();
            signing_out.set(true);
            spawn_local(async move {
                services.signout(user_id.as_deref()).await;
                signing_out.set(false);
                navigate.emit(Route::Home);
            });
        })
    };

    let brand_click = {
        let navigate = ctx.navigate.clone();
        Callback::from(move |_| navigate.emit(Route::Home))
    };

    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <button type="button" class="flex items-center gap-2 text-[#173E63]" onclick={brand_click}>
                { icon_wallet() }
                <span class="text-xl font-black tracking-tight">{"Expense Tracker"}</span>
            </button>
            <nav class="flex items-center gap-2">
                { for nav_items.iter().map(|item| {
                    let class_name = if item.route == ctx.route {
                        "px-4 py-2 rounded-xl text-[13px] font-medium bg-[#173E63] text-white"
                    } else {
                        "px-4 py-2 rounded-xl text-[13px] font-medium text-[#173E63] hover:bg-white/50"
                    };
                    let navigate = ctx.navigate.clone();
                    let route = item.route;
                    html! {
                        <button type="button" class={class_name} onclick={Callback::from(move |_| navigate.emit(route))}>
                            { item.label }
                        </button>
                    }
                }) }
                if let Some(user) = ctx.user() {
                    <span class="hidden md:flex items-center gap-1 px-3 text-[12px] text-slate-600">
                        { icon_user() }
                        { user.username }
                    </span>
                }
                if ctx.is_authenticated() {
                    <button onclick={on_signout} disabled={*signing_out} class="flex items-center gap-2 px-4 py-2 rounded-xl hover:bg-white/50 text-[13px] font-medium text-[#173E63]">
                        { icon_log_out() }
                        <span>{ if *signing_out { "Signing out..." } else { "Sign Out" } }</span>
                    </button>
                }
            </nav>
        </header>
    }
}

#[function_component(Footer)]
fn footer() -> Html {
    html! {
        <footer class="border-t border-border py-4 text-center text-[12px] text-muted-foreground">
            {"Expense Tracker. Keep every rupee accounted for."}
        </footer>
    }
}

pub fn page_shell(title: &str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title.to_string() }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}
