use yew::prelude::*;

use super::icons::{icon_bar_chart, icon_file, icon_wallet};
use crate::app::{AppContext, Route};

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let ctx = use_context::<AppContext>();
    let Some(ctx) = ctx else {
        return html! {};
    };

    let go = |route: Route| {
        let navigate = ctx.navigate.clone();
        Callback::from(move |_| navigate.emit(route))
    };

    let features = [
        (icon_wallet as fn() -> Html, "Track Spending", "Record every expense with its purpose, quantity and price."),
        (icon_bar_chart, "See Patterns", "Break expenses down by year, month, day or any date range."),
        (icon_file, "Export Reports", "Download the filtered, sorted table as a PDF report."),
    ];

    html! {
        <div class="p-6 max-w-5xl mx-auto">
            <section class="text-center py-16">
                <h1 class="text-4xl font-black text-[#173E63] tracking-tight">{"Take Control of Your Expenses"}</h1>
                <p class="text-muted-foreground mt-4">
                    {"A simple way to record, analyze and report where your money goes."}
                </p>
                <div class="flex justify-center gap-3 mt-8">
                    if ctx.is_authenticated() {
                        <button class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] font-bold" onclick={go(Route::Expenses)}>
                            {"Go to Expenses"}
                        </button>
                    } else {
                        <>
                            <button class="bg-[#173E63] text-white px-6 py-2 rounded-[10px] font-bold" onclick={go(Route::Signup)}>
                                {"Get Started"}
                            </button>
                            <button class="bg-[#B2CBDE] text-[#173E63] px-6 py-2 rounded-[10px] font-bold" onclick={go(Route::Signin)}>
                                {"Sign In"}
                            </button>
                        </>
                    }
                </div>
            </section>
            <section class="grid grid-cols-1 md:grid-cols-3 gap-6">
                { for features.iter().map(|(icon, title, text)| html! {
                    <div class="bg-card p-6 rounded-[10px] shadow-sm border border-border">
                        <div class="p-3 bg-[#eef4f9] rounded-[10px] inline-flex text-[#173E63]">{ icon() }</div>
                        <h3 class="text-lg font-bold text-[#1D617A] mt-3">{ *title }</h3>
                        <p class="text-sm text-muted-foreground mt-1">{ *text }</p>
                    </div>
                }) }
            </section>
        </div>
    }
}
