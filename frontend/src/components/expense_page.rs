use chrono::{Local, Utc};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::charts::{BarChart, PieChart};
use super::expense_table::ExpenseTable;
use super::icons::{icon_bar_chart, icon_close, icon_file, icon_pie_chart, icon_plus};
use super::layout::page_shell;
use super::{bind_input, bind_textarea, select_value};
use crate::analytics::{
    available_days, available_months, available_years, build_view, purpose_breakdown,
    summary_heading, BarClick, FilterMode, FilterState, SortColumn, SortState,
};
use crate::app::AppContext;
use crate::format::{date_input_value, format_amount, month_name, parse_date_input};
use crate::models::Expense;
use crate::notify;
use crate::pdf;
use crate::services::Services;
use crate::validation::ExpenseForm;

const INPUT_CLASS: &str = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[12px] text-[#173E63] border-none";
const SELECT_CLASS: &str = "bg-[#f1f4f9] border-2 border-transparent rounded-[10px] px-3 py-2 text-[12px] focus:ring-2 focus:ring-[#1D617A] outline-none";
const DELETE_PROMPT: &str = "Are you sure you want to delete this expense?";

fn reload(services: Services, user_id: String) {
    spawn_local(async move {
        let _ = services.read_expenses(&user_id).await;
    });
}

fn confirm_delete() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(DELETE_PROMPT).ok())
        .unwrap_or(false)
}

#[derive(Clone, Debug, PartialEq)]
enum Editor {
    Closed,
    Adding,
    Editing(Expense),
}

#[function_component(ExpensePage)]
pub fn expense_page() -> Html {
    let ctx = use_context::<AppContext>();
    let Some(ctx) = ctx else {
        return html! {};
    };
    let editor = use_state(|| Editor::Closed);
    let show_charts = use_state(|| true);
    let filter = use_state(FilterState::default);
    let sort = use_state(SortState::default);

    let user = ctx.user();
    let user_id = user.as_ref().map(|u| u.id.clone());

    {
        let ctx = ctx.clone();
        use_effect_with_deps(
            move |user_id: &Option<String>| {
                if let Some(user_id) = user_id.clone() {
                    reload(ctx.services(), user_id);
                }
                || ()
            },
            user_id.clone(),
        );
    }

    let expenses = &ctx.store.expenses;
    let view = build_view(expenses, &filter, &sort, &Local);

    let update_filter = {
        let filter = filter.clone();
        Callback::from(move |next: FilterState| filter.set(next))
    };

    let on_sort = {
        let sort = sort.clone();
        Callback::from(move |column: SortColumn| sort.set((*sort).clicked(column)))
    };

    let on_bar = {
        let filter = filter.clone();
        let chart = view.chart.clone();
        Callback::from(move |(label_index, dataset_index): (usize, usize)| {
            let mut next = (*filter).clone();
            match chart.click(label_index, dataset_index) {
                Some(BarClick::Key(key)) => next.select_key(key),
                Some(BarClick::Ids(ids)) => next.select_ids(ids),
                None => return,
            }
            filter.set(next);
        })
    };

    let on_clear_refinement = {
        let filter = filter.clone();
        Callback::from(move |_| {
            let mut next = (*filter).clone();
            next.clear_refinement();
            filter.set(next);
        })
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |expense: Expense| editor.set(Editor::Editing(expense)))
    };

    let on_delete = {
        let ctx = ctx.clone();
        let user_id = user_id.clone();
        Callback::from(move |expense_id: String| {
            let Some(user_id) = user_id.clone() else {
                return;
            };
            if !confirm_delete() {
                return;
            }
            let services = ctx.services();
            spawn_local(async move {
                if services.delete_expense(&user_id, &expense_id).await.is_ok() {
                    let _ = services.read_expenses(&user_id).await;
                }
            });
        })
    };

    let toggle_form = {
        let editor = editor.clone();
        Callback::from(move |_| {
            editor.set(match *editor {
                Editor::Closed => Editor::Adding,
                _ => Editor::Closed,
            })
        })
    };

    let close_form = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::Closed))
    };

    let toggle_charts = {
        let show_charts = show_charts.clone();
        Callback::from(move |_| show_charts.set(!*show_charts))
    };

    let on_export = {
        let ctx = ctx.clone();
        let rows = view.rows.clone();
        let filter = (*filter).clone();
        let sort = *sort;
        let user = user.clone();
        Callback::from(move |_| {
            let result = pdf::build_report(
                &rows,
                user.as_ref(),
                &filter,
                &sort,
                Local::now().naive_local(),
                &Local,
            )
            .and_then(|bytes| {
                pdf::download(&bytes, &pdf::report_filename(Utc::now().timestamp_millis()))
            });
            match result {
                Ok(()) => notify::success(&ctx.notifier, "PDF generated successfully!"),
                Err(err) => {
                    tracing::error!(error = %err, "pdf export failed");
                    notify::error(&ctx.notifier, "Failed to generate PDF");
                }
            }
        })
    };

    let form_open = *editor != Editor::Closed;
    let actions = html! {
        <div class="flex items-center gap-3">
            if !expenses.is_empty() {
                <button
                    class="flex items-center gap-2 border border-border px-4 py-2 rounded-[10px] text-[12px] font-bold text-[#173E63]"
                    onclick={on_export}
                >
                    { icon_file() }
                    {"Generate PDF"}
                </button>
            }
            <button class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold" onclick={toggle_form}>
                { icon_plus() }
                { if form_open { "Cancel" } else { "Add Expense" } }
            </button>
        </div>
    };

    let form_panel = match &*editor {
        Editor::Closed => html! {},
        Editor::Adding => html! {
            <ExpenseFormPanel key="new" editing={None::<Expense>} on_close={close_form} />
        },
        Editor::Editing(expense) => html! {
            <ExpenseFormPanel key={expense.id.clone()} editing={Some(expense.clone())} on_close={close_form} />
        },
    };

    let empty_message = match &filter.selected_key {
        Some(key) => format!("No expenses found for {}.", key),
        None if expenses.is_empty() => {
            "No expenses yet. Add your first expense to get started!".to_string()
        }
        None => "No expenses match the current filters.".to_string(),
    };

    let welcome = user
        .as_ref()
        .map(|u| format!("Welcome, {}!", u.username))
        .unwrap_or_default();

    html! {
        { page_shell(
            "Expense Management",
            actions,
            html! {
                <>
                    <p class="text-sm text-muted-foreground">{ welcome }</p>
                    { form_panel }

                    <FilterPanel filter={(*filter).clone()} expenses={expenses.clone()} on_change={update_filter} />

                    <div class="flex justify-end">
                        <button class="flex items-center gap-2 text-[12px] font-bold text-[#173E63]" onclick={toggle_charts}>
                            { icon_bar_chart() }
                            { if *show_charts { "Hide Charts" } else { "Show Charts" } }
                        </button>
                    </div>

                    if *show_charts {
                        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                            <div class="lg:col-span-2 bg-white p-5 rounded-[10px] shadow-sm border border-border">
                                <h3 class="text-[13px] font-bold text-[#173E63] mb-3">{"Expenses Over Time"}</h3>
                                if view.chart.is_empty() {
                                    <p class="text-sm text-muted-foreground py-10 text-center">{"No expense data for the selected filters."}</p>
                                } else {
                                    <BarChart data={view.chart.clone()} on_select={on_bar} />
                                }
                            </div>
                            <div class="bg-white p-5 rounded-[10px] shadow-sm border border-border">
                                <h3 class="flex items-center gap-2 text-[13px] font-bold text-[#173E63] mb-3">
                                    { icon_pie_chart() }
                                    {"By Purpose"}
                                </h3>
                                <PieChart slices={purpose_breakdown(expenses)} />
                            </div>
                        </div>
                    }

                    <div class="bg-white p-5 rounded-[10px] shadow-sm border border-border flex items-center justify-between">
                        <div>
                            <h3 class="text-[13px] font-bold text-[#173E63]">{ summary_heading(&filter) }</h3>
                            <p class="text-2xl font-bold text-foreground mt-1">{ format_amount(view.total) }</p>
                            <p class="text-[12px] text-muted-foreground">{ format!("{} expense(s)", view.rows.len()) }</p>
                            if filter.has_refinement() {
                                <p class="text-[11px] text-[#1D617A] mt-1">{"Showing expenses from the selected chart bar."}</p>
                            }
                        </div>
                        if filter.has_refinement() || filter.show_range_table {
                            <button class="p-2 rounded-full hover:bg-slate-100 text-muted-foreground" title="Clear selection" onclick={on_clear_refinement}>
                                { icon_close() }
                            </button>
                        }
                    </div>

                    <div class="bg-white rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <ExpenseTable
                            rows={view.rows.clone()}
                            sort={*sort}
                            loading={ctx.store.loading}
                            empty_message={empty_message}
                            on_sort={on_sort}
                            on_edit={on_edit}
                            on_delete={on_delete}
                        />
                    </div>
                </>
            }
        ) }
    }
}

#[derive(Properties, PartialEq)]
struct ExpenseFormPanelProps {
    editing: Option<Expense>,
    on_close: Callback<()>,
}

#[function_component(ExpenseFormPanel)]
fn expense_form_panel(props: &ExpenseFormPanelProps) -> Html {
    let ctx = use_context::<AppContext>();
    let Some(ctx) = ctx else {
        return html! {};
    };
    let initial = match &props.editing {
        Some(expense) => ExpenseForm::from_expense(expense, &Local),
        None => ExpenseForm::empty(Local::now().date_naive()),
    };
    let name = use_state(|| initial.name.clone());
    let purpose = use_state(|| initial.purpose.clone());
    let description = use_state(|| initial.description.clone());
    let quantity = use_state(|| initial.quantity.clone());
    let price = use_state(|| initial.price.clone());
    let date = use_state(|| initial.date.clone());
    let saving = use_state(|| false);

    let editing_id = props.editing.as_ref().map(|e| e.id.clone());

    let on_submit = {
        let ctx = ctx.clone();
        let on_close = props.on_close.clone();
        let editing_id = editing_id.clone();
        let (name, purpose, description) = (name.clone(), purpose.clone(), description.clone());
        let (quantity, price, date) = (quantity.clone(), price.clone(), date.clone());
        let saving = saving.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(user_id) = ctx.user().map(|u| u.id) else {
                return;
            };
            let form = ExpenseForm {
                name: (*name).clone(),
                purpose: (*purpose).clone(),
                description: (*description).clone(),
                quantity: (*quantity).clone(),
                price: (*price).clone(),
                date: (*date).clone(),
            };
            let payload = match form.to_payload(&Local) {
                Ok(payload) => payload,
                Err(err) => {
                    notify::error(&ctx.notifier, err.to_string());
                    return;
                }
            };

            saving.set(true);
            let services = ctx.services();
            let on_close = on_close.clone();
            let editing_id = editing_id.clone();
            let saving = saving.clone();
            spawn_local(async move {
                let result = match &editing_id {
                    Some(id) => services.update_expense(&user_id, id, &payload).await.map(|_| ()),
                    None => services.create_expense(&user_id, &payload).await.map(|_| ()),
                };
                saving.set(false);
                if result.is_ok() {
                    on_close.emit(());
                    let _ = services.read_expenses(&user_id).await;
                }
            });
        })
    };

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    let is_edit = editing_id.is_some();

    html! {
        <div class="bg-white p-5 rounded-[10px] shadow-sm border border-border">
            <h3 class="text-[14px] font-bold text-[#173E63] mb-4">{ if is_edit { "Edit Expense" } else { "Add New Expense" } }</h3>
            <form class="space-y-4" onsubmit={on_submit}>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Name *"}</label>
                        <input type="text" class={INPUT_CLASS} placeholder="e.g. Groceries" value={(*name).clone()} oninput={bind_input(&name)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Purpose *"}</label>
                        <input type="text" class={INPUT_CLASS} placeholder="e.g. Food" value={(*purpose).clone()} oninput={bind_input(&purpose)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Quantity *"}</label>
                        <input type="number" min="0" step="any" class={INPUT_CLASS} value={(*quantity).clone()} oninput={bind_input(&quantity)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Price (₹) *"}</label>
                        <input type="number" min="0" step="0.01" class={INPUT_CLASS} value={(*price).clone()} oninput={bind_input(&price)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Date *"}</label>
                        <input type="date" class={INPUT_CLASS} value={(*date).clone()} oninput={bind_input(&date)} />
                    </div>
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground">{"Description *"}</label>
                    <textarea rows="3" class={INPUT_CLASS} placeholder="What was this for?" value={(*description).clone()} oninput={bind_textarea(&description)} />
                </div>
                <div class="flex gap-3">
                    <button type="submit" class="flex-1 bg-[#173E63] text-white py-2 rounded-[10px] text-[12px] font-bold" disabled={*saving}>
                        { match (*saving, is_edit) {
                            (true, _) => "Saving...",
                            (false, true) => "Update Expense",
                            (false, false) => "Add Expense",
                        } }
                    </button>
                    <button type="button" class="flex-1 border border-border py-2 rounded-[10px] text-[12px] font-bold text-muted-foreground" onclick={on_cancel}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FilterPanelProps {
    filter: FilterState,
    expenses: Vec<Expense>,
    on_change: Callback<FilterState>,
}

fn filter_update(props: &FilterPanelProps, apply: fn(&mut FilterState, &str)) -> Callback<String> {
    let current = props.filter.clone();
    let on_change = props.on_change.clone();
    Callback::from(move |value: String| {
        let mut next = current.clone();
        apply(&mut next, &value);
        on_change.emit(next);
    })
}

#[function_component(FilterPanel)]
fn filter_panel(props: &FilterPanelProps) -> Html {
    let filter = &props.filter;

    let on_mode = select_value(filter_update(props, |f, v| f.set_mode(FilterMode::from_value(v))));
    let on_year = select_value(filter_update(props, |f, v| f.set_year(v.parse().ok())));
    let on_month = select_value(filter_update(props, |f, v| f.set_month(v.parse().ok())));
    let on_day = select_value(filter_update(props, |f, v| f.set_day(v.parse().ok())));
    let on_from = {
        let cb = filter_update(props, |f, v| f.set_range_from(parse_date_input(v)));
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    let on_to = {
        let cb = filter_update(props, |f, v| f.set_range_to(parse_date_input(v)));
        Callback::from(move |e: Event| {
            let input: web_sys::HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };
    let on_show_table = {
        let cb = filter_update(props, |f, _| f.show_range_table());
        Callback::from(move |_| cb.emit(String::new()))
    };
    let on_clear = {
        let cb = filter_update(props, |f, _| f.clear());
        Callback::from(move |_| cb.emit(String::new()))
    };

    let years = available_years(&props.expenses, &Local);
    let months = available_months(&props.expenses, filter.year, &Local);
    let days = available_days(&props.expenses, filter.year, filter.month, &Local);
    let date_value = |date: Option<chrono::NaiveDate>| date.map(date_input_value).unwrap_or_default();

    html! {
        <div class="bg-white p-5 rounded-[10px] shadow-sm border border-border flex flex-wrap items-end gap-4">
            <div class="space-y-1">
                <label class="text-[12px] font-bold text-muted-foreground block">{"Filter Type"}</label>
                <select class={SELECT_CLASS} onchange={on_mode}>
                    { for FilterMode::ALL.iter().map(|mode| html! {
                        <option value={mode.as_str()} selected={*mode == filter.mode}>{ mode.label() }</option>
                    }) }
                </select>
            </div>

            if filter.mode == FilterMode::DateRange {
                <>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground block">{"From"}</label>
                    <input type="date" class={SELECT_CLASS} value={date_value(filter.range_from)} onchange={on_from} />
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground block">{"To"}</label>
                    <input type="date" class={SELECT_CLASS} value={date_value(filter.range_to)} onchange={on_to} />
                </div>
                <button
                    class="bg-[#1D617A] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold disabled:opacity-50"
                    disabled={!filter.has_range()}
                    onclick={on_show_table}
                >
                    {"Show Table"}
                </button>
                </>
            }

            if filter.mode == FilterMode::YearMonthDay {
                <>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground block">{"Year"}</label>
                    <select class={SELECT_CLASS} onchange={on_year}>
                        <option value="" selected={filter.year.is_none()}>{"All Years"}</option>
                        { for years.iter().map(|y| html! {
                            <option value={y.to_string()} selected={filter.year == Some(*y)}>{ y.to_string() }</option>
                        }) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground block">{"Month"}</label>
                    <select class={SELECT_CLASS} onchange={on_month} disabled={filter.year.is_none()}>
                        <option value="" selected={filter.month.is_none()}>{"All Months"}</option>
                        { for months.iter().map(|m| html! {
                            <option value={m.to_string()} selected={filter.month == Some(*m)}>{ month_name(*m) }</option>
                        }) }
                    </select>
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground block">{"Day"}</label>
                    <select class={SELECT_CLASS} onchange={on_day} disabled={filter.month.is_none()}>
                        <option value="" selected={filter.day.is_none()}>{"All Days"}</option>
                        { for days.iter().map(|d| html! {
                            <option value={d.to_string()} selected={filter.day == Some(*d)}>{ d.to_string() }</option>
                        }) }
                    </select>
                </div>
                </>
            }

            if filter.mode != FilterMode::None {
                <button class="border border-border px-4 py-2 rounded-[10px] text-[12px] font-bold text-muted-foreground" onclick={on_clear}>
                    {"Clear Filters"}
                </button>
            }
        </div>
    }
}
