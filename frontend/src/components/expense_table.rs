use chrono::Local;
use yew::prelude::*;

use super::icons::{icon_edit, icon_trash};
use crate::analytics::{SortColumn, SortState};
use crate::format::{format_amount, format_local_date, format_quantity};
use crate::models::Expense;

#[derive(Properties, PartialEq)]
pub struct ExpenseTableProps {
    pub rows: Vec<Expense>,
    pub sort: SortState,
    pub loading: bool,
    pub empty_message: String,
    pub on_sort: Callback<SortColumn>,
    pub on_edit: Callback<Expense>,
    pub on_delete: Callback<String>,
}

fn header_label(column: SortColumn) -> &'static str {
    match column {
        SortColumn::Price => "Price (₹)",
        SortColumn::TotalAmount => "Total (₹)",
        other => other.label(),
    }
}

#[function_component(ExpenseTable)]
pub fn expense_table(props: &ExpenseTableProps) -> Html {
    if props.loading {
        return html! {
            <div class="p-8 text-center text-muted-foreground">{"Loading expenses..."}</div>
        };
    }
    if props.rows.is_empty() {
        return html! {
            <div class="p-8 text-center text-muted-foreground">{ props.empty_message.clone() }</div>
        };
    }

    let sortable = |column: SortColumn| {
        let on_sort = props.on_sort.clone();
        let header_class = if props.sort.is_active(column) {
            "px-6 py-4 font-bold cursor-pointer select-none text-[#173E63]"
        } else {
            "px-6 py-4 font-bold cursor-pointer select-none"
        };
        html! {
            <th class={header_class} onclick={Callback::from(move |_| on_sort.emit(column))}>
                { header_label(column) }
                <span class="ml-1 text-[12px]">{ props.sort.indicator(column) }</span>
            </th>
        }
    };

    html! {
        <div class="overflow-x-auto">
            <table class="w-full text-left border-collapse">
                <thead>
                    <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                        { sortable(SortColumn::Name) }
                        { sortable(SortColumn::Purpose) }
                        <th class="px-6 py-4 font-bold">{"Description"}</th>
                        { sortable(SortColumn::Quantity) }
                        { sortable(SortColumn::Price) }
                        { sortable(SortColumn::TotalAmount) }
                        { sortable(SortColumn::Date) }
                        <th class="px-6 py-4 font-bold">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-border">
                    { for props.rows.iter().map(|expense| {
                        let on_edit = {
                            let on_edit = props.on_edit.clone();
                            let expense = expense.clone();
                            Callback::from(move |_| on_edit.emit(expense.clone()))
                        };
                        let on_delete = {
                            let on_delete = props.on_delete.clone();
                            let id = expense.id.clone();
                            Callback::from(move |_| on_delete.emit(id.clone()))
                        };
                        html! {
                            <tr key={expense.id.clone()} class="text-sm hover:bg-muted/40 transition-colors">
                                <td class="px-6 py-4 font-semibold text-foreground">{ expense.name.clone() }</td>
                                <td class="px-6 py-4">
                                    <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ expense.purpose.clone() }</span>
                                </td>
                                <td class="px-6 py-4 text-muted-foreground max-w-xs truncate">{ expense.description.clone() }</td>
                                <td class="px-6 py-4">{ format_quantity(expense.quantity) }</td>
                                <td class="px-6 py-4">{ format_amount(expense.price) }</td>
                                <td class="px-6 py-4 font-semibold text-foreground">{ format_amount(expense.total_amount) }</td>
                                <td class="px-6 py-4 text-muted-foreground">{ format_local_date(&expense.expense_date, &Local) }</td>
                                <td class="px-6 py-4">
                                    <div class="flex gap-2">
                                        <button class="p-1 rounded hover:bg-slate-100" title="Edit" onclick={on_edit}>{ icon_edit() }</button>
                                        <button class="p-1 rounded hover:bg-red-50 text-red-500" title="Delete" onclick={on_delete}>{ icon_trash() }</button>
                                    </div>
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}
