use std::time::Duration;

use wasm_bindgen_futures::spawn_local;
use yew::platform::time::sleep;
use yew::prelude::*;

use crate::notify::{Notification, NotificationKind};

#[derive(Properties, PartialEq)]
pub struct ToasterProps {
    pub items: Vec<Notification>,
    pub on_dismiss: Callback<u32>,
}

#[function_component(Toaster)]
pub fn toaster(props: &ToasterProps) -> Html {
    html! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 w-80">
            { for props.items.iter().map(|item| html! {
                <Toast key={item.id} notification={item.clone()} on_dismiss={props.on_dismiss.clone()} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    notification: Notification,
    on_dismiss: Callback<u32>,
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let id = props.notification.id;
    let kind = props.notification.kind;

    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |id| {
                let id = *id;
                spawn_local(async move {
                    sleep(Duration::from_millis(kind.duration_ms())).await;
                    on_dismiss.emit(id);
                });
                || ()
            },
            id,
        );
    }

    let class_name = match kind {
        NotificationKind::Success => "bg-white border-l-4 border-green-500",
        NotificationKind::Error => "bg-white border-l-4 border-red-500",
        NotificationKind::Info => "bg-white border-l-4 border-[#173E63]",
    };
    let on_close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_| on_dismiss.emit(id))
    };

    html! {
        <div class={format!("rounded-[10px] shadow-lg px-4 py-3 flex items-start justify-between gap-3 {}", class_name)} role="status">
            <p class="text-sm text-[#173E63]">{ props.notification.message.clone() }</p>
            <button type="button" class="text-slate-400 hover:text-slate-600 text-xs" onclick={on_close}>{"✕"}</button>
        </div>
    }
}
