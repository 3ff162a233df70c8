use expense_tracker_frontend::app::App;

fn main() {
    tracing_wasm::set_as_global_default();
    tracing::info!("starting expense tracker");
    yew::Renderer::<App>::new().render();
}
