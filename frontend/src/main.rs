use crate::app::App;

mod api;
mod app;
mod components;
mod logger;
mod session;
mod tops_sheet;

fn main() {
    logger::init();
    yew::Renderer::<App>::new().render();
}
