use gloo_timers::future::TimeoutFuture;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::{html, Component, Context, Html, NodeRef, Properties};

const SHOW_CLASS: &str = "show";

/// Sliding sheet anchored to the top of the viewport, toggled with
/// [`open_top_sheet`] and [`close_top_sheet`].
pub struct YwMaterialTopSheet {
    pub id: String,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for YwMaterialTopSheet {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("id-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

/// Shows the sheet after a short delay so the CSS transition runs.
pub fn open_top_sheet(top_sheet_ref: NodeRef) {
    spawn_local(async move {
        TimeoutFuture::new(50).await;
        if let Some(sheet) = top_sheet_ref.cast::<web_sys::Element>() {
            sheet.class_list().add_1(SHOW_CLASS).ok();
        }
    });
}

pub fn close_top_sheet(top_sheet_ref: NodeRef) {
    if let Some(sheet) = top_sheet_ref.cast::<web_sys::Element>() {
        sheet.class_list().remove_1(SHOW_CLASS).ok();
    }
}
