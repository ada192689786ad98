//! Document editor: wires the yew `Component` to a [`DocumentSession`].
//!
//! The session is started in the mode given by the `document_id` prop when
//! the component is created and bound to the `contenteditable` surface on
//! the first render. On
//! teardown the session is closed so late backend answers are ignored.
//!
//! [`DocumentSession`]: crate::session::DocumentSession

use log::warn;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

use crate::components::helpers::set_window_dirty_flag;
use crate::session::EditorMode;

pub use messages::Msg;
pub use props::EditorProps;
pub use state::EditorView;
use state::ContentEditableSurface;

impl Component for EditorView {
    type Message = Msg;
    type Properties = EditorProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut component = EditorView::new();
        let mode = EditorMode::from_id(ctx.props().document_id);
        match component.session.enter(mode) {
            Ok(Some(command)) => update::dispatch(&component, ctx, command),
            Ok(None) => {}
            Err(err) => warn!("editor could not start: {err}"),
        }
        component
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.started {
            self.started = true;
            self.session
                .on_editor_ready(ContentEditableSurface::new(self.surface_ref.clone()));
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.session.on_editor_disposed();
        self.session.close();
        set_window_dirty_flag(false);
    }
}
