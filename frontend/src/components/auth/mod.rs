//! Login and registration form.

use common::model::user::UserProfile;
use web_sys::{HtmlInputElement, InputEvent, SubmitEvent};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::session::ClientError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Register,
}

#[derive(Clone, Copy)]
pub enum Field {
    Name,
    Email,
    Password,
}

pub enum Msg {
    Set(Field, String),
    ToggleMode,
    Submit,
    Finished(Result<UserProfile, ClientError>),
}

#[derive(Properties, PartialEq, Clone)]
pub struct LoginProps {
    pub on_logged_in: Callback<UserProfile>,
}

pub struct LoginView {
    mode: Mode,
    name: String,
    email: String,
    password: String,
    busy: bool,
    error: Option<String>,
}

impl LoginView {
    fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("Email and password are required.");
        }
        if self.mode == Mode::Register && self.name.trim().is_empty() {
            return Err("Please tell us your name.");
        }
        Ok(())
    }
}

impl Component for LoginView {
    type Message = Msg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            mode: Mode::Login,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            busy: false,
            error: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Set(field, value) => {
                match field {
                    Field::Name => self.name = value,
                    Field::Email => self.email = value,
                    Field::Password => self.password = value,
                }
                false
            }
            Msg::ToggleMode => {
                self.mode = match self.mode {
                    Mode::Login => Mode::Register,
                    Mode::Register => Mode::Login,
                };
                self.error = None;
                true
            }
            Msg::Submit => {
                if self.busy {
                    return false;
                }
                if let Err(message) = self.validate() {
                    self.error = Some(message.to_string());
                    return true;
                }
                self.busy = true;
                self.error = None;

                let api = ApiClient;
                let mode = self.mode;
                let (name, email, password) =
                    (self.name.trim().to_string(), self.email.trim().to_string(), self.password.clone());
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = match mode {
                        Mode::Login => api.login(&email, &password).await,
                        Mode::Register => api.register(&name, &email, &password).await,
                    };
                    link.send_message(Msg::Finished(result));
                });
                true
            }
            Msg::Finished(result) => {
                self.busy = false;
                match result {
                    Ok(user) => ctx.props().on_logged_in.emit(user),
                    Err(ClientError::Unauthorized) => {
                        self.error = Some("Invalid email or password.".to_string())
                    }
                    Err(err) => self.error = Some(err.to_string()),
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let input = |field: Field| {
            link.callback(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Msg::Set(field, input.value())
            })
        };
        let onsubmit = link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });
        let registering = self.mode == Mode::Register;

        html! {
            <div class="login-view">
                <form class="login-card" {onsubmit}>
                    <h2>{ if registering { "Create an account" } else { "Sign in" } }</h2>
                    {
                        if registering {
                            html! {
                                <input type="text" placeholder="Name" value={self.name.clone()} oninput={input(Field::Name)} />
                            }
                        } else {
                            html! {}
                        }
                    }
                    <input type="email" placeholder="Email" value={self.email.clone()} oninput={input(Field::Email)} />
                    <input type="password" placeholder="Password" value={self.password.clone()} oninput={input(Field::Password)} />
                    {
                        match &self.error {
                            Some(message) => html! { <div class="form-error">{ message.clone() }</div> },
                            None => html! {},
                        }
                    }
                    <button type="submit" class="btn primary" disabled={self.busy}>
                        {
                            match (self.busy, registering) {
                                (true, _) => "Please wait...",
                                (false, true) => "Register",
                                (false, false) => "Log in",
                            }
                        }
                    </button>
                    <a class="toggle-mode" onclick={link.callback(|_| Msg::ToggleMode)}>
                        { if registering { "Already have an account? Sign in" } else { "No account yet? Register" } }
                    </a>
                </form>
            </div>
        }
    }
}
