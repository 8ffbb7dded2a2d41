use crate::model::FormData;
use crate::services::api::{ApiOutcome, ApiRequest};
use crate::ui::AppState;

pub const SUCCESS_MESSAGE: &str = "Success";
pub const DELETED_MESSAGE: &str = "Customer has been Deleted!";
// Delete deliberately discards server detail, like the page it replaces
pub const DELETE_FAILED_MESSAGE: &str = "Server error!";

/// The nine UI actions, in action-bar order (F1..F9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Read,
    Delete,
    Deactivate,
    Restore,
    Clear,
    List,
    Query,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Create,
        Action::Update,
        Action::Read,
        Action::Delete,
        Action::Deactivate,
        Action::Restore,
        Action::Clear,
        Action::List,
        Action::Query,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Update => "Update",
            Action::Read => "Read",
            Action::Delete => "Delete",
            Action::Deactivate => "Deactivate",
            Action::Restore => "Restore",
            Action::Clear => "Clear",
            Action::List => "List",
            Action::Query => "Query",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.label().eq_ignore_ascii_case(name))
    }
}

pub enum AppMsg {
    Invoke(Action),
    Completed {
        action: Action,
        outcome: Result<ApiOutcome, String>,
    },
}

pub enum Effect {
    CallApi { action: Action, request: ApiRequest },
}

/// Pure request builder: current form values in, request description out.
/// Clear is the one local-only action. Ids are sent verbatim, empty or not.
pub fn request_for(action: Action, form: &FormData) -> Option<ApiRequest> {
    match action {
        Action::Create => Some(ApiRequest::Create(form.payload())),
        Action::Update => Some(ApiRequest::Update {
            id: form.id.clone(),
            payload: form.payload(),
        }),
        Action::Read => Some(ApiRequest::Read {
            id: form.id.clone(),
        }),
        Action::Delete => Some(ApiRequest::Delete {
            id: form.id.clone(),
        }),
        Action::Deactivate => Some(ApiRequest::Deactivate {
            id: form.id.clone(),
        }),
        Action::Restore => Some(ApiRequest::Restore {
            id: form.id.clone(),
        }),
        Action::Clear => None,
        Action::List => Some(ApiRequest::List),
        Action::Query => Some(ApiRequest::Query(form.query())),
    }
}

/// Reducer: applies a message to the state and returns the effects to run.
/// The per-action success/failure policy mirrors the page this console
/// replaces; List failure clears the form while Query failure leaves it
/// untouched, and Delete always shows its fixed messages.
pub fn update(state: &mut AppState, msg: AppMsg) -> Vec<Effect> {
    let mut effects: Vec<Effect> = Vec::new();
    match msg {
        AppMsg::Invoke(action) => {
            // The status area is cleared at the start of every action
            state.flash = None;
            state.last_action = Some(action);
            match action {
                Action::Clear => {
                    state.form.id.clear();
                    state.form.clear();
                }
                _ => {
                    if let Some(request) = request_for(action, &state.form) {
                        effects.push(Effect::CallApi { action, request });
                    }
                }
            }
        }
        AppMsg::Completed { action, outcome } => match (action, outcome) {
            (
                Action::Create | Action::Update | Action::Read,
                Ok(ApiOutcome::Customer(c)),
            ) => {
                state.form.populate(&c);
                state.flash_success(SUCCESS_MESSAGE);
            }
            (Action::Delete, Ok(_)) => {
                state.form.clear();
                state.flash_success(DELETED_MESSAGE);
            }
            (Action::Delete, Err(_)) => {
                state.flash_error(DELETE_FAILED_MESSAGE);
            }
            (Action::Deactivate | Action::Restore, Ok(_)) => {
                state.form.clear();
                state.flash_success(SUCCESS_MESSAGE);
            }
            (Action::List | Action::Query, Ok(ApiOutcome::Customers(customers))) => {
                // The first result, if any, is copied into the form; an
                // empty result set leaves the form as it was
                if let Some(first) = customers.first() {
                    state.form.populate(first);
                }
                state.results = customers;
                state.results_cursor = 0;
                state.flash_success(SUCCESS_MESSAGE);
            }
            (Action::Read | Action::List, Err(e)) => {
                state.form.clear();
                state.flash_error(e);
            }
            (_, Err(e)) => {
                state.flash_error(e);
            }
            (action, Ok(other)) => {
                state.dbg(format!("{action:?}: unexpected outcome {other:?}"));
            }
        },
    }
    effects
}

#[cfg(test)]
mod tests;
