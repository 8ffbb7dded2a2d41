use super::*;
use crate::model::Customer;
use crate::ui::FlashLevel;

fn ann() -> Customer {
    Customer {
        id: 7,
        first_name: "Ann".into(),
        last_name: "Lee".into(),
        active: true,
        address: "1 Rd".into(),
    }
}

fn filled_state() -> AppState {
    let mut st = AppState::default();
    st.form.populate(&ann());
    st
}

fn flash_text(st: &AppState) -> &str {
    st.flash.as_ref().map(|f| f.text.as_str()).unwrap_or("")
}

#[test]
fn invoke_clears_flash_and_issues_one_request() {
    let mut st = filled_state();
    st.flash_error("old message");
    let effects = update(&mut st, AppMsg::Invoke(Action::Read));
    assert!(st.flash.is_none());
    match effects.as_slice() {
        [Effect::CallApi { action, request }] => {
            assert_eq!(*action, Action::Read);
            assert_eq!(*request, ApiRequest::Read { id: "7".into() });
        }
        _ => panic!("expected exactly one CallApi effect"),
    }
}

#[test]
fn clear_is_local_and_blanks_the_id_too() {
    let mut st = filled_state();
    st.flash_success("Success");
    let effects = update(&mut st, AppMsg::Invoke(Action::Clear));
    assert!(effects.is_empty());
    assert!(st.flash.is_none());
    assert!(st.form.id.is_empty());
    assert!(st.form.first_name.is_empty());
    assert!(st.form.status.is_empty());
}

#[test]
fn create_success_populates_form_from_response() {
    // Ann Lee with status "true" comes back with a server-assigned id
    let mut st = AppState::default();
    st.form.first_name = "Ann".into();
    st.form.status = "true".into();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::Create,
            outcome: Ok(ApiOutcome::Customer(ann())),
        },
    );
    assert_eq!(st.form.id, "7");
    assert_eq!(st.form.status, "true");
    assert_eq!(flash_text(&st), SUCCESS_MESSAGE);
    assert!(matches!(
        st.flash.as_ref().unwrap().level,
        FlashLevel::Success
    ));
}

#[test]
fn create_failure_shows_message_and_keeps_form() {
    let mut st = filled_state();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::Create,
            outcome: Err("name is required".into()),
        },
    );
    assert_eq!(st.form.first_name, "Ann");
    assert_eq!(flash_text(&st), "name is required");
    assert!(matches!(st.flash.as_ref().unwrap().level, FlashLevel::Error));
}

#[test]
fn read_of_missing_id_clears_form_and_shows_server_message() {
    let mut st = filled_state();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::Read,
            outcome: Err("not found".into()),
        },
    );
    // Cleared, but the id field is left untouched
    assert_eq!(st.form.id, "7");
    assert!(st.form.first_name.is_empty());
    assert!(st.form.status.is_empty());
    assert_eq!(flash_text(&st), "not found");
}

#[test]
fn delete_success_clears_form_and_uses_fixed_message() {
    let mut st = filled_state();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::Delete,
            outcome: Ok(ApiOutcome::Done),
        },
    );
    assert!(st.form.first_name.is_empty());
    assert_eq!(st.form.id, "7");
    assert_eq!(flash_text(&st), DELETED_MESSAGE);
}

#[test]
fn delete_failure_discards_server_detail() {
    let mut st = filled_state();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::Delete,
            outcome: Err("customer is referenced by 3 orders".into()),
        },
    );
    assert_eq!(st.form.first_name, "Ann");
    assert_eq!(flash_text(&st), DELETE_FAILED_MESSAGE);
}

#[test]
fn deactivate_and_restore_clear_form_on_success() {
    for action in [Action::Deactivate, Action::Restore] {
        let mut st = filled_state();
        let _ = update(
            &mut st,
            AppMsg::Completed {
                action,
                outcome: Ok(ApiOutcome::Done),
            },
        );
        assert!(st.form.first_name.is_empty());
        assert_eq!(flash_text(&st), SUCCESS_MESSAGE);
    }
}

#[test]
fn deactivate_failure_shows_server_message_without_clearing() {
    let mut st = filled_state();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::Deactivate,
            outcome: Err("not found".into()),
        },
    );
    assert_eq!(st.form.first_name, "Ann");
    assert_eq!(flash_text(&st), "not found");
}

#[test]
fn list_success_rebuilds_results_and_copies_first_into_form() {
    let mut st = AppState::default();
    st.results_cursor = 4;
    let other = Customer {
        id: 8,
        first_name: "Bo".into(),
        last_name: "Ek".into(),
        active: false,
        address: "2 Rd".into(),
    };
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::List,
            outcome: Ok(ApiOutcome::Customers(vec![ann(), other])),
        },
    );
    assert_eq!(st.results.len(), 2);
    assert_eq!(st.results_cursor, 0);
    assert_eq!(st.form.id, "7");
    assert_eq!(st.form.first_name, "Ann");
    assert_eq!(flash_text(&st), SUCCESS_MESSAGE);
}

#[test]
fn empty_list_success_leaves_form_unchanged() {
    let mut st = filled_state();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::Query,
            outcome: Ok(ApiOutcome::Customers(vec![])),
        },
    );
    assert!(st.results.is_empty());
    assert_eq!(st.form.first_name, "Ann");
    assert_eq!(flash_text(&st), SUCCESS_MESSAGE);
}

#[test]
fn list_failure_clears_form_but_query_failure_does_not() {
    let mut st = filled_state();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::List,
            outcome: Err("boom".into()),
        },
    );
    assert!(st.form.first_name.is_empty());

    let mut st = filled_state();
    let _ = update(
        &mut st,
        AppMsg::Completed {
            action: Action::Query,
            outcome: Err("boom".into()),
        },
    );
    assert_eq!(st.form.first_name, "Ann");
    assert_eq!(flash_text(&st), "boom");
}

#[test]
fn query_request_carries_form_filters() {
    let mut st = AppState::default();
    st.form.first_name = "a".into();
    st.form.address = "b".into();
    st.form.status = "true".into();
    let req = request_for(Action::Query, &st.form).unwrap();
    assert_eq!(req.path(), "/customers?first_name=a&address=b&status=true");
}

#[test]
fn id_actions_send_the_id_verbatim() {
    let form = crate::model::FormData {
        id: "12".into(),
        ..Default::default()
    };
    assert_eq!(
        request_for(Action::Delete, &form),
        Some(ApiRequest::Delete { id: "12".into() })
    );
    assert_eq!(
        request_for(Action::Deactivate, &form),
        Some(ApiRequest::Deactivate { id: "12".into() })
    );
    // An empty id is still sent as-is; the server reports the error
    let empty = crate::model::FormData::default();
    assert_eq!(
        request_for(Action::Read, &empty).unwrap().path(),
        "/customers/"
    );
}

#[test]
fn action_names_round_trip_for_headless_mode() {
    for a in Action::ALL {
        assert_eq!(Action::from_name(a.label()), Some(a));
    }
    assert_eq!(Action::from_name("list"), Some(Action::List));
    assert_eq!(Action::from_name("nope"), None);
}
