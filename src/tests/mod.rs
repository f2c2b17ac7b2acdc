use crate::controller::{
    Action, ListController, ListState, LoadState, Notice, MSG_DELETED_ONE, MSG_FETCH_FAILED,
    MSG_SAVED,
};
use crate::edit::{EditSession, ValidationFailure};
use crate::model::{Field, Record, RecordId};
use crate::runner::{Options, Runner};
use crate::source::RecordSource;

fn users(n: usize) -> Vec<Record> {
    (1..=n)
        .map(|i| {
            Record::new(
                i.to_string(),
                format!("User {i}"),
                format!("user{i}@mail.com"),
                "member",
            )
        })
        .collect()
}

fn ready(records: Vec<Record>) -> ListController<Vec<Notice>> {
    let mut controller = ListController::new(Vec::new());
    controller.finish_load(Ok::<_, String>(records));
    controller
}

fn ids(rows: &[Record]) -> Vec<String> {
    rows.iter().map(|r| r.id.to_string()).collect()
}

#[test]
fn deleting_from_a_three_row_last_page_keeps_the_page() {
    let mut controller = ready(users(23));
    assert_eq!(controller.snapshot().total_pages, 3);

    controller.dispatch(Action::GoToPage(3));
    assert_eq!(controller.snapshot().visible_rows.len(), 3);

    controller.dispatch(Action::DeleteOne(RecordId::from("22")));
    let model = controller.snapshot();
    assert_eq!(model.current_page, 3);
    assert_eq!(model.total_pages, 3);
    assert_eq!(ids(&model.visible_rows), vec!["21", "23"]);
    assert_eq!(controller.notifier(), &vec![Notice::success(MSG_DELETED_ONE)]);
}

#[test]
fn deleting_the_only_row_on_the_last_page_steps_back_once() {
    let mut controller = ready(users(21));
    controller.dispatch(Action::LastPage);
    assert_eq!(controller.snapshot().current_page, 3);

    controller.dispatch(Action::DeleteOne(RecordId::from("21")));
    let model = controller.snapshot();
    assert_eq!(model.current_page, 2);
    assert_eq!(model.total_pages, 2);
    let expected: Vec<String> = (11..=20).map(|i| i.to_string()).collect();
    assert_eq!(ids(&model.visible_rows), expected);
}

#[test]
fn admin_search_collapses_to_one_page_from_any_page() {
    let mut records = users(20);
    for i in [2, 9, 14, 19] {
        records[i].role = "admin".to_string();
    }
    for start_page in [1, 2] {
        let mut controller = ready(records.clone());
        controller.dispatch(Action::GoToPage(start_page));
        controller.dispatch(Action::SearchChanged("admin".to_string()));

        let model = controller.snapshot();
        assert_eq!(model.total_pages, 1);
        assert_eq!(model.current_page, 1);
        assert_eq!(ids(&model.visible_rows), vec!["3", "10", "15", "20"]);
        assert_eq!(model.matching_records, 4);
        assert_eq!(model.total_records, 20);
    }
}

#[test]
fn search_keeps_the_page_while_it_still_has_rows() {
    let mut records = users(30);
    for record in records.iter_mut().step_by(2) {
        record.role = "admin".to_string();
    }
    let mut controller = ready(records);
    controller.dispatch(Action::GoToPage(2));
    controller.dispatch(Action::SearchChanged("admin".to_string()));

    let model = controller.snapshot();
    assert_eq!(model.matching_records, 15);
    assert_eq!(model.total_pages, 2);
    assert_eq!(model.current_page, 2);
    assert_eq!(ids(&model.visible_rows), vec!["21", "23", "25", "27", "29"]);
}

#[test]
fn select_all_twice_returns_to_empty() {
    let state = ListState::new(users(15));
    let once = state.apply(Action::SelectAllToggled).state;
    assert_eq!(once.selection().len(), 10);
    assert!(once.selection().all_selected());

    let twice = once.apply(Action::SelectAllToggled).state;
    assert!(twice.selection().is_empty());
    assert!(!twice.selection().all_selected());
}

#[test]
fn page_change_clears_any_selection() {
    let mut state = ListState::new(users(25));
    for action in [
        Action::NextPage,
        Action::GoToPage(1),
        Action::LastPage,
        Action::FirstPage,
    ] {
        let first = state.visible_ids()[0].clone();
        state = state.apply(Action::RowToggled(first)).state;
        assert_eq!(state.selection().len(), 1);
        state = state.apply(action).state;
        assert!(state.selection().is_empty());
        assert!(!state.selection().all_selected());
    }
}

#[test]
fn commit_validation_cases() {
    let mut session = EditSession::new();

    session.begin(RecordId::from("1"));
    let nameless = Record::new("1", "", "not an email", "member");
    assert!(session
        .attempt_commit(&nameless)
        .unwrap_err()
        .contains(&ValidationFailure::EmptyName));
    let nameless = Record::new("1", "", "a@b.com", "member");
    assert_eq!(
        session.attempt_commit(&nameless),
        Err(vec![ValidationFailure::EmptyName])
    );

    let bad_email = Record::new("1", "Ann", "bad", "member");
    assert_eq!(
        session.attempt_commit(&bad_email),
        Err(vec![ValidationFailure::MalformedEmail])
    );
    assert!(session.is_active());

    let good = Record::new("1", "Ann", "a@b.com", "member");
    assert_eq!(session.attempt_commit(&good), Ok(()));
    assert!(!session.is_active());
}

#[test]
fn empty_search_keeps_load_order() {
    let records = users(12);
    let view = crate::filter::apply(&records, "");
    assert_eq!(view.len(), records.len());
    assert!(view.iter().zip(records.iter()).all(|(a, b)| *a == b));
}

#[test]
fn edit_then_save_round_through_controller() {
    let mut controller = ready(users(3));
    let id = RecordId::from("2");
    controller.dispatch(Action::EditRequested(id.clone()));
    controller.dispatch(Action::FieldEdited {
        id: id.clone(),
        field: Field::Email,
        value: "broken".to_string(),
    });
    controller.dispatch(Action::SaveRequested(id.clone()));
    assert_eq!(controller.snapshot().editing_id, Some(id.clone()));

    controller.dispatch(Action::FieldEdited {
        id: id.clone(),
        field: Field::Email,
        value: "fixed@mail.com".to_string(),
    });
    controller.dispatch(Action::SaveRequested(id.clone()));

    let model = controller.snapshot();
    assert_eq!(model.editing_id, None);
    assert_eq!(model.visible_rows[1].email, "fixed@mail.com");
    assert_eq!(
        controller.notifier(),
        &vec![
            Notice::error(ValidationFailure::MalformedEmail.message()),
            Notice::success(MSG_SAVED),
        ]
    );
}

#[tokio::test]
async fn runner_loads_records_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.json");
    std::fs::write(
        &path,
        r#"[
            {"id":"1","name":"Aaron Miles","email":"aaron@mailinator.com","role":"member"},
            {"id":"2","name":"Aishwarya Naik","email":"aishwarya@mailinator.com","role":"member"},
            {"id":"3","name":"Arvind Kumar","email":"arvind@mailinator.com","role":"admin"}
        ]"#,
    )
    .unwrap();

    let runner = Runner::new(Options {
        source: RecordSource::FilePath(path.to_string_lossy().to_string()),
        ..Options::default()
    })
    .unwrap();
    let controller = runner.load(Vec::<Notice>::new()).await;

    assert_eq!(controller.load_state(), &LoadState::Ready);
    let model = controller.snapshot();
    assert_eq!(model.total_records, 3);
    assert_eq!(model.visible_rows[2].role, "admin");
    assert!(controller.notifier().is_empty());
}

#[tokio::test]
async fn runner_failure_ends_in_failed_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let runner = Runner::new(Options {
        source: RecordSource::FilePath(path.to_string_lossy().to_string()),
        ..Options::default()
    })
    .unwrap();
    let mut controller = runner.load(Vec::<Notice>::new()).await;

    assert!(matches!(controller.load_state(), LoadState::Failed(_)));
    assert!(!controller.dispatch(Action::NextPage));
    assert!(controller.snapshot().fetch_failed);
    assert_eq!(controller.notifier(), &vec![Notice::error(MSG_FETCH_FAILED)]);
}
