use contact_manager::db::*;
use contact_manager::model::*;
use contact_manager::queries::contact_queries;

fn setup() -> (rusqlite::Connection, User) {
    let conn = schema::test_connection();
    let mut user = User::create("Ayesha".into(), "ayesha@example.com".into());
    user_repo::insert(&conn, &user).unwrap();

    for name in ["Zain", "Amna", "Zainab"] {
        user.attach(ContactRecord::create(
            user.id,
            ContactDraft {
                first_name: name.into(),
                last_name: "Ali".into(),
                personal_email: "x@home.example".into(),
                personal_phone_number: "555-0000".into(),
                ..ContactDraft::default()
            },
        ));
    }
    user_repo::save(&conn, &mut user).unwrap();
    (conn, user)
}

#[test]
fn contacts_for_keeps_insertion_order() {
    let (conn, user) = setup();
    let names: Vec<String> = contact_queries::contacts_for(&conn, user.id)
        .unwrap()
        .into_iter()
        .map(|c| c.first_name)
        .collect();
    assert_eq!(names, vec!["Zain", "Amna", "Zainab"]);
}

#[test]
fn contacts_named_trims_and_matches_substring() {
    let (conn, user) = setup();
    let found = contact_queries::contacts_named(&conn, user.id, "  zain ").unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, vec!["Zain", "Zainab"]);
}

#[test]
fn contacts_named_without_match_is_empty() {
    let (conn, user) = setup();
    assert!(contact_queries::contacts_named(&conn, user.id, "Nobody").unwrap().is_empty());
}

#[test]
fn contact_count_and_all_contacts() {
    let (conn, user) = setup();
    let other = User::create("Other".into(), "other@example.com".into());
    user_repo::insert(&conn, &other).unwrap();

    assert_eq!(contact_queries::contact_count(&conn, user.id).unwrap(), 3);
    assert_eq!(contact_queries::contact_count(&conn, other.id).unwrap(), 0);
    assert_eq!(contact_queries::all_contacts(&conn).unwrap().len(), 3);
}
