use contact_manager::model::*;

fn draft(first_name: &str) -> ContactDraft {
    ContactDraft {
        title: "Dr.".into(),
        first_name: first_name.into(),
        last_name: "Khan".into(),
        personal_email: "me@home.example".into(),
        personal_phone_number: "555-0100".into(),
        ..ContactDraft::default()
    }
}

// ==========================================================================
// USER TESTS
// ==========================================================================

#[test]
fn user_create_starts_empty_at_version_zero() {
    let user = User::create("Ayesha".into(), "ayesha@example.com".into());
    assert!(user.saved_contacts.is_empty());
    assert_eq!(user.version, 0);
}

#[test]
fn attach_takes_ownership_and_appends() {
    let mut user = User::create("Ayesha".into(), "ayesha@example.com".into());
    let stranger = Id::generate();

    let attached = user.attach(ContactRecord::create(stranger, draft("Omar"))).clone();
    user.attach(ContactRecord::create(stranger, draft("Hina")));

    assert_eq!(attached.owner_id, user.id);
    let names: Vec<&str> = user.saved_contacts.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, vec!["Omar", "Hina"]);
    assert!(user.saved_contacts.iter().all(|c| c.owner_id == user.id));
}

#[test]
fn detach_removes_only_the_named_contact() {
    let mut user = User::create("Ayesha".into(), "ayesha@example.com".into());
    let first = user.attach(ContactRecord::create(user.id, draft("Omar"))).id;
    let second = user.attach(ContactRecord::create(user.id, draft("Hina"))).id;

    let removed = user.detach(first).unwrap();
    assert_eq!(removed.first_name, "Omar");
    assert_eq!(user.saved_contacts.len(), 1);
    assert_eq!(user.saved_contacts[0].id, second);
    assert!(user.detach(first).is_none());
}

#[test]
fn contact_mut_edits_in_place() {
    let mut user = User::create("Ayesha".into(), "ayesha@example.com".into());
    let id = user.attach(ContactRecord::create(user.id, draft("Omar"))).id;

    user.contact_mut(id).unwrap().home_phone_number = Some("555-0199".into());
    assert_eq!(user.saved_contacts[0].home_phone_number.as_deref(), Some("555-0199"));
    assert!(user.contact_mut(Id::generate()).is_none());
}

// ==========================================================================
// CONTACT TESTS
// ==========================================================================

#[test]
fn contact_create_copies_draft() {
    let owner = Id::generate();
    let contact = ContactRecord::create(owner, draft("Omar"));
    assert_eq!(contact.owner_id, owner);
    assert_eq!(contact.draft(), draft("Omar"));
}

#[test]
fn contact_apply_keeps_identity() {
    let owner = Id::generate();
    let mut contact = ContactRecord::create(owner, draft("Omar"));
    let id = contact.id;

    let mut changed = draft("Omer");
    changed.work_email = Some("omer@work.example".into());
    contact.apply(changed.clone());

    assert_eq!(contact.id, id);
    assert_eq!(contact.owner_id, owner);
    assert_eq!(contact.draft(), changed);
}

#[test]
fn contact_ids_are_unique() {
    let a = ContactRecord::create(Id::generate(), draft("Omar"));
    let b = ContactRecord::create(Id::generate(), draft("Omar"));
    assert_ne!(a.id, b.id);
}

#[test]
fn id_parses_from_its_display() {
    let id: Id<ContactRecord> = Id::generate();
    let parsed: Id<ContactRecord> = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
    assert!("not-a-uuid".parse::<Id<ContactRecord>>().is_err());
}
