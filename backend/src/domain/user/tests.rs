//! Validation coverage for user value types.

use super::*;
use rstest::rstest;

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw), Err(expected));
}

#[rstest]
fn user_id_round_trips_through_serde() {
    let id = UserId::random();
    let json = serde_json::to_string(&id).expect("serialise id");
    let back: UserId = serde_json::from_str(&json).expect("deserialise id");
    assert_eq!(back, id);
}

#[rstest]
#[case("   ", UserValidationError::EmptyName)]
#[case("", UserValidationError::EmptyName)]
fn user_name_rejects_blank(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserName::new(raw), Err(expected));
}

#[rstest]
fn user_name_is_trimmed() {
    let name = UserName::new("  John Doe ").expect("valid name");
    assert_eq!(name.as_ref(), "John Doe");
}

#[rstest]
fn user_name_rejects_overlong_input() {
    let raw = "a".repeat(USER_NAME_MAX + 1);
    assert_eq!(
        UserName::new(raw),
        Err(UserValidationError::NameTooLong { max: USER_NAME_MAX })
    );
}

#[rstest]
#[case("john@example.com", "john@example.com")]
#[case("  John.Doe@Example.COM ", "john.doe@example.com")]
fn email_is_normalised(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("john", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
#[case("john@localhost", UserValidationError::InvalidEmail)]
#[case("john@@example.com", UserValidationError::InvalidEmail)]
#[case("jo hn@example.com", UserValidationError::InvalidEmail)]
#[case("john@example.", UserValidationError::InvalidEmail)]
fn email_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn debug_output_redacts_password_hash() {
    let now = Utc::now();
    let user = User::from(UserParts {
        id: UserId::random(),
        name: UserName::new("John").expect("name"),
        email: EmailAddress::new("john@example.com").expect("email"),
        password_hash: "$argon2id$secret".to_owned(),
        avatar: None,
        created_at: now,
        updated_at: now,
    });

    let rendered = format!("{user:?}");
    assert!(!rendered.contains("secret"));
    assert!(rendered.contains("<redacted>"));
}

#[rstest]
fn mutators_bump_updated_at() {
    let created = Utc::now();
    let later = created + chrono::Duration::minutes(5);
    let mut user = User::from(UserParts {
        id: UserId::random(),
        name: UserName::new("John").expect("name"),
        email: EmailAddress::new("john@example.com").expect("email"),
        password_hash: "hash".to_owned(),
        avatar: None,
        created_at: created,
        updated_at: created,
    });

    user.set_avatar("avatar.png".to_owned(), later);

    assert_eq!(user.avatar(), Some("avatar.png"));
    assert_eq!(user.updated_at(), later);
    assert_eq!(user.created_at(), created);
}
