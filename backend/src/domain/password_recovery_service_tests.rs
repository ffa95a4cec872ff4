//! Tests for the forgot/reset password flow.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    MailError, MailTemplateError, MockHashProvider, MockMailProvider, MockMailTemplateProvider,
    MockUserRepository, MockUserTokenRepository,
};
use crate::domain::{ErrorCode, Password, UserId, UserToken};
use crate::test_support::{fixed_clock, fixture_now, sample_user};

struct Mocks {
    users: MockUserRepository,
    tokens: MockUserTokenRepository,
    mail: MockMailProvider,
    templates: MockMailTemplateProvider,
    hasher: MockHashProvider,
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        users: MockUserRepository::new(),
        tokens: MockUserTokenRepository::new(),
        mail: MockMailProvider::new(),
        templates: MockMailTemplateProvider::new(),
        hasher: MockHashProvider::new(),
    }
}

impl Mocks {
    fn into_service(
        self,
        now: DateTime<Utc>,
    ) -> PasswordRecoveryService<
        MockUserRepository,
        MockUserTokenRepository,
        MockMailProvider,
        MockMailTemplateProvider,
        MockHashProvider,
    > {
        PasswordRecoveryService::new(
            Arc::new(self.users),
            Arc::new(self.tokens),
            Arc::new(self.mail),
            Arc::new(self.templates),
            Arc::new(self.hasher),
            fixed_clock(now),
            Url::parse("http://localhost:3000/").expect("valid web url"),
        )
    }

    /// Render the recovery template as just its link.
    fn render_link_only(&mut self) {
        self.templates
            .expect_parse()
            .withf(|template, _| *template == MailTemplate::ForgotPassword)
            .returning(|_, variables| Ok(variables["link"].as_str().unwrap_or_default().to_owned()));
    }
}

fn issued_token(user_id: &UserId, created_at: DateTime<Utc>) -> UserToken {
    UserToken {
        id: Uuid::new_v4(),
        token: Uuid::new_v4(),
        user_id: user_id.clone(),
        created_at,
    }
}

fn email(value: &str) -> EmailAddress {
    EmailAddress::new(value).expect("valid email")
}

#[rstest]
#[tokio::test]
async fn forgot_password_mails_reset_link(mut mocks: Mocks) {
    let user = sample_user("John Doe", "john@example.com", "h");
    let user_id = user.id().clone();
    let token = issued_token(&user_id, fixture_now());
    let link = format!("http://localhost:3000/reset-password?token={}", token.token);
    mocks.render_link_only();

    mocks
        .users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .tokens
        .expect_generate()
        .withf(move |id| id == &user_id)
        .times(1)
        .return_once(move |_| Ok(token));
    mocks
        .mail
        .expect_send_mail()
        .withf(move |message| {
            message.to.as_ref() == "john@example.com"
                && message.to_name == "John Doe"
                && message.subject == RECOVERY_SUBJECT
                && message.body.contains(&link)
        })
        .times(1)
        .return_once(|_| Ok(()));

    mocks
        .into_service(fixture_now())
        .send_forgot_password_email(&email("john@example.com"))
        .await
        .expect("mail sent");
}

#[rstest]
#[tokio::test]
async fn forgot_password_for_unknown_email_is_rejected(mut mocks: Mocks) {
    mocks.users.expect_find_by_email().return_once(|_| Ok(None));
    mocks.tokens.expect_generate().times(0);
    mocks.mail.expect_send_mail().times(0);

    let error = mocks
        .into_service(fixture_now())
        .send_forgot_password_email(&email("nobody@example.com"))
        .await
        .expect_err("unknown email");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), USER_MISSING);
}

#[rstest]
#[tokio::test]
async fn mail_failure_is_internal(mut mocks: Mocks) {
    let user = sample_user("John Doe", "john@example.com", "h");
    let token = issued_token(user.id(), fixture_now());
    mocks
        .users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(user)));
    mocks.tokens.expect_generate().return_once(move |_| Ok(token));
    mocks.render_link_only();
    mocks
        .mail
        .expect_send_mail()
        .return_once(|_| Err(MailError::delivery("smtp closed")));

    let error = mocks
        .into_service(fixture_now())
        .send_forgot_password_email(&email("john@example.com"))
        .await
        .expect_err("mail failed");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn recovery_mail_is_rendered_from_the_template(mut mocks: Mocks) {
    let user = sample_user("John Doe", "john@example.com", "h");
    let token = issued_token(user.id(), fixture_now());
    let link = format!("http://localhost:3000/reset-password?token={}", token.token);
    mocks
        .users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(user)));
    mocks.tokens.expect_generate().return_once(move |_| Ok(token));
    mocks
        .templates
        .expect_parse()
        .withf(move |template, variables| {
            *template == MailTemplate::ForgotPassword
                && variables["name"] == "John Doe"
                && variables["link"] == link.as_str()
                && variables["ttlHours"] == RESET_TOKEN_TTL_HOURS
        })
        .times(1)
        .return_once(|_, _| Ok("rendered body".to_owned()));
    mocks
        .mail
        .expect_send_mail()
        .withf(|message| message.body == "rendered body")
        .times(1)
        .return_once(|_| Ok(()));

    mocks
        .into_service(fixture_now())
        .send_forgot_password_email(&email("john@example.com"))
        .await
        .expect("mail sent");
}

#[rstest]
#[tokio::test]
async fn template_failure_sends_nothing(mut mocks: Mocks) {
    let user = sample_user("John Doe", "john@example.com", "h");
    let token = issued_token(user.id(), fixture_now());
    mocks
        .users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(user)));
    mocks.tokens.expect_generate().return_once(move |_| Ok(token));
    mocks
        .templates
        .expect_parse()
        .return_once(|_, _| Err(MailTemplateError::render("missing variable")));
    mocks.mail.expect_send_mail().times(0);

    let error = mocks
        .into_service(fixture_now())
        .send_forgot_password_email(&email("john@example.com"))
        .await
        .expect_err("template failed");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

fn reset(token: Uuid) -> ResetPasswordRequest {
    ResetPasswordRequest {
        token,
        password: Password::new("123123").expect("valid password"),
    }
}

#[rstest]
#[tokio::test]
async fn reset_password_stores_new_hash_and_consumes_token(mut mocks: Mocks) {
    let user = sample_user("John Doe", "john@example.com", "old");
    let token = issued_token(user.id(), fixture_now());
    let (value, token_id) = (token.token, token.id);

    mocks
        .tokens
        .expect_find_by_token()
        .withf(move |t| *t == value)
        .return_once(move |_| Ok(Some(token)));
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .hasher
        .expect_generate_hash()
        .withf(|payload| payload == "123123")
        .return_once(|_| Ok("new-hash".to_owned()));
    mocks
        .users
        .expect_save()
        .withf(|saved| saved.password_hash() == "new-hash")
        .times(1)
        .return_once(|_| Ok(()));
    mocks
        .tokens
        .expect_delete()
        .withf(move |id| *id == token_id)
        .times(1)
        .return_once(|_| Ok(()));

    mocks
        .into_service(fixture_now() + Duration::hours(1))
        .reset_password(reset(value))
        .await
        .expect("password reset");
}

#[rstest]
#[tokio::test]
async fn unknown_token_is_rejected(mut mocks: Mocks) {
    mocks.tokens.expect_find_by_token().return_once(|_| Ok(None));
    mocks.users.expect_save().times(0);

    let error = mocks
        .into_service(fixture_now())
        .reset_password(reset(Uuid::new_v4()))
        .await
        .expect_err("unknown token");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), TOKEN_MISSING);
}

#[rstest]
#[tokio::test]
async fn token_of_deleted_user_is_rejected(mut mocks: Mocks) {
    let token = issued_token(&UserId::random(), fixture_now());
    let value = token.token;
    mocks
        .tokens
        .expect_find_by_token()
        .return_once(move |_| Ok(Some(token)));
    mocks.users.expect_find_by_id().return_once(|_| Ok(None));
    mocks.users.expect_save().times(0);

    let error = mocks
        .into_service(fixture_now())
        .reset_password(reset(value))
        .await
        .expect_err("user missing");

    assert_eq!(error.message(), USER_MISSING);
}

#[rstest]
#[case(Duration::hours(2), true)]
#[case(Duration::hours(3), false)]
#[tokio::test]
async fn token_expires_after_two_hours(
    mut mocks: Mocks,
    #[case] elapsed: Duration,
    #[case] accepted: bool,
) {
    let user = sample_user("John Doe", "john@example.com", "old");
    let token = issued_token(user.id(), fixture_now());
    let value = token.token;
    mocks
        .tokens
        .expect_find_by_token()
        .return_once(move |_| Ok(Some(token)));
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .hasher
        .expect_generate_hash()
        .returning(|_| Ok("new-hash".to_owned()));
    mocks.users.expect_save().returning(|_| Ok(()));
    mocks.tokens.expect_delete().returning(|_| Ok(()));

    let result = mocks
        .into_service(fixture_now() + elapsed)
        .reset_password(reset(value))
        .await;

    match result {
        Ok(()) => assert!(accepted),
        Err(error) => {
            assert!(!accepted);
            assert_eq!(error.message(), TOKEN_EXPIRED);
        }
    }
}
