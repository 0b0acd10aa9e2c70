use common::{male_profile, prediction_count, setup_app};
use cost_forecast::{
    auth::model::{LoginForm, RegisterForm},
    error::CustomError,
    forecast::{
        model::{NewPrediction, Profile},
        repository::PredictionRepository,
    },
    req::Request,
};
use tokio_test::{assert_err, assert_ok};
mod common;

fn register_form(name: &str, email: &str, password: &str) -> RegisterForm {
    RegisterForm {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn login_form(email: &str, password: &str) -> LoginForm {
    LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = setup_app().await;

    assert_ok!(app.auth_svc.register(register_form("Ada", "a@x.com", "p1")).await);
    assert_eq!(app.auth_svc.account_count().await.unwrap(), 1);

    let second = app.auth_svc.register(register_form("Bola", "a@x.com", "p2")).await;
    assert!(matches!(second, Err(CustomError::EmailExists)));
    assert_eq!(app.auth_svc.account_count().await.unwrap(), 1);
}

#[tokio::test]
async fn login_user_success() {
    let app = setup_app().await;
    let id = assert_ok!(app.auth_svc.register(register_form("Ada", "a@x.com", "p1")).await);

    let (account, token) = assert_ok!(app.auth_svc.login(login_form("a@x.com", "p1")).await);

    assert_eq!(account.id, id);
    assert_eq!(account.name, "Ada");
    assert_ne!(account.password, "p1");
    assert!(!token.is_empty());
}

async fn request_with_session(token: &str) -> Request {
    let raw = format!("GET / HTTP/1.1\r\nCookie: session={}\r\n\r\n", token);
    Request::new(raw.as_bytes()).await.unwrap()
}

#[tokio::test]
async fn session_name_comes_from_valid_token_only() {
    let app = setup_app().await;
    assert_ok!(app.auth_svc.register(register_form("Ada", "a@x.com", "p1")).await);
    let (_, token) = assert_ok!(app.auth_svc.login(login_form("a@x.com", "p1")).await);

    let signed_in = request_with_session(&token).await;
    assert_eq!(app.auth_svc.session_name(&signed_in).as_deref(), Some("Ada"));

    let tampered = request_with_session(&format!("{}x", token)).await;
    assert_eq!(app.auth_svc.session_name(&tampered), None);

    let anonymous = Request::new("GET / HTTP/1.1\r\n\r\n".as_bytes()).await.unwrap();
    assert_eq!(app.auth_svc.session_name(&anonymous), None);
}

#[tokio::test]
async fn login_user_unauthorized_wrong_password() {
    let app = setup_app().await;
    assert_ok!(app.auth_svc.register(register_form("Ada", "a@x.com", "p1")).await);

    let result = app.auth_svc.login(login_form("a@x.com", "different password")).await;
    assert!(matches!(result, Err(CustomError::InvalidCredentials)));
}

#[tokio::test]
async fn login_user_unauthorized_not_registered() {
    let app = setup_app().await;

    let result = app.auth_svc.login(login_form("nobody@x.com", "p1")).await;
    assert!(matches!(result, Err(CustomError::InvalidCredentials)));
}

#[tokio::test]
async fn forecast_is_recorded_for_owning_account() {
    let app = setup_app().await;
    assert_ok!(app.auth_svc.register(register_form("Ada", "a@x.com", "p1")).await);
    let (account, _) = assert_ok!(app.auth_svc.login(login_form("a@x.com", "p1")).await);

    let record = assert_ok!(app.forecast_svc.forecast(&account, &male_profile()).await);

    assert_eq!(record.user_id, account.id);
    assert_eq!(record.predicted_cost, 111000.0);
    assert_eq!(record.profile(), male_profile());

    let history = assert_ok!(app.forecast_svc.history(&account).await);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, record.id);
    assert_eq!(history[0].profile(), male_profile());
    assert_eq!(history[0].predicted_cost, 111000.0);

    let latest = assert_ok!(app.forecast_svc.latest(&account).await);
    assert_eq!(latest.map(|r| r.id), Some(record.id));
}

#[tokio::test]
async fn unseen_profile_uses_dataset_average() {
    let app = setup_app().await;
    assert_ok!(app.auth_svc.register(register_form("Ada", "a@x.com", "p1")).await);
    let (account, _) = assert_ok!(app.auth_svc.login(login_form("a@x.com", "p1")).await);

    // Known levels, but no historical row combines them.
    let profile = Profile {
        year: "3".to_string(),
        ..male_profile()
    };
    let record = assert_ok!(app.forecast_svc.forecast(&account, &profile).await);

    let global_rent = (100000.0 + 120000.0 + 300000.0) / 3.0;
    assert_eq!(record.predicted_cost, global_rent + 1000.0);
}

#[tokio::test]
async fn rejected_profile_is_not_recorded() {
    let app = setup_app().await;
    assert_ok!(app.auth_svc.register(register_form("Ada", "a@x.com", "p1")).await);
    let (account, _) = assert_ok!(app.auth_svc.login(login_form("a@x.com", "p1")).await);

    let profile = Profile {
        gender: "Other".to_string(),
        ..male_profile()
    };
    let result = app.forecast_svc.forecast(&account, &profile).await;

    assert!(matches!(result, Err(CustomError::UnknownCategory { column: "Gender", .. })));
    assert_eq!(prediction_count(&app.pool).await, 0);
}

#[tokio::test]
async fn history_only_lists_own_predictions() {
    let app = setup_app().await;
    assert_ok!(app.auth_svc.register(register_form("Ada", "a@x.com", "p1")).await);
    assert_ok!(app.auth_svc.register(register_form("Ada", "b@x.com", "p2")).await);
    let (first, _) = assert_ok!(app.auth_svc.login(login_form("a@x.com", "p1")).await);
    let (second, _) = assert_ok!(app.auth_svc.login(login_form("b@x.com", "p2")).await);

    assert_ok!(app.forecast_svc.forecast(&first, &male_profile()).await);
    assert_ok!(app.forecast_svc.forecast(&first, &male_profile()).await);
    assert_ok!(app.forecast_svc.forecast(&second, &male_profile()).await);

    assert_eq!(assert_ok!(app.forecast_svc.history(&first).await).len(), 2);
    assert_eq!(assert_ok!(app.forecast_svc.history(&second).await).len(), 1);
}

#[tokio::test]
async fn prediction_requires_existing_account() {
    let app = setup_app().await;
    let repository = PredictionRepository::new(app.pool.clone());
    let profile = male_profile();

    let orphan = NewPrediction {
        user_id: 999,
        profile: &profile,
        predicted_cost: 1.0,
    };
    let err = assert_err!(repository.insert_prediction(&orphan).await);

    assert!(matches!(err, CustomError::DBError(_)));
    assert_eq!(prediction_count(&app.pool).await, 0);
}
