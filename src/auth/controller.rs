use std::sync::Arc;

use tracing::error;

use super::{
    model::{LoginForm, RegisterForm},
    service::AuthService,
};
use crate::{
    constants::{BAD_REQUEST, INTERNAL_ERROR, NOT_FOUND, OK_RESPONSE},
    error::CustomError,
    pages::{self, PageContext},
    req::Request,
    res::{Flash, FlashKind, Response},
};

pub struct AuthController {
    service: Arc<AuthService>,
}

impl AuthController {
    pub fn new(service: Arc<AuthService>) -> Self {
        AuthController { service }
    }

    /// Page context for public pages; shows the account name when signed in.
    fn context(&self, request: &Request) -> PageContext {
        let name = self.service.session_name(request);
        PageContext::from_request(request, name.as_deref())
    }

    pub async fn home(&self, request: &Request) -> Response {
        let ctx = self.context(request);
        ctx.respond(OK_RESPONSE, pages::home(&ctx))
    }

    pub async fn about(&self, request: &Request) -> Response {
        let ctx = self.context(request);
        ctx.respond(OK_RESPONSE, pages::about(&ctx))
    }

    pub async fn not_found(&self, request: &Request) -> Response {
        let ctx = self.context(request);
        ctx.respond(
            NOT_FOUND,
            pages::message(&ctx, "Not Found", "The page you requested does not exist."),
        )
    }

    pub async fn register_page(&self, request: &Request) -> Response {
        let ctx = self.context(request);
        ctx.respond(OK_RESPONSE, pages::register(&ctx))
    }

    pub async fn register(&self, request: &Request) -> Response {
        let form = match RegisterForm::from_form(&request.form()) {
            Ok(form) => form,
            Err(err) => {
                let ctx = PageContext::from_request(request, None)
                    .with_flash(Flash::new(FlashKind::Danger, &err.to_string()));
                return ctx.respond(BAD_REQUEST, pages::register(&ctx));
            }
        };

        match self.service.register(form).await {
            Ok(_) => Response::redirect("/login").with_flash(Flash::new(
                FlashKind::Success,
                "Account created successfully",
            )),
            Err(CustomError::EmailExists) => Response::redirect("/register")
                .with_flash(Flash::new(FlashKind::Danger, "Email already registered")),
            Err(_) => internal_error(request),
        }
    }

    pub async fn login_page(&self, request: &Request) -> Response {
        let ctx = self.context(request);
        ctx.respond(OK_RESPONSE, pages::login(&ctx))
    }

    pub async fn login(&self, request: &Request) -> Response {
        let form = match LoginForm::from_form(&request.form()) {
            Ok(form) => form,
            Err(_) => return invalid_credentials(),
        };

        match self.service.login(form).await {
            Ok((_, token)) => Response::redirect("/forecast")
                .with_session(&token)
                .with_flash(Flash::new(FlashKind::Success, "Login successful")),
            Err(CustomError::InvalidCredentials) => invalid_credentials(),
            Err(err) => {
                error!("Error login: {:?}", err);
                internal_error(request)
            }
        }
    }

    pub async fn logout(&self, _request: &Request) -> Response {
        Response::redirect("/")
            .clear_session()
            .with_flash(Flash::new(FlashKind::Info, "Logged out successfully"))
    }
}

fn invalid_credentials() -> Response {
    Response::redirect("/login").with_flash(Flash::new(FlashKind::Danger, "Invalid credentials"))
}

/// Generic failure page; details stay in the log.
pub fn internal_error(request: &Request) -> Response {
    let ctx = PageContext::from_request(request, None);
    ctx.respond(
        INTERNAL_ERROR,
        pages::message(
            &ctx,
            "Something went wrong",
            "We could not complete your request. Please try again later.",
        ),
    )
}
