use std::sync::Arc;

use tracing::error;

use super::{model::Profile, service::ForecastService};
use crate::{
    auth::{controller::internal_error, model::Account, service::AuthService},
    constants::{BAD_REQUEST, OK_RESPONSE, UNPROCESSABLE},
    error::CustomError,
    pages::{self, PageContext},
    req::Request,
    res::{Flash, FlashKind, Response},
};

const FORECAST_FAILED: &str =
    "We could not produce a forecast for this profile. Please check your selections and try again.";

pub struct ForecastController {
    auth: Arc<AuthService>,
    service: ForecastService,
}

impl ForecastController {
    pub fn new(auth: Arc<AuthService>, service: ForecastService) -> Self {
        ForecastController { auth, service }
    }

    /// Resolves the session or produces the redirect to the login page.
    async fn require_account(&self, request: &Request, page: &str) -> Result<Account, Response> {
        match self.auth.authenticate(request).await {
            Ok(account) => Ok(account),
            Err(CustomError::Unauthenticated) => Err(Response::redirect("/login").with_flash(
                Flash::new(
                    FlashKind::Warning,
                    &format!("Login required to access {}", page),
                ),
            )),
            Err(err) => {
                error!("Error resolving session: {:?}", err);
                Err(internal_error(request))
            }
        }
    }

    pub async fn form_page(&self, request: &Request) -> Response {
        let account = match self.require_account(request, "forecast").await {
            Ok(account) => account,
            Err(response) => return response,
        };

        let last = match self.service.latest(&account).await {
            Ok(last) => last,
            Err(err) => {
                error!("Error loading last forecast: {:?}", err);
                None
            }
        };

        let ctx = PageContext::from_request(request, Some(&account.name));
        ctx.respond(
            OK_RESPONSE,
            pages::forecast(
                &ctx,
                self.service.profile_options(),
                last.as_ref().map(|record| record.profile()).as_ref(),
                None,
                last.as_ref(),
            ),
        )
    }

    pub async fn submit(&self, request: &Request) -> Response {
        let account = match self.require_account(request, "forecast").await {
            Ok(account) => account,
            Err(response) => return response,
        };
        let ctx = PageContext::from_request(request, Some(&account.name));
        let options = self.service.profile_options();

        let profile = match Profile::from_form(&request.form()) {
            Ok(profile) => profile,
            Err(err) => {
                let ctx = ctx.with_flash(Flash::new(FlashKind::Danger, &err.to_string()));
                return ctx.respond(BAD_REQUEST, pages::forecast(&ctx, options, None, None, None));
            }
        };

        match self.service.forecast(&account, &profile).await {
            Ok(record) => ctx.respond(
                OK_RESPONSE,
                pages::forecast(&ctx, options, Some(&profile), Some(record.predicted_cost), None),
            ),
            Err(CustomError::DBError(_)) => internal_error(request),
            Err(_) => {
                let ctx = ctx.with_flash(Flash::new(FlashKind::Danger, FORECAST_FAILED));
                ctx.respond(
                    UNPROCESSABLE,
                    pages::forecast(&ctx, options, Some(&profile), None, None),
                )
            }
        }
    }

    pub async fn history(&self, request: &Request) -> Response {
        let account = match self.require_account(request, "history").await {
            Ok(account) => account,
            Err(response) => return response,
        };

        match self.service.history(&account).await {
            Ok(records) => {
                let ctx = PageContext::from_request(request, Some(&account.name));
                ctx.respond(OK_RESPONSE, pages::history(&ctx, &records))
            }
            Err(err) => {
                error!("Error loading history: {:?}", err);
                internal_error(request)
            }
        }
    }
}
