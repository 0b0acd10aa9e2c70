use tracing::{error, info, warn};

use super::{
    model::{Account, Claims, LoginForm, NewAccount, RegisterForm},
    repository::AccountRepository,
    session::SessionKeys,
};
use crate::{
    constants::SESSION_COOKIE,
    error::CustomError,
    req::Request,
    utils::{compare, encrypt},
};

pub struct AuthService {
    repository: AccountRepository,
    sessions: SessionKeys,
}

impl AuthService {
    pub fn new(repository: AccountRepository, sessions: SessionKeys) -> Self {
        AuthService {
            repository,
            sessions,
        }
    }

    pub async fn register(&self, form: RegisterForm) -> Result<i64, CustomError> {
        let new_account = NewAccount {
            name: form.name,
            email: form.email,
            password: encrypt(&form.password)?,
        };
        match self.repository.insert_account(&new_account).await {
            Ok(id) => {
                info!(account_id = id, "account registered");
                Ok(id)
            }
            Err(CustomError::EmailExists) => {
                warn!(email = %new_account.email, "email already registered");
                Err(CustomError::EmailExists)
            }
            Err(err) => {
                error!("Error insert account db: {:?}", err);
                Err(err)
            }
        }
    }

    /// Checks credentials and returns the account with a fresh session token.
    pub async fn login(&self, form: LoginForm) -> Result<(Account, String), CustomError> {
        let account = match self.repository.find_by_email(&form.email).await {
            Ok(account) => account,
            Err(CustomError::AccountNotFound) => {
                info!(email = %form.email, "login for unknown email");
                return Err(CustomError::InvalidCredentials);
            }
            Err(err) => {
                error!("Error account db: {:?}", err);
                return Err(err);
            }
        };

        if !compare(&form.password, &account.password) {
            info!(account_id = account.id, "wrong password");
            return Err(CustomError::InvalidCredentials);
        }

        let token = self.sessions.issue(&account)?;
        info!(account_id = account.id, "login succeeded");
        Ok((account, token))
    }

    /// Resolves the session cookie to a stored account.
    pub async fn authenticate(&self, request: &Request) -> Result<Account, CustomError> {
        let claims = self.claims(request)?;
        let account_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| CustomError::Unauthenticated)?;

        match self.repository.find_by_id(account_id).await {
            Ok(account) => Ok(account),
            Err(CustomError::AccountNotFound) => Err(CustomError::Unauthenticated),
            Err(err) => Err(err),
        }
    }

    /// Display name carried by a valid session token. Does not touch the
    /// account store, so it is only fit for navigation on public pages.
    pub fn session_name(&self, request: &Request) -> Option<String> {
        self.claims(request).ok().map(|claims| claims.name)
    }

    fn claims(&self, request: &Request) -> Result<Claims, CustomError> {
        let token = request
            .cookie(SESSION_COOKIE)
            .filter(|token| !token.is_empty())
            .ok_or(CustomError::Unauthenticated)?;

        self.sessions.verify(token).map_err(|err| {
            info!("session rejected: {}", err);
            CustomError::Unauthenticated
        })
    }

    pub async fn account_count(&self) -> Result<i64, CustomError> {
        self.repository.count().await
    }
}
