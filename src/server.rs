use crate::auth::controller::AuthController;
use crate::constants::{BAD_REQUEST, PAYLOAD_TOO_LARGE};
use crate::error::CustomError;
use crate::forecast::controller::ForecastController;
use crate::pages::{self, PageContext};
use crate::req::Method::{GET, POST};
use crate::req::Request;
use crate::res::Response;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot::Receiver;
use tracing::{debug, info, warn};

pub struct Server {
    addr: String,
    auth_ctl: Arc<AuthController>,
    forecast_ctl: Arc<ForecastController>,
}

impl Server {
    pub fn new(
        addr: String,
        auth_ctl: Arc<AuthController>,
        forecast_ctl: Arc<ForecastController>,
    ) -> Self {
        Self {
            addr,
            auth_ctl,
            forecast_ctl,
        }
    }

    pub async fn start(&self, mut shutdown_rx: Receiver<()>) -> Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("failed to bind {}", self.addr))?;
        info!("Server running on http://{}", self.addr);

        loop {
            tokio::select! {
                conn = listener.accept() => {
                    let (mut stream, peer) = match conn {
                        Ok(conn) => conn,
                        Err(e) => {
                            warn!("Accept error: {}", e);
                            continue;
                        }
                    };

                    let auth_ctl = Arc::clone(&self.auth_ctl);
                    let forecast_ctl = Arc::clone(&self.forecast_ctl);

                    tokio::spawn(async move {
                        let (reader, writer) = stream.split();
                        if let Err(e) = Self::handle_client(reader, writer, &auth_ctl, &forecast_ctl).await {
                            warn!(%peer, "Connection error: {:#}", e);
                        }
                    });
                }
                // Shutdown signal check
                _ = &mut shutdown_rx => {
                    info!("Shutting down server...");
                    break;
                }
            }
        }
        Ok(())
    }

    pub async fn handle_client<Reader, Writer>(
        reader: Reader,
        mut writer: Writer,
        auth_ctl: &AuthController,
        forecast_ctl: &ForecastController,
    ) -> Result<()>
    where
        Reader: AsyncRead + Unpin,
        Writer: AsyncWrite + Unpin,
    {
        let response = match Request::new(reader).await {
            Ok(request) => {
                debug!(path = %request.path, "request");
                Self::route(&request, auth_ctl, forecast_ctl).await
            }
            Err(CustomError::ConnectionError(e)) => {
                return Err(e).context("Failed to read request");
            }
            Err(CustomError::PayloadTooLarge) => rejection(PAYLOAD_TOO_LARGE, "Request too large"),
            Err(e) => {
                debug!("Rejected request: {}", e);
                rejection(BAD_REQUEST, "Bad Request")
            }
        };

        writer
            .write_all(response.to_http().as_bytes())
            .await
            .context("Failed to write")?;
        writer.flush().await.context("Failed to flush")
    }

    pub async fn route(
        request: &Request,
        auth_ctl: &AuthController,
        forecast_ctl: &ForecastController,
    ) -> Response {
        match (&request.method, request.path.as_str()) {
            (GET, "/") => auth_ctl.home(request).await,
            (GET, "/register") => auth_ctl.register_page(request).await,
            (POST, "/register") => auth_ctl.register(request).await,
            (GET, "/login") => auth_ctl.login_page(request).await,
            (POST, "/login") => auth_ctl.login(request).await,
            (GET, "/logout") => auth_ctl.logout(request).await,
            (GET, "/forecast") => forecast_ctl.form_page(request).await,
            (POST, "/forecast") => forecast_ctl.submit(request).await,
            (GET, "/history") => forecast_ctl.history(request).await,
            (GET, "/about") => auth_ctl.about(request).await,
            _ => auth_ctl.not_found(request).await,
        }
    }
}

fn rejection(status_line: &'static str, title: &str) -> Response {
    let ctx = PageContext::default();
    ctx.respond(
        status_line,
        pages::message(&ctx, title, "The request could not be processed."),
    )
}
