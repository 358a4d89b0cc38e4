use crate::commands::Commands;
use crate::error::Result as AppErrorResult;
use crate::tenant_commands::TenantCommands;
use crate::{AuthFailureInterceptor, Client, ClientError};

use sp_auth::{
    FileStorage, GuardState, Navigation, RecordingNavigator, Role, RouteGuard, Session,
    SessionStore, StaticHostname, Storage, TenantResolver,
};
use sp_config::Config;

use std::sync::Arc;

use serde_json::{Value, json};

/// Wired-up client plus the navigator that records where the user was sent.
pub struct App {
    client: Client,
    navigator: Arc<RecordingNavigator>,
}

impl App {
    /// Build from configuration; `server` and `host` override it.
    pub fn bootstrap(
        config: &Config,
        server: Option<&str>,
        host: Option<&str>,
    ) -> AppErrorResult<Self> {
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.storage_path()?));
        let hostname = StaticHostname::from(
            host.map(String::from)
                .or_else(|| config.tenant.hostname.clone()),
        );
        let base_url = server.unwrap_or(&config.api.base_url);

        Self::with_storage(storage, hostname, base_url, &config.api.login_endpoint)
    }

    pub fn with_storage(
        storage: Arc<dyn Storage>,
        hostname: StaticHostname,
        base_url: &str,
        login_endpoint: &str,
    ) -> AppErrorResult<Self> {
        let session = SessionStore::rehydrate(storage.clone())?;
        let tenant = TenantResolver::new(storage, hostname);
        let navigator = Arc::new(RecordingNavigator::new());

        let interceptor =
            AuthFailureInterceptor::new(session.clone(), tenant.clone(), navigator.clone());
        let client = Client::new(base_url, session, tenant)
            .with_login_endpoint(login_endpoint)
            .with_interceptor(Arc::new(interceptor));

        Ok(Self { client, navigator })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Last navigation requested while running a command.
    pub fn navigation(&self) -> Option<Navigation> {
        self.navigator.last()
    }

    pub async fn execute(&self, command: Commands) -> AppErrorResult<Value> {
        match command {
            Commands::Login { email, password } => {
                let session = self.client.login(&email, &password).await?;
                Ok(session_summary(&session))
            }

            Commands::Logout => {
                self.client.logout()?;
                Ok(json!({ "signedIn": false }))
            }

            Commands::Whoami => match self.client.session().current() {
                Some(session) => Ok(session_summary(&session)),
                None => Err(ClientError::not_authenticated().into()),
            },

            Commands::Tenant { action } => {
                let tenant = self.client.tenant();
                match action {
                    TenantCommands::Show => {}
                    TenantCommands::Set { slug } => tenant.set_tenant(&slug)?,
                    TenantCommands::Clear => tenant.clear()?,
                }
                Ok(serde_json::to_value(tenant.context()).map_err(ClientError::from)?)
            }

            Commands::SwitchRole { role } => {
                let role: Role = role.parse()?;
                let dashboard = self.client.switch_role(role)?;
                Ok(json!({ "activeRole": role, "dashboard": dashboard }))
            }

            Commands::ChangePassword { current, new } => {
                let session = self.client.change_password(&current, &new).await?;
                Ok(session_summary(&session))
            }

            Commands::Get { endpoint } => Ok(self.client.get_json(&endpoint).await?),

            Commands::Guard { roles } => {
                let mut guard = RouteGuard::from_names(&roles)?;
                let session = self.client.session().current();
                let state = guard.evaluate(session.as_ref(), self.navigator.as_ref());
                Ok(json!({
                    "allowedRoles": guard.allowed_roles(),
                    "state": guard_state_name(state),
                    "render": guard.should_render(),
                }))
            }
        }
    }
}

fn guard_state_name(state: GuardState) -> &'static str {
    match state {
        GuardState::Pending => "pending",
        GuardState::Authorized => "authorized",
        GuardState::Unauthorized => "unauthorized",
    }
}

/// Session as shown to the user; the token is never printed.
fn session_summary(session: &Session) -> Value {
    let home = session.home_role();
    json!({
        "user": session.user,
        "activeRole": session.active_role,
        "homeRole": home,
        "homeRoleLabel": home.map(|role| role.label()),
        "dashboard": home.map(|role| role.dashboard_path()),
    })
}
