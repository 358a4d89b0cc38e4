use crate::tenant_commands::TenantCommands;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and persist the session
    Login {
        #[arg(long)]
        email: String,
        /// Password (falls back to SP_PASSWORD)
        #[arg(long, env = "SP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Tenant operations
    Tenant {
        #[command(subcommand)]
        action: TenantCommands,
    },

    /// Make another of your roles active
    SwitchRole {
        /// ADMIN, PROFESSOR, RESPONSAVEL or PLATFORM_ADMIN
        role: String,
    },

    /// Replace your password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },

    /// GET an API endpoint with the current session and tenant
    Get {
        /// Path relative to the API base URL (e.g. /api/v1/alunos)
        endpoint: String,
    },

    /// Check whether the session may open a page restricted to the given roles
    Guard {
        #[arg(required = true)]
        roles: Vec<String>,
    },
}
