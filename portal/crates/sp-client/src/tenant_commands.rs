use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum TenantCommands {
    /// Show the resolved tenant
    Show,
    /// Select a tenant explicitly
    Set {
        /// Tenant slug (e.g. escola1)
        slug: String,
    },
    /// Forget the persisted tenant
    Clear,
}
