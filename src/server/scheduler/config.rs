pub mod booking {
    /// Cron expression for releasing expired payment authorizations
    /// Runs every hour at the top of the hour
    pub const EXPIRY_CRON_EXPRESSION: &str = "0 0 * * * *";
}
