use crate::client::Client;
use crate::config::Config;
use crate::dday::calculate_at;
use crate::error::StashError;
use crate::models::GraphQlOutcome;
use chrono::{Local, NaiveDateTime};
use log::{debug, error, info, warn};

/// Writes the birthday countdown into each performer's custom field.
///
/// Performers are updated one at a time, in the order the backend lists
/// them. The first `Err` stops the run; backend-reported update errors do not.
#[derive(Debug)]
pub struct Synchronizer<'a> {
    client: &'a Client,
    config: &'a Config,
}

impl<'a> Synchronizer<'a> {
    pub fn new(client: &'a Client, config: &'a Config) -> Self {
        Self { client, config }
    }

    pub async fn run(&self) -> Result<(), StashError> {
        let now = Local::now().naive_local();
        self.run_at(now).await
    }

    /// Run with a fixed "now", read once for every performer.
    pub async fn run_at(&self, now: NaiveDateTime) -> Result<(), StashError> {
        let field_name = self.config.field_name.as_str();
        if self.config.ensure_field {
            self.client.ensure_custom_field_exists(field_name).await?;
        } else {
            debug!("Skipping custom field check for '{}'", field_name);
        }

        let performers = self.client.fetch_all_performers().await?;
        info!("Syncing {} performers as of {}", performers.len(), now.date());

        for performer in &performers {
            let Some(dday) = calculate_at(performer.birthdate.as_deref(), now) else {
                debug!("Skipping {}: no usable birthdate", performer.name);
                continue;
            };
            let text = dday.to_string();
            info!("Updating {}: {}", performer.name, text);

            let outcome = self
                .client
                .update_performer_field(&performer.id, field_name, &text)
                .await?;
            match outcome {
                GraphQlOutcome::Data(_) => {}
                GraphQlOutcome::Partial { errors, .. } => {
                    warn!(
                        "Update for {} (id {}) completed with {} error(s)",
                        performer.name,
                        performer.id,
                        errors.len()
                    );
                }
                GraphQlOutcome::Failed(errors) => {
                    error!(
                        "Update for {} (id {}) failed with {} error(s)",
                        performer.name,
                        performer.id,
                        errors.len()
                    );
                }
            }
        }

        info!("Update complete!");
        Ok(())
    }
}
