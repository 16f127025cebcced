use crate::config::Config;
use crate::error::{ApiError, StashError};
use crate::models::{
    AllCustomFields, AllPerformers, CreatedCustomField, CustomField, CustomFieldCreateInput,
    CustomFieldCreated, CustomFieldEntity, CustomFieldType, GraphQlOutcome, GraphQlRequest,
    Performer, PerformerUpdateInput, PerformerUpdated, parse_response,
};
use crate::queries;
use log::{debug, error, info};
use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const API_KEY_HEADER: HeaderName = HeaderName::from_static("apikey");

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    endpoint: String,
}

impl Client {
    /// Create a client for the endpoint and credentials in `config`.
    pub fn new(config: &Config) -> Result<Self, StashError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &config.api_key {
            let mut value = HeaderValue::from_str(key).map_err(|_| StashError::InvalidApiKey)?;
            value.set_sensitive(true);
            headers.insert(API_KEY_HEADER, value);
        }

        let mut builder = HttpClient::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let api_key_header = API_KEY_HEADER;
        info!(
            "Initialized Stash client for {} ({} header)",
            config.endpoint,
            if config.api_key.is_some() {
                api_key_header.as_str()
            } else {
                "no auth"
            }
        );
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Fetch every performer, in the order the backend returns them.
    pub async fn fetch_all_performers(&self) -> Result<Vec<Performer>, StashError> {
        let outcome: GraphQlOutcome<AllPerformers> = self
            .execute("allPerformers", queries::ALL_PERFORMERS, json!({}))
            .await?;
        let performers = outcome.require_data("allPerformers")?.all_performers;
        debug!("Fetched {} performers", performers.len());
        Ok(performers)
    }

    /// Fetch all custom field definitions.
    pub async fn fetch_custom_field_definitions(&self) -> Result<Vec<CustomField>, StashError> {
        let outcome: GraphQlOutcome<AllCustomFields> = self
            .execute("allCustomFields", queries::ALL_CUSTOM_FIELDS, json!({}))
            .await?;
        Ok(outcome.require_data("allCustomFields")?.all_custom_fields)
    }

    /// Create a STRING performer field. Does not check for an existing one.
    pub async fn create_custom_field_definition(
        &self,
        name: &str,
    ) -> Result<CreatedCustomField, StashError> {
        let input = CustomFieldCreateInput {
            name,
            field_type: CustomFieldType::String,
            entity: CustomFieldEntity::Performer,
        };
        let outcome: GraphQlOutcome<CustomFieldCreated> = self
            .execute(
                "customFieldCreate",
                queries::CUSTOM_FIELD_CREATE,
                json!({ "input": input }),
            )
            .await?;
        Ok(outcome.require_data("customFieldCreate")?.custom_field_create)
    }

    /// Create the field unless a definition with that name already exists.
    pub async fn ensure_custom_field_exists(
        &self,
        name: &str,
    ) -> Result<CreatedCustomField, StashError> {
        let fields = self.fetch_custom_field_definitions().await?;
        if let Some(field) = fields.into_iter().find(|f| f.name == name) {
            info!("Custom field '{}' already exists.", name);
            return Ok(CreatedCustomField {
                id: field.id,
                name: field.name,
            });
        }
        info!("Creating custom field '{}'...", name);
        self.create_custom_field_definition(name).await
    }

    /// Set one custom field on one performer, leaving other fields untouched.
    pub async fn update_performer_field(
        &self,
        performer_id: &str,
        field_name: &str,
        value: &str,
    ) -> Result<GraphQlOutcome<PerformerUpdated>, StashError> {
        let input = PerformerUpdateInput::single_field(performer_id, field_name, value);
        self.execute(
            "performerUpdate",
            queries::PERFORMER_UPDATE,
            json!({ "input": input }),
        )
        .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &str,
        variables: Value,
    ) -> Result<GraphQlOutcome<T>, StashError> {
        let request = GraphQlRequest { query, variables };
        debug!("POST {} ({})", self.endpoint, operation);
        let response = self.http.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        debug!("Received status {}", status);
        let body = response.text().await?;

        // Error envelopes are honoured whatever the status; bare error pages are not.
        let outcome = match parse_response::<T>(&body) {
            Ok(outcome) if status.is_success() || is_envelope(&outcome) => outcome,
            Ok(_) => return Err(self.handle_status(status).into()),
            Err(err) if status.is_success() => return Err(err),
            Err(_) => return Err(self.handle_status(status).into()),
        };
        if !outcome.errors().is_empty() {
            let messages: Vec<String> = outcome.errors().iter().map(|e| e.to_string()).collect();
            error!("GraphQL errors in {}: {}", operation, messages.join("; "));
        }
        Ok(outcome)
    }

    fn handle_status(&self, status: StatusCode) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            _ => ApiError::UnexpectedStatus(status),
        }
    }
}

fn is_envelope<T>(outcome: &GraphQlOutcome<T>) -> bool {
    outcome.data().is_some() || !outcome.errors().is_empty()
}
